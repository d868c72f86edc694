// ABOUTME: Packs the build output directory into a single zip archive.
// ABOUTME: Entries are relative to the directory root and deflated at the highest level.

use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const COMPRESSION_LEVEL: i32 = 9;

/// What ended up in a finished archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub path: PathBuf,
    pub files: usize,
    pub directories: usize,
    pub bytes: u64,
}

#[derive(Debug)]
enum Entry {
    Directory { name: String },
    File { name: String, path: PathBuf, mode: u32, len: u64 },
}

/// Zip every file under `source_dir` into `archive_path`.
///
/// If `archive_path` lies inside `source_dir` it is left out of the archive.
/// A tree without a single file is refused before anything is written.
pub fn create_archive(source_dir: &Path, archive_path: &Path) -> Result<ArchiveSummary> {
    if !source_dir.is_dir() {
        return Err(Error::DistNotFound(source_dir.to_path_buf()));
    }

    let mut entries = Vec::new();
    collect_entries(source_dir, "", archive_path, &mut entries)?;

    // unzip rejects an archive with no files
    if !entries.iter().any(|e| matches!(e, Entry::File { .. })) {
        return Err(Error::EmptyDist(source_dir.to_path_buf()));
    }

    let file = File::create(archive_path)?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let base = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(COMPRESSION_LEVEL));

    let mut summary = ArchiveSummary {
        path: archive_path.to_path_buf(),
        files: 0,
        directories: 0,
        bytes: 0,
    };

    for entry in entries {
        match entry {
            Entry::Directory { name } => {
                zip.add_directory(name, base.unix_permissions(0o755))?;
                summary.directories += 1;
            }
            Entry::File {
                name,
                path,
                mode,
                len,
            } => {
                let options = base
                    .unix_permissions(mode)
                    .large_file(len >= u64::from(u32::MAX));
                zip.start_file(name, options)?;
                let mut source = File::open(&path)?;
                summary.bytes += io::copy(&mut source, &mut zip)?;
                summary.files += 1;
            }
        }
    }

    let mut writer = zip.finish()?;
    writer.flush()?;

    tracing::debug!(
        "Archived {} files ({} bytes) into {}",
        summary.files,
        summary.bytes,
        archive_path.display()
    );
    Ok(summary)
}

/// Run [`create_archive`] on the blocking thread pool.
pub async fn create_archive_async(source_dir: &Path, archive_path: &Path) -> Result<ArchiveSummary> {
    let source_dir = source_dir.to_path_buf();
    let archive_path = archive_path.to_path_buf();
    tokio::task::spawn_blocking(move || create_archive(&source_dir, &archive_path))
        .await
        .map_err(|e| Error::ArchiveTask(e.to_string()))?
}

/// Depth-first walk in name order so archives are reproducible.
fn collect_entries(
    dir: &Path,
    prefix: &str,
    skip: &Path,
    entries: &mut Vec<Entry>,
) -> Result<()> {
    let mut children = fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
    children.sort_by_key(|child| child.file_name());

    for child in children {
        let path = child.path();
        if path == skip {
            continue;
        }

        let name = format!("{}{}", prefix, child.file_name().to_string_lossy());
        let file_type = child.file_type()?;

        // Symlinks are followed for files only; linked directories could cycle
        let metadata = if file_type.is_symlink() {
            match fs::metadata(&path) {
                Ok(meta) if meta.is_file() => meta,
                _ => {
                    tracing::warn!("Skipping symlink {}", path.display());
                    continue;
                }
            }
        } else {
            child.metadata()?
        };

        if metadata.is_dir() {
            let dir_name = format!("{}/", name);
            entries.push(Entry::Directory {
                name: dir_name.clone(),
            });
            collect_entries(&path, &dir_name, skip, entries)?;
        } else if metadata.is_file() {
            entries.push(Entry::File {
                name,
                path,
                mode: file_mode(&metadata),
                len: metadata.len(),
            });
        }
    }
    Ok(())
}

#[cfg(unix)]
fn file_mode(metadata: &fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o777
}

#[cfg(not(unix))]
fn file_mode(_metadata: &fs::Metadata) -> u32 {
    0o644
}
