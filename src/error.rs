// ABOUTME: Application-wide error types for webdeploy.
// ABOUTME: One variant family per deployment step, all surfaced the same way at the top level.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("package.json not found in {0}")]
    ManifestNotFound(PathBuf),

    #[error("invalid package.json: {0}")]
    InvalidManifest(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to start build command `{command}`: {source}")]
    BuildSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("build command `{command}` exited with {}: {stderr}", exit_label(.code))]
    BuildFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("build output directory not found: {0}")]
    DistNotFound(PathBuf),

    #[error("build output directory is empty: {0}")]
    EmptyDist(PathBuf),

    #[error("failed to create archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("archive task aborted: {0}")]
    ArchiveTask(String),

    #[error("SSH error: {0}")]
    Ssh(#[from] crate::ssh::Error),

    #[error("upload failed: {0}")]
    Transfer(#[source] crate::ssh::Error),

    #[error("remote command `{command}` exited with {exit_code}: {stderr}")]
    RemoteCommand {
        command: String,
        exit_code: u32,
        stderr: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;
