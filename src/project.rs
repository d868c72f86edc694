// ABOUTME: Project metadata read from package.json.
// ABOUTME: Supplies the project name that names the remote target directory.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

pub const MANIFEST_FILENAME: &str = "package.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectManifest {
    pub name: String,
}

impl ProjectManifest {
    pub fn from_json(json: &str) -> Result<Self> {
        let manifest: ProjectManifest =
            serde_json::from_str(json).map_err(|e| Error::InvalidManifest(e.to_string()))?;

        let name = manifest.name.trim();
        if name.is_empty() {
            return Err(Error::InvalidManifest("name cannot be empty".to_string()));
        }
        if name.contains('\n') {
            return Err(Error::InvalidManifest(
                "name cannot contain a newline".to_string(),
            ));
        }
        // Scoped names keep their slash, but must stay under the remote prefix
        if name
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..")
        {
            return Err(Error::InvalidManifest(format!(
                "name {:?} is not usable as a directory name",
                name
            )));
        }

        Ok(Self {
            name: name.to_string(),
        })
    }

    /// Read `package.json` from the project directory.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let path = project_dir.join(MANIFEST_FILENAME);
        if !path.is_file() {
            return Err(Error::ManifestNotFound(project_dir.to_path_buf()));
        }
        let content = std::fs::read_to_string(&path)?;
        Self::from_json(&content)
    }
}
