// ABOUTME: Deployment settings and the resolved per-run configuration.
// ABOUTME: Handles the optional webdeploy.yml file and its built-in defaults.

mod build;
mod deploy;
mod environment;

pub use build::{BuildSettings, DEFAULT_BUILD_PROGRAM, DEFAULT_BUILD_SCRIPT};
pub use deploy::{DeployConfig, RunOptions, remote_path};
pub use environment::Environment;

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "webdeploy.yml";
pub const CONFIG_FILENAME_ALT: &str = "webdeploy.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".webdeploy/config.yml";

pub const DEFAULT_HOST: &str = "39.105.192.254";
pub const DEFAULT_USER: &str = "FEDAdmin";
pub const DEFAULT_REMOTE_PREFIX: &str = "/home/FEDAdmin/www";
pub const DEFAULT_DIST_DIR: &str = "dist";
pub const DEFAULT_ARCHIVE_NAME: &str = "archive.zip";

/// Project-level deployment settings.
///
/// Every field is optional in the file; a missing file yields [`Settings::default`].
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_user")]
    pub user: String,

    #[serde(default = "default_remote_prefix")]
    pub remote_prefix: String,

    #[serde(default = "default_dist_dir")]
    pub dist_dir: PathBuf,

    #[serde(default = "default_archive_name")]
    pub archive_name: String,

    #[serde(default)]
    pub build: BuildSettings,

    #[serde(default = "default_trust_first_connection")]
    pub trust_first_connection: bool,

    #[serde(default)]
    pub known_hosts: Option<PathBuf>,

    #[serde(default = "default_command_timeout", with = "humantime_serde")]
    pub command_timeout: Duration,

    #[serde(default = "default_transfer_timeout", with = "humantime_serde")]
    pub transfer_timeout: Duration,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    22
}

fn default_user() -> String {
    DEFAULT_USER.to_string()
}

fn default_remote_prefix() -> String {
    DEFAULT_REMOTE_PREFIX.to_string()
}

fn default_dist_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DIST_DIR)
}

fn default_archive_name() -> String {
    DEFAULT_ARCHIVE_NAME.to_string()
}

fn default_trust_first_connection() -> bool {
    true
}

fn default_command_timeout() -> Duration {
    Duration::from_secs(300)
}

fn default_transfer_timeout() -> Duration {
    Duration::from_secs(600)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            user: default_user(),
            remote_prefix: default_remote_prefix(),
            dist_dir: default_dist_dir(),
            archive_name: default_archive_name(),
            build: BuildSettings::default(),
            trust_first_connection: default_trust_first_connection(),
            known_hosts: None,
            command_timeout: default_command_timeout(),
            transfer_timeout: default_transfer_timeout(),
        }
    }
}

impl Settings {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document means "all defaults"
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Settings = serde_yaml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load the first settings file found in `dir`, or the defaults if there is none.
    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                tracing::debug!("Loading settings from {}", path.display());
                return Self::load(path);
            }
        }

        Ok(Self::default())
    }

    fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(Error::InvalidConfig("host cannot be empty".to_string()));
        }
        if self.archive_name.is_empty() || self.archive_name.contains('/') {
            return Err(Error::InvalidConfig(format!(
                "archive_name must be a plain file name, got {:?}",
                self.archive_name
            )));
        }
        Ok(())
    }
}
