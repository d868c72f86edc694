// ABOUTME: Test support utilities.
// ABOUTME: Builds deploy configurations rooted in temporary directories, plus the SSH server helper.

// Each test binary only uses some of these, so allow dead_code.
#[allow(dead_code)]
pub mod ssh_container;

use std::path::Path;
use webdeploy::config::{DeployConfig, RunOptions, Settings};
use webdeploy::project::ProjectManifest;

/// Config for `project` whose remote prefix is a local directory.
#[allow(dead_code)]
pub fn local_config(project_dir: &Path, remote_prefix: &Path, project: &str) -> DeployConfig {
    let settings = Settings {
        remote_prefix: remote_prefix.to_string_lossy().into_owned(),
        ..Default::default()
    };
    let manifest = ProjectManifest {
        name: project.to_string(),
    };
    DeployConfig::new(settings, &manifest, project_dir, RunOptions::default())
}

/// Config with default settings and the given command-line options.
#[allow(dead_code)]
pub fn config_with(options: RunOptions) -> DeployConfig {
    let manifest = ProjectManifest {
        name: "portal".to_string(),
    };
    DeployConfig::new(Settings::default(), &manifest, Path::new("/work"), options)
}
