// ABOUTME: Integration tests for configuration loading.
// ABOUTME: Covers settings discovery, package.json metadata and remote path derivation.

use std::fs;
use std::path::Path;
use std::time::Duration;
use webdeploy::config::*;
use webdeploy::error::Error;

fn write_manifest(dir: &Path, name: &str) {
    fs::write(
        dir.join("package.json"),
        format!(r#"{{"name": "{}", "private": true}}"#, name),
    )
    .unwrap();
}

mod loading {
    use super::*;

    #[test]
    fn defaults_without_settings_file() {
        let temp = tempfile::tempdir().unwrap();
        write_manifest(temp.path(), "admin-portal");

        let config = DeployConfig::load(temp.path(), RunOptions::default()).unwrap();

        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.user, DEFAULT_USER);
        assert_eq!(config.remote_path, "/home/FEDAdmin/www/admin-portal");
        assert_eq!(config.dist_dir, temp.path().join("dist"));
        assert_eq!(config.archive_path(), temp.path().join("dist/archive.zip"));
    }

    #[test]
    fn settings_file_overrides_defaults() {
        let temp = tempfile::tempdir().unwrap();
        write_manifest(temp.path(), "admin-portal");
        fs::write(
            temp.path().join("webdeploy.yml"),
            r#"
host: static.example.com
port: 2222
user: deploy
remote_prefix: /srv/www
dist_dir: build
archive_name: site.zip
build:
  program: pnpm
  production_script: build
trust_first_connection: false
command_timeout: 30s
transfer_timeout: 2m
"#,
        )
        .unwrap();

        let config = DeployConfig::load(temp.path(), RunOptions::default()).unwrap();

        assert_eq!(config.host, "static.example.com");
        assert_eq!(config.port, 2222);
        assert_eq!(config.user, "deploy");
        assert_eq!(config.remote_path, "/srv/www/admin-portal");
        assert_eq!(config.archive_path(), temp.path().join("build/site.zip"));
        assert_eq!(config.build.program, "pnpm");
        assert_eq!(config.build.script_for(Environment::Production), "build");
        assert_eq!(config.build.script_for(Environment::Test), DEFAULT_BUILD_SCRIPT);
        assert!(!config.trust_first_connection);
        assert_eq!(config.command_timeout, Duration::from_secs(30));
        assert_eq!(config.transfer_timeout, Duration::from_secs(120));
    }

    #[test]
    fn settings_in_dot_directory_are_found() {
        let temp = tempfile::tempdir().unwrap();
        write_manifest(temp.path(), "portal");
        fs::create_dir_all(temp.path().join(".webdeploy")).unwrap();
        fs::write(
            temp.path().join(".webdeploy/config.yml"),
            "remote_prefix: /var/www\n",
        )
        .unwrap();

        let config = DeployConfig::load(temp.path(), RunOptions::default()).unwrap();
        assert_eq!(config.remote_path, "/var/www/portal");
    }

    #[test]
    fn malformed_settings_are_an_error() {
        let temp = tempfile::tempdir().unwrap();
        write_manifest(temp.path(), "portal");
        fs::write(temp.path().join("webdeploy.yml"), "port: not-a-number\n").unwrap();

        let err = DeployConfig::load(temp.path(), RunOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Yaml(_)));
    }

    #[test]
    fn missing_manifest_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let err = DeployConfig::load(temp.path(), RunOptions::default()).unwrap_err();
        assert!(matches!(err, Error::ManifestNotFound(_)));
    }
}

mod remote_path_derivation {
    use super::*;

    #[test]
    fn always_prefix_slash_project_name() {
        for name in ["portal", "admin-web", "@acme/site"] {
            let temp = tempfile::tempdir().unwrap();
            write_manifest(temp.path(), name);
            let config = DeployConfig::load(temp.path(), RunOptions::default()).unwrap();
            assert_eq!(
                config.remote_path,
                format!("{}/{}", DEFAULT_REMOTE_PREFIX, name)
            );
        }
    }

    #[test]
    fn environment_does_not_change_target() {
        let temp = tempfile::tempdir().unwrap();
        write_manifest(temp.path(), "portal");

        let test = DeployConfig::load(temp.path(), RunOptions::default()).unwrap();
        let production = DeployConfig::load(
            temp.path(),
            RunOptions {
                environment: Environment::Production,
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(test.host, production.host);
        assert_eq!(test.remote_path, production.remote_path);
        assert_eq!(
            test.build.script_for(test.environment),
            production.build.script_for(production.environment)
        );
    }
}
