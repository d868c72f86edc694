// ABOUTME: Build tool settings.
// ABOUTME: Names the program and the per-environment script it runs.

use super::Environment;
use serde::Deserialize;

pub const DEFAULT_BUILD_PROGRAM: &str = "npm";
pub const DEFAULT_BUILD_SCRIPT: &str = "build:prod";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BuildSettings {
    #[serde(default = "default_program")]
    pub program: String,

    #[serde(default = "default_script")]
    pub test_script: String,

    #[serde(default = "default_script")]
    pub production_script: String,
}

fn default_program() -> String {
    DEFAULT_BUILD_PROGRAM.to_string()
}

fn default_script() -> String {
    DEFAULT_BUILD_SCRIPT.to_string()
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            program: default_program(),
            test_script: default_script(),
            production_script: default_script(),
        }
    }
}

impl BuildSettings {
    /// Script name passed to `<program> run` for the given environment.
    ///
    /// Both environments default to `build:prod`.
    pub fn script_for(&self, environment: Environment) -> &str {
        match environment {
            Environment::Test => &self.test_script,
            Environment::Production => &self.production_script,
        }
    }
}
