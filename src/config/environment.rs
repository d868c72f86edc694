// ABOUTME: Target environment selected on the command line.
// ABOUTME: Carried through the run and reported, but does not change host or build script.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Test,
    Production,
}

impl Environment {
    /// Map the `--pro` flag to an environment.
    pub fn from_flag(production: bool) -> Self {
        if production {
            Environment::Production
        } else {
            Environment::Test
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Test => "test",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_selects_environment() {
        assert_eq!(Environment::from_flag(true), Environment::Production);
        assert_eq!(Environment::from_flag(false), Environment::Test);
    }

    #[test]
    fn display_is_lowercase() {
        assert_eq!(Environment::Production.to_string(), "production");
        assert_eq!(Environment::Test.to_string(), "test");
    }
}
