// ABOUTME: Identifies each pipeline step and its progress banner.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Build,
    Archive,
    ClearRemote,
    Upload,
    Unpack,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::Build,
        Step::Archive,
        Step::ClearRemote,
        Step::Upload,
        Step::Unpack,
    ];

    /// 1-based position in the pipeline.
    pub fn number(&self) -> u8 {
        match self {
            Step::Build => 1,
            Step::Archive => 2,
            Step::ClearRemote => 3,
            Step::Upload => 4,
            Step::Unpack => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Step::Build => "Building project",
            Step::Archive => "Packing build output into a zip archive",
            Step::ClearRemote => "Clearing remote target directory",
            Step::Upload => "Uploading archive",
            Step::Unpack => "Unpacking archive on remote host",
        }
    }

    pub fn banner(&self) -> String {
        format!("[{}/{}] {}...", self.number(), Self::ALL.len(), self.label())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
