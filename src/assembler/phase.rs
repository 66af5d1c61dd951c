//! Pipeline phases, shared by progress reporting and error classification

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// Configuration and rule validation, before any I/O
    Configuration,
    Filter,
    Merge,
    IntermediateArchive,
    FinalArchive,
}

impl Phase {
    /// Stages an assembly run walks through, in order
    pub const PIPELINE: [Phase; 4] = [
        Phase::Filter,
        Phase::IntermediateArchive,
        Phase::Merge,
        Phase::FinalArchive,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Filter => "filter",
            Self::Merge => "merge",
            Self::IntermediateArchive => "intermediate-archive",
            Self::FinalArchive => "final-archive",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
