//! Domain models for plugpack
//!
//! This module contains the value types the packaging pipeline passes around: resolved
//! artifacts, filter rules, content sources, archive entries and the assembly result.
//! Artifacts and rules are immutable once built.

pub mod artifact;
pub mod entry;
pub mod result;
pub mod rule;
pub mod source;

pub use artifact::{Artifact, ArtifactId};
pub use entry::{ArchiveEntry, Collision, EntryContent, EntryOrigin};
pub use result::{AssemblyResult, EmbeddedEntry};
pub use rule::{FilterRule, FilterRules, RuleKind, Selector, SelectorPart};
pub use source::{ContentSource, PathFilter, SourceRoot};

/// Archive prefix for loose compiled output
pub const CLASSES_PREFIX: &str = "classes/";

/// Archive prefix for dependency artifacts and the archived classes jar
pub const LIB_PREFIX: &str = "lib/";
