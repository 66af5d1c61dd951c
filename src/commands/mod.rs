//! Command implementations for Plugpack CLI

pub mod completions;
pub mod helpers;
pub mod package;
pub mod select;
pub mod version;
