//! Plugpack - plugin archive packager
//!
//! Assembles a deployable plugin archive from a resources directory, the module's compiled
//! output and the runtime dependencies that survive filtering.
//!
//! The pipeline:
//! - [`filter`] reduces resolved candidates to the embedded libraries
//! - [`layers`] merges content sources into one ordered entry list
//! - [`assembler`] drives both and writes the archive through an [`archive::ArchiveWriter`]

pub mod archive;
pub mod assembler;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod filter;
pub mod hash;
pub mod layers;
pub mod progress;
