//! Progress reporting for assembly runs
//!
//! The assembler reports each pipeline stage through the [`ProgressReporter`] trait:
//! - Interactive progress bar using indicatif
//! - Silent reporter for `--quiet`, `--json` and library callers

use indicatif::{ProgressBar, ProgressStyle};

use crate::assembler::Phase;

/// Receives stage transitions from the assembler
pub trait ProgressReporter {
    /// A pipeline stage is starting
    fn start_stage(&mut self, phase: Phase);

    /// The final archive is about to be written with `total` entries
    fn entries_ready(&mut self, total: usize);

    /// The run succeeded
    fn finish(&mut self);

    /// The run failed
    fn abandon(&mut self);
}

/// Progress bar over the pipeline stages
pub struct InteractiveProgressReporter {
    stage_pb: ProgressBar,
    started: bool,
}

impl InteractiveProgressReporter {
    pub fn new() -> Self {
        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let stage_pb = ProgressBar::new(Phase::PIPELINE.len() as u64);
        stage_pb.set_style(style);

        Self {
            stage_pb,
            started: false,
        }
    }
}

impl Default for InteractiveProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for InteractiveProgressReporter {
    fn start_stage(&mut self, phase: Phase) {
        if self.started {
            self.stage_pb.inc(1);
        }
        self.started = true;
        self.stage_pb.set_message(phase.label());
    }

    fn entries_ready(&mut self, total: usize) {
        self.stage_pb
            .set_message(format!("{} ({total} entries)", Phase::FinalArchive.label()));
    }

    fn finish(&mut self) {
        self.stage_pb.set_position(Phase::PIPELINE.len() as u64);
        self.stage_pb.finish_and_clear();
    }

    fn abandon(&mut self) {
        self.stage_pb.abandon();
    }
}

/// No-op reporter
#[derive(Debug, Default)]
pub struct SilentProgressReporter;

impl ProgressReporter for SilentProgressReporter {
    fn start_stage(&mut self, _phase: Phase) {}

    fn entries_ready(&mut self, _total: usize) {}

    fn finish(&mut self) {}

    fn abandon(&mut self) {}
}
