use std::path::Path;

use crate::config::{SyncGroup, TreePair};
use crate::error::Error;
use crate::sync::stats::{SyncDirection, SyncOutcome, SyncStats};

/// Trait for reporting sync progress.
///
/// The CLI implements it with console output. All methods have default no-op implementations.
pub trait SyncReporter {
    fn on_session_start(&self, _nas_root: &Path, _dry_run: bool) {}
    fn on_group_disabled(&self, _group: &SyncGroup) {}
    fn on_group_start(&self, _group: &SyncGroup, _direction: SyncDirection) {}
    fn on_tree_start(&self, _tree: &TreePair) {}
    fn on_outcome(&self, _path: &Path, _outcome: SyncOutcome) {}
    fn on_error(&self, _path: &Path, _error: &Error) {}
    fn on_group_complete(&self, _group: &SyncGroup) {}
    fn on_session_complete(&self, _stats: &SyncStats, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl SyncReporter for SilentReporter {}

/// Counts outcomes for a session and forwards each one to the reporter.
pub struct Recorder<'r> {
    stats: SyncStats,
    reporter: &'r dyn SyncReporter,
}

impl<'r> Recorder<'r> {
    pub fn new(reporter: &'r dyn SyncReporter) -> Self {
        Self {
            stats: SyncStats::default(),
            reporter,
        }
    }

    pub fn record(&mut self, path: &Path, outcome: SyncOutcome) {
        self.stats.record(outcome);
        self.reporter.on_outcome(path, outcome);
    }

    pub fn record_error(&mut self, path: &Path, error: &Error) {
        self.stats.record(SyncOutcome::Errored);
        self.reporter.on_error(path, error);
    }

    pub fn stats(&self) -> SyncStats {
        self.stats
    }
}
