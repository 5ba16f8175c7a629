pub mod backup;
pub mod file;
pub mod probe;
pub mod stats;
pub mod transfer;
pub mod tree;

use crate::sync::backup::Snapshotter;

pub use file::Action;
pub use stats::{SyncDirection, SyncOutcome, SyncStats};
pub use tree::TreeSpec;

/// Applies per-file and per-tree sync decisions.
///
/// Dry-run classifies and counts exactly like a live run but stops short of every
/// filesystem mutation.
pub struct Reconciler {
    snapshotter: Snapshotter,
    dry_run: bool,
}

impl Reconciler {
    pub fn new(snapshotter: Snapshotter) -> Self {
        Self {
            snapshotter,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self.snapshotter = self.snapshotter.with_dry_run(dry_run);
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}
