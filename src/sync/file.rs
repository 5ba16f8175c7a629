use std::cmp::Ordering;
use std::path::Path;
use std::time::SystemTime;
use tracing::{debug, error, info};

use crate::error::Error;
use crate::progress::Recorder;
use crate::sync::stats::{SyncDirection, SyncOutcome};
use crate::sync::{probe, transfer, Reconciler};

/// What to do with one path pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Upload,
    Download,
    Skip,
}

/// Pick an action from the two probed modification times. `None` means absent.
///
/// Equal times are skipped, never re-copied. A forced direction whose source is absent is
/// also a skip.
pub fn decide(
    direction: SyncDirection,
    local: Option<SystemTime>,
    remote: Option<SystemTime>,
) -> Action {
    match direction {
        SyncDirection::ForceUpload if local.is_some() => Action::Upload,
        SyncDirection::ForceDownload if remote.is_some() => Action::Download,
        SyncDirection::ForceUpload | SyncDirection::ForceDownload => Action::Skip,
        SyncDirection::Auto => match local.cmp(&remote) {
            Ordering::Greater => Action::Upload,
            Ordering::Less => Action::Download,
            Ordering::Equal => Action::Skip,
        },
    }
}

impl Reconciler {
    /// Reconcile one local/remote file pair.
    ///
    /// Returns `None` when neither side exists; nothing is counted in that case. Every other
    /// call records exactly one terminal outcome. Before an upload replaces an existing remote
    /// file, `group` (when given) names the backup group to snapshot it under.
    pub fn reconcile_file(
        &self,
        local: &Path,
        remote: &Path,
        direction: SyncDirection,
        group: Option<&str>,
        recorder: &mut Recorder<'_>,
    ) -> Option<SyncOutcome> {
        let (local_mtime, remote_mtime) = match (probe::mtime(local), probe::mtime(remote)) {
            (Ok(l), Ok(r)) => (l, r),
            (Err(err), _) | (_, Err(err)) => {
                error!("{}", err);
                recorder.record_error(local, &err);
                return Some(SyncOutcome::Errored);
            }
        };

        if local_mtime.is_none() && remote_mtime.is_none() {
            return None;
        }

        let (from, to, outcome) = match decide(direction, local_mtime, remote_mtime) {
            Action::Skip => {
                debug!("Skipped: {}", local.display());
                recorder.record(local, SyncOutcome::Skipped);
                return Some(SyncOutcome::Skipped);
            }
            Action::Upload => {
                if remote_mtime.is_some() {
                    if let Some(group) = group {
                        self.snapshotter.snapshot(remote, group, recorder);
                    }
                }
                (local, remote, SyncOutcome::Uploaded)
            }
            Action::Download => (remote, local, SyncOutcome::Downloaded),
        };

        if self.dry_run {
            info!("[dry-run] Would copy {} to {}", from.display(), to.display());
            recorder.record(local, outcome);
            return Some(outcome);
        }

        match transfer::copy_preserving(from, to) {
            Ok(()) => {
                info!("{}: {} -> {}", outcome, from.display(), to.display());
                recorder.record(local, outcome);
                Some(outcome)
            }
            Err(source) => {
                let err = Error::Copy {
                    from: from.to_path_buf(),
                    to: to.to_path_buf(),
                    source,
                };
                error!("{}", err);
                recorder.record_error(local, &err);
                Some(SyncOutcome::Errored)
            }
        }
    }
}
