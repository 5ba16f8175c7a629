use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::config::BackupSettings;
use crate::error::Error;
use crate::progress::Recorder;
use crate::sync::stats::SyncOutcome;
use crate::sync::{probe, transfer};

/// Takes month-keyed snapshots of remote files before they are overwritten.
///
/// Snapshots land in `<nas_root>/<backup_root>/<YYYY-MM>/<group>/<relative path>`. An existing
/// file at that location means the snapshot for this month was already taken.
#[derive(Debug, Clone)]
pub struct Snapshotter {
    nas_root: PathBuf,
    settings: BackupSettings,
    month: String,
    dry_run: bool,
}

impl Snapshotter {
    pub fn new(nas_root: &Path, settings: BackupSettings) -> Self {
        Self {
            nas_root: nas_root.to_path_buf(),
            settings,
            month: Local::now().format("%Y-%m").to_string(),
            dry_run: false,
        }
    }

    /// Pin the `YYYY-MM` folder instead of using the current month.
    pub fn with_month(mut self, month: &str) -> Self {
        self.month = month.to_string();
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn is_active(&self) -> bool {
        self.settings.enabled && self.settings.monthly
    }

    pub fn month(&self) -> &str {
        &self.month
    }

    /// Where the snapshot of `remote_file` for `group` goes this month.
    pub fn target_for(&self, remote_file: &Path, group: &str) -> PathBuf {
        let group_root = self.nas_root.join(group);
        let relative = match remote_file.strip_prefix(&group_root) {
            Ok(relative) if !relative.as_os_str().is_empty() => relative.to_path_buf(),
            _ => remote_file
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_default(),
        };

        self.nas_root
            .join(&self.settings.root)
            .join(&self.month)
            .join(group)
            .join(relative)
    }

    /// Snapshot `remote_file` unless this month's copy already exists.
    ///
    /// Returns true when a snapshot was taken (or would be, in dry-run). Failures are
    /// logged and reported as `false`; they never reach the caller.
    pub fn snapshot(&self, remote_file: &Path, group: &str, recorder: &mut Recorder<'_>) -> bool {
        if !self.is_active() || group.is_empty() {
            return false;
        }

        match probe::mtime(remote_file) {
            Ok(Some(_)) => {}
            Ok(None) => return false,
            Err(err) => {
                error!("Backup skipped: {}", err);
                return false;
            }
        }

        let target = self.target_for(remote_file, group);
        match probe::mtime(&target) {
            Ok(Some(_)) => {
                debug!(
                    "Backup for {} already exists for {}",
                    remote_file.display(),
                    self.month
                );
                return false;
            }
            Ok(None) => {}
            Err(err) => {
                error!("Backup skipped: {}", err);
                return false;
            }
        }

        if self.dry_run {
            info!(
                "[dry-run] Would back up {} to {}",
                remote_file.display(),
                target.display()
            );
            recorder.record(remote_file, SyncOutcome::BackedUp);
            return true;
        }

        match transfer::copy_preserving(remote_file, &target) {
            Ok(()) => {
                info!("Backed up {} to {}", remote_file.display(), target.display());
                recorder.record(remote_file, SyncOutcome::BackedUp);
                true
            }
            Err(source) => {
                let err = Error::Backup {
                    path: remote_file.to_path_buf(),
                    source,
                };
                error!("{}", err);
                false
            }
        }
    }
}
