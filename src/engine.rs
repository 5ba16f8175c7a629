use std::collections::BTreeMap;
use std::fs;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::config::{SyncConfig, SyncGroup};
use crate::error::Error;
use crate::progress::{Recorder, SyncReporter};
use crate::scanner;
use crate::sync::backup::Snapshotter;
use crate::sync::{Reconciler, SyncDirection, SyncStats, TreeSpec};

pub struct SyncEngine {
    config: SyncConfig,
    dry_run: bool,
    backup_month: Option<String>,
}

/// Which groups to run and any per-group forced directions.
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Restrict the run to one group key.
    pub only: Option<String>,
    /// Keyed by group key; missing groups run in `Auto`.
    pub directions: BTreeMap<String, SyncDirection>,
}

impl SyncOptions {
    pub fn only(key: &str) -> Self {
        Self {
            only: Some(key.to_string()),
            ..Self::default()
        }
    }

    pub fn with_direction(mut self, key: &str, direction: SyncDirection) -> Self {
        self.directions.insert(key.to_string(), direction);
        self
    }
}

#[derive(Debug)]
pub struct SyncResult {
    pub stats: SyncStats,
    pub duration: Duration,
    pub groups_synced: usize,
}

impl SyncEngine {
    pub fn new(config: SyncConfig) -> Self {
        Self {
            config,
            dry_run: false,
            backup_month: None,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Pin the backup `YYYY-MM` folder instead of using the current month.
    pub fn with_backup_month(mut self, month: &str) -> Self {
        self.backup_month = Some(month.to_string());
        self
    }

    /// Run one sync session over the selected groups.
    ///
    /// Only configuration problems and failure to create the NAS root are returned as errors;
    /// per-file failures are counted in the stats.
    pub fn run(
        &self,
        options: &SyncOptions,
        reporter: &dyn SyncReporter,
    ) -> Result<SyncResult, Error> {
        let groups = self.select_groups(options)?;
        let start = Instant::now();

        let nas_root = &self.config.nas_root;
        if !nas_root.exists() {
            if self.dry_run {
                info!("[dry-run] Would create NAS directory: {}", nas_root.display());
            } else {
                info!("Creating NAS directory: {}", nas_root.display());
                fs::create_dir_all(nas_root)?;
            }
        }

        reporter.on_session_start(nas_root, self.dry_run);

        let mut snapshotter = Snapshotter::new(nas_root, self.config.backup.clone());
        if let Some(month) = &self.backup_month {
            snapshotter = snapshotter.with_month(month);
        }
        let reconciler = Reconciler::new(snapshotter).with_dry_run(self.dry_run);
        let mut recorder = Recorder::new(reporter);
        let mut groups_synced = 0;

        for group in groups {
            if !group.enabled {
                info!("{} sync is disabled", group.key);
                reporter.on_group_disabled(group);
                continue;
            }

            let direction = options
                .directions
                .get(&group.key)
                .copied()
                .unwrap_or_default();
            info!("Syncing {} saves ({:?})", group.name, direction);
            reporter.on_group_start(group, direction);

            for tree in &group.trees {
                reporter.on_tree_start(tree);
                let spec = TreeSpec {
                    local_root: &tree.local_root,
                    remote_root: &tree.remote_root,
                    recursive: group.recursive,
                    extensions: group.extensions.as_deref(),
                    group: Some(&group.name),
                };
                let visited = reconciler.reconcile_tree(&spec, direction, &mut recorder);
                debug!("{}: {} paths visited", tree.label, visited);
            }

            reporter.on_group_complete(group);
            groups_synced += 1;
        }

        let stats = recorder.stats();
        let duration = start.elapsed();
        reporter.on_session_complete(&stats, duration.as_secs_f64());
        info!(
            "Sync completed in {:.2}s: {} uploaded, {} downloaded, {} skipped, {} backed up, {} errors",
            duration.as_secs_f64(),
            stats.uploaded,
            stats.downloaded,
            stats.skipped,
            stats.backed_up,
            stats.errors,
        );

        Ok(SyncResult {
            stats,
            duration,
            groups_synced,
        })
    }

    /// Enabled groups where both sides already hold files, so the first direction is a guess.
    pub fn groups_needing_direction(&self) -> Vec<&SyncGroup> {
        self.config
            .groups
            .iter()
            .filter(|group| group.enabled)
            .filter(|group| {
                group.trees.iter().any(|tree| {
                    let extensions = group.extensions.as_deref();
                    !scanner::collect_relative_files(&tree.local_root, group.recursive, extensions)
                        .is_empty()
                        && !scanner::collect_relative_files(
                            &tree.remote_root,
                            group.recursive,
                            extensions,
                        )
                        .is_empty()
                })
            })
            .collect()
    }

    fn select_groups(&self, options: &SyncOptions) -> Result<Vec<&SyncGroup>, Error> {
        match options.only.as_deref() {
            None | Some("all") => Ok(self.config.groups.iter().collect()),
            Some(key) => self
                .config
                .group(key)
                .map(|group| vec![group])
                .ok_or_else(|| Error::InvalidConfig(format!("No emulator named '{}'", key))),
        }
    }
}
