use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::progress::Recorder;
use crate::scanner;
use crate::sync::stats::SyncDirection;
use crate::sync::Reconciler;

/// A local/remote directory pair and how to walk it.
#[derive(Debug, Clone, Copy)]
pub struct TreeSpec<'a> {
    pub local_root: &'a Path,
    pub remote_root: &'a Path,
    pub recursive: bool,
    /// Lowercase extensions without the dot. `None` allows every file.
    pub extensions: Option<&'a [String]>,
    /// Backup group for remote files about to be overwritten.
    pub group: Option<&'a str>,
}

impl Reconciler {
    /// Reconcile every file present under either root, in sorted relative-path order.
    ///
    /// A missing root contributes nothing. Returns the number of path pairs visited.
    pub fn reconcile_tree(
        &self,
        spec: &TreeSpec<'_>,
        direction: SyncDirection,
        recorder: &mut Recorder<'_>,
    ) -> usize {
        let paths = union_of_trees(spec);
        debug!(
            "{} paths to reconcile between {} and {}",
            paths.len(),
            spec.local_root.display(),
            spec.remote_root.display()
        );

        for relative in &paths {
            self.reconcile_file(
                &spec.local_root.join(relative),
                &spec.remote_root.join(relative),
                direction,
                spec.group,
                recorder,
            );
        }

        paths.len()
    }
}

/// Relative paths present on either side, sorted.
pub fn union_of_trees(spec: &TreeSpec<'_>) -> BTreeSet<PathBuf> {
    let mut paths =
        scanner::collect_relative_files(spec.local_root, spec.recursive, spec.extensions);
    paths.extend(scanner::collect_relative_files(
        spec.remote_root,
        spec.recursive,
        spec.extensions,
    ));
    paths
}
