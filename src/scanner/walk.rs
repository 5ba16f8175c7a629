use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Regular files under `root`, as paths relative to it.
///
/// A missing root yields an empty set. Without `recursive` only the top level is read.
/// `extensions` holds lowercase extensions without the dot; matching is case-insensitive.
/// Symlinks to files count as files, but symlinked directories are not descended into.
pub fn collect_relative_files(
    root: &Path,
    recursive: bool,
    extensions: Option<&[String]>,
) -> BTreeSet<PathBuf> {
    let mut files = BTreeSet::new();

    if !root.is_dir() {
        return files;
    }

    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(if recursive { usize::MAX } else { 1 })
        .follow_links(false);

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Error reading entry under {}: {}", root.display(), err);
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() || !extension_allowed(path, extensions) {
            continue;
        }

        if let Ok(relative) = path.strip_prefix(root) {
            files.insert(relative.to_path_buf());
        }
    }

    files
}

fn extension_allowed(path: &Path, extensions: Option<&[String]>) -> bool {
    let allowed = match extensions {
        Some(allowed) => allowed,
        None => return true,
    };

    path.extension()
        .and_then(OsStr::to_str)
        .map(|ext| ext.to_lowercase())
        .is_some_and(|ext| allowed.iter().any(|a| *a == ext))
}
