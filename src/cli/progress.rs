use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use retro_save_sync::config::{SyncGroup, TreePair};
use retro_save_sync::{Error, SyncDirection, SyncOutcome, SyncReporter};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Console reporter: a spinner per emulator, one line per file that changed.
pub struct CliReporter {
    bar: RefCell<Option<ProgressBar>>,
    local_root: RefCell<Option<PathBuf>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: RefCell::new(None),
            local_root: RefCell::new(None),
        }
    }

    fn println(&self, line: String) {
        match self.bar.borrow().as_ref() {
            Some(pb) => pb.println(line),
            None => println!("{}", line),
        }
    }

    fn finish_bar(&self) {
        if let Some(pb) = self.bar.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }

    /// Path relative to the tree being synced, or just the file name.
    fn display_name(&self, path: &Path) -> String {
        if let Some(root) = self.local_root.borrow().as_ref() {
            if let Ok(relative) = path.strip_prefix(root) {
                return relative.display().to_string();
            }
        }
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    }
}

impl SyncReporter for CliReporter {
    fn on_session_start(&self, nas_root: &Path, dry_run: bool) {
        println!("{}", "=".repeat(60));
        if dry_run {
            println!("RetroSaveSync - Starting synchronization {}", "(dry run)".yellow());
        } else {
            println!("RetroSaveSync - Starting synchronization");
        }
        println!("  NAS: {}", nas_root.display());
        println!("{}", "=".repeat(60));
    }

    fn on_group_disabled(&self, group: &SyncGroup) {
        println!("{}", format!("{} sync is disabled", group.name).dimmed());
    }

    fn on_group_start(&self, group: &SyncGroup, direction: SyncDirection) {
        println!();
        match direction {
            SyncDirection::Auto => println!("Syncing {} saves:", group.name.bold()),
            SyncDirection::ForceUpload => {
                println!("Syncing {} saves (forced upload):", group.name.bold())
            }
            SyncDirection::ForceDownload => {
                println!("Syncing {} saves (forced download):", group.name.bold())
            }
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("  {spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.set_message("Comparing files...");
        pb.enable_steady_tick(Duration::from_millis(80));
        *self.bar.borrow_mut() = Some(pb);
    }

    fn on_tree_start(&self, tree: &TreePair) {
        self.println(format!("  {}:", tree.label));
        self.println(format!("    Local: {}", tree.local_root.display()));
        self.println(format!("    NAS: {}", tree.remote_root.display()));
        *self.local_root.borrow_mut() = Some(tree.local_root.clone());
    }

    fn on_outcome(&self, path: &Path, outcome: SyncOutcome) {
        let name = self.display_name(path);
        match outcome {
            SyncOutcome::Uploaded => {
                self.println(format!("    {} Uploaded: {}", "↑".green(), name))
            }
            SyncOutcome::Downloaded => {
                self.println(format!("    {} Downloaded: {}", "↓".cyan(), name))
            }
            SyncOutcome::BackedUp => {
                self.println(format!("    {} Backed up: {}", "⧉".magenta(), name))
            }
            SyncOutcome::Skipped => {
                if let Some(pb) = self.bar.borrow().as_ref() {
                    pb.set_message(format!("Up to date: {}", name));
                }
            }
            SyncOutcome::Errored => {}
        }
    }

    fn on_error(&self, path: &Path, error: &Error) {
        let name = self.display_name(path);
        self.println(format!("    {} Error syncing {}: {}", "✗".red(), name, error));
    }

    fn on_group_complete(&self, _group: &SyncGroup) {
        self.finish_bar();
        *self.local_root.borrow_mut() = None;
    }
}
