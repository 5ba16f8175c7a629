use std::fmt;

/// Requested direction for a file or tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncDirection {
    /// Newer modification time wins.
    #[default]
    Auto,
    ForceUpload,
    ForceDownload,
}

/// Terminal classification of a single path pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Uploaded,
    Downloaded,
    Skipped,
    BackedUp,
    Errored,
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SyncOutcome::Uploaded => "uploaded",
            SyncOutcome::Downloaded => "downloaded",
            SyncOutcome::Skipped => "skipped",
            SyncOutcome::BackedUp => "backed up",
            SyncOutcome::Errored => "error",
        };
        f.write_str(label)
    }
}

/// Outcome counters for one session. Only ever incremented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub uploaded: usize,
    pub downloaded: usize,
    pub skipped: usize,
    pub backed_up: usize,
    pub errors: usize,
}

impl SyncStats {
    pub fn record(&mut self, outcome: SyncOutcome) {
        match outcome {
            SyncOutcome::Uploaded => self.uploaded += 1,
            SyncOutcome::Downloaded => self.downloaded += 1,
            SyncOutcome::Skipped => self.skipped += 1,
            SyncOutcome::BackedUp => self.backed_up += 1,
            SyncOutcome::Errored => self.errors += 1,
        }
    }

    pub fn transferred(&self) -> usize {
        self.uploaded + self.downloaded
    }
}
