pub mod config;
pub mod engine;
pub mod error;
pub mod progress;
pub mod scanner;
pub mod sync;

pub use config::SyncConfig;
pub use engine::{SyncEngine, SyncOptions, SyncResult};
pub use error::Error;
pub use progress::{SilentReporter, SyncReporter};
pub use sync::{SyncDirection, SyncOutcome, SyncStats};
