use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    #[error("Error reading metadata for {}: {source}", path.display())]
    Probe { path: PathBuf, source: io::Error },

    #[error("Error copying {} to {}: {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    #[error("Error backing up {}: {source}", path.display())]
    Backup { path: PathBuf, source: io::Error },
}
