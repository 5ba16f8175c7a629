use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;

use crate::error::Error;

/// Last-modified time of a regular file, or `None` if nothing is there.
///
/// `None` orders before every `Some(_)`, so a missing file compares as infinitely old.
/// Directories count as missing. Only I/O failures other than not-found are errors.
pub fn mtime(path: &Path) -> Result<Option<SystemTime>, Error> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => {
            metadata.modified().map(Some).map_err(|source| Error::Probe {
                path: path.to_path_buf(),
                source,
            })
        }
        Ok(_) => Ok(None),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(Error::Probe {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filetime::{set_file_mtime, FileTime};
    use std::time::{Duration, UNIX_EPOCH};
    use tempfile::tempdir;

    #[test]
    fn test_missing_path_is_none() {
        let tmp = tempdir().unwrap();
        assert_eq!(mtime(&tmp.path().join("nope.sav")).unwrap(), None);
        assert_eq!(mtime(&tmp.path().join("no/such/dir.sav")).unwrap(), None);
    }

    #[test]
    fn test_directory_counts_as_missing() {
        let tmp = tempdir().unwrap();
        assert_eq!(mtime(tmp.path()).unwrap(), None);
    }

    #[test]
    fn test_reports_file_mtime() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("slot1.sav");
        fs::write(&file, "data").unwrap();
        set_file_mtime(&file, FileTime::from_unix_time(1_700_000_000, 0)).unwrap();

        let expected = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        assert_eq!(mtime(&file).unwrap(), Some(expected));
    }

    #[test]
    fn test_missing_sorts_before_any_real_time() {
        assert!(None < Some(UNIX_EPOCH));
    }
}
