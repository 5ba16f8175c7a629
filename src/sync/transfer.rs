use filetime::FileTime;
use std::fs;
use std::io;
use std::path::Path;

/// Copy `from` over `to`, creating missing parent directories.
///
/// Permission bits come across with the copy; access and modification times are
/// then set to the source's so later timestamp comparisons see the two as equal.
pub fn copy_preserving(from: &Path, to: &Path) -> io::Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::copy(from, to)?;

    let metadata = fs::metadata(from)?;
    filetime::set_file_times(
        to,
        FileTime::from_last_access_time(&metadata),
        FileTime::from_last_modification_time(&metadata),
    )?;

    Ok(())
}
