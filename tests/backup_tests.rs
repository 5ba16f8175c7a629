use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

use retro_save_sync::config::BackupSettings;
use retro_save_sync::progress::{Recorder, SilentReporter};
use retro_save_sync::sync::backup::Snapshotter;

fn enabled() -> BackupSettings {
    BackupSettings {
        enabled: true,
        root: PathBuf::from("Backups"),
        monthly: true,
    }
}

fn count_files_recursive(dir: &Path) -> usize {
    let mut count = 0;
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                count += count_files_recursive(&path);
            } else if path.is_file() {
                count += 1;
            }
        }
    }
    count
}

#[test]
fn test_snapshot_once_per_month() {
    let tmp = tempdir().unwrap();
    let nas = tmp.path();
    let remote = nas.join("PCSX2").join("memcards").join("Mcd001.ps2");
    fs::create_dir_all(remote.parent().unwrap()).unwrap();
    fs::write(&remote, "first state").unwrap();

    let snapshotter = Snapshotter::new(nas, enabled()).with_month("2024-07");
    let reporter = SilentReporter;
    let mut recorder = Recorder::new(&reporter);

    assert!(snapshotter.snapshot(&remote, "PCSX2", &mut recorder));

    fs::write(&remote, "second state").unwrap();
    assert!(!snapshotter.snapshot(&remote, "PCSX2", &mut recorder));

    let backup_root = nas.join("Backups");
    assert_eq!(count_files_recursive(&backup_root), 1);
    let backup = backup_root
        .join("2024-07")
        .join("PCSX2")
        .join("memcards")
        .join("Mcd001.ps2");
    assert_eq!(fs::read_to_string(backup).unwrap(), "first state");
    assert_eq!(recorder.stats().backed_up, 1);
}

#[test]
fn test_new_month_gets_its_own_snapshot() {
    let tmp = tempdir().unwrap();
    let nas = tmp.path();
    let remote = nas.join("PCSX2").join("Mcd001.ps2");
    fs::create_dir_all(remote.parent().unwrap()).unwrap();
    fs::write(&remote, "state").unwrap();

    let reporter = SilentReporter;
    let mut recorder = Recorder::new(&reporter);
    for month in ["2024-07", "2024-08"] {
        let snapshotter = Snapshotter::new(nas, enabled()).with_month(month);
        assert!(snapshotter.snapshot(&remote, "PCSX2", &mut recorder));
    }

    assert!(nas.join("Backups/2024-07/PCSX2/Mcd001.ps2").is_file());
    assert!(nas.join("Backups/2024-08/PCSX2/Mcd001.ps2").is_file());
    assert_eq!(recorder.stats().backed_up, 2);
}

#[test]
fn test_dry_run_snapshot_counts_but_writes_nothing() {
    let tmp = tempdir().unwrap();
    let nas = tmp.path();
    let remote = nas.join("Dolphin").join("GC").join("card.gci");
    fs::create_dir_all(remote.parent().unwrap()).unwrap();
    fs::write(&remote, "gc").unwrap();

    let snapshotter = Snapshotter::new(nas, enabled())
        .with_month("2024-07")
        .with_dry_run(true);
    let reporter = SilentReporter;
    let mut recorder = Recorder::new(&reporter);

    assert!(snapshotter.snapshot(&remote, "Dolphin", &mut recorder));
    assert_eq!(recorder.stats().backed_up, 1);
    assert!(!nas.join("Backups").exists());
}

#[cfg(unix)]
#[test]
fn test_failed_snapshot_is_not_counted() {
    let tmp = tempdir().unwrap();
    let nas = tmp.path();
    let remote = nas.join("PCSX2").join("Mcd001.ps2");
    fs::create_dir_all(remote.parent().unwrap()).unwrap();
    fs::write(&remote, "state").unwrap();
    // A plain file where the month directory should go.
    fs::create_dir_all(nas.join("Backups")).unwrap();
    fs::write(nas.join("Backups").join("2024-07"), "in the way").unwrap();

    let snapshotter = Snapshotter::new(nas, enabled()).with_month("2024-07");
    let reporter = SilentReporter;
    let mut recorder = Recorder::new(&reporter);

    assert!(!snapshotter.snapshot(&remote, "PCSX2", &mut recorder));
    assert_eq!(recorder.stats().backed_up, 0);
    assert_eq!(recorder.stats().errors, 0);
}
