use config::{Config, Environment, File as ConfigFile};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Configuration exactly as it appears on disk, before validation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    pub nas_path: Option<String>,
    pub emulators: Option<BTreeMap<String, EmulatorConfig>>,
    #[serde(default)]
    pub backup: BackupConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmulatorConfig {
    #[serde(default)]
    pub enabled: bool,
    pub save_path: Option<String>,
    /// Directory name under the NAS root. Falls back to the well-known name for the key.
    pub remote_dir: Option<String>,
    #[serde(default = "default_true")]
    pub recursive: bool,
    pub extensions: Option<Vec<String>>,
    /// Named sub-categories, each a path relative to `save_path`.
    pub saves: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackupConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_backup_path")]
    pub path: String,
    #[serde(default = "default_true")]
    pub monthly: bool,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_backup_path(),
            monthly: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_backup_path() -> String {
    "Backups".to_string()
}

/// Validated configuration consumed by the sync engine.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub nas_root: PathBuf,
    pub groups: Vec<SyncGroup>,
    pub backup: BackupSettings,
}

#[derive(Debug, Clone)]
pub struct BackupSettings {
    pub enabled: bool,
    /// Relative to the NAS root.
    pub root: PathBuf,
    pub monthly: bool,
}

/// One logical save category with its own local/remote root pair(s).
#[derive(Debug, Clone)]
pub struct SyncGroup {
    pub key: String,
    /// Remote directory name; doubles as the backup group name.
    pub name: String,
    pub enabled: bool,
    pub recursive: bool,
    pub extensions: Option<Vec<String>>,
    pub trees: Vec<TreePair>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreePair {
    pub label: String,
    pub local_root: PathBuf,
    pub remote_root: PathBuf,
}

pub fn load_configuration(path: &Path) -> Result<SyncConfig, Error> {
    SyncConfig::from_raw(RawConfig::load(path)?)
}

impl RawConfig {
    /// Emulator and sub-category keys keep their case; they name directories on the NAS.
    pub fn load(path: &Path) -> Result<RawConfig, Error> {
        let builder = Config::builder()
            .add_source(ConfigFile::from(path).required(true))
            .add_source(
                Environment::with_prefix("RETROSAVESYNC")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;
        Ok(builder.try_deserialize::<RawConfig>()?)
    }
}

impl SyncConfig {
    pub fn from_raw(raw: RawConfig) -> Result<SyncConfig, Error> {
        let nas_path = raw
            .nas_path
            .ok_or_else(|| Error::InvalidConfig("Configuration must include 'nas_path'".into()))?;
        let emulators = raw
            .emulators
            .ok_or_else(|| Error::InvalidConfig("Configuration must include 'emulators'".into()))?;

        let nas_root = expand_home(&nas_path);

        let mut groups = Vec::with_capacity(emulators.len());
        for (key, emulator) in emulators {
            groups.push(build_group(&nas_root, key, emulator)?);
        }

        Ok(SyncConfig {
            nas_root,
            groups,
            backup: BackupSettings {
                enabled: raw.backup.enabled,
                root: PathBuf::from(raw.backup.path),
                monthly: raw.backup.monthly,
            },
        })
    }

    pub fn group(&self, key: &str) -> Option<&SyncGroup> {
        self.groups.iter().find(|g| g.key == key)
    }
}

fn build_group(nas_root: &Path, key: String, emulator: EmulatorConfig) -> Result<SyncGroup, Error> {
    let name = emulator
        .remote_dir
        .clone()
        .unwrap_or_else(|| remote_name_for(&key));

    let trees = match emulator.save_path.as_deref() {
        Some(save_path) => {
            let local_base = expand_home(save_path);
            let remote_base = nas_root.join(&name);
            match &emulator.saves {
                None => vec![TreePair {
                    label: name.clone(),
                    local_root: local_base,
                    remote_root: remote_base,
                }],
                Some(saves) => saves
                    .iter()
                    .map(|(sub, local_sub)| TreePair {
                        label: sub.clone(),
                        local_root: local_base.join(local_sub),
                        remote_root: remote_base.join(remote_name_for(sub)),
                    })
                    .collect(),
            }
        }
        None if emulator.enabled => {
            return Err(Error::InvalidConfig(format!(
                "Emulator '{}' is enabled but has no 'save_path'",
                key
            )));
        }
        None => Vec::new(),
    };

    Ok(SyncGroup {
        key,
        name,
        enabled: emulator.enabled,
        recursive: emulator.recursive,
        extensions: emulator.extensions.map(normalize_extensions),
        trees,
    })
}

/// Remote directory names the NAS layout already uses.
fn remote_name_for(key: &str) -> String {
    match key {
        "pcsx2" => "PCSX2".to_string(),
        "dolphin" => "Dolphin".to_string(),
        "wii" => "Wii".to_string(),
        "gamecube" => "GC".to_string(),
        other => other.to_string(),
    }
}

/// Lowercase, without the leading dot.
fn normalize_extensions(extensions: Vec<String>) -> Vec<String> {
    extensions
        .into_iter()
        .map(|ext| ext.trim_start_matches('.').to_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    let home = match dirs::home_dir() {
        Some(home) => home,
        None => return PathBuf::from(path),
    };

    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emulator(save_path: Option<&str>, enabled: bool) -> EmulatorConfig {
        EmulatorConfig {
            enabled,
            save_path: save_path.map(String::from),
            remote_dir: None,
            recursive: true,
            extensions: None,
            saves: None,
        }
    }

    fn raw(emulators: Vec<(&str, EmulatorConfig)>) -> RawConfig {
        RawConfig {
            nas_path: Some("/mnt/nas/saves".to_string()),
            emulators: Some(
                emulators
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect(),
            ),
            backup: BackupConfig::default(),
        }
    }

    #[test]
    fn test_missing_nas_path_is_rejected() {
        let mut config = raw(vec![]);
        config.nas_path = None;
        let err = SyncConfig::from_raw(config).unwrap_err();
        assert!(err.to_string().contains("nas_path"));
    }

    #[test]
    fn test_missing_emulators_is_rejected() {
        let mut config = raw(vec![]);
        config.emulators = None;
        let err = SyncConfig::from_raw(config).unwrap_err();
        assert!(err.to_string().contains("emulators"));
    }

    #[test]
    fn test_enabled_emulator_requires_save_path() {
        let config = raw(vec![("pcsx2", emulator(None, true))]);
        assert!(matches!(
            SyncConfig::from_raw(config),
            Err(Error::InvalidConfig(_))
        ));

        let config = raw(vec![("pcsx2", emulator(None, false))]);
        let sync = SyncConfig::from_raw(config).unwrap();
        assert!(sync.groups[0].trees.is_empty());
    }

    #[test]
    fn test_known_emulators_keep_remote_names() {
        let mut dolphin = emulator(Some("/home/me/dolphin"), true);
        dolphin.saves = Some(BTreeMap::from([
            ("wii".to_string(), "Wii/title".to_string()),
            ("gamecube".to_string(), "GC".to_string()),
        ]));
        let config = raw(vec![
            ("pcsx2", emulator(Some("/home/me/memcards"), true)),
            ("dolphin", dolphin),
        ]);
        let sync = SyncConfig::from_raw(config).unwrap();

        let pcsx2 = sync.group("pcsx2").unwrap();
        assert_eq!(pcsx2.name, "PCSX2");
        assert_eq!(
            pcsx2.trees,
            vec![TreePair {
                label: "PCSX2".to_string(),
                local_root: PathBuf::from("/home/me/memcards"),
                remote_root: PathBuf::from("/mnt/nas/saves/PCSX2"),
            }]
        );

        let dolphin = sync.group("dolphin").unwrap();
        assert_eq!(dolphin.name, "Dolphin");
        let remotes: Vec<_> = dolphin.trees.iter().map(|t| t.remote_root.clone()).collect();
        assert_eq!(
            remotes,
            vec![
                PathBuf::from("/mnt/nas/saves/Dolphin/GC"),
                PathBuf::from("/mnt/nas/saves/Dolphin/Wii"),
            ]
        );
        assert_eq!(
            dolphin.trees[1].local_root,
            PathBuf::from("/home/me/dolphin/Wii/title")
        );
    }

    #[test]
    fn test_extensions_are_normalized() {
        let mut ps1 = emulator(Some("/saves"), true);
        ps1.extensions = Some(vec![".MCD".to_string(), "srm".to_string(), ".".to_string()]);
        ps1.remote_dir = Some("PS1".to_string());
        let sync = SyncConfig::from_raw(raw(vec![("duckstation", ps1)])).unwrap();
        let group = sync.group("duckstation").unwrap();
        assert_eq!(group.name, "PS1");
        assert_eq!(
            group.extensions,
            Some(vec!["mcd".to_string(), "srm".to_string()])
        );
    }

    #[test]
    fn test_backup_defaults() {
        let parsed: RawConfig =
            serde_json::from_str(r#"{"nas_path": "/nas", "emulators": {}}"#).unwrap();
        let sync = SyncConfig::from_raw(parsed).unwrap();
        assert!(!sync.backup.enabled);
        assert!(sync.backup.monthly);
        assert_eq!(sync.backup.root, PathBuf::from("Backups"));
    }

    #[test]
    fn test_expand_home_leaves_plain_paths() {
        assert_eq!(expand_home("/var/saves"), PathBuf::from("/var/saves"));
        assert_eq!(expand_home("saves/~x"), PathBuf::from("saves/~x"));
    }
}
