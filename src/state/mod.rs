//! Persistent cycle state, following XDG Base Directory standards.
//!
//! The cycle is saved as JSON in `$XDG_STATE_HOME/suncycle/{namespace}/cycle.json`,
//! keeping configuration and state separate. Writes go through a temporary file in
//! the same directory and are renamed into place while an exclusive lock is held, so
//! a reader never sees a half-written state.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::get_custom_config_dir;
use crate::constants::*;
use crate::cycle::PersistedState;

/// Get the state directory for a given configuration directory.
///
/// State is stored in XDG_STATE_HOME/suncycle/{namespace} where namespace is:
/// - "default" for the default config directory
/// - "custom_<hash>" for custom config directories (via --config)
pub fn get_state_dir(config_dir: Option<&Path>) -> Result<PathBuf> {
    let state_home = std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .or_else(|_| {
            dirs::home_dir()
                .map(|home| home.join(".local/state"))
                .context("Could not determine state directory")
        })?;

    let namespace = match config_dir {
        None => "default".to_string(),
        Some(path) => get_state_namespace(path),
    };

    Ok(state_home.join(CONFIG_DIR_NAME).join(namespace))
}

/// Generate a stable namespace for a custom config directory.
fn get_state_namespace(config_path: &Path) -> String {
    let canonical = config_path
        .canonicalize()
        .unwrap_or_else(|_| config_path.to_path_buf());

    let hash = sha256::digest(canonical.to_string_lossy().as_bytes());
    format!("custom_{}", &hash[..16])
}

/// Handle on the state file of one namespace.
#[derive(Debug, Clone)]
pub struct StateStore {
    dir: PathBuf,
}

impl StateStore {
    /// Store for the configuration directory selected at startup.
    pub fn for_current_config() -> Result<Self> {
        let config_dir = get_custom_config_dir();
        Ok(Self::in_dir(get_state_dir(config_dir.as_deref())?))
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(STATE_FILE_NAME)
    }

    fn lock(&self) -> Result<File> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create state directory {}", self.dir.display())
        })?;
        let lock_path = self.dir.join(STATE_LOCK_FILE_NAME);
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Failed to open {}", lock_path.display()))?;
        lock_file
            .lock_exclusive()
            .with_context(|| format!("Failed to lock {}", lock_path.display()))?;
        Ok(lock_file)
    }

    /// Load the saved state. A missing file is `Ok(None)`; an unreadable or corrupt
    /// file is an error.
    pub fn load(&self) -> Result<Option<PersistedState>> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }

        let lock = self.lock()?;
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read state from {}", path.display()))?;
        FileExt::unlock(&lock)?;

        let state: PersistedState = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse state from {}", path.display()))?;
        Ok(Some(state))
    }

    /// Atomically replace the saved state.
    pub fn save(&self, state: &PersistedState) -> Result<()> {
        let lock = self.lock()?;
        let path = self.path();

        let mut temp = tempfile::NamedTempFile::new_in(&self.dir)
            .context("Failed to create temporary state file")?;
        serde_json::to_writer_pretty(&mut temp, state).context("Failed to encode state")?;
        temp.write_all(b"\n")?;
        temp.as_file().sync_all()?;
        temp.persist(&path)
            .with_context(|| format!("Failed to write state to {}", path.display()))?;

        FileExt::unlock(&lock)?;
        Ok(())
    }

    /// Remove the saved state. Returns whether a file was removed.
    pub fn clear(&self) -> Result<bool> {
        let path = self.path();
        if !path.exists() {
            return Ok(false);
        }

        let lock = self.lock()?;
        fs::remove_file(&path)
            .with_context(|| format!("Failed to remove {}", path.display()))?;
        FileExt::unlock(&lock)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::{Phase, Rgb};
    use serial_test::serial;
    use tempfile::tempdir;

    fn sample() -> PersistedState {
        PersistedState {
            rotated_angle: 97.125,
            phase: Phase::Day,
            current_color: Rgb::new(1.0, 0.96, 0.9),
            desired_color: Rgb::new(1.0, 0.96, 0.9),
            current_intensity: 0.3,
            desired_intensity: 0.5,
            initialized: true,
            awaiting_dawn_hour: false,
        }
    }

    #[test]
    fn test_missing_state_is_none() {
        let dir = tempdir().unwrap();
        let store = StateStore::in_dir(dir.path().join("state"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_save_then_load_is_exact() {
        let dir = tempdir().unwrap();
        let store = StateStore::in_dir(dir.path().join("state"));
        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap(), Some(sample()));

        let mut updated = sample();
        updated.phase = Phase::Dusk;
        store.save(&updated).unwrap();
        assert_eq!(store.load().unwrap(), Some(updated));
    }

    #[test]
    fn test_corrupt_state_is_an_error() {
        let dir = tempdir().unwrap();
        let store = StateStore::in_dir(dir.path());
        fs::write(store.path(), "{ not json").unwrap();
        assert!(store.load().is_err());
    }

    #[test]
    fn test_clear() {
        let dir = tempdir().unwrap();
        let store = StateStore::in_dir(dir.path());
        assert!(!store.clear().unwrap());
        store.save(&sample()).unwrap();
        assert!(store.clear().unwrap());
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    #[serial]
    fn test_state_dir_namespaces() {
        let dir = tempdir().unwrap();
        let original = std::env::var("XDG_STATE_HOME").ok();
        unsafe {
            std::env::set_var("XDG_STATE_HOME", dir.path());
        }

        let default = get_state_dir(None).unwrap();
        let custom = get_state_dir(Some(Path::new("/some/other/config"))).unwrap();

        unsafe {
            match original {
                Some(val) => std::env::set_var("XDG_STATE_HOME", val),
                None => std::env::remove_var("XDG_STATE_HOME"),
            }
        }

        assert_eq!(default, dir.path().join("suncycle").join("default"));
        let namespace = custom.file_name().unwrap().to_string_lossy().to_string();
        assert!(namespace.starts_with("custom_"));
        assert_eq!(namespace.len(), "custom_".len() + 16);
    }
}
