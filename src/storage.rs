use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const STATE_FILE: &str = "state.yaml";

/// Local state persisted between runs
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PersistedState {
    /// Onboarding completed; gates the welcome screen
    #[serde(default)]
    pub visited: bool,
    /// Base URL override, below the environment variable in precedence
    #[serde(default)]
    pub api_url: Option<String>,
}

/// Manages the on-disk state file under the config directory
pub struct Storage {
    state: PersistedState,
    config_dir: PathBuf,
}

impl Storage {
    pub fn new() -> Self {
        let config_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".sharecode");
        Self::with_dir(config_dir)
    }

    /// Storage rooted at an explicit directory (tests use a temp dir).
    /// A missing or unreadable state file falls back to defaults.
    pub fn with_dir(config_dir: PathBuf) -> Self {
        let mut storage = Storage {
            state: PersistedState::default(),
            config_dir,
        };
        if let Err(e) = storage.load() {
            tracing::warn!(error = %e, "could not read state file, starting fresh");
        }
        storage
    }

    pub fn is_visited(&self) -> bool {
        self.state.visited
    }

    pub fn api_url(&self) -> Option<&str> {
        self.state.api_url.as_deref()
    }

    /// Record that onboarding has been completed
    pub fn mark_visited(&mut self) -> Result<()> {
        self.state.visited = true;
        self.save()
    }

    fn state_path(&self) -> PathBuf {
        self.config_dir.join(STATE_FILE)
    }

    fn load(&mut self) -> Result<()> {
        let path = self.state_path();
        if !path.exists() {
            return Ok(());
        }
        let content = fs::read_to_string(path)?;
        self.state = serde_yaml::from_str(&content)?;
        Ok(())
    }

    fn save(&self) -> Result<()> {
        if !self.config_dir.exists() {
            fs::create_dir_all(&self.config_dir)?;
        }
        let content = serde_yaml::to_string(&self.state)?;
        fs::write(self.state_path(), content)?;
        Ok(())
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn visited_flag_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().to_path_buf();

        let mut storage = Storage::with_dir(path.clone());
        assert!(!storage.is_visited());

        storage.mark_visited().unwrap();
        assert!(storage.is_visited());

        // A fresh instance sees the persisted flag
        let storage = Storage::with_dir(path);
        assert!(storage.is_visited());
    }

    #[test]
    fn missing_state_file_defaults() {
        let dir = tempdir().unwrap();
        let storage = Storage::with_dir(dir.path().join("nonexistent"));
        assert!(!storage.is_visited());
        assert!(storage.api_url().is_none());
    }

    #[test]
    fn garbage_state_file_is_tolerated() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(STATE_FILE), "{{{not yaml").unwrap();
        let storage = Storage::with_dir(dir.path().to_path_buf());
        assert!(!storage.is_visited());
    }

    #[test]
    fn api_url_is_read_back() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(STATE_FILE),
            "visited: true\napi_url: http://other:9000\n",
        )
        .unwrap();
        let storage = Storage::with_dir(dir.path().to_path_buf());
        assert!(storage.is_visited());
        assert_eq!(storage.api_url(), Some("http://other:9000"));
    }
}
