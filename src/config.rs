use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::app_dirs::AppDirs;
use crate::palette::Palette;
use crate::words::WordPools;

/// User preferences kept in `config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub tick_rate_ms: u64,
    pub shuffle_words: bool,
    pub background: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate_ms: 16,
            shuffle_words: true,
            background: None,
            seed: None,
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> anyhow::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        let path =
            AppDirs::config_path().unwrap_or_else(|| PathBuf::from("unscramble_config.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "ignoring malformed config file");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

/// Immutable settings handed to the game at construction
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub pools: WordPools,
    pub palette: Palette,
    pub correct_burst: usize,
    pub incorrect_burst: usize,
    pub celebration_burst: usize,
    /// Ticks the input box shakes after a wrong answer
    pub shake_ticks: u32,
    /// Ticks the letter tiles stay coloured after an answer
    pub feedback_ticks: u32,
    /// Ticks a new screen takes to fade in
    pub transition_ticks: u32,
    /// Ticks one tile spends in the air after a correct answer
    pub jump_ticks: u32,
    pub max_input_len: usize,
    pub shuffle_words: bool,
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn new(pools: WordPools) -> Self {
        Self {
            pools,
            palette: Palette::default(),
            correct_burst: 15,
            incorrect_burst: 10,
            celebration_burst: 30,
            shake_ticks: 10,
            feedback_ticks: 30,
            transition_ticks: 17,
            jump_ticks: 24,
            max_input_len: 24,
            shuffle_words: true,
            seed: None,
        }
    }

    /// Embedded word pools with default tuning
    pub fn standard() -> anyhow::Result<Self> {
        Ok(Self::new(WordPools::embedded()?))
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_shuffle(mut self, shuffle_words: bool) -> Self {
        self.shuffle_words = shuffle_words;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_and_load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            tick_rate_ms: 33,
            shuffle_words: false,
            background: Some(PathBuf::from("/tmp/bg.txt")),
            seed: Some(99),
        };
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("absent.json"));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn malformed_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, b"{ not json").unwrap();
        let store = FileConfigStore::with_path(&path);
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, br#"{ "seed": 7 }"#).unwrap();
        let loaded = FileConfigStore::with_path(&path).load();
        assert_eq!(loaded.seed, Some(7));
        assert_eq!(loaded.tick_rate_ms, 16);
        assert!(loaded.shuffle_words);
    }

    #[test]
    fn standard_game_config_uses_reference_tuning() {
        let cfg = GameConfig::standard().unwrap().with_seed(Some(3)).with_shuffle(false);
        assert_eq!(cfg.correct_burst, 15);
        assert_eq!(cfg.incorrect_burst, 10);
        assert_eq!(cfg.shake_ticks, 10);
        assert_eq!(cfg.transition_ticks, 17);
        assert_eq!(cfg.jump_ticks, 24);
        assert_eq!(cfg.seed, Some(3));
        assert!(!cfg.shuffle_words);
    }
}
