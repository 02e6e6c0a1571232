use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_MAX_PLAYERS: usize = 4;
pub const DEFAULT_EVENT_LOG: &str = "game_event_log.csv";
pub const DEFAULT_REPORT: &str = "game_report.txt";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TriviaConfig {
    pub negative_on_wrong: Option<bool>,
    pub max_players: Option<usize>,
    pub csv_delimiter: Option<char>,
    pub event_log: Option<String>,
    pub report: Option<String>,
}

impl TriviaConfig {
    /// A config with every default written out, for `trivia init`
    pub fn with_defaults() -> Self {
        Self {
            negative_on_wrong: Some(true),
            max_players: Some(DEFAULT_MAX_PLAYERS),
            csv_delimiter: Some(crate::loader::csv::DEFAULT_DELIMITER),
            event_log: Some(DEFAULT_EVENT_LOG.to_string()),
            report: Some(DEFAULT_REPORT.to_string()),
        }
    }

    pub fn negative_on_wrong(&self) -> bool {
        self.negative_on_wrong.unwrap_or(true)
    }

    pub fn max_players(&self) -> usize {
        self.max_players.unwrap_or(DEFAULT_MAX_PLAYERS)
    }

    pub fn csv_delimiter(&self) -> char {
        self.csv_delimiter.unwrap_or(crate::loader::csv::DEFAULT_DELIMITER)
    }

    pub fn event_log_path(&self) -> PathBuf {
        PathBuf::from(self.event_log.as_deref().unwrap_or(DEFAULT_EVENT_LOG))
    }

    pub fn report_path(&self) -> PathBuf {
        PathBuf::from(self.report.as_deref().unwrap_or(DEFAULT_REPORT))
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("trivia.toml")
}

pub fn load_config(path: Option<&Path>) -> Result<Option<TriviaConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: TriviaConfig = toml::from_str(&contents)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

    if config.max_players == Some(0) {
        return Err(Error::Config(format!("{}: max_players must be at least 1", path.display())));
    }
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &TriviaConfig, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::Config(format!(
            "config already exists at {} (use --force to overwrite)",
            path.display()
        )));
    }

    let contents = toml::to_string_pretty(config).map_err(|e| Error::Config(e.to_string()))?;
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("trivia.toml"))).unwrap().is_none());
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trivia.toml");

        write_config(&path, &TriviaConfig::with_defaults(), false).unwrap();
        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert!(loaded.negative_on_wrong());
        assert_eq!(loaded.max_players(), 4);
        assert_eq!(loaded.csv_delimiter(), ',');

        assert!(write_config(&path, &TriviaConfig::default(), false).is_err());
        assert!(write_config(&path, &TriviaConfig::default(), true).is_ok());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trivia.toml");
        std::fs::write(&path, "negative_on_wrong = false\ncsv_delimiter = \";\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap().unwrap();
        assert!(!config.negative_on_wrong());
        assert_eq!(config.csv_delimiter(), ';');
        assert_eq!(config.report_path(), PathBuf::from(DEFAULT_REPORT));
    }

    #[test]
    fn test_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trivia.toml");
        std::fs::write(&path, "max_players = 0\n").unwrap();
        assert!(matches!(load_config(Some(&path)), Err(Error::Config(_))));

        std::fs::write(&path, "max_players = \"many\"\n").unwrap();
        assert!(matches!(load_config(Some(&path)), Err(Error::Config(_))));
    }
}
