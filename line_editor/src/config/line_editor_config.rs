// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fs, path::{Path, PathBuf}, time::Duration};

use dirs::config_dir;
use miette::{Context, IntoDiagnostic};
use serde::{Deserialize, Serialize};

use crate::{CONFIG_FOLDER_NAME, DEFAULT_CWD, DEFAULT_PROMPT_TEMPLATE,
            DEFAULT_REFOCUS_DELAY, HISTORY_SIZE_MAX, HistoryNextPastEnd, HistoryStore,
            JsonFileHistoryStore, NoopHistoryStore, PromptTemplate};

/// User settings, read from `<config_dir>/term-line-editor/config.json`. Every field is
/// optional in the file, missing ones take their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineEditorConfig {
    /// `{cwd}` is replaced with the session's working directory.
    pub prompt_template: String,
    pub initial_cwd: String,
    pub history_max_size: usize,
    pub history_next_past_end: HistoryNextPastEnd,
    pub refocus_delay_ms: u64,
    pub persist_history: bool,
    /// Defaults to `<data_dir>/term-line-editor/history.json`.
    pub history_file: Option<PathBuf>,
}

impl Default for LineEditorConfig {
    fn default() -> Self {
        Self {
            prompt_template: DEFAULT_PROMPT_TEMPLATE.to_string(),
            initial_cwd: DEFAULT_CWD.to_string(),
            history_max_size: HISTORY_SIZE_MAX,
            history_next_past_end: HistoryNextPastEnd::default(),
            refocus_delay_ms: u64::try_from(DEFAULT_REFOCUS_DELAY.as_millis())
                .unwrap_or(u64::MAX),
            persist_history: true,
            history_file: None,
        }
    }
}

impl LineEditorConfig {
    pub const FILE_NAME: &'static str = "config.json";

    /// This is where the config file is, whether or not it exists.
    #[must_use]
    pub fn try_get_config_file_path() -> Option<PathBuf> {
        let folder = config_dir()?.join(CONFIG_FOLDER_NAME);
        Some(folder.join(Self::FILE_NAME))
    }

    /// # Errors
    ///
    /// Returns an error if the file can't be read or isn't valid JSON for this struct.
    pub fn try_load(path: &Path) -> miette::Result<Self> {
        let content = fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Could not read config file {}", path.display()))?;
        let it: Self = serde_json::from_str(&content)
            .into_diagnostic()
            .wrap_err_with(|| format!("Invalid config file {}", path.display()))?;
        Ok(it.sanitized())
    }

    /// Load from [`Self::try_get_config_file_path`] if that file exists, otherwise use the
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but can't be loaded.
    pub fn try_load_or_default() -> miette::Result<Self> {
        match Self::try_get_config_file_path() {
            Some(path) if path.exists() => {
                // % is Display, ? is Debug.
                tracing::debug!(message = "Loading config.", path = ?path);
                Self::try_load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// The history bound is clamped to `1..=HISTORY_SIZE_MAX`, since that is what the
    /// history file keeps.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.history_max_size = self.history_max_size.clamp(1, HISTORY_SIZE_MAX);
        self
    }

    #[must_use]
    pub fn refocus_delay(&self) -> Duration { Duration::from_millis(self.refocus_delay_ms) }

    #[must_use]
    pub fn prompt(&self) -> PromptTemplate { PromptTemplate::new(&self.prompt_template) }

    /// Where submitted lines get saved. Falls back to not saving at all when
    /// [`Self::persist_history`] is off, or when the platform has no data folder.
    #[must_use]
    pub fn history_store(&self) -> Box<dyn HistoryStore> {
        if !self.persist_history {
            return Box::new(NoopHistoryStore);
        }
        let store = match &self.history_file {
            Some(path) => Some(JsonFileHistoryStore::new(path)),
            None => JsonFileHistoryStore::try_new_in_data_dir(),
        };
        match store {
            Some(it) => Box::new(it),
            None => {
                tracing::warn!(message = "No data folder, history won't be saved.");
                Box::new(NoopHistoryStore)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::create_temp_dir;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = create_temp_dir().unwrap();
        let path = dir.path.join(LineEditorConfig::FILE_NAME);
        fs::write(
            &path,
            r#"{ "prompt_template": "[{cwd}] ", "history_next_past_end": "StayOnNewest" }"#,
        )
        .unwrap();

        let config = LineEditorConfig::try_load(&path).unwrap();

        assert_eq!(config.prompt_template, "[{cwd}] ");
        assert_eq!(config.history_next_past_end, HistoryNextPastEnd::StayOnNewest);
        assert_eq!(config.initial_cwd, "~");
        assert_eq!(config.history_max_size, 100);
        assert_eq!(config.refocus_delay(), Duration::from_millis(100));
    }

    #[test]
    fn test_history_max_size_is_clamped() {
        let dir = create_temp_dir().unwrap();
        let path = dir.path.join(LineEditorConfig::FILE_NAME);
        fs::write(&path, r#"{ "history_max_size": 5000 }"#).unwrap();

        let config = LineEditorConfig::try_load(&path).unwrap();
        assert_eq!(config.history_max_size, HISTORY_SIZE_MAX);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = create_temp_dir().unwrap();
        let path = dir.path.join(LineEditorConfig::FILE_NAME);
        fs::write(&path, "prompt = 1").unwrap();

        assert!(LineEditorConfig::try_load(&path).is_err());
        assert!(LineEditorConfig::try_load(&dir.path.join("missing.json")).is_err());
    }

    #[test]
    fn test_history_store_round_trips_through_file() {
        let dir = create_temp_dir().unwrap();
        let config = LineEditorConfig {
            history_file: Some(dir.path.join("history.json")),
            ..LineEditorConfig::default()
        };

        let mut store = config.history_store();
        store.save(&["ls".to_string()]).unwrap();
        assert_eq!(store.load().unwrap(), vec!["ls".to_string()]);
    }

    #[test]
    fn test_history_store_disabled() {
        let config = LineEditorConfig {
            persist_history: false,
            ..LineEditorConfig::default()
        };
        let mut store = config.history_store();
        store.save(&["ls".to_string()]).unwrap();
        assert_eq!(store.load().unwrap(), Vec::<String>::new());
    }
}
