// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fs, io, path::PathBuf};

use thiserror::Error;

use crate::{CONFIG_FOLDER_NAME, HISTORY_SIZE_MAX};

#[derive(Debug, Error)]
pub enum HistoryStoreError {
    #[error(transparent)]
    IO(#[from] io::Error),

    #[error("history file is not a JSON array of strings")]
    Json(#[from] serde_json::Error),
}

/// Persists submitted lines across sessions. [`crate::dispatch()`] calls
/// [`HistoryStore::save`] after every non blank submit, and ignores the outcome beyond
/// logging it.
pub trait HistoryStore {
    /// Overwrite whatever was stored with `entries` (oldest first).
    ///
    /// # Errors
    ///
    /// Returns an error if the entries can't be written.
    fn save(&mut self, entries: &[String]) -> Result<(), HistoryStoreError>;

    /// Read back the entries written by the last [`HistoryStore::save`]. An empty list
    /// means nothing was ever saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored entries exist but can't be read.
    fn load(&mut self) -> Result<Vec<String>, HistoryStoreError>;
}

/// Doesn't store anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHistoryStore;

impl HistoryStore for NoopHistoryStore {
    fn save(&mut self, _entries: &[String]) -> Result<(), HistoryStoreError> { Ok(()) }

    fn load(&mut self) -> Result<Vec<String>, HistoryStoreError> { Ok(vec![]) }
}

/// Stores the newest [`HISTORY_SIZE_MAX`] entries as a JSON array of strings.
#[derive(Debug, Clone)]
pub struct JsonFileHistoryStore {
    pub path: PathBuf,
}

impl JsonFileHistoryStore {
    pub const FILE_NAME: &'static str = "history.json";

    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

    /// `<data_dir>/term-line-editor/history.json`, or [None] if the platform has no
    /// data folder.
    #[must_use]
    pub fn try_new_in_data_dir() -> Option<Self> {
        let folder = dirs::data_dir()?.join(CONFIG_FOLDER_NAME);
        Some(Self::new(folder.join(Self::FILE_NAME)))
    }
}

impl HistoryStore for JsonFileHistoryStore {
    fn save(&mut self, entries: &[String]) -> Result<(), HistoryStoreError> {
        let start = entries.len().saturating_sub(HISTORY_SIZE_MAX);
        let json = serde_json::to_string_pretty(&entries[start..])?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, json)?;
        // % is Display, ? is Debug.
        tracing::trace!(
            message = "Saved history.",
            path = ?self.path,
            count = entries.len() - start
        );
        Ok(())
    }

    fn load(&mut self) -> Result<Vec<String>, HistoryStoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(vec![]),
            Err(error) => Err(error.into()),
        }
    }
}
