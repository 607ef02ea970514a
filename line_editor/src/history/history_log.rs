// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::HISTORY_SIZE_MAX;

/// What [`HistoryLog::next`] does when it is already showing the newest entry.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryNextPastEnd {
    /// Stop navigating and bring back the line that was being typed before the first
    /// recall.
    #[default]
    RestoreDraft,
    /// Keep showing the newest entry.
    StayOnNewest,
}

/// Previously submitted lines, oldest first, plus the navigation index used while
/// recalling them.
///
/// The navigation index is independent of the edit cursor. When it is set, it always
/// points at an existing entry.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    entries: VecDeque<String>,
    max_size: usize,
    pub past_end_policy: HistoryNextPastEnd,
    nav_index: Option<usize>,
    /// The in progress line saved by [`Self::begin`].
    draft: Option<String>,
}

impl Default for HistoryLog {
    fn default() -> Self { Self::new() }
}

impl HistoryLog {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: VecDeque::default(),
            max_size: HISTORY_SIZE_MAX,
            past_end_policy: HistoryNextPastEnd::default(),
            nav_index: None,
            draft: None,
        }
    }

    /// `max_size` is clamped to `1..=HISTORY_SIZE_MAX`.
    #[must_use]
    pub fn new_with(max_size: usize, past_end_policy: HistoryNextPastEnd) -> Self {
        Self {
            max_size: max_size.clamp(1, HISTORY_SIZE_MAX),
            past_end_policy,
            ..Self::new()
        }
    }

    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    #[must_use]
    pub fn max_size(&self) -> usize { self.max_size }

    #[must_use]
    pub fn nav_index(&self) -> Option<usize> { self.nav_index }

    #[must_use]
    pub fn is_navigating(&self) -> bool { self.nav_index.is_some() }

    pub fn entries(&self) -> impl Iterator<Item = &str> { self.entries.iter().map(String::as_str) }

    /// Copy of the retained entries, oldest first. This is what gets persisted.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> { self.entries.iter().cloned().collect() }

    /// Change the retention bound, dropping the oldest entries if it shrinks. The bound
    /// is clamped to `1..=HISTORY_SIZE_MAX`, so asking for more keeps 100.
    pub fn set_max_size(&mut self, max_size: usize) {
        self.max_size = max_size.clamp(1, HISTORY_SIZE_MAX);
        self.trim_to_max_size();
        self.reset();
    }

    /// Replace all entries, eg: with lines restored from a
    /// [`crate::HistoryStore`]. Blank lines are skipped and only the newest
    /// [`Self::max_size`] are kept.
    pub fn load(&mut self, lines: impl IntoIterator<Item = String>) {
        self.entries = lines
            .into_iter()
            .filter(|line| !line.trim().is_empty())
            .collect();
        self.trim_to_max_size();
        self.reset();
    }

    /// Append a submitted line. Blank or whitespace only lines are ignored. Returns
    /// whether the line was appended.
    pub fn record(&mut self, line: &str) -> bool {
        if line.trim().is_empty() {
            return false;
        }
        self.entries.push_back(line.to_string());
        self.trim_to_max_size();
        self.reset();
        true
    }

    /// Start navigating at the newest entry, saving `draft` (the line being typed) so
    /// that [`Self::next`] can bring it back. Returns [None] if there is no history.
    pub fn begin(&mut self, draft: &str) -> Option<&str> {
        let newest = self.entries.len().checked_sub(1)?;
        self.draft = Some(draft.to_string());
        self.nav_index = Some(newest);
        self.entries.get(newest).map(String::as_str)
    }

    /// Step to the next older entry, stopping at the oldest one. If not navigating yet,
    /// this is [`Self::begin`].
    pub fn prev(&mut self, draft: &str) -> Option<&str> {
        match self.nav_index {
            None => self.begin(draft),
            Some(index) => {
                let index = index.saturating_sub(1);
                self.nav_index = Some(index);
                self.entries.get(index).map(String::as_str)
            }
        }
    }

    /// Step to the next newer entry. Returns [None] if not navigating. What happens past
    /// the newest entry depends on [`Self::past_end_policy`].
    pub fn next(&mut self) -> Option<&str> {
        let index = self.nav_index?;
        let newest = self.entries.len().checked_sub(1)?;

        if index >= newest {
            return match self.past_end_policy {
                HistoryNextPastEnd::StayOnNewest => self.entries.get(newest).map(String::as_str),
                HistoryNextPastEnd::RestoreDraft => {
                    self.nav_index = None;
                    Some(self.draft.as_deref().unwrap_or_default())
                }
            };
        }

        self.nav_index = Some(index + 1);
        self.entries.get(index + 1).map(String::as_str)
    }

    /// Stop navigating.
    pub fn reset(&mut self) {
        self.nav_index = None;
        self.draft = None;
    }

    fn trim_to_max_size(&mut self) {
        while self.entries.len() > self.max_size {
            self.entries.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn history_abc(policy: HistoryNextPastEnd) -> HistoryLog {
        let mut history = HistoryLog::new_with(HISTORY_SIZE_MAX, policy);
        for line in ["a", "b", "c"] {
            history.record(line);
        }
        history
    }

    #[test]
    fn test_record_skips_blank() {
        let mut history = HistoryLog::new();
        assert!(!history.record(""));
        assert!(!history.record("   \t"));
        assert!(history.record("ls"));
        assert_eq!(history.entries().collect::<Vec<_>>(), vec!["ls"]);
    }

    #[test]
    fn test_record_keeps_last_max_size() {
        let mut history = HistoryLog::new();
        for it in 0..150 {
            history.record(&format!("cmd {it}"));
        }
        assert_eq!(history.len(), 100);
        let expected: Vec<String> = (50..150).map(|it| format!("cmd {it}")).collect();
        assert_eq!(history.to_vec(), expected);
    }

    #[test]
    fn test_record_resets_navigation() {
        let mut history = history_abc(HistoryNextPastEnd::StayOnNewest);
        history.prev("");
        assert!(history.is_navigating());
        history.record("d");
        assert_eq!(history.nav_index(), None);
    }

    #[test]
    fn test_prev_walks_to_oldest_and_stops() {
        let mut history = history_abc(HistoryNextPastEnd::StayOnNewest);
        assert_eq!(history.prev(""), Some("c"));
        assert_eq!(history.prev(""), Some("b"));
        assert_eq!(history.prev(""), Some("a"));
        assert_eq!(history.prev(""), Some("a"));
        assert_eq!(history.nav_index(), Some(0));
    }

    #[test]
    fn test_prev_on_empty_history() {
        let mut history = HistoryLog::new();
        assert_eq!(history.prev("draft"), None);
        assert!(!history.is_navigating());
    }

    #[test]
    fn test_next_when_not_navigating() {
        let mut history = history_abc(HistoryNextPastEnd::RestoreDraft);
        assert_eq!(history.next(), None);
    }

    #[test]
    fn test_next_stay_on_newest() {
        let mut history = history_abc(HistoryNextPastEnd::StayOnNewest);
        history.prev("draft");
        history.prev("draft");
        assert_eq!(history.next(), Some("c"));
        assert_eq!(history.next(), Some("c"));
        assert_eq!(history.nav_index(), Some(2));
    }

    #[test]
    fn test_next_restores_draft() {
        let mut history = history_abc(HistoryNextPastEnd::RestoreDraft);
        assert_eq!(history.prev("git st"), Some("c"));
        assert_eq!(history.prev("ignored"), Some("b"));
        assert_eq!(history.next(), Some("c"));
        assert_eq!(history.next(), Some("git st"));
        assert!(!history.is_navigating());
        assert_eq!(history.next(), None);
    }

    #[test]
    fn test_load_trims_and_skips_blank() {
        let mut history = HistoryLog::new_with(2, HistoryNextPastEnd::default());
        history.load(vec!["one".into(), " ".into(), "two".into(), "three".into()]);
        assert_eq!(history.to_vec(), vec!["two".to_string(), "three".to_string()]);
    }

    #[test]
    fn test_set_max_size_drops_oldest() {
        let mut history = history_abc(HistoryNextPastEnd::default());
        history.prev("");
        history.set_max_size(1);
        assert_eq!(history.to_vec(), vec!["c".to_string()]);
        assert!(!history.is_navigating());
    }

    #[test]
    fn test_max_size_never_exceeds_bound() {
        let mut history = HistoryLog::new_with(500, HistoryNextPastEnd::default());
        assert_eq!(history.max_size(), HISTORY_SIZE_MAX);

        history.set_max_size(0);
        assert_eq!(history.max_size(), 1);

        history.set_max_size(usize::MAX);
        assert_eq!(history.max_size(), HISTORY_SIZE_MAX);
    }
}
