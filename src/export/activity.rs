//! Recent admin activity, newest first

use std::collections::VecDeque;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Maximum activity entries to keep
const MAX_ACTIVITY_ENTRIES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub time: DateTime<Local>,
    pub message: String,
}

#[derive(Debug, Default, Clone)]
pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(MAX_ACTIVITY_ENTRIES),
        }
    }

    pub fn log(&mut self, message: impl Into<String>) {
        self.log_at(Local::now(), message);
    }

    pub fn log_at(&mut self, time: DateTime<Local>, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(activity = %message);
        self.entries.push_front(ActivityEntry { time, message });
        self.entries.truncate(MAX_ACTIVITY_ENTRIES);
    }

    /// Newest first
    pub fn entries(&self) -> impl Iterator<Item = &ActivityEntry> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first_and_capped() {
        let mut log = ActivityLog::new();
        for i in 0..12 {
            log.log(format!("event {i}"));
        }
        assert_eq!(log.len(), 10);
        let messages: Vec<_> = log.entries().map(|e| e.message.as_str()).collect();
        assert_eq!(messages[0], "event 11");
        assert_eq!(messages[9], "event 2");
    }
}
