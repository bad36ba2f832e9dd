//! Recent Lines Buffer
//!
//! Fixed-capacity ring of the most recent log lines, kept in memory so the
//! UI can show a log tail without touching the file.

use std::collections::VecDeque;
use std::sync::Mutex;

pub struct RecentLines {
    capacity: usize,
    lines: Mutex<VecDeque<String>>,
}

impl RecentLines {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            lines: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Push one formatted record. Multi-line records are split.
    pub fn push(&self, record: &str) {
        if self.capacity == 0 {
            return;
        }
        let Ok(mut lines) = self.lines.lock() else {
            return;
        };
        for line in record.lines().filter(|l| !l.trim().is_empty()) {
            if lines.len() == self.capacity {
                lines.pop_front();
            }
            lines.push_back(line.to_string());
        }
    }

    /// Oldest first
    pub fn snapshot(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().map(|l| l.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_only_latest_lines() {
        let recent = RecentLines::new(3);
        for i in 0..5 {
            recent.push(&format!("line {}\n", i));
        }
        assert_eq!(recent.snapshot(), vec!["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn test_splits_multiline_records() {
        let recent = RecentLines::new(10);
        recent.push("first\nsecond\n\n");
        assert_eq!(recent.len(), 2);
    }

    #[test]
    fn test_zero_capacity_stores_nothing() {
        let recent = RecentLines::new(0);
        recent.push("ignored\n");
        assert!(recent.is_empty());
    }
}
