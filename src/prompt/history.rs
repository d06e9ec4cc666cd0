// SPDX-License-Identifier: MIT

use std::collections::VecDeque;

/// Bounded record of previously submitted prompt lines, oldest first.
/// Purely in-memory; it lives as long as the owning client.
#[derive(Debug)]
pub(crate) struct HistoryRing {
    entries: VecDeque<String>,
    capacity: usize,
}

impl HistoryRing {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Append a line, evicting the oldest entry when full. Returns false
    /// for a consecutive duplicate, which is not recorded.
    pub(crate) fn add(&mut self, line: &str) -> bool {
        if self.entries.back().is_some_and(|last| last == line) {
            return false;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(line.to_string());
        true
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry by position, 0 being the oldest.
    pub(crate) fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

impl Default for HistoryRing {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_evicts_oldest_first() {
        let mut ring = HistoryRing::new(3);
        for line in ["a", "b", "c", "d"] {
            ring.add(line);
        }
        let entries: Vec<&str> = ring.iter().collect();
        assert_eq!(entries, ["b", "c", "d"]);
        assert_eq!(ring.len(), 3);
    }

    #[test]
    fn test_consecutive_duplicate_is_suppressed() {
        let mut ring = HistoryRing::new(10);
        assert!(ring.add("ls"));
        assert!(!ring.add("ls"));
        assert!(ring.add("cd"));
        assert!(ring.add("ls"));
        assert_eq!(ring.len(), 3);
    }

    #[test]
    fn test_get_is_oldest_first() {
        let mut ring = HistoryRing::new(10);
        ring.add("first");
        ring.add("second");
        assert_eq!(ring.get(0), Some("first"));
        assert_eq!(ring.get(1), Some("second"));
        assert_eq!(ring.get(2), None);
    }
}
