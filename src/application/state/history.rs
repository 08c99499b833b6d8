//! Bounded history of recently processed messages

use std::collections::VecDeque;

use crate::domain::entities::InboundMessageRecord;

/// Number of records kept before the oldest is evicted
pub const HISTORY_CAPACITY: usize = 100;

/// Fixed-capacity FIFO of message records
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    entries: VecDeque<InboundMessageRecord>,
    capacity: usize,
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends `entry`, evicting the oldest record when full
    pub fn record(&mut self, entry: InboundMessageRecord) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Copy of the contents, oldest first
    pub fn snapshot(&self) -> Vec<InboundMessageRecord> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Channel, Message, User};

    fn record(n: usize) -> InboundMessageRecord {
        let message = Message::new(Channel::new("1", "general"), User::new("2", "someone"), format!("msg {n}"))
            .with_id(n.to_string());
        InboundMessageRecord::from(&message)
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let mut history = HistoryBuffer::new();
        for n in 0..250 {
            history.record(record(n));
            assert!(history.len() <= HISTORY_CAPACITY);
        }
        assert_eq!(history.snapshot().len(), HISTORY_CAPACITY);
    }

    #[test]
    fn test_overflow_evicts_exactly_the_oldest() {
        let mut history = HistoryBuffer::new();
        for n in 0..HISTORY_CAPACITY {
            history.record(record(n));
        }
        history.record(record(HISTORY_CAPACITY));

        let ids: Vec<String> = history.snapshot().into_iter().map(|r| r.id).collect();
        let expected: Vec<String> = (1..=HISTORY_CAPACITY).map(|n| n.to_string()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut history = HistoryBuffer::with_capacity(3);
        history.record(record(0));
        let mut snapshot = history.snapshot();
        snapshot.clear();
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut history = HistoryBuffer::with_capacity(0);
        history.record(record(0));
        assert!(history.is_empty());
    }
}
