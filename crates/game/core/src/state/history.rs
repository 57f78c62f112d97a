use std::collections::VecDeque;

/// Bounded FIFO of recently drawn event identifiers, oldest first.
///
/// Decoding keeps at most `capacity` of the newest entries.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "StoredHistory")
)]
pub struct RecentEvents {
    capacity: usize,
    entries: VecDeque<String>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct StoredHistory {
    capacity: usize,
    entries: VecDeque<String>,
}

#[cfg(feature = "serde")]
impl From<StoredHistory> for RecentEvents {
    fn from(stored: StoredHistory) -> Self {
        let StoredHistory {
            capacity,
            mut entries,
        } = stored;
        let excess = entries.len().saturating_sub(capacity);
        entries.drain(..excess);
        Self { capacity, entries }
    }
}

impl RecentEvents {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Appends an identifier, evicting the oldest entry once full.
    pub fn push(&mut self, event_id: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(event_id.into());
    }

    pub fn contains(&self, event_id: &str) -> bool {
        self.entries.iter().any(|entry| entry == event_id)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}
