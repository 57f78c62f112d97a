//! Multiset of carried items keyed by item identifier.

use std::collections::BTreeMap;

use super::EffectError;

/// Item counts. Entries never hold zero; removing the last unit drops the key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Inventory {
    items: BTreeMap<String, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, item: &str) -> u32 {
        self.items.get(item).copied().unwrap_or(0)
    }

    pub fn contains(&self, item: &str, count: u32) -> bool {
        self.count(item) >= count
    }

    pub fn add(&mut self, item: &str, count: u32) {
        if count == 0 {
            return;
        }
        let entry = self.items.entry(item.to_owned()).or_insert(0);
        *entry = entry.saturating_add(count);
    }

    /// Removes `count` units or fails without touching the inventory.
    pub fn remove(&mut self, item: &str, count: u32) -> Result<(), EffectError> {
        let held = self.count(item);
        if held < count {
            return Err(EffectError::InsufficientItems {
                item: item.to_owned(),
                requested: count,
                held,
            });
        }

        if held == count {
            self.items.remove(item);
        } else if let Some(entry) = self.items.get_mut(item) {
            *entry = held - count;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.items.iter().map(|(id, count)| (id.as_str(), *count))
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for Inventory {
    fn from_iter<T: IntoIterator<Item = (S, u32)>>(iter: T) -> Self {
        let mut inventory = Inventory::new();
        for (item, count) in iter {
            inventory.add(&item.into(), count);
        }
        inventory
    }
}
