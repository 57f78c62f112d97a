use std::collections::HashMap;

use super::{
    ContentKind, DialogueNode, EventDefinition, ItemDefinition, LandmarkDefinition, NpcDefinition,
    RaceDefinition, RecipeDefinition,
};
use super::error::CatalogError;

/// Records addressable by a stable identifier.
pub trait Keyed {
    fn key(&self) -> &str;
}

macro_rules! keyed_by_id {
    ($($ty:ty),* $(,)?) => {
        $(impl Keyed for $ty {
            fn key(&self) -> &str {
                &self.id
            }
        })*
    };
}

keyed_by_id!(
    EventDefinition,
    DialogueNode,
    NpcDefinition,
    LandmarkDefinition,
    ItemDefinition,
    RecipeDefinition,
    RaceDefinition,
);

/// Document-ordered records with an identifier index.
///
/// Iteration follows authoring order, which keeps weighted sampling and tie
/// breaking reproducible across runs.
#[derive(Clone, Debug)]
pub struct Registry<T> {
    entries: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T: Keyed> Registry<T> {
    pub fn from_vec(kind: ContentKind, entries: Vec<T>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if index.insert(entry.key().to_owned(), position).is_some() {
                return Err(CatalogError::DuplicateId {
                    kind,
                    id: entry.key().to_owned(),
                });
            }
        }
        Ok(Self { entries, index })
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|&position| &self.entries[position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}
