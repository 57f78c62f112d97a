//! Event table loader.

use std::path::Path;

use hiker_core::EventDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron};

/// Event table structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventTable {
    pub events: Vec<EventDefinition>,
}

/// Loader for exploration events from RON files.
pub struct EventLoader;

impl EventLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<EventDefinition>> {
        let table: EventTable = parse_ron(path)?;
        Ok(table.events)
    }
}
