//! NPC roster loader.

use std::path::Path;

use hiker_core::NpcDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron};

/// NPC roster structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpcRoster {
    pub npcs: Vec<NpcDefinition>,
}

pub struct NpcLoader;

impl NpcLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<NpcDefinition>> {
        let roster: NpcRoster = parse_ron(path)?;
        Ok(roster.npcs)
    }
}
