//! Per-NPC dialogue loader.
//!
//! Dialogue lives in `dialogue/<npc_id>.ron`, one document per NPC. Every node
//! in a document must belong to the NPC named by the file stem.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use hiker_core::DialogueNode;
use serde::{Deserialize, Serialize};

use crate::ContentLoadError;
use crate::loaders::{LoadResult, document_name, parse_ron};

/// Dialogue document structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueDocument {
    pub nodes: Vec<DialogueNode>,
}

/// Nodes loaded from a dialogue directory plus the document each came from.
#[derive(Debug, Clone, Default)]
pub struct DialogueSet {
    pub nodes: Vec<DialogueNode>,
    pub sources: BTreeMap<String, PathBuf>,
}

pub struct DialogueLoader;

impl DialogueLoader {
    /// Load a single NPC's dialogue document.
    pub fn load(path: &Path) -> LoadResult<Vec<DialogueNode>> {
        let document: DialogueDocument = parse_ron(path)?;

        if let Some(npc_id) = path.file_stem().and_then(|stem| stem.to_str())
            && let Some(node) = document.nodes.iter().find(|node| node.npc_id != npc_id)
        {
            return Err(ContentLoadError::Invalid {
                document: document_name(path),
                record: node.id.clone(),
                field: "npc_id".to_owned(),
                reason: format!("belongs to `{}` but the document is for `{npc_id}`", node.npc_id),
            });
        }

        Ok(document.nodes)
    }

    /// Load every `*.ron` document in a directory, in file-name order.
    ///
    /// A missing directory yields an empty set.
    pub fn load_dir(dir: &Path) -> LoadResult<DialogueSet> {
        let mut set = DialogueSet::default();
        if !dir.is_dir() {
            return Ok(set);
        }

        let entries = std::fs::read_dir(dir).map_err(|source| ContentLoadError::Io {
            document: document_name(dir),
            source,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ContentLoadError::Io {
                document: document_name(dir),
                source,
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "ron") {
                paths.push(path);
            }
        }
        paths.sort();

        for path in paths {
            let nodes = Self::load(&path)?;
            tracing::debug!(document = %path.display(), nodes = nodes.len(), "dialogue loaded");
            for node in &nodes {
                set.sources.insert(node.id.clone(), path.clone());
            }
            set.nodes.extend(nodes);
        }

        Ok(set)
    }
}
