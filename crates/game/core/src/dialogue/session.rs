/// One line of a conversation log.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TranscriptEntry {
    /// Rendered node text as shown on entry.
    Line { node_id: String, text: String },
    /// Option taken by the player.
    Choice {
        node_id: String,
        option_index: usize,
        text: String,
    },
}

/// Cursor into an NPC's dialogue graph.
///
/// Holds only the current node identifier; the graph itself stays in the
/// catalog. `current == None` is the Terminal state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DialogueSession {
    pub(super) npc_id: String,
    pub(super) current: Option<String>,
    pub(super) transcript: Vec<TranscriptEntry>,
}

impl DialogueSession {
    pub(super) fn new(npc_id: &str) -> Self {
        Self {
            npc_id: npc_id.to_owned(),
            current: None,
            transcript: Vec::new(),
        }
    }

    pub fn npc_id(&self) -> &str {
        &self.npc_id
    }

    pub fn current_node(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn is_finished(&self) -> bool {
        self.current.is_none()
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn into_transcript(self) -> Vec<TranscriptEntry> {
        self.transcript
    }
}

/// A selectable option. `index` refers to the node's full option list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionView {
    pub index: usize,
    pub text: String,
}

/// Rendered node with only its eligible options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeView {
    pub node_id: String,
    pub text: String,
    pub options: Vec<OptionView>,
}

impl NodeView {
    pub fn is_terminal(&self) -> bool {
        self.options.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EndReason {
    /// The chosen option had no next node.
    Exit,
    /// The reached node offered no eligible options.
    NoOptions,
    /// The next node's condition failed after the option's effects applied.
    GatedOut { node_id: String },
}

/// Result of a player choice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Node(NodeView),
    /// Terminal reached. `last` is the final node when it was shown.
    Ended {
        reason: EndReason,
        last: Option<NodeView>,
    },
}
