use crate::error::{ErrorSeverity, GameError};
use crate::state::EffectError;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum DialogueError {
    #[error("unknown npc `{npc_id}`")]
    UnknownNpc { npc_id: String },

    /// The node is missing or does not belong to the conversation's NPC.
    #[error("node `{node_id}` is not a dialogue node of `{npc_id}`")]
    UnknownNode { npc_id: String, node_id: String },

    /// The entry node's condition does not hold. Enter `fallback_node`
    /// instead.
    #[error("node `{node_id}` is gated out; fallback is `{fallback_node}`")]
    NodeGatedOut {
        npc_id: String,
        node_id: String,
        fallback_node: String,
    },

    /// Index out of range, or the option's condition does not hold.
    #[error("option {index} is not selectable on node `{node_id}`")]
    InvalidOptionSelection { node_id: String, index: usize },

    #[error("requires {required} x {item}, holding {held}")]
    UnmetRequirement {
        item: String,
        required: u32,
        held: u32,
    },

    #[error("the conversation has already ended")]
    SessionFinished,

    #[error(transparent)]
    Effect(#[from] EffectError),
}

impl GameError for DialogueError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NodeGatedOut { .. } | Self::UnmetRequirement { .. } => {
                ErrorSeverity::Recoverable
            }
            Self::UnknownNpc { .. } | Self::InvalidOptionSelection { .. } | Self::SessionFinished => {
                ErrorSeverity::Validation
            }
            Self::UnknownNode { .. } => ErrorSeverity::Internal,
            Self::Effect(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownNpc { .. } => "DIALOGUE_UNKNOWN_NPC",
            Self::UnknownNode { .. } => "DIALOGUE_UNKNOWN_NODE",
            Self::NodeGatedOut { .. } => "DIALOGUE_NODE_GATED_OUT",
            Self::InvalidOptionSelection { .. } => "DIALOGUE_INVALID_OPTION",
            Self::UnmetRequirement { .. } => "DIALOGUE_UNMET_REQUIREMENT",
            Self::SessionFinished => "DIALOGUE_SESSION_FINISHED",
            Self::Effect(error) => error.error_code(),
        }
    }
}
