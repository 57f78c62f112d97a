use std::collections::BTreeMap;

use crate::condition::Condition;
use crate::effect::Effect;

/// One player choice on a dialogue node.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct DialogueOption {
    pub text: String,
    /// `None` ends the conversation.
    pub next_node_id: Option<String>,
    pub rapport_delta: i64,
    pub set_flags: BTreeMap<String, bool>,
    /// Items that must be held but are kept.
    pub required_items: BTreeMap<String, u32>,
    /// Items that must be held and are removed when the option is taken.
    pub consumed_items: BTreeMap<String, u32>,
    pub condition: Option<Condition>,
    pub effects: Vec<Effect>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DialogueNode {
    pub id: String,
    pub npc_id: String,
    pub text: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub condition: Option<Condition>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub options: Vec<DialogueOption>,
}
