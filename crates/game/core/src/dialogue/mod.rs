//! Dialogue graph traversal.
//!
//! A conversation is a walk over an NPC's node graph. The [`DialogueEngine`]
//! picks the entry node, renders nodes with their eligible options, and on
//! each choice applies the option's effects through an [`EffectTarget`]
//! before moving to the next node. Cycles are allowed; every transition needs
//! a fresh choice from the caller.
mod error;
mod session;

use std::collections::BTreeMap;

pub use error::DialogueError;
pub use session::{DialogueSession, EndReason, NodeView, OptionView, Step, TranscriptEntry};

use crate::condition;
use crate::effect::Effect;
use crate::engine::EffectTarget;
use crate::env::{ContentCatalog, DialogueNode, DialogueOption, NpcDefinition};
use crate::state::{EffectError, StateSnapshot};
use crate::text::{self, Tokens};

#[derive(Clone, Copy, Debug)]
pub struct DialogueEngine<'c> {
    catalog: &'c ContentCatalog,
}

impl<'c> DialogueEngine<'c> {
    pub fn new(catalog: &'c ContentCatalog) -> Self {
        Self { catalog }
    }

    /// Starts a conversation at the first start node whose condition holds.
    ///
    /// Fails with [`DialogueError::NodeGatedOut`] when every start node is
    /// gated; the error names the NPC's fallback node for [`Self::begin_at`].
    pub fn begin(
        &self,
        npc_id: &str,
        snapshot: StateSnapshot<'_>,
    ) -> Result<DialogueSession, DialogueError> {
        let npc = self.npc(npc_id)?;

        let Some(first) = npc.start_nodes.first() else {
            return self.begin_at(npc_id, &npc.fallback_node, snapshot);
        };

        for node_id in &npc.start_nodes {
            let node = self.node(npc_id, node_id)?;
            if condition::evaluate(node.condition.as_ref(), snapshot, Some(npc_id)) {
                return Ok(self.open(npc_id, node, snapshot));
            }
        }

        tracing::debug!(npc = npc_id, "all start nodes gated");
        Err(DialogueError::NodeGatedOut {
            npc_id: npc_id.to_owned(),
            node_id: first.clone(),
            fallback_node: npc.fallback_node.clone(),
        })
    }

    /// Starts a conversation at an explicit node of the NPC.
    pub fn begin_at(
        &self,
        npc_id: &str,
        node_id: &str,
        snapshot: StateSnapshot<'_>,
    ) -> Result<DialogueSession, DialogueError> {
        let npc = self.npc(npc_id)?;
        let node = self.node(npc_id, node_id)?;

        if !condition::evaluate(node.condition.as_ref(), snapshot, Some(npc_id)) {
            return Err(DialogueError::NodeGatedOut {
                npc_id: npc_id.to_owned(),
                node_id: node_id.to_owned(),
                fallback_node: npc.fallback_node.clone(),
            });
        }

        Ok(self.open(npc_id, node, snapshot))
    }

    /// Renders the current node. An empty option list means the node is
    /// terminal.
    pub fn view(
        &self,
        session: &DialogueSession,
        snapshot: StateSnapshot<'_>,
    ) -> Result<NodeView, DialogueError> {
        let current = session
            .current
            .as_deref()
            .ok_or(DialogueError::SessionFinished)?;
        let node = self.node(&session.npc_id, current)?;
        Ok(self.render(&session.npc_id, node, snapshot))
    }

    /// Takes option `index` of the current node.
    ///
    /// Validation happens before anything is applied: an out-of-range or
    /// gated index, or a missing item, leaves both state and session
    /// untouched. The option's effects are applied as one atomic list.
    pub fn choose<T>(
        &self,
        session: &mut DialogueSession,
        index: usize,
        target: &mut T,
    ) -> Result<Step, DialogueError>
    where
        T: EffectTarget + ?Sized,
    {
        let current = session
            .current
            .clone()
            .ok_or(DialogueError::SessionFinished)?;
        let node = self.node(&session.npc_id, &current)?;
        let invalid = || DialogueError::InvalidOptionSelection {
            node_id: current.clone(),
            index,
        };

        let option = node.options.get(index).ok_or_else(invalid)?;
        {
            let snapshot = target.snapshot();
            let npc = Some(session.npc_id.as_str());
            if !condition::evaluate(option.condition.as_ref(), snapshot, npc) {
                return Err(invalid());
            }
            check_items(option, snapshot)?;
        }

        let effects = option_effects(&session.npc_id, option);
        target.apply_all(&effects).map_err(|error| match error {
            EffectError::InsufficientItems {
                item,
                requested,
                held,
            } => DialogueError::UnmetRequirement {
                item,
                required: requested,
                held,
            },
            other => DialogueError::Effect(other),
        })?;

        tracing::debug!(
            npc = %session.npc_id,
            node = %current,
            index,
            effects = effects.len(),
            "dialogue option taken"
        );
        session.transcript.push(TranscriptEntry::Choice {
            node_id: current.clone(),
            option_index: index,
            text: option.text.clone(),
        });

        let Some(next_id) = option.next_node_id.as_deref() else {
            session.current = None;
            return Ok(Step::Ended {
                reason: EndReason::Exit,
                last: None,
            });
        };

        let next = self.node(&session.npc_id, next_id)?;
        let snapshot = target.snapshot();
        let npc = Some(session.npc_id.as_str());
        if !condition::evaluate(next.condition.as_ref(), snapshot, npc) {
            session.current = None;
            return Ok(Step::Ended {
                reason: EndReason::GatedOut {
                    node_id: next_id.to_owned(),
                },
                last: None,
            });
        }

        let view = self.enter(session, next, snapshot);
        if view.is_terminal() {
            session.current = None;
            return Ok(Step::Ended {
                reason: EndReason::NoOptions,
                last: Some(view),
            });
        }
        Ok(Step::Node(view))
    }

    fn open(
        &self,
        npc_id: &str,
        node: &DialogueNode,
        snapshot: StateSnapshot<'_>,
    ) -> DialogueSession {
        let mut session = DialogueSession::new(npc_id);
        self.enter(&mut session, node, snapshot);
        tracing::debug!(npc = npc_id, node = %node.id, "dialogue started");
        session
    }

    fn enter(
        &self,
        session: &mut DialogueSession,
        node: &DialogueNode,
        snapshot: StateSnapshot<'_>,
    ) -> NodeView {
        let view = self.render(&session.npc_id, node, snapshot);
        session.current = Some(node.id.clone());
        session.transcript.push(TranscriptEntry::Line {
            node_id: node.id.clone(),
            text: view.text.clone(),
        });
        view
    }

    fn render(&self, npc_id: &str, node: &DialogueNode, snapshot: StateSnapshot<'_>) -> NodeView {
        let mut tokens = Tokens::from_snapshot(snapshot);
        if let Some(npc) = self.catalog.npc(npc_id) {
            tokens.insert("npc", npc.name.as_str());
        }

        let options = node
            .options
            .iter()
            .enumerate()
            .filter(|(_, option)| {
                condition::evaluate(option.condition.as_ref(), snapshot, Some(npc_id))
            })
            .map(|(index, option)| OptionView {
                index,
                text: text::render(&option.text, &tokens),
            })
            .collect();

        NodeView {
            node_id: node.id.clone(),
            text: text::render(&node.text, &tokens),
            options,
        }
    }

    fn npc(&self, npc_id: &str) -> Result<&'c NpcDefinition, DialogueError> {
        self.catalog
            .npc(npc_id)
            .ok_or_else(|| DialogueError::UnknownNpc {
                npc_id: npc_id.to_owned(),
            })
    }

    fn node(&self, npc_id: &str, node_id: &str) -> Result<&'c DialogueNode, DialogueError> {
        self.catalog
            .node(node_id)
            .filter(|node| node.npc_id == npc_id)
            .ok_or_else(|| DialogueError::UnknownNode {
                npc_id: npc_id.to_owned(),
                node_id: node_id.to_owned(),
            })
    }
}

/// Every required or consumed item must be held in full before anything runs.
fn check_items(option: &DialogueOption, snapshot: StateSnapshot<'_>) -> Result<(), DialogueError> {
    let mut needed: BTreeMap<&str, u32> = BTreeMap::new();
    for (item, count) in option.required_items.iter().chain(&option.consumed_items) {
        let entry = needed.entry(item.as_str()).or_insert(0);
        *entry = (*entry).max(*count);
    }

    for (item, required) in needed {
        let held = snapshot.item_count(item);
        if held < required {
            return Err(DialogueError::UnmetRequirement {
                item: item.to_owned(),
                required,
                held,
            });
        }
    }
    Ok(())
}

fn option_effects(npc_id: &str, option: &DialogueOption) -> Vec<Effect> {
    let mut effects = Vec::with_capacity(option.effects.len() + 3);
    if !option.consumed_items.is_empty() {
        effects.push(Effect::RemoveItems(option.consumed_items.clone()));
    }
    if option.rapport_delta != 0 {
        effects.push(Effect::Rapport {
            npc: npc_id.to_owned(),
            delta: option.rapport_delta,
        });
    }
    if !option.set_flags.is_empty() {
        effects.push(Effect::SetFlags(option.set_flags.clone()));
    }
    effects.extend(option.effects.iter().cloned());
    effects
}

#[cfg(test)]
mod tests;
