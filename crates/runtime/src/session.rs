//! Game session orchestration.
//!
//! [`GameSession`] ties the catalog, the state store and a save repository
//! together and exposes the turn-level operations a front end drives:
//! exploring, talking, eating, ending the day, saving and loading.

use std::sync::Arc;

use hiker_core::text::{self, Tokens};
use hiker_core::{
    ContentCatalog, DialogueEngine, DialogueError, DialogueSession, Effect, EffectTarget,
    EventCategory, EventSelector, FoodKind, GameConfig, GameState, NodeView, PlayerProfile,
    RunStatus, Step,
};
use rand::Rng;

use crate::error::{Result, SessionError};
use crate::repository::SaveRepository;
use crate::rng::GameRng;
use crate::store::StateStore;

/// Stamina spent on every exploration step.
pub const STEP_COST: f64 = 1.0;

/// What happened on one exploration step.
#[derive(Clone, Debug, PartialEq)]
pub struct StepOutcome {
    pub event_id: String,
    pub category: EventCategory,
    /// Event text with tokens substituted.
    pub text: String,
    /// True when the forage safety net chose the event.
    pub forced: bool,
}

pub struct GameSession<R = GameRng> {
    catalog: ContentCatalog,
    config: Arc<GameConfig>,
    store: StateStore<R>,
    repository: Box<dyn SaveRepository>,
    slot: String,
    conversation: Option<DialogueSession>,
}

impl<R: Rng> GameSession<R> {
    /// Starts a fresh run.
    pub fn new_game(
        catalog: ContentCatalog,
        config: GameConfig,
        player: PlayerProfile,
        rng: R,
        repository: Box<dyn SaveRepository>,
        slot: impl Into<String>,
    ) -> Self {
        let config = Arc::new(config);
        let store = StateStore::new_game(player, Arc::clone(&config), rng);
        Self {
            catalog,
            config,
            store,
            repository,
            slot: slot.into(),
            conversation: None,
        }
    }

    /// Resumes the run saved in `slot`, or returns `Ok(None)` if the slot is
    /// empty.
    pub fn resume(
        catalog: ContentCatalog,
        config: GameConfig,
        rng: R,
        repository: Box<dyn SaveRepository>,
        slot: impl Into<String>,
    ) -> Result<Option<Self>> {
        let slot = slot.into();
        let Some(payload) = repository.load(&slot)? else {
            return Ok(None);
        };
        let state = StateStore::<R>::load(payload)?;
        tracing::info!(slot = %slot, day = state.day, "run resumed");

        let config = Arc::new(config);
        Ok(Some(Self {
            catalog,
            store: StateStore::new(state, Arc::clone(&config), rng),
            config,
            repository,
            slot,
            conversation: None,
        }))
    }

    pub fn state(&self) -> &GameState {
        self.store.state()
    }

    pub fn catalog(&self) -> &ContentCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn effective_stamina_cap(&self) -> f64 {
        self.store.effective_stamina_cap()
    }

    /// One exploration step at `depth`.
    ///
    /// Recording the event, its effects and the step cost are applied as a
    /// single list; if any of them fails the state is unchanged.
    pub fn explore_step(&mut self, depth: u32) -> Result<StepOutcome> {
        let selector = EventSelector::new(&self.catalog, &self.config);
        let selection = self.store.select(&selector, depth)?;
        let event = selection.event;

        let mut effects = Vec::with_capacity(event.effects.len() + 2);
        effects.push(selection.record_effect());
        effects.extend(event.effects.iter().cloned());
        effects.push(Effect::Stamina(-STEP_COST));
        self.store.apply_all(&effects)?;

        let tokens = Tokens::from_snapshot(self.store.snapshot());
        let outcome = StepOutcome {
            event_id: event.id.clone(),
            category: event.category,
            text: text::render(&event.text, &tokens),
            forced: selection.forced,
        };
        tracing::debug!(event = %outcome.event_id, depth, forced = outcome.forced, "step resolved");
        Ok(outcome)
    }

    /// Opens a conversation with `npc_id`.
    ///
    /// If every start node is gated out the NPC's fallback node is used.
    pub fn talk(&mut self, npc_id: &str) -> Result<NodeView> {
        let engine = DialogueEngine::new(&self.catalog);
        let snapshot = self.store.snapshot();

        let session = match engine.begin(npc_id, snapshot) {
            Ok(session) => session,
            Err(DialogueError::NodeGatedOut { fallback_node, .. }) => {
                engine.begin_at(npc_id, &fallback_node, snapshot)?
            }
            Err(error) => return Err(error.into()),
        };

        let view = engine.view(&session, snapshot)?;
        self.conversation = Some(session);
        Ok(view)
    }

    /// Re-renders the current dialogue node.
    pub fn dialogue_view(&self) -> Result<NodeView> {
        let session = self
            .conversation
            .as_ref()
            .ok_or(SessionError::NoConversation)?;
        Ok(DialogueEngine::new(&self.catalog).view(session, self.store.snapshot())?)
    }

    /// Takes an option of the current node. A finished conversation is
    /// closed.
    pub fn choose(&mut self, index: usize) -> Result<Step> {
        let engine = DialogueEngine::new(&self.catalog);
        let session = self
            .conversation
            .as_mut()
            .ok_or(SessionError::NoConversation)?;

        let step = engine.choose(session, index, &mut self.store)?;
        if let Step::Ended { reason, .. } = &step {
            tracing::debug!(npc = session.npc_id(), ?reason, "conversation ended");
            self.conversation = None;
        }
        Ok(step)
    }

    pub fn conversation(&self) -> Option<&DialogueSession> {
        self.conversation.as_ref()
    }

    /// Applies an effect list atomically, for front-end actions the session
    /// has no dedicated operation for.
    pub fn apply_effects(&mut self, effects: &[Effect]) -> Result<()> {
        self.store.apply_all(effects)?;
        Ok(())
    }

    /// Eats one unit of `item`.
    pub fn eat(&mut self, item: &str, kind: FoodKind) -> Result<()> {
        self.store
            .apply_all(&[Effect::remove_item(item, 1), Effect::Eat(kind)])?;
        Ok(())
    }

    /// Ends the day and returns the resulting run status.
    pub fn end_day(&mut self) -> Result<RunStatus> {
        self.conversation = None;
        self.store.apply(&Effect::EndDay { ate_meal: false })?;
        Ok(self.store.state().status)
    }

    /// Writes the current state to the session's slot.
    pub fn save(&self) -> Result<()> {
        let payload = self.store.save()?;
        self.repository.save(&self.slot, &payload)?;
        Ok(())
    }

    /// Replaces the live state with the slot's save. Returns `false` if the
    /// slot is empty.
    pub fn load(&mut self) -> Result<bool> {
        let Some(payload) = self.repository.load(&self.slot)? else {
            return Ok(false);
        };
        self.store.restore(payload)?;
        self.conversation = None;
        Ok(true)
    }
}
