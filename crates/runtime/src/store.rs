//! Exclusive owner of the live game state.

use hiker_core::engine::hunger;
use hiker_core::{
    Effect, EffectError, EffectTarget, EventSelector, GameConfig, GameEngine, GameState,
    PlayerProfile, SelectError, Selection, StateSnapshot,
};
use std::sync::Arc;

use rand::Rng;

use crate::migration::{MigrationError, MigrationPipeline};
use crate::payload::SavePayload;
use crate::repository;
use crate::rng::GameRng;

/// Holds the state, a shared handle to its tuning, and the run's RNG.
///
/// Every mutation goes through [`EffectTarget::apply_all`], which delegates
/// to [`GameEngine`] and keeps its all-or-nothing guarantee.
#[derive(Debug)]
pub struct StateStore<R = GameRng> {
    state: GameState,
    config: Arc<GameConfig>,
    rng: R,
}

impl<R: Rng> StateStore<R> {
    pub fn new(state: GameState, config: Arc<GameConfig>, rng: R) -> Self {
        Self { state, config, rng }
    }

    pub fn new_game(player: PlayerProfile, config: Arc<GameConfig>, rng: R) -> Self {
        let state = GameState::new(player, &config);
        tracing::info!(player = %state.player.name, race = %state.player.race, "new game");
        Self::new(state, config, rng)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn effective_stamina_cap(&self) -> f64 {
        hunger::effective_stamina_cap(&self.state, &self.config)
    }

    /// Selects an event for this state without recording it.
    pub fn select<'c>(
        &mut self,
        selector: &EventSelector<'c>,
        depth: u32,
    ) -> Result<Selection<'c>, SelectError> {
        let snapshot = self.state.snapshot();
        selector.select(
            depth,
            snapshot.season(),
            snapshot.recent_events(),
            snapshot,
            &mut self.rng,
        )
    }

    /// Selects an event for this state and records it in the history.
    pub fn draw<'c>(
        &mut self,
        selector: &EventSelector<'c>,
        depth: u32,
    ) -> Result<Selection<'c>, SelectError> {
        let selection = self.select(selector, depth)?;
        self.apply(&selection.record_effect())?;
        Ok(selection)
    }

    /// Encodes the current state at the current schema version.
    pub fn save(&self) -> repository::Result<SavePayload> {
        SavePayload::from_state(&self.state)
    }

    /// Decodes a payload of any supported schema.
    pub fn load(payload: SavePayload) -> Result<GameState, MigrationError> {
        MigrationPipeline::new().decode(payload)
    }

    /// Replaces the live state with a loaded payload.
    pub fn restore(&mut self, payload: SavePayload) -> Result<(), MigrationError> {
        self.state = Self::load(payload)?;
        Ok(())
    }

    pub fn into_state(self) -> GameState {
        self.state
    }
}

impl<R: Rng> EffectTarget for StateStore<R> {
    fn snapshot(&self) -> StateSnapshot<'_> {
        self.state.snapshot()
    }

    fn apply_all(&mut self, effects: &[Effect]) -> Result<(), EffectError> {
        GameEngine::new(&mut self.state, &self.config, &mut self.rng).apply_all(effects)
    }
}
