//! Effect application.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. Effect
//! lists are applied to a clone and committed only when every effect
//! succeeds, so a failing list never leaves a partially mutated state.

pub mod hunger;
mod reducer;

pub use reducer::StateReducer;

use rand::Rng;

use crate::config::GameConfig;
use crate::effect::Effect;
use crate::state::{EffectError, GameState, StateSnapshot};

/// Anything that exposes a snapshot and accepts effect lists atomically.
///
/// The event selector and dialogue engine talk to state only through this
/// seam, which lets the runtime put its store behind it.
pub trait EffectTarget {
    fn snapshot(&self) -> StateSnapshot<'_>;

    /// Applies all effects or none.
    fn apply_all(&mut self, effects: &[Effect]) -> Result<(), EffectError>;

    fn apply(&mut self, effect: &Effect) -> Result<(), EffectError> {
        self.apply_all(std::slice::from_ref(effect))
    }
}

pub struct GameEngine<'a, R: Rng + ?Sized> {
    state: &'a mut GameState,
    config: &'a GameConfig,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> GameEngine<'a, R> {
    pub fn new(state: &'a mut GameState, config: &'a GameConfig, rng: &'a mut R) -> Self {
        Self { state, config, rng }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    pub fn effective_stamina_cap(&self) -> f64 {
        hunger::effective_stamina_cap(self.state, self.config)
    }
}

impl<R: Rng + ?Sized> EffectTarget for GameEngine<'_, R> {
    fn snapshot(&self) -> StateSnapshot<'_> {
        self.state.snapshot()
    }

    fn apply_all(&mut self, effects: &[Effect]) -> Result<(), EffectError> {
        if self.state.is_over() {
            return Err(EffectError::RunEnded);
        }

        let mut working = self.state.clone();
        {
            let mut reducer = StateReducer::new(&mut working, self.config, self.rng);
            for effect in effects {
                reducer.apply(effect).inspect_err(|error| {
                    tracing::debug!(effect = effect.kind(), %error, "effect rejected");
                })?;
            }
        }

        *self.state = working;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::effect::{CountRange, FoodKind, ItemGrant, ModifierGrant};
    use crate::env::EventCategory;
    use crate::state::{PlayerProfile, RunStatus, StatKind, StatModifier};

    fn fixture() -> (GameState, GameConfig, ChaCha8Rng) {
        let config = GameConfig::default();
        let state = GameState::new(PlayerProfile::default(), &config);
        (state, config, ChaCha8Rng::seed_from_u64(1))
    }

    #[test]
    fn failing_list_applies_nothing() {
        let (mut state, config, mut rng) = fixture();
        state.inventory.add("rope", 1);
        let before = state.clone();

        let mut engine = GameEngine::new(&mut state, &config, &mut rng);
        let err = engine
            .apply_all(&[
                Effect::Rapport {
                    npc: "hermit".into(),
                    delta: 2,
                },
                Effect::remove_item("gold_pan", 1),
            ])
            .unwrap_err();

        assert!(matches!(err, EffectError::InsufficientItems { .. }));
        assert_eq!(state, before);
    }

    #[test]
    fn stamina_is_clamped_to_cap() {
        let (mut state, config, mut rng) = fixture();
        let mut engine = GameEngine::new(&mut state, &config, &mut rng);

        engine.apply(&Effect::Stamina(100.0)).unwrap();
        assert_eq!(engine.state().stamina.current, config.hunger.base_stamina_cap);

        engine.apply(&Effect::Stamina(-100.0)).unwrap();
        assert_eq!(engine.state().stamina.current, 0.0);

        assert!(engine.apply(&Effect::Stamina(f64::NAN)).is_err());
    }

    #[test]
    fn timed_modifier_raises_cap_until_expiry() {
        let (mut state, config, mut rng) = fixture();
        let mut engine = GameEngine::new(&mut state, &config, &mut rng);
        engine
            .apply(&Effect::AddTimedModifier(ModifierGrant {
                source: "mint_tea".into(),
                modifiers: vec![StatModifier {
                    stat: StatKind::StaminaMax,
                    amount: 2.0,
                }],
                duration_days: Some(1),
            }))
            .unwrap();
        assert_eq!(engine.effective_stamina_cap(), 12.0);

        engine
            .apply_all(&[Effect::Eat(FoodKind::Meal), Effect::EndDay { ate_meal: false }])
            .unwrap();
        assert!(engine.state().timed_modifiers.is_empty());
        assert_eq!(engine.effective_stamina_cap(), 10.0);
    }

    #[test]
    fn record_event_tracks_forage_steps() {
        let (mut state, config, mut rng) = fixture();
        let mut engine = GameEngine::new(&mut state, &config, &mut rng);
        let record = |id: &str, category| Effect::RecordEvent {
            event_id: id.into(),
            category,
        };

        engine
            .apply_all(&[
                record("a", EventCategory::Flavor),
                record("b", EventCategory::Hazard),
            ])
            .unwrap();
        assert_eq!(engine.state().steps_since_forage, 2);

        engine.apply(&record("berries", EventCategory::Forage)).unwrap();
        assert_eq!(engine.state().steps_since_forage, 0);
        assert_eq!(engine.state().recent_events.len(), 3);
    }

    #[test]
    fn landmarks_and_quests_only_move_forward() {
        let (mut state, config, mut rng) = fixture();
        let mut engine = GameEngine::new(&mut state, &config, &mut rng);

        engine
            .apply_all(&[
                Effect::DiscoverLandmark("old_oak".into()),
                Effect::BumpPathStability("old_oak".into()),
                Effect::BumpPathStability("old_oak".into()),
                Effect::BumpPathStability("old_oak".into()),
                Effect::AdvanceQuest {
                    quest: "runestone".into(),
                    stage: 2,
                },
                Effect::AdvanceQuest {
                    quest: "runestone".into(),
                    stage: 1,
                },
            ])
            .unwrap();

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.path_stability("old_oak"), config.stability.max);
        assert_eq!(snapshot.quest_stage("runestone"), 2);
        assert_eq!(snapshot.state().current_landmark.as_deref(), Some("old_oak"));
    }

    #[test]
    fn item_counts_are_drawn_from_range() {
        let (mut state, config, mut rng) = fixture();
        let mut engine = GameEngine::new(&mut state, &config, &mut rng);
        engine
            .apply(&Effect::AddItems(vec![ItemGrant::new(
                "berries",
                CountRange { min: 2, max: 4 },
            )]))
            .unwrap();
        let count = engine.snapshot().item_count("berries");
        assert!((2..=4).contains(&count));
    }

    #[test]
    fn ended_run_rejects_effects() {
        let (mut state, config, mut rng) = fixture();
        state.status = RunStatus::GameOver(crate::state::GameOverCause::Starvation);
        let mut engine = GameEngine::new(&mut state, &config, &mut rng);
        assert_eq!(
            engine.apply(&Effect::Stamina(1.0)),
            Err(EffectError::RunEnded)
        );
    }
}
