use std::collections::BTreeMap;

use rand::Rng;

use crate::config::GameConfig;
use crate::effect::{Effect, FoodKind, ItemGrant, ModifierGrant};
use crate::env::EventCategory;
use crate::state::{EffectError, GameState, StatKind, TimedModifier, active_total};

use super::hunger;

/// Applies single effects to a working copy of [`GameState`].
///
/// The reducer mutates in place and may leave the copy half-updated on error;
/// [`super::GameEngine`] only commits the copy when every effect succeeded.
pub struct StateReducer<'a, R: Rng + ?Sized> {
    state: &'a mut GameState,
    config: &'a GameConfig,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> StateReducer<'a, R> {
    pub fn new(state: &'a mut GameState, config: &'a GameConfig, rng: &'a mut R) -> Self {
        Self { state, config, rng }
    }

    pub fn apply(&mut self, effect: &Effect) -> Result<(), EffectError> {
        match effect {
            Effect::AddItems(grants) => self.add_items(grants),
            Effect::RemoveItems(items) => self.remove_items(items),
            Effect::Stamina(delta) => self.adjust_stamina(*delta),
            Effect::Rapport { npc, delta } => {
                self.adjust_rapport(npc, *delta);
                Ok(())
            }
            Effect::SetFlags(flags) => {
                for (name, value) in flags {
                    self.state.flags.set(name.clone(), *value);
                }
                Ok(())
            }
            Effect::ClearFlags(flags) => {
                for name in flags {
                    self.state.flags.clear(name);
                }
                Ok(())
            }
            Effect::AddTimedModifier(grant) => self.add_modifier(grant),
            Effect::RecordEvent { event_id, category } => {
                self.record_event(event_id, *category);
                Ok(())
            }
            Effect::BumpPathStability(landmark) => {
                let max = self.config.stability.max;
                let stability = self
                    .state
                    .landmark_stability
                    .entry(landmark.clone())
                    .or_insert(0);
                *stability = (*stability + 1).min(max);
                self.state.current_landmark = Some(landmark.clone());
                Ok(())
            }
            Effect::DiscoverLandmark(landmark) => {
                let floor = 1.min(self.config.stability.max);
                self.state.discovered_landmarks.insert(landmark.clone());
                let stability = self
                    .state
                    .landmark_stability
                    .entry(landmark.clone())
                    .or_insert(0);
                *stability = (*stability).max(floor);
                self.state.current_landmark = Some(landmark.clone());
                Ok(())
            }
            Effect::AdvanceQuest { quest, stage } => {
                let current = self.state.quests.entry(quest.clone()).or_insert(0);
                *current = (*current).max(*stage);
                Ok(())
            }
            Effect::AdvanceTime(slots) => {
                self.state.time_of_day = self.state.time_of_day.advance(*slots);
                Ok(())
            }
            Effect::Eat(FoodKind::Meal) => {
                self.state.ate_meal_today = true;
                Ok(())
            }
            Effect::Eat(FoodKind::Snack) => {
                self.state.ate_snack_today = true;
                Ok(())
            }
            Effect::EndDay { ate_meal } => {
                hunger::end_day(self.state, self.config, *ate_meal);
                Ok(())
            }
        }
    }

    fn add_items(&mut self, grants: &[ItemGrant]) -> Result<(), EffectError> {
        if let Some(grant) = grants.iter().find(|grant| !grant.count.is_valid()) {
            return Err(EffectError::InvalidCountRange {
                item: grant.item.clone(),
                min: grant.count.min,
                max: grant.count.max,
            });
        }

        for grant in grants {
            let count = grant.count.sample(self.rng);
            self.state.inventory.add(&grant.item, count);
        }
        Ok(())
    }

    fn remove_items(&mut self, items: &BTreeMap<String, u32>) -> Result<(), EffectError> {
        for (item, count) in items {
            self.state.inventory.remove(item, *count)?;
        }
        Ok(())
    }

    fn adjust_stamina(&mut self, delta: f64) -> Result<(), EffectError> {
        if !delta.is_finite() {
            return Err(EffectError::NonFiniteAmount {
                field: "stamina".into(),
            });
        }
        self.state.stamina.current += delta;
        hunger::clamp_stamina(self.state, self.config);
        Ok(())
    }

    fn adjust_rapport(&mut self, npc: &str, delta: i64) {
        let bonus = if delta > 0 {
            active_total(
                &self.state.timed_modifiers,
                StatKind::RapportBonus,
                self.state.day,
            )
            .round() as i64
        } else {
            0
        };

        let score = self.state.rapport.entry(npc.to_owned()).or_insert(0);
        *score = score.saturating_add(delta.saturating_add(bonus));
    }

    fn add_modifier(&mut self, grant: &ModifierGrant) -> Result<(), EffectError> {
        if grant.modifiers.iter().any(|m| !m.amount.is_finite()) {
            return Err(EffectError::NonFiniteAmount {
                field: format!("modifier {}", grant.source),
            });
        }

        let day = self.state.day;
        self.state.timed_modifiers.push(TimedModifier {
            source: grant.source.clone(),
            modifiers: grant.modifiers.clone(),
            expires_on_day: grant
                .duration_days
                .map(|days| day.saturating_add(days.saturating_sub(1))),
        });
        hunger::clamp_stamina(self.state, self.config);
        Ok(())
    }

    fn record_event(&mut self, event_id: &str, category: EventCategory) {
        self.state.recent_events.push(event_id);
        if category == EventCategory::Forage {
            self.state.steps_since_forage = 0;
        } else {
            self.state.steps_since_forage = self.state.steps_since_forage.saturating_add(1);
        }
    }
}
