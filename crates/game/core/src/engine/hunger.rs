//! Hunger-driven stamina cap and the day-end rollover.

use crate::config::{GameConfig, HungerRules};
use crate::state::{GameOverCause, GameState, RunStatus, StatKind, TimeOfDay, active_total};

/// Cap multiplier for the given number of days without a meal.
pub fn cap_multiplier(rules: &HungerRules, days_without_meal: u32) -> f64 {
    let index = days_without_meal as usize;
    rules
        .cap_multipliers
        .get(index)
        .or_else(|| rules.cap_multipliers.last())
        .copied()
        .unwrap_or(1.0)
}

/// `(base cap + active stamina_max bonuses) * hunger multiplier`, never negative.
pub fn effective_stamina_cap(state: &GameState, config: &GameConfig) -> f64 {
    let bonus = active_total(&state.timed_modifiers, StatKind::StaminaMax, state.day);
    let base = (state.stamina.base_cap + bonus).max(0.0);
    base * cap_multiplier(&config.hunger, state.days_without_meal)
}

/// Starvation signal for a hunger counter.
pub fn starvation(rules: &HungerRules, days_without_meal: u32) -> Option<GameOverCause> {
    (days_without_meal >= rules.starvation_threshold).then_some(GameOverCause::Starvation)
}

pub(crate) fn clamp_stamina(state: &mut GameState, config: &GameConfig) {
    let cap = effective_stamina_cap(state, config);
    state.stamina.current = state.stamina.current.clamp(0.0, cap);
}

/// Closes the current day and opens the next one.
pub(crate) fn end_day(state: &mut GameState, config: &GameConfig, ate_meal: bool) {
    let rules = &config.hunger;

    if ate_meal || state.ate_meal_today {
        state.days_without_meal = 0;
    } else if !state.ate_snack_today {
        state.days_without_meal = (state.days_without_meal + 1).min(rules.starvation_threshold);
    }
    state.ate_meal_today = false;
    state.ate_snack_today = false;

    state.day += 1;
    let (season, day_in_season) = config.calendar.locate(state.day);
    state.season = season;
    state.day_in_season = day_in_season;
    state.time_of_day = TimeOfDay::Dawn;

    let day = state.day;
    state.timed_modifiers.retain(|modifier| modifier.is_active(day));

    state.stamina.current += rules.wake_restore;
    clamp_stamina(state, config);

    if let Some(cause) = starvation(rules, state.days_without_meal) {
        tracing::info!(day = state.day, %cause, "run ended");
        state.status = RunStatus::GameOver(cause);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{PlayerProfile, Season};

    fn state(config: &GameConfig) -> GameState {
        GameState::new(PlayerProfile::default(), config)
    }

    #[test]
    fn cap_follows_hunger_table() {
        let config = GameConfig::default();
        let mut state = state(&config);
        let base = config.hunger.base_stamina_cap;

        state.days_without_meal = 3;
        assert!((effective_stamina_cap(&state, &config) - base * 0.30).abs() < 1e-9);
        assert_eq!(starvation(&config.hunger, 3), None);

        state.days_without_meal = 4;
        assert_eq!(effective_stamina_cap(&state, &config), 0.0);
        assert_eq!(
            starvation(&config.hunger, 4),
            Some(GameOverCause::Starvation)
        );
    }

    #[test]
    fn snack_holds_counter_and_meal_resets_it() {
        let config = GameConfig::default();
        let mut state = state(&config);

        end_day(&mut state, &config, false);
        assert_eq!(state.days_without_meal, 1);

        state.ate_snack_today = true;
        end_day(&mut state, &config, false);
        assert_eq!(state.days_without_meal, 1);
        assert!(!state.ate_snack_today);

        end_day(&mut state, &config, true);
        assert_eq!(state.days_without_meal, 0);
        assert_eq!(state.day, 4);
        assert_eq!(state.time_of_day, TimeOfDay::Dawn);
    }

    #[test]
    fn calendar_advances_with_the_day() {
        let config = GameConfig::default();
        let mut state = state(&config);
        state.day = 14;
        state.ate_meal_today = true;

        end_day(&mut state, &config, false);
        assert_eq!((state.season, state.day_in_season), (Season::Summer, 1));
    }

    #[test]
    fn starvation_ends_the_run() {
        let config = GameConfig::default();
        let mut state = state(&config);
        for _ in 0..4 {
            end_day(&mut state, &config, false);
        }
        assert_eq!(state.days_without_meal, 4);
        assert_eq!(state.status, RunStatus::GameOver(GameOverCause::Starvation));
        assert_eq!(state.stamina.current, 0.0);
    }
}
