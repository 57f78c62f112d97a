//! Weighted event sampling.
//!
//! Selection runs in fixed stages:
//!
//! 1. **Filter** events by depth bounds and condition.
//! 2. **Weight** each survivor: `max(0, base + slope * depth)` times the
//!    season, category-band and path-stability multipliers.
//! 3. **Safety net**: after `forage_safety_net` steps without a forage draw,
//!    the heaviest eligible forage event is returned without sampling.
//! 4. **Damp** events in the recent history by the configured factor. A damped
//!    total of zero falls back to the undamped weights, and an undamped total
//!    of zero to a uniform draw over the eligible set.
//! 5. **Sample** one event from a single uniform draw over the cumulative
//!    weights.
//!
//! Recording the drawn event in the history is an effect like any other; see
//! [`Selection::record_effect`] and [`EventSelector::draw`].

use rand::Rng;

use crate::config::GameConfig;
use crate::effect::Effect;
use crate::engine::EffectTarget;
use crate::env::{ContentCatalog, EventCategory, EventDefinition};
use crate::state::{RecentEvents, Season, StateSnapshot};

use super::SelectError;

/// An eligible event and its weight at the current step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate<'c> {
    pub event: &'c EventDefinition,
    pub weight: f64,
}

/// The outcome of one selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Selection<'c> {
    pub event: &'c EventDefinition,
    /// True when the forage safety net picked the event.
    pub forced: bool,
}

impl<'c> Selection<'c> {
    pub fn id(&self) -> &'c str {
        &self.event.id
    }

    pub fn record_effect(&self) -> Effect {
        Effect::RecordEvent {
            event_id: self.event.id.clone(),
            category: self.event.category,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct EventSelector<'c> {
    catalog: &'c ContentCatalog,
    config: &'c GameConfig,
}

impl<'c> EventSelector<'c> {
    pub fn new(catalog: &'c ContentCatalog, config: &'c GameConfig) -> Self {
        Self { catalog, config }
    }

    /// Weight of a single event before history damping.
    pub fn weight(
        &self,
        event: &EventDefinition,
        depth: u32,
        season: Season,
        snapshot: StateSnapshot<'_>,
    ) -> f64 {
        let tuning = &self.config.events;
        let band = tuning.bands.band_for(depth);
        let stability = event
            .landmark
            .as_deref()
            .map(|landmark| {
                self.config
                    .stability
                    .multiplier(snapshot.path_stability(landmark))
            })
            .unwrap_or(1.0);

        let weight = event.depth_adjusted_weight(depth)
            * event.season_weight(season)
            * tuning.category_weights.get(band, event.category)
            * stability;
        if weight.is_finite() { weight.max(0.0) } else { 0.0 }
    }

    /// Events passing the depth and condition filters, in catalog order.
    pub fn candidates(
        &self,
        depth: u32,
        season: Season,
        snapshot: StateSnapshot<'_>,
    ) -> Vec<Candidate<'c>> {
        self.catalog
            .events()
            .iter()
            .filter(|event| event.allows_depth(depth))
            .filter(|event| crate::condition::evaluate(event.condition.as_ref(), snapshot, None))
            .map(|event| Candidate {
                event,
                weight: self.weight(event, depth, season, snapshot),
            })
            .collect()
    }

    /// Sampling weights after damping and fallbacks. The safety net is not
    /// reflected here.
    pub fn distribution(
        &self,
        depth: u32,
        season: Season,
        history: &RecentEvents,
        snapshot: StateSnapshot<'_>,
    ) -> Result<Vec<Candidate<'c>>, SelectError> {
        let candidates = self.candidates(depth, season, snapshot);
        if candidates.is_empty() {
            return Err(SelectError::NoEligibleEvent { depth, season });
        }
        Ok(self.damp(candidates, history))
    }

    /// Chooses one event. Pure with respect to the state; the caller records
    /// the result through [`Selection::record_effect`].
    pub fn select<R: Rng + ?Sized>(
        &self,
        depth: u32,
        season: Season,
        history: &RecentEvents,
        snapshot: StateSnapshot<'_>,
        rng: &mut R,
    ) -> Result<Selection<'c>, SelectError> {
        let candidates = self.candidates(depth, season, snapshot);
        if candidates.is_empty() {
            tracing::warn!(depth, %season, "no eligible event");
            return Err(SelectError::NoEligibleEvent { depth, season });
        }

        if let Some(event) = self.safety_net(&candidates, snapshot) {
            tracing::debug!(event = %event.id, depth, "forage safety net fired");
            return Ok(Selection {
                event,
                forced: true,
            });
        }

        let weighted = self.damp(candidates, history);
        let event = sample(&weighted, rng);
        tracing::debug!(event = %event.id, depth, %season, "event selected");

        Ok(Selection {
            event,
            forced: false,
        })
    }

    /// Selects against the target's own snapshot and records the result.
    pub fn draw<T, R>(
        &self,
        depth: u32,
        target: &mut T,
        rng: &mut R,
    ) -> Result<Selection<'c>, SelectError>
    where
        T: EffectTarget + ?Sized,
        R: Rng + ?Sized,
    {
        let selection = {
            let snapshot = target.snapshot();
            self.select(
                depth,
                snapshot.season(),
                snapshot.recent_events(),
                snapshot,
                rng,
            )?
        };
        target.apply(&selection.record_effect())?;
        Ok(selection)
    }

    fn safety_net(
        &self,
        candidates: &[Candidate<'c>],
        snapshot: StateSnapshot<'_>,
    ) -> Option<&'c EventDefinition> {
        let threshold = self.config.events.forage_safety_net;
        if threshold == 0 || snapshot.steps_since_forage() < threshold {
            return None;
        }

        candidates
            .iter()
            .filter(|candidate| candidate.event.category == EventCategory::Forage)
            .fold(None::<&Candidate<'c>>, |best, candidate| match best {
                Some(best) if best.weight >= candidate.weight => Some(best),
                _ => Some(candidate),
            })
            .map(|candidate| candidate.event)
    }

    fn damp(&self, candidates: Vec<Candidate<'c>>, history: &RecentEvents) -> Vec<Candidate<'c>> {
        let damping = self.config.events.damping.clamp(0.0, 1.0);
        let damped: Vec<_> = candidates
            .iter()
            .map(|candidate| Candidate {
                weight: if history.contains(&candidate.event.id) {
                    candidate.weight * damping
                } else {
                    candidate.weight
                },
                ..*candidate
            })
            .collect();

        if total(&damped) > 0.0 {
            return damped;
        }
        if total(&candidates) > 0.0 {
            return candidates;
        }
        candidates
            .into_iter()
            .map(|candidate| Candidate {
                weight: 1.0,
                ..candidate
            })
            .collect()
    }
}

fn total(candidates: &[Candidate<'_>]) -> f64 {
    candidates.iter().map(|candidate| candidate.weight).sum()
}

/// Cumulative-weight draw. `candidates` is non-empty with a positive total.
fn sample<'c, R: Rng + ?Sized>(candidates: &[Candidate<'c>], rng: &mut R) -> &'c EventDefinition {
    let draw = rng.random::<f64>() * total(candidates);
    let mut cumulative = 0.0;
    let mut last_positive = candidates[0].event;

    for candidate in candidates {
        if candidate.weight <= 0.0 {
            continue;
        }
        cumulative += candidate.weight;
        last_positive = candidate.event;
        if draw < cumulative {
            return candidate.event;
        }
    }

    last_positive
}
