//! Deterministic narrative engine shared by the runtime and tooling.
//!
//! `hiker-core` defines the canonical rules of a run: the content catalog,
//! conditions, the effect channel, event selection and dialogue traversal. It
//! performs no I/O. All state mutation flows through [`engine::GameEngine`]
//! (or another [`engine::EffectTarget`]), and supporting crates depend on the
//! types re-exported here.
pub mod condition;
pub mod config;
pub mod dialogue;
pub mod effect;
pub mod engine;
pub mod env;
pub mod error;
pub mod events;
pub mod rapport;
pub mod state;
pub mod text;

pub use condition::{Condition, RapportRequirement};
pub use config::{
    BandMultipliers, Calendar, CategoryMultipliers, DepthBand, DepthBands, EventTuning,
    GameConfig, HungerRules, SeasonSpan, StabilityRules,
};
pub use dialogue::{
    DialogueEngine, DialogueError, DialogueSession, EndReason, NodeView, OptionView, Step,
    TranscriptEntry,
};
pub use effect::{CountRange, Effect, FoodKind, ItemGrant, ModifierGrant};
pub use engine::{EffectTarget, GameEngine};
pub use env::{
    CatalogBuilder, CatalogError, ContentCatalog, ContentKind, DialogueNode, DialogueOption,
    EventCategory, EventDefinition, ItemCategory, ItemDefinition, LandmarkDefinition,
    NpcDefinition, RaceDefinition, RecipeDefinition, SeasonDefinition,
};
pub use error::{ErrorSeverity, GameError};
pub use events::{Candidate, EventSelector, SelectError, Selection};
pub use rapport::RapportTier;
pub use state::{
    EffectError, FlagSet, GameOverCause, GameState, Inventory, PlayerProfile, RecentEvents,
    RunStatus, SCHEMA_VERSION, Season, Stamina, StatKind, StatModifier, StateSnapshot,
    TimeOfDay, TimedModifier,
};
pub use text::Tokens;
