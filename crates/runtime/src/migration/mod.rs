//! Save schema migrations.
//!
//! [`MigrationPipeline`] walks a payload forward one version at a time until
//! it reaches [`SCHEMA_VERSION`], then decodes it into a [`GameState`].
//! Migrating a current-version payload is a no-op.
mod error;
mod steps;

pub use error::MigrationError;

use hiker_core::{GameState, SCHEMA_VERSION};
use serde_json::Value;

use crate::payload::{SavePayload, VERSION_KEY};
use steps::Fields;

/// A single `from → from + 1` schema step.
#[derive(Clone, Copy)]
pub struct MigrationStep {
    pub from: u32,
    pub name: &'static str,
    apply: fn(&mut Fields) -> Result<(), MigrationError>,
}

impl std::fmt::Debug for MigrationStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MigrationStep")
            .field("from", &self.from)
            .field("name", &self.name)
            .finish()
    }
}

const STEPS: &[MigrationStep] = &[
    MigrationStep {
        from: 1,
        name: "recent_events",
        apply: steps::add_recent_events,
    },
    MigrationStep {
        from: 2,
        name: "calendar_fields",
        apply: steps::calendar_fields,
    },
    MigrationStep {
        from: 3,
        name: "hunger_fields",
        apply: steps::hunger_fields,
    },
    MigrationStep {
        from: 4,
        name: "quests_and_flat_flags",
        apply: steps::quests_and_flat_flags,
    },
];

#[derive(Clone, Copy, Debug)]
pub struct MigrationPipeline {
    steps: &'static [MigrationStep],
    target: u32,
}

impl Default for MigrationPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl MigrationPipeline {
    pub fn new() -> Self {
        Self {
            steps: STEPS,
            target: SCHEMA_VERSION,
        }
    }

    pub fn steps(&self) -> &[MigrationStep] {
        self.steps
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    /// Brings a payload to the current schema without decoding it.
    pub fn migrate(&self, mut payload: SavePayload) -> Result<SavePayload, MigrationError> {
        let version = payload
            .schema_version()
            .filter(|version| *version >= 1)
            .ok_or_else(|| MigrationError::malformed(0, "schema_version is not a positive integer"))?;

        if version > self.target {
            return Err(MigrationError::UnsupportedFutureSchema {
                found: version,
                supported: self.target,
            });
        }

        let fields = payload.fields_mut();
        for step in self
            .steps
            .iter()
            .filter(|step| step.from >= version && step.from < self.target)
        {
            (step.apply)(fields)?;
            fields.insert(VERSION_KEY.to_owned(), Value::from(step.from + 1));
            tracing::info!(
                from = step.from,
                to = step.from + 1,
                step = step.name,
                "migration applied"
            );
        }

        Ok(payload)
    }

    /// Migrates and decodes a payload.
    pub fn decode(&self, payload: SavePayload) -> Result<GameState, MigrationError> {
        let mut fields = self.migrate(payload)?.into_fields();
        for field in steps::CURRENT_FIELDS {
            steps::require(&fields, self.target, field)?;
        }

        fields.remove(VERSION_KEY);
        serde_json::from_value(Value::Object(fields))
            .map_err(|error| MigrationError::malformed(self.target, error.to_string()))
    }
}
