//! Self-describing save payloads.
//!
//! A payload is a JSON object holding every [`GameState`] field at the top
//! level plus a `schema_version` tag. Keeping it as an untyped object lets
//! migrations patch fields of older schemas before the typed decode.

use hiker_core::{GameState, SCHEMA_VERSION};
use serde_json::{Map, Value};

use crate::repository::{RepositoryError, Result};

pub const VERSION_KEY: &str = "schema_version";

/// Payloads without a version tag predate versioning.
pub const UNVERSIONED_SCHEMA: u32 = 1;

#[derive(Clone, Debug, PartialEq)]
pub struct SavePayload {
    fields: Map<String, Value>,
}

impl SavePayload {
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Encodes a state at the current schema version.
    pub fn from_state(state: &GameState) -> Result<Self> {
        let value = serde_json::to_value(state)
            .map_err(|error| RepositoryError::Serialization(error.to_string()))?;
        let Value::Object(mut fields) = value else {
            return Err(RepositoryError::Serialization(
                "game state did not encode as an object".to_owned(),
            ));
        };
        fields.insert(VERSION_KEY.to_owned(), Value::from(SCHEMA_VERSION));
        Ok(Self { fields })
    }

    /// Parses JSON text. Anything other than an object is rejected.
    pub fn from_json(text: &str) -> std::result::Result<Self, serde_json::Error> {
        let fields: Map<String, Value> = serde_json::from_str(text)?;
        Ok(Self { fields })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.fields)
            .map_err(|error| RepositoryError::Serialization(error.to_string()))
    }

    /// Declared schema version, or `None` if the tag is not an integer.
    pub fn schema_version(&self) -> Option<u32> {
        match self.fields.get(VERSION_KEY) {
            None => Some(UNVERSIONED_SCHEMA),
            Some(value) => value.as_u64().and_then(|version| u32::try_from(version).ok()),
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub(crate) fn fields_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }
}
