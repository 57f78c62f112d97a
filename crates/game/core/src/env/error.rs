//! Catalog construction errors.

use crate::error::{ErrorSeverity, GameError};

/// Content document families held by the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContentKind {
    Events,
    Dialogue,
    Npcs,
    Landmarks,
    Items,
    Recipes,
    Races,
    Seasons,
}

/// A rule violation that prevents the catalog from being built.
///
/// Every variant names the record and field at fault so loaders can point
/// authors at the offending document.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CatalogError {
    #[error("duplicate {kind} id `{id}`")]
    DuplicateId { kind: ContentKind, id: String },

    #[error("{kind} `{id}` field `{field}` references unknown {target_kind} `{target}`")]
    DanglingReference {
        kind: ContentKind,
        id: String,
        field: String,
        target_kind: ContentKind,
        target: String,
    },

    #[error("{kind} `{id}` field `{field}`: {reason}")]
    InvalidValue {
        kind: ContentKind,
        id: String,
        field: String,
        reason: String,
    },
}

impl CatalogError {
    pub(crate) fn invalid(
        kind: ContentKind,
        id: &str,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            kind,
            id: id.to_owned(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn dangling(
        kind: ContentKind,
        id: &str,
        field: impl Into<String>,
        target_kind: ContentKind,
        target: &str,
    ) -> Self {
        Self::DanglingReference {
            kind,
            id: id.to_owned(),
            field: field.into(),
            target_kind,
            target: target.to_owned(),
        }
    }

    pub fn kind(&self) -> ContentKind {
        match self {
            Self::DuplicateId { kind, .. }
            | Self::DanglingReference { kind, .. }
            | Self::InvalidValue { kind, .. } => *kind,
        }
    }

    /// Identifier of the offending record.
    pub fn record_id(&self) -> &str {
        match self {
            Self::DuplicateId { id, .. }
            | Self::DanglingReference { id, .. }
            | Self::InvalidValue { id, .. } => id,
        }
    }

    pub fn field(&self) -> &str {
        match self {
            Self::DuplicateId { .. } => "id",
            Self::DanglingReference { field, .. } | Self::InvalidValue { field, .. } => field,
        }
    }
}

impl GameError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateId { .. } => "CATALOG_DUPLICATE_ID",
            Self::DanglingReference { .. } => "CATALOG_DANGLING_REFERENCE",
            Self::InvalidValue { .. } => "CATALOG_INVALID_VALUE",
        }
    }
}
