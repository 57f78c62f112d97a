use hiker_core::{CatalogError, ErrorSeverity, GameError};

/// Failure to turn a content document into catalog data.
///
/// `document` is the path of the offending file.
#[derive(Debug, thiserror::Error)]
pub enum ContentLoadError {
    #[error("failed to read {document}: {source}")]
    Io {
        document: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {document}{}: {message}", field_suffix(.field))]
    Parse {
        document: String,
        field: Option<String>,
        message: String,
    },

    #[error("invalid {document}: `{record}` field `{field}`: {reason}")]
    Invalid {
        document: String,
        record: String,
        field: String,
        reason: String,
    },
}

fn field_suffix(field: &Option<String>) -> String {
    field
        .as_ref()
        .map(|field| format!(" (field `{field}`)"))
        .unwrap_or_default()
}

impl ContentLoadError {
    pub fn document(&self) -> &str {
        match self {
            Self::Io { document, .. }
            | Self::Parse { document, .. }
            | Self::Invalid { document, .. } => document,
        }
    }

    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Io { .. } => None,
            Self::Parse { field, .. } => field.as_deref(),
            Self::Invalid { field, .. } => Some(field),
        }
    }

    pub(crate) fn from_catalog(document: impl Into<String>, error: &CatalogError) -> Self {
        Self::Invalid {
            document: document.into(),
            record: error.record_id().to_owned(),
            field: error.field().to_owned(),
            reason: error.to_string(),
        }
    }
}

impl GameError for ContentLoadError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "CONTENT_IO",
            Self::Parse { .. } => "CONTENT_PARSE",
            Self::Invalid { .. } => "CONTENT_INVALID",
        }
    }
}
