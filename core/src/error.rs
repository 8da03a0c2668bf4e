use thiserror::Error;

/// Errors surfaced by loading a reference table or querying it.
#[derive(Debug, Error)]
pub enum ColorError {
    /// The reference table could not be read or is malformed.
    /// Callers must stop serving queries until this is resolved.
    #[error("color data unavailable from {source_name}: {cause}")]
    DataUnavailable {
        source_name: String,
        #[source]
        cause: LoadError,
    },
    /// A query was made against a table without entries.
    #[error("color table is empty")]
    EmptyTable,
}

impl ColorError {
    pub(crate) fn unavailable(source_name: impl Into<String>, cause: LoadError) -> Self {
        ColorError::DataUnavailable {
            source_name: source_name.into(),
            cause,
        }
    }
}

/// Why a table source was rejected.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("data is not valid UTF-8 (record {record})")]
    Utf8 { record: usize },
    #[error("no header record")]
    MissingHeader,
    #[error("header has no \"{0}\" column")]
    MissingColumn(&'static str),
    #[error("record {record} has {found} fields, column \"{column}\" needs {needed}")]
    ShortRecord {
        record: usize,
        column: &'static str,
        found: usize,
        needed: usize,
    },
    #[error("record {record}: \"{value}\" is not a valid {column} value (0-255)")]
    InvalidComponent {
        record: usize,
        column: &'static str,
        value: String,
    },
    #[error("record {record}: color name is empty")]
    EmptyName { record: usize },
}
