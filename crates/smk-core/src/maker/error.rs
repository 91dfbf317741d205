//! Error types for the session maker.

use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MakerError {
    /// A sheet lacks the header mapped to a required key.
    #[error("Missing required column '{column}' (key: '{key}')")]
    MissingRequiredColumn { key: String, column: String },
    /// XML parsing error
    #[error("XML parse error: {0}")]
    XmlParse(String),
    /// Source document parsed but has an unusable shape
    #[error("Malformed source document: {0}")]
    MalformedDocument(String),
    /// Workbook open/read/write error
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),
    /// Unreadable or invalid settings
    #[error("Configuration error: {0}")]
    Config(String),
    /// Output file could not be written
    #[error("Unable to write '{path}': {message}")]
    DestinationWrite { path: String, message: String },
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type MakerResult<T> = Result<T, MakerError>;

impl From<quick_xml::Error> for MakerError {
    fn from(e: quick_xml::Error) -> Self { Self::XmlParse(e.to_string()) }
}

impl From<quick_xml::events::attributes::AttrError> for MakerError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        Self::XmlParse(e.to_string())
    }
}

impl From<serde_json::Error> for MakerError {
    fn from(e: serde_json::Error) -> Self { Self::Serialization(e.to_string()) }
}

impl From<serde_yaml::Error> for MakerError {
    fn from(e: serde_yaml::Error) -> Self { Self::Config(e.to_string()) }
}

// ─── Non-fatal diagnostics ──────────────────────────────────────────

/// Row-level problems that skip or degrade one record but never abort a run.
///
/// Each one is also emitted through `log::warn!` when it is recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildWarning {
    /// A session/credential/host row had a blank name and was skipped.
    EmptyName { kind: String, row: Option<usize> },
    /// A linked credential or host path did not resolve to an earlier object.
    UnresolvedReference { owner: String, reference: String },
    /// A session row carried a type the target cannot express.
    UnsupportedType { session: String, session_type: String },
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName { kind, row: Some(row) } => {
                write!(f, "Empty {} name on row {}, skipped", kind, row + 1)
            }
            Self::EmptyName { kind, row: None } => write!(f, "Empty {} name, skipped", kind),
            Self::UnresolvedReference { owner, reference } => {
                write!(f, "'{}': unable to resolve reference '{}'", owner, reference)
            }
            Self::UnsupportedType { session, session_type } => {
                write!(f, "'{}': unsupported session type '{}', skipped", session, session_type)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_message_names_header() {
        let err = MakerError::MissingRequiredColumn {
            key: "hostname".into(),
            column: "Hostname".into(),
        };
        assert_eq!(err.to_string(), "Missing required column 'Hostname' (key: 'hostname')");
    }

    #[test]
    fn test_warning_rows_are_one_based() {
        let w = BuildWarning::EmptyName { kind: "session".into(), row: Some(0) };
        assert_eq!(w.to_string(), "Empty session name on row 1, skipped");
    }
}
