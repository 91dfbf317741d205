//! Spreadsheet errors.

use smk_core::maker::MakerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExcelError {
    /// Workbook missing, unreadable or of an unknown format
    #[error("Unable to open workbook '{path}': {message}")]
    Open { path: String, message: String },
    /// A sheet exists but its cells could not be read
    #[error("Unable to read sheet '{sheet}': {message}")]
    Read { sheet: String, message: String },
    /// Worksheet construction error
    #[error("Unable to build sheet '{sheet}': {message}")]
    Write { sheet: String, message: String },
    /// Final save of the workbook
    #[error("Unable to write '{path}': {message}")]
    Save { path: String, message: String },
    #[error(transparent)]
    Maker(#[from] MakerError),
}

pub type ExcelResult<T> = Result<T, ExcelError>;

impl From<ExcelError> for MakerError {
    fn from(e: ExcelError) -> Self {
        match e {
            ExcelError::Maker(inner) => inner,
            ExcelError::Save { path, message } => MakerError::DestinationWrite { path, message },
            other => MakerError::Spreadsheet(other.to_string()),
        }
    }
}
