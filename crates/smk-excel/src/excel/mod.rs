//! # Excel workbooks
//!
//! Architecture:
//! - `error` — spreadsheet error type and its mapping into `MakerError`
//! - `reader` — `ExcelBook`, any calamine-readable workbook as a `SheetSource`
//! - `writer` — `ExcelWriter`, formatted `.xlsx` output as a `SheetSink`

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{ExcelError, ExcelResult};
pub use reader::ExcelBook;
pub use writer::ExcelWriter;
