//! # smk-excel
//!
//! Spreadsheet boundary of the session maker. Inventory workbooks are read
//! with `calamine` and written with `rust_xlsxwriter`; both sides plug into
//! the `SheetSource` / `SheetSink` traits of `smk-core`.

pub mod excel;
