//! Formatted `.xlsx` output.
//!
//! One worksheet per `write_sheet` call, header row in bold. Headers of
//! SecureCRT-only columns get a teal fill and RDM-only columns a blue one,
//! decided by the semantic key prefix, the header prefix or the sheet name.
//! Every column is sized to its longest cell.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Color, DocProperties, Format, Workbook, XlsxError};
use smk_core::maker::document::prepare_destination;
use smk_core::maker::{ColumnNames, MakerResult, SheetSink, Table};

use super::error::{ExcelError, ExcelResult};

const SCRT_FILL: u32 = 0x60B1B5;
const RDM_FILL: u32 = 0x3F8DF3;

pub const TITLE: &str = "Device sessions list";
pub const AUTHOR: &str = "SessionMaker";

fn has_prefix(value: &str, prefix: &str) -> bool {
    value.to_lowercase().starts_with(prefix)
}

/// Fill color of a header cell, `None` for shared columns.
pub fn header_fill(sheet: &str, key: &str, header: &str) -> Option<u32> {
    if has_prefix(key, "scrt_") || has_prefix(header, "scrt ") || has_prefix(sheet, "scrt") {
        Some(SCRT_FILL)
    } else if has_prefix(key, "rdm_") || has_prefix(header, "rdm ") || has_prefix(sheet, "rdm") {
        Some(RDM_FILL)
    } else {
        None
    }
}

/// Longest of the header and every cell, plus one.
pub fn column_width(header: &str, cells: &[String]) -> usize {
    cells
        .iter()
        .map(|c| c.chars().count())
        .chain(std::iter::once(header.chars().count()))
        .max()
        .unwrap_or(0)
        + 1
}

pub struct ExcelWriter {
    path: PathBuf,
    workbook: Workbook,
    sheets: usize,
}

impl ExcelWriter {
    pub fn new(path: &Path) -> Self {
        Self { path: path.to_path_buf(), workbook: Workbook::new(), sheets: 0 }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets
    }

    fn add_sheet(&mut self, name: &str, columns: &ColumnNames, table: &Table) -> Result<(), XlsxError> {
        let sheet = self.workbook.add_worksheet();
        sheet.set_name(name)?;

        for (col, (key, header)) in columns.iter().enumerate() {
            let col = col as u16;
            let mut format = Format::new().set_bold();
            if let Some(fill) = header_fill(name, key, header) {
                format = format.set_background_color(Color::RGB(fill));
            }
            sheet.write_string_with_format(0, col, header.as_str(), &format)?;

            let cells = table.column(key).unwrap_or(&[]);
            for (row, value) in cells.iter().enumerate() {
                if !value.is_empty() {
                    sheet.write_string(row as u32 + 1, col, value.as_str())?;
                }
            }
            sheet.set_column_width(col, column_width(header, cells) as f64)?;
        }
        Ok(())
    }

    /// Set the document properties and write the workbook in one go.
    pub fn save(mut self) -> ExcelResult<PathBuf> {
        let comment = format!(
            "Created with {} on {}",
            AUTHOR,
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        let properties = DocProperties::new().set_title(TITLE).set_author(AUTHOR).set_comment(&comment);
        self.workbook.set_properties(&properties);

        prepare_destination(&self.path)?;
        self.workbook.save(&self.path).map_err(|e| ExcelError::Save {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;
        log::info!("Writing file '{}' complete.", self.path.display());
        Ok(self.path)
    }
}

impl SheetSink for ExcelWriter {
    fn write_sheet(&mut self, name: &str, columns: &ColumnNames, table: &Table) -> MakerResult<()> {
        self.add_sheet(name, columns, table).map_err(|e| ExcelError::Write {
            sheet: name.to_string(),
            message: e.to_string(),
        })?;
        self.sheets += 1;
        log::debug!("Sheet '{}': {} row(s).", name, table.len());
        Ok(())
    }
}
