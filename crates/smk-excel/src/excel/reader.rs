//! Workbook reader: any calamine-supported format (xlsx, xlsm, xls, ods).

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use smk_core::maker::{MakerResult, RawSheet, SheetSource};

use super::error::{ExcelError, ExcelResult};

pub struct ExcelBook {
    path: PathBuf,
    workbook: Sheets<BufReader<File>>,
}

impl ExcelBook {
    pub fn open(path: &Path) -> ExcelResult<Self> {
        let workbook = open_workbook_auto(path).map_err(|e| ExcelError::Open {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        log::info!("Opened workbook '{}'.", path.display());
        Ok(Self { path: path.to_path_buf(), workbook })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    /// Sheet `name` as header → column cells. `None` when there is no such
    /// sheet.
    pub fn sheet(&mut self, name: &str) -> ExcelResult<Option<RawSheet>> {
        if !self.sheet_names().iter().any(|n| n == name) {
            return Ok(None);
        }
        let range = self.workbook.worksheet_range(name).map_err(|e| ExcelError::Read {
            sheet: name.to_string(),
            message: e.to_string(),
        })?;
        Ok(Some(range_to_sheet(&range)))
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

/// First row is the header. Columns with a blank header are dropped, as are
/// rows with no value at all and every repeat of a header after its first
/// column. Short rows are padded with `""`.
pub fn range_to_sheet(range: &Range<Data>) -> RawSheet {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return RawSheet::new();
    };

    let mut columns: Vec<(usize, String)> = Vec::new();
    for (i, cell) in header.iter().enumerate() {
        let h = cell_text(cell);
        if h.is_empty() {
            continue;
        }
        if columns.iter().any(|(_, seen)| *seen == h) {
            log::warn!("Duplicate column '{}' ignored (column {}).", h, i + 1);
            continue;
        }
        columns.push((i, h));
    }

    let mut sheet = RawSheet::new();
    for (_, h) in &columns {
        sheet.entry(h.clone()).or_default();
    }

    for row in rows {
        let cells: Vec<String> = row.iter().map(cell_text).collect();
        if cells.iter().all(String::is_empty) {
            continue;
        }
        for (i, h) in &columns {
            let value = cells.get(*i).cloned().unwrap_or_default();
            if let Some(col) = sheet.get_mut(h) {
                col.push(value);
            }
        }
    }
    sheet
}

impl SheetSource for ExcelBook {
    fn read_sheet(&mut self, name: &str) -> MakerResult<Option<RawSheet>> {
        Ok(self.sheet(name)?)
    }
}
