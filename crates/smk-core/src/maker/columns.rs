//! Column mapping between spreadsheet headers and semantic keys.
//!
//! Reading a sheet is two steps: [`normalize`] renames the headers that are
//! present, then [`materialize`] checks required keys and fills missing
//! optional ones so the result is a rectangular [`Table`].

use super::error::{MakerError, MakerResult};
use super::table::Table;
use super::types::{ColumnNames, RawSheet, SheetKind, SheetSchema, SheetSource};

/// Copy every column whose external header appears in `names` under its
/// semantic key. Headers missing from the sheet are simply left out.
pub fn normalize(raw: &RawSheet, names: &ColumnNames) -> RawSheet {
    names
        .iter()
        .filter_map(|(key, header)| raw.get(header).map(|col| (key.clone(), col.clone())))
        .collect()
}

/// Build a table holding exactly the schema's keys.
///
/// Every required key must be present, otherwise nothing is applied and the
/// first missing one is reported by its external header. Missing optional
/// keys become columns of empty strings. The row count is the anchor
/// column's length; other columns are padded or cut to it.
pub fn materialize(
    partial: RawSheet,
    schema: &SheetSchema,
    names: &ColumnNames,
) -> MakerResult<Table> {
    if let Some(key) = schema.required.iter().find(|k| !partial.contains_key(**k)) {
        let column = names.get(*key).cloned().unwrap_or_else(|| key.to_string());
        log::error!("Missing required column '{}'", column);
        return Err(MakerError::MissingRequiredColumn { key: key.to_string(), column });
    }

    let rows = partial.get(schema.anchor).map_or(0, Vec::len);
    let mut table = Table::new(schema.anchor);
    let mut partial = partial;

    for key in schema.keys() {
        let values = match partial.swap_remove(key) {
            Some(mut col) => {
                col.resize(rows, String::new());
                col
            }
            None => {
                let column = names.get(key).map_or(key, String::as_str);
                log::warn!("Missing column name '{}' (key: '{}')", column, key);
                log::warn!("Creating empty column name '{}'", column);
                vec![String::new(); rows]
            }
        };
        table.set_column(key, values);
    }

    Ok(table)
}

/// Read, normalize and materialize one sheet. A sheet the workbook does not
/// have yields an empty table and a warning.
pub fn read_table(
    source: &mut dyn SheetSource,
    sheet_name: &str,
    kind: SheetKind,
    names: &ColumnNames,
) -> MakerResult<Table> {
    match source.read_sheet(sheet_name)? {
        Some(raw) => {
            log::info!("Reading data from sheet '{}' complete.", sheet_name);
            materialize(normalize(&raw, names), &kind.schema(), names)
        }
        None => {
            log::warn!("Unable to load sheet '{}' ({}).", sheet_name, kind.label());
            Ok(Table::for_sheet(kind))
        }
    }
}
