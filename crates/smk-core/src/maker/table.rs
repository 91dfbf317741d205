//! Tabular session store. Equal-length string columns keyed by semantic
//! column name. Row `i` across all columns is one record.

use indexmap::IndexMap;
use serde::Serialize;

use super::types::{SheetKind, SheetSchema};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    /// Key of the column that names each record and gives the row count.
    anchor: String,
    columns: IndexMap<String, Vec<String>>,
}

impl Table {
    pub fn new(anchor: &str) -> Self {
        Self { anchor: anchor.to_string(), columns: IndexMap::new() }
    }

    /// Empty table carrying every column of the sheet's schema.
    pub fn for_sheet(kind: SheetKind) -> Self {
        Self::from_schema(&kind.schema())
    }

    pub fn from_schema(schema: &SheetSchema) -> Self {
        let mut table = Self::new(schema.anchor);
        for key in schema.keys() {
            table.columns.insert(key.to_string(), Vec::new());
        }
        table
    }

    pub fn anchor(&self) -> &str {
        &self.anchor
    }

    /// Number of rows, taken from the anchor column.
    pub fn len(&self) -> usize {
        self.columns.get(&self.anchor).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn has_column(&self, key: &str) -> bool {
        self.columns.contains_key(key)
    }

    pub fn column(&self, key: &str) -> Option<&[String]> {
        self.columns.get(key).map(Vec::as_slice)
    }

    /// Cell value, `""` when the column or row does not exist.
    pub fn get(&self, key: &str, row: usize) -> &str {
        self.columns
            .get(key)
            .and_then(|col| col.get(row))
            .map_or("", String::as_str)
    }

    /// Replace (or add) a whole column.
    pub fn set_column(&mut self, key: &str, values: Vec<String>) {
        self.columns.insert(key.to_string(), values);
    }

    /// Insert `value` into column `key` at `index`, creating the column when
    /// absent. An index past the end appends.
    pub fn insert_at(&mut self, key: &str, index: usize, value: &str) {
        let col = self.columns.entry(key.to_string()).or_default();
        let index = index.min(col.len());
        col.insert(index, value.to_string());
    }

    /// Append one record; columns not named in `fields` get `""`.
    pub fn push_record<'a, I>(&mut self, fields: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let row = self.len();
        let anchor = self.anchor.clone();
        let mut given: IndexMap<&str, &str> = fields.into_iter().collect();
        given.entry(anchor.as_str()).or_insert("");

        for (key, value) in &given {
            let col = self.columns.entry(key.to_string()).or_default();
            col.resize(row, String::new());
            col.push(value.to_string());
        }
        for (key, col) in self.columns.iter_mut() {
            if !given.contains_key(key.as_str()) {
                col.resize(row + 1, String::new());
            }
        }
    }

    /// Row `row` as key → value, in column order.
    pub fn record(&self, row: usize) -> IndexMap<String, String> {
        self.columns
            .keys()
            .map(|k| (k.clone(), self.get(k, row).to_string()))
            .collect()
    }

    pub fn records(&self) -> impl Iterator<Item = IndexMap<String, String>> + '_ {
        (0..self.len()).map(move |row| self.record(row))
    }

    /// Count records with a non-blank name. With a non-empty `filter_types`,
    /// only records whose `type` is one of them (case-insensitive) count.
    pub fn count(&self, filter_types: &[&str]) -> usize {
        (0..self.len())
            .filter(|&row| !self.get(&self.anchor, row).trim().is_empty())
            .filter(|&row| {
                filter_types.is_empty() || {
                    let t = self.get("type", row).trim();
                    filter_types.iter().any(|f| f.eq_ignore_ascii_case(t))
                }
            })
            .count()
    }

    /// True when every column has the anchor column's length.
    pub fn is_rectangular(&self) -> bool {
        let len = self.len();
        self.columns.values().all(|col| col.len() == len)
    }
}
