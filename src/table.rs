//! The in-memory tabular model.
//!
//! A [`Record`] is an ordered list of text fields; a [`Table`] is an ordered
//! list of records. Records need not have the same number of fields, and
//! fields carry no type beyond text.
//!
//! ```rust
//! use dsv_table::{table, Table};
//!
//! let mut table = table![["root", "x", "0"], ["daemon", "x"]];
//! table.push(vec!["bin".to_string()]);
//!
//! assert_eq!(table.len(), 3);
//! assert_eq!(table[0][0], "root");
//! assert_eq!(table.max_width(), 3);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::Index;

/// One row of fields.
pub type Record = Vec<String>;

/// An ordered sequence of records.
///
/// Serializes with serde as a plain list of lists of strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    records: Vec<Record>,
}

impl Table {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Table {
            records: Vec::with_capacity(capacity),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends a record at the end.
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Number of fields in the widest record, 0 for an empty table.
    #[must_use]
    pub fn max_width(&self) -> usize {
        self.records.iter().map(Vec::len).max().unwrap_or(0)
    }
}

impl Index<usize> for Table {
    type Output = Record;

    fn index(&self, index: usize) -> &Record {
        &self.records[index]
    }
}

impl<S: Into<String>> From<Vec<Vec<S>>> for Table {
    fn from(rows: Vec<Vec<S>>) -> Self {
        rows.into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect()
    }
}

impl FromIterator<Record> for Table {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Table {
            records: iter.into_iter().collect(),
        }
    }
}

impl Extend<Record> for Table {
    fn extend<I: IntoIterator<Item = Record>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}

impl IntoIterator for Table {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
