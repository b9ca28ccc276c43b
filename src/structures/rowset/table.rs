use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::structures::column::{Column, FieldValue};

/// an ordered set of uniform-schema rows parsed from one uploaded file.
/// column order is fixed at parse time and carried through scoring and export.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RowSet {
    pub(super) name: String,
    pub(super) columns: Vec<Column>,
    pub(super) rows: Vec<HashMap<String, FieldValue>>,
}

impl RowSet {
    pub fn new(name: String, columns: Vec<Column>) -> Self {
        Self { name, columns, rows: Vec::new() }
    }

    /// appends a row given in column order. Rows shorter than the column
    /// set are padded with Null so every row keeps the full schema;
    /// values past the last column are dropped.
    pub fn push_row(&mut self, values: Vec<FieldValue>) {
        let mut row: HashMap<String, FieldValue> = HashMap::with_capacity(self.columns.len());

        let mut values = values.into_iter();
        for col in &self.columns {
            let value = values.next().unwrap_or(FieldValue::Null);
            row.insert(col.get_name().to_string(), value);
        }

        self.rows.push(row);
    }
}
