use std::collections::HashMap;

use crate::structures::column::{Column, FieldValue};

use super::table::RowSet;

impl RowSet {
    pub fn name(&self) -> String {
        self.name.clone()
    }

    pub fn rows(&self) -> &Vec<HashMap<String, FieldValue>> { &self.rows }

    pub fn number_of_rows(&self) -> usize { self.rows.len() }

    pub fn get_row(&self, row_index: usize) -> Option<&HashMap<String, FieldValue>> { self.rows.get(row_index) }

    pub fn columns(&self) -> &Vec<Column> { &self.columns }

    pub fn all_column_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for c in &self.columns { names.push( c.get_name().to_string() ); }
        names
    }

    /// determines if a column with the given name exists in the row set.
    ///
    /// returns a Some value containing a clone of the column if it exists.
    pub fn column(&self, col_name: &str) -> Option<Column> {
        for c in &self.columns {
            if c.get_name() == col_name { return Some( c.clone() ) }
        }
        None
    }

    pub fn is_valid_column(&self, col_name: &str) -> bool { self.column(col_name).is_some() }

    /// the value at (row, column), if both exist
    pub fn value_at(&self, row_index: usize, col_name: &str) -> Option<&FieldValue> {
        self.rows.get(row_index).and_then(|r| r.get(col_name))
    }
}
