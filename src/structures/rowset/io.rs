use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use rust_xlsxwriter::Workbook;

use crate::config;
use crate::structures::column::{parse_into_field_value, Column, DataType, FieldValue};
use crate::structures::score_err::ScorecardError;

use super::table::RowSet;

///  -----------
///    IMPORT
///  -----------

/// turns an uploaded file into a RowSet. The original file name is only
/// used to pick the parser (by extension) and to name the row set.
pub fn parse(bytes: &[u8], filename: &str) -> Result<RowSet, ScorecardError> {
    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rowset = match extension.as_str() {
        "csv" => import_csv(bytes, filename),
        "xls" | "xlsx" => import_xlsx(bytes, filename),
        _ => Err(ScorecardError::UnsupportedFormat(filename.to_string())),
    }?;

    log::debug!(
        "parsed '{}': {} columns, {} rows",
        filename,
        rowset.columns().len(),
        rowset.number_of_rows()
    );
    Ok(rowset)
}

fn import_csv(bytes: &[u8], filename: &str) -> Result<RowSet, ScorecardError> {
    let mut reader = csv::ReaderBuilder::new().from_reader(bytes);

    let header: Vec<String> = reader
        .headers()
        .map_err(|e| ScorecardError::ParseFailure(filename.to_string(), e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if header.is_empty() || header.iter().all(|h| h.is_empty()) {
        return Err(ScorecardError::ParseFailure(
            filename.to_string(),
            "missing header row".to_string(),
        ));
    }

    let mut cell_rows: Vec<Vec<FieldValue>> = Vec::new();
    for record in reader.records() {
        // a ragged or non-UTF-8 record fails the whole upload
        let record = record
            .map_err(|e| ScorecardError::ParseFailure(filename.to_string(), e.to_string()))?;

        cell_rows.push(record.iter().map(parse_into_field_value).collect());
    }

    Ok(assemble(rowset_name(filename), header, cell_rows))
}

fn import_xlsx(bytes: &[u8], filename: &str) -> Result<RowSet, ScorecardError> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook = open_workbook_auto_from_rs(cursor)
        .map_err(|e| ScorecardError::ParseFailure(filename.to_string(), e.to_string()))?;

    // the first worksheet is the data sheet
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| {
            ScorecardError::ParseFailure(filename.to_string(), "workbook has no sheets".to_string())
        })?
        .map_err(|e| ScorecardError::ParseFailure(filename.to_string(), e.to_string()))?;

    let mut sheet_rows = range.rows();

    let header: Vec<String> = match sheet_rows.next() {
        Some(cells) => cells.iter().map(|c| c.to_string().trim().to_string()).collect(),
        None => {
            return Err(ScorecardError::ParseFailure(
                filename.to_string(),
                "missing header row".to_string(),
            ))
        }
    };

    if header.is_empty() || header.iter().all(|h| h.is_empty()) {
        return Err(ScorecardError::ParseFailure(
            filename.to_string(),
            "missing header row".to_string(),
        ));
    }

    let mut cell_rows: Vec<Vec<FieldValue>> = Vec::new();
    for cells in sheet_rows {
        cell_rows.push(cells.iter().map(cell_to_field_value).collect());
    }

    Ok(assemble(rowset_name(filename), header, cell_rows))
}

fn cell_to_field_value(cell: &Data) -> FieldValue {
    match cell {
        Data::Float(f) => FieldValue::Number(*f),
        Data::Int(i) => FieldValue::Number(*i as f64),
        // text cells still get numeric coercion, matching the CSV path
        Data::String(s) => parse_into_field_value(s),
        Data::Bool(b) => FieldValue::String(b.to_string()),
        Data::DateTime(_) => FieldValue::String(cell.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => FieldValue::String(s.clone()),
        Data::Error(_) | Data::Empty => FieldValue::Null,
    }
}

/// builds the RowSet, inferring each column's datatype from its cells:
/// a column where every non-null cell is numeric becomes a Number column,
/// anything else is a String column.
fn assemble(name: String, header: Vec<String>, cell_rows: Vec<Vec<FieldValue>>) -> RowSet {
    let mut columns: Vec<Column> = Vec::new();

    for (idx, col_name) in header.iter().enumerate() {
        let mut saw_number = false;
        let mut saw_other = false;

        for row in &cell_rows {
            match row.get(idx) {
                Some(FieldValue::Number(_)) => saw_number = true,
                Some(FieldValue::Null) | None => {}
                Some(_) => saw_other = true,
            }
        }

        let data_type = if saw_number && !saw_other { DataType::Number } else { DataType::String };
        columns.push(Column::new(col_name.clone(), data_type));
    }

    let mut rowset = RowSet::new(name, columns);
    for row in cell_rows {
        rowset.push_row(row);
    }
    rowset
}

fn rowset_name(filename: &str) -> String {
    Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("uploaded data")
        .to_string()
}

// ---------------
//     EXPORT
// ---------------
impl RowSet {
    /// renders the row set as CSV bytes: one header record, then one
    /// record per row in order. Quoting of delimiters, quotes and
    /// newlines is handled by the csv writer.
    pub fn to_csv(&self) -> Result<Vec<u8>, ScorecardError> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        writer
            .write_record(self.all_column_names())
            .map_err(|e| ScorecardError::ExportFailure("csv", e.to_string()))?;

        for row in self.rows() {
            let mut record: Vec<String> = Vec::with_capacity(self.columns().len());
            for col in self.columns() {
                let cell = row
                    .get(col.get_name())
                    .map(|v| v.to_string())
                    .unwrap_or_default();
                record.push(cell);
            }
            writer
                .write_record(&record)
                .map_err(|e| ScorecardError::ExportFailure("csv", e.to_string()))?;
        }

        writer
            .into_inner()
            .map_err(|e| ScorecardError::ExportFailure("csv", e.to_string()))
    }

    /// renders the row set as a single-sheet XLSX workbook. Numbers are
    /// written as numbers so downstream spreadsheets can keep computing
    /// with them; no index column is emitted.
    pub fn to_xlsx(&self, sheet_name: &str) -> Result<Vec<u8>, ScorecardError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(sheet_name)
            .map_err(|e| ScorecardError::ExportFailure("xlsx", e.to_string()))?;

        // set column widths
        for (idx, col) in self.columns().iter().enumerate() {
            let mut max_cell_size = col.get_name().len();
            for row in self.rows() {
                let cell_size = row
                    .get(col.get_name())
                    .map(|v| v.to_string().len())
                    .unwrap_or(0);

                if max_cell_size < cell_size {
                    max_cell_size = cell_size;
                }
            }

            let col_width = if (max_cell_size as f64) < config::MIN_EXPORT_COLUMN_WIDTH {
                config::MIN_EXPORT_COLUMN_WIDTH
            } else {
                max_cell_size as f64
            };
            worksheet
                .set_column_width(idx as u16, col_width)
                .map_err(|e| ScorecardError::ExportFailure("xlsx", e.to_string()))?;
        }

        for (col_idx, col) in self.columns().iter().enumerate() {
            worksheet
                .write_string(0, col_idx as u16, col.get_name())
                .map_err(|e| ScorecardError::ExportFailure("xlsx", e.to_string()))?;
        }

        for (row_idx, row) in self.rows().iter().enumerate() {
            for (col_idx, col) in self.columns().iter().enumerate() {
                let xlsx_row = (row_idx + 1) as u32;
                let xlsx_col = col_idx as u16;

                match row.get(col.get_name()) {
                    Some(FieldValue::Number(n)) => {
                        worksheet
                            .write_number(xlsx_row, xlsx_col, *n)
                            .map_err(|e| ScorecardError::ExportFailure("xlsx", e.to_string()))?;
                    }
                    Some(FieldValue::String(s)) => {
                        worksheet
                            .write_string(xlsx_row, xlsx_col, s)
                            .map_err(|e| ScorecardError::ExportFailure("xlsx", e.to_string()))?;
                    }
                    Some(FieldValue::Null) | None => {}
                }
            }
        }

        workbook
            .save_to_buffer()
            .map_err(|e| ScorecardError::ExportFailure("xlsx", e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_csv() -> &'static [u8] {
        b"Name,Productivity,Quality,Timeliness\n\
          Alice,80,90,70\n\
          Bob,65,72.5,90\n"
    }

    #[test]
    fn test_csv_parse_happy_path() {
        let rowset = parse(sample_csv(), "metrics.csv").unwrap();

        assert_eq!(rowset.name(), "metrics");
        assert_eq!(
            rowset.all_column_names(),
            vec!["Name", "Productivity", "Quality", "Timeliness"]
        );
        assert_eq!(rowset.number_of_rows(), 2);
        assert_eq!(
            rowset.value_at(0, "Productivity"),
            Some(&FieldValue::Number(80.0))
        );
        assert_eq!(
            rowset.value_at(1, "Name"),
            Some(&FieldValue::String("Bob".to_string()))
        );
    }

    #[test]
    fn test_csv_column_type_inference() {
        let rowset = parse(sample_csv(), "metrics.csv").unwrap();

        assert_eq!(
            rowset.column("Name").unwrap().get_data_type(),
            &DataType::String
        );
        assert_eq!(
            rowset.column("Quality").unwrap().get_data_type(),
            &DataType::Number
        );
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let result = parse(sample_csv(), "report.txt");
        assert!(matches!(result, Err(ScorecardError::UnsupportedFormat(_))));

        let result = parse(sample_csv(), "noextension");
        assert!(matches!(result, Err(ScorecardError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_empty_csv_is_a_parse_failure() {
        let result = parse(b"", "empty.csv");
        assert!(matches!(result, Err(ScorecardError::ParseFailure(_, _))));
    }

    #[test]
    fn test_ragged_csv_is_a_parse_failure() {
        let bytes = b"A,B,C\n1,2,3\n4,5\n";
        let result = parse(bytes, "ragged.csv");
        assert!(matches!(result, Err(ScorecardError::ParseFailure(_, _))));
    }

    #[test]
    fn test_garbage_bytes_with_xlsx_extension_fail_cleanly() {
        let result = parse(b"definitely not a zip archive", "metrics.xlsx");
        assert!(matches!(result, Err(ScorecardError::ParseFailure(_, _))));
    }

    #[test]
    fn test_csv_export_escapes_awkward_cells() {
        let rowset = parse(sample_csv(), "metrics.csv").unwrap();
        let mut rowset = rowset;
        rowset.push_row(vec![
            FieldValue::String("Smith, Jane \"JJ\"\nremote".to_string()),
            FieldValue::Number(50.0),
            FieldValue::Number(60.0),
            FieldValue::Number(70.0),
        ]);

        let bytes = rowset.to_csv().unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(text.contains("\"Smith, Jane \"\"JJ\"\"\nremote\""));

        // and the escaped output still parses back to the same cell
        let reparsed = parse(&bytes, "roundtrip.csv").unwrap();
        assert_eq!(
            reparsed.value_at(2, "Name"),
            Some(&FieldValue::String("Smith, Jane \"JJ\"\nremote".to_string()))
        );
    }

    #[test]
    fn test_csv_round_trip_preserves_values_and_order() {
        let original = parse(sample_csv(), "metrics.csv").unwrap();
        let bytes = original.to_csv().unwrap();
        let reparsed = parse(&bytes, "metrics.csv").unwrap();

        assert_eq!(original.all_column_names(), reparsed.all_column_names());
        assert_eq!(original.rows(), reparsed.rows());
    }

    #[test]
    fn test_xlsx_round_trip_preserves_values_and_order() {
        let original = parse(sample_csv(), "metrics.csv").unwrap();
        let bytes = original.to_xlsx("Scores").unwrap();
        let reparsed = parse(&bytes, "metrics.xlsx").unwrap();

        assert_eq!(original.all_column_names(), reparsed.all_column_names());
        assert_eq!(original.rows(), reparsed.rows());
    }

    #[test]
    fn test_short_xlsx_rows_are_padded_with_null() {
        let mut rowset = parse(sample_csv(), "metrics.csv").unwrap();
        rowset.push_row(vec![FieldValue::String("Cara".to_string())]);

        assert_eq!(rowset.value_at(2, "Quality"), Some(&FieldValue::Null));
    }
}
