use std::collections::HashMap;

use crate::config;
use crate::structures::column::{Column, DataType, FieldValue};
use crate::structures::rowset::table::RowSet;
use crate::structures::score_err::ScorecardError;

use super::weights::WeightVector;

/// computes the weighted composite score for every row:
///
/// `CompositeScore = w.productivity * Productivity + w.quality * Quality + w.timeliness * Timeliness`
///
/// returns a new RowSet carrying every input column plus the composite
/// column, same row count and order. The input is never mutated; the
/// whole call fails on the first row where a metric is missing, null or
/// non-numeric. Rescoring a set that already has a composite column
/// replaces that column instead of stacking a second one.
pub fn score(rowset: &RowSet, weights: &WeightVector) -> Result<RowSet, ScorecardError> {
    weights.validate()?;

    let mut columns: Vec<Column> = rowset
        .columns()
        .iter()
        .filter(|c| c.get_name() != config::COMPOSITE_COLUMN)
        .cloned()
        .collect();
    columns.push(Column::new(
        config::COMPOSITE_COLUMN.to_string(),
        DataType::Number,
    ));

    let mut scored = RowSet::new(rowset.name(), columns);

    for (row_index, row) in rowset.rows().iter().enumerate() {
        let productivity = metric(row, row_index, config::PRODUCTIVITY_COLUMN)?;
        let quality = metric(row, row_index, config::QUALITY_COLUMN)?;
        let timeliness = metric(row, row_index, config::TIMELINESS_COLUMN)?;

        let composite = weights.productivity * productivity
            + weights.quality * quality
            + weights.timeliness * timeliness;

        let mut values: Vec<FieldValue> = Vec::with_capacity(scored.columns().len());
        for col in rowset.columns() {
            if col.get_name() == config::COMPOSITE_COLUMN {
                continue;
            }
            values.push(row.get(col.get_name()).cloned().unwrap_or(FieldValue::Null));
        }
        values.push(FieldValue::Number(composite));

        scored.push_row(values);
    }

    log::debug!(
        "scored {} rows with weights p={} q={} t={}",
        scored.number_of_rows(),
        weights.productivity,
        weights.quality,
        weights.timeliness
    );
    Ok(scored)
}

/// pulls one metric out of a row. Row numbers in the error are 1-based
fn metric(
    row: &HashMap<String, FieldValue>,
    row_index: usize,
    column: &str,
) -> Result<f64, ScorecardError> {
    row.get(column)
        .and_then(|v| v.as_number())
        .ok_or_else(|| ScorecardError::MissingColumn {
            row: row_index + 1,
            column: column.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::rowset::io::parse;

    fn sample_rowset() -> RowSet {
        parse(
            b"Name,Productivity,Quality,Timeliness\n\
              Alice,80,90,70\n\
              Bob,65,72,98\n\
              Cara,100,55,60\n",
            "metrics.csv",
        )
        .unwrap()
    }

    #[test]
    fn test_default_weights_example() {
        let rowset = parse(
            b"Productivity,Quality,Timeliness\n80,90,70\n",
            "metrics.csv",
        )
        .unwrap();

        let scored = score(&rowset, &WeightVector::default()).unwrap();

        // 0.4*80 + 0.35*90 + 0.25*70 = 81.0
        assert_eq!(
            scored.value_at(0, config::COMPOSITE_COLUMN),
            Some(&FieldValue::Number(81.0))
        );
    }

    #[test]
    fn test_linearity_for_every_row() {
        let rowset = sample_rowset();
        let weights = WeightVector::new(0.2, 0.5, 0.3);
        let scored = score(&rowset, &weights).unwrap();

        for (i, row) in rowset.rows().iter().enumerate() {
            let expected = weights.productivity * row["Productivity"].as_number().unwrap()
                + weights.quality * row["Quality"].as_number().unwrap()
                + weights.timeliness * row["Timeliness"].as_number().unwrap();

            assert_eq!(
                scored.value_at(i, config::COMPOSITE_COLUMN),
                Some(&FieldValue::Number(expected))
            );
        }
    }

    #[test]
    fn test_productivity_only_weights_copy_the_column() {
        let rowset = sample_rowset();
        let scored = score(&rowset, &WeightVector::new(1.0, 0.0, 0.0)).unwrap();

        for (i, row) in rowset.rows().iter().enumerate() {
            assert_eq!(
                scored.value_at(i, config::COMPOSITE_COLUMN),
                Some(&FieldValue::Number(row["Productivity"].as_number().unwrap()))
            );
        }
    }

    #[test]
    fn test_determinism() {
        let rowset = sample_rowset();
        let weights = WeightVector::default();

        let first = score(&rowset, &weights).unwrap();
        let second = score(&rowset, &weights).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_column_preservation_and_row_order() {
        let rowset = sample_rowset();
        let scored = score(&rowset, &WeightVector::default()).unwrap();

        // every original column survives, exactly one new column appears
        let mut expected_names = rowset.all_column_names();
        expected_names.push(config::COMPOSITE_COLUMN.to_string());
        assert_eq!(scored.all_column_names(), expected_names);

        assert_eq!(scored.number_of_rows(), rowset.number_of_rows());
        for (i, _) in rowset.rows().iter().enumerate() {
            assert_eq!(scored.value_at(i, "Name"), rowset.value_at(i, "Name"));
        }
    }

    #[test]
    fn test_input_is_not_mutated() {
        let rowset = sample_rowset();
        let before = rowset.clone();

        score(&rowset, &WeightVector::default()).unwrap();
        assert_eq!(rowset, before);
    }

    #[test]
    fn test_missing_metric_column_fails_naming_it() {
        let rowset = parse(
            b"Name,Productivity,Timeliness\nAlice,80,70\n",
            "metrics.csv",
        )
        .unwrap();

        let result = score(&rowset, &WeightVector::default());
        match result {
            Err(ScorecardError::MissingColumn { row, column }) => {
                assert_eq!(row, 1);
                assert_eq!(column, "Quality");
            }
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_metric_fails_naming_the_row() {
        let rowset = parse(
            b"Productivity,Quality,Timeliness\n80,90,70\n80,n/a,70\n",
            "metrics.csv",
        )
        .unwrap();

        let result = score(&rowset, &WeightVector::default());
        match result {
            Err(ScorecardError::MissingColumn { row, column }) => {
                assert_eq!(row, 2);
                assert_eq!(column, "Quality");
            }
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_out_of_range_weights_are_rejected() {
        let rowset = sample_rowset();
        let result = score(&rowset, &WeightVector::new(1.5, 0.0, 0.0));
        assert!(matches!(
            result,
            Err(ScorecardError::WeightOutOfRange { .. })
        ));
    }

    #[test]
    fn test_rescoring_replaces_the_composite_column() {
        let rowset = sample_rowset();
        let once = score(&rowset, &WeightVector::default()).unwrap();
        let twice = score(&once, &WeightVector::new(1.0, 0.0, 0.0)).unwrap();

        let composite_count = twice
            .all_column_names()
            .iter()
            .filter(|n| n.as_str() == config::COMPOSITE_COLUMN)
            .count();
        assert_eq!(composite_count, 1);
        assert_eq!(
            twice.value_at(0, config::COMPOSITE_COLUMN),
            Some(&FieldValue::Number(80.0))
        );
    }

    #[test]
    fn test_empty_rowset_scores_to_empty() {
        let rowset = parse(b"Productivity,Quality,Timeliness\n", "metrics.csv").unwrap();
        let scored = score(&rowset, &WeightVector::default()).unwrap();
        assert_eq!(scored.number_of_rows(), 0);
        assert!(scored.is_valid_column(config::COMPOSITE_COLUMN));
    }
}
