use crate::core::Dataset;
use crate::utils::error::LookupError;
use chrono::{Datelike, NaiveDate, NaiveDateTime};

pub const DISPLAY_FORMAT: &str = "%d-%m-%Y";

/// Dashed dates are read day-first (`03-05-2024` is 3 May) so the display
/// format reads back as itself; slashed dates are read month-first
/// (`03/05/2024` is 5 March). Two-digit years only match the `%y` shapes.
const DATE_FORMATS: &[&str] = &[
    "%d-%m-%Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d-%m-%y",
    "%m/%d/%y",
];

// chrono's %Y happily reads "24" as year 24.
const MIN_YEAR: i32 = 100;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFailure {
    pub row: usize,
    pub value: String,
}

/// What happened to a date column. Cells that failed keep their raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateFormatOutcome {
    Formatted { column: String, rows: usize },
    Partial {
        column: String,
        formatted: usize,
        failures: Vec<RowFailure>,
    },
    Unformatted {
        column: String,
        failures: Vec<RowFailure>,
    },
    MissingColumn { column: String, source_name: String },
}

impl DateFormatOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, DateFormatOutcome::Formatted { .. })
    }

    /// The non-fatal warning to show next to the data, if any.
    pub fn warning(&self) -> Option<LookupError> {
        match self {
            DateFormatOutcome::Formatted { .. } => None,
            DateFormatOutcome::Partial {
                column,
                formatted,
                failures,
            } => Some(LookupError::FormatWarning {
                column: column.clone(),
                failed: failures.len(),
                total: formatted + failures.len(),
            }),
            DateFormatOutcome::Unformatted { column, failures } => {
                Some(LookupError::FormatWarning {
                    column: column.clone(),
                    failed: failures.len(),
                    total: failures.len(),
                })
            }
            DateFormatOutcome::MissingColumn {
                column,
                source_name,
            } => Some(LookupError::MissingColumn {
                column: column.clone(),
                source_name: source_name.clone(),
            }),
        }
    }
}

pub fn parse_date(value: &str, output_format: &str) -> Option<NaiveDate> {
    let value = value.trim();

    std::iter::once(output_format)
        .chain(DATE_FORMATS.iter().copied())
        .filter_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .find(|date| date.year() >= MIN_YEAR)
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .filter_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
                .find(|date| date.year() >= MIN_YEAR)
        })
}

/// Rewrites every parsable cell of `column` with `output_format`, row by row.
/// Blank cells are left alone and do not count as failures.
pub fn format_date_column(
    dataset: &mut Dataset,
    column: &str,
    output_format: &str,
) -> DateFormatOutcome {
    let Some(idx) = dataset.column_index(column) else {
        tracing::warn!("Column '{}' not found in '{}'", column, dataset.name);
        return DateFormatOutcome::MissingColumn {
            column: column.to_string(),
            source_name: dataset.name.clone(),
        };
    };

    let mut formatted = 0;
    let mut failures = Vec::new();

    for (row_no, row) in dataset.rows.iter_mut().enumerate() {
        let cell = &mut row[idx];
        if cell.trim().is_empty() {
            continue;
        }
        match parse_date(cell, output_format) {
            Some(date) => {
                *cell = date.format(output_format).to_string();
                formatted += 1;
            }
            None => failures.push(RowFailure {
                row: row_no,
                value: cell.clone(),
            }),
        }
    }

    let column = column.to_string();
    if failures.is_empty() {
        DateFormatOutcome::Formatted {
            column,
            rows: formatted,
        }
    } else if formatted == 0 {
        tracing::warn!(
            "No value in '{}' of '{}' could be parsed as a date",
            column,
            dataset.name
        );
        DateFormatOutcome::Unformatted { column, failures }
    } else {
        tracing::warn!(
            "{} values in '{}' of '{}' could not be parsed as dates",
            failures.len(),
            column,
            dataset.name
        );
        DateFormatOutcome::Partial {
            column,
            formatted,
            failures,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timetable(dates: &[&str]) -> Dataset {
        Dataset::new(
            "K1-timetable.csv",
            vec!["Date".into(), "Subject".into()],
            dates
                .iter()
                .map(|d| vec![d.to_string(), "Physics Lab".to_string()])
                .collect(),
        )
    }

    fn dates(ds: &Dataset) -> Vec<&str> {
        ds.rows.iter().map(|r| r[0].as_str()).collect()
    }

    #[test]
    fn test_iso_date_becomes_day_first() {
        let mut ds = timetable(&["2024-03-05"]);
        let outcome = format_date_column(&mut ds, "Date", DISPLAY_FORMAT);
        assert_eq!(dates(&ds), vec!["05-03-2024"]);
        assert!(outcome.is_complete());
        assert!(outcome.warning().is_none());
    }

    #[test]
    fn test_common_input_shapes() {
        let mut ds = timetable(&[
            "2024/03/05",
            "03/05/2024",
            "5 March 2024",
            "Mar 5, 2024",
            "2024-03-05 09:30:00",
            "2024-03-05T09:30:00",
        ]);
        format_date_column(&mut ds, "Date", DISPLAY_FORMAT);
        assert!(dates(&ds).iter().all(|d| *d == "05-03-2024"));
    }

    #[test]
    fn test_two_digit_years() {
        let mut ds = timetable(&["05-03-24", "3/5/24"]);
        let outcome = format_date_column(&mut ds, "Date", DISPLAY_FORMAT);
        assert_eq!(dates(&ds), vec!["05-03-2024", "05-03-2024"]);
        assert!(outcome.is_complete());
    }

    #[test]
    fn test_ancient_years_are_failures() {
        let mut ds = timetable(&["0024-03-05"]);
        let outcome = format_date_column(&mut ds, "Date", DISPLAY_FORMAT);
        assert_eq!(dates(&ds), vec!["0024-03-05"]);
        assert!(matches!(
            outcome.warning(),
            Some(LookupError::FormatWarning { failed: 1, .. })
        ));
    }

    #[test]
    fn test_dash_is_day_first_and_slash_is_month_first() {
        let mut ds = timetable(&["03-05-2024", "03/05/2024"]);
        format_date_column(&mut ds, "Date", DISPLAY_FORMAT);
        assert_eq!(dates(&ds), vec!["03-05-2024", "05-03-2024"]);
    }

    #[test]
    fn test_formatting_is_idempotent() {
        let mut once = timetable(&["2024-03-05", "2024-12-31", "junk", ""]);
        format_date_column(&mut once, "Date", DISPLAY_FORMAT);
        let mut twice = once.clone();
        format_date_column(&mut twice, "Date", DISPLAY_FORMAT);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_partial_failure_keeps_raw_values() {
        let mut ds = timetable(&["2024-03-05", "TBA", ""]);
        let outcome = format_date_column(&mut ds, "Date", DISPLAY_FORMAT);
        assert_eq!(dates(&ds), vec!["05-03-2024", "TBA", ""]);
        assert_eq!(
            outcome,
            DateFormatOutcome::Partial {
                column: "Date".into(),
                formatted: 1,
                failures: vec![RowFailure {
                    row: 1,
                    value: "TBA".into()
                }],
            }
        );
        assert!(matches!(
            outcome.warning(),
            Some(LookupError::FormatWarning { failed: 1, total: 2, .. })
        ));
    }

    #[test]
    fn test_all_rows_unparsable() {
        let mut ds = timetable(&["TBA", "soon"]);
        let outcome = format_date_column(&mut ds, "Date", DISPLAY_FORMAT);
        assert!(matches!(outcome, DateFormatOutcome::Unformatted { ref failures, .. } if failures.len() == 2));
        assert_eq!(dates(&ds), vec!["TBA", "soon"]);
    }

    #[test]
    fn test_missing_column_leaves_dataset_untouched() {
        let mut ds = timetable(&["2024-03-05"]);
        let before = ds.clone();
        let outcome = format_date_column(&mut ds, "Day", DISPLAY_FORMAT);
        assert_eq!(ds, before);
        assert!(matches!(
            outcome.warning(),
            Some(LookupError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_custom_output_format_round_trips() {
        let mut ds = timetable(&["2024-03-05"]);
        format_date_column(&mut ds, "Date", "%d/%m/%Y");
        assert_eq!(dates(&ds), vec!["05/03/2024"]);
        format_date_column(&mut ds, "Date", "%d/%m/%Y");
        assert_eq!(dates(&ds), vec!["05/03/2024"]);
    }
}
