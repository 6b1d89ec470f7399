use crate::core::lookup::{LookupReport, Panel};
use crate::core::Dataset;
use crate::utils::error::LookupError;
use serde_json::json;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

pub fn render(report: &LookupReport, title: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Table => render_table(report, title),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&render_json(report, title)).unwrap_or_default()
        }
    }
}

/// Fixed-width text table; columns are as wide as their widest cell.
pub fn format_dataset(dataset: &Dataset) -> String {
    let mut widths: Vec<usize> = dataset.headers.iter().map(|h| h.chars().count()).collect();
    for row in &dataset.rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", line(&dataset.headers));
    let _ = writeln!(
        out,
        "{}",
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-")
    );
    for row in &dataset.rows {
        let _ = writeln!(out, "{}", line(row));
    }
    out
}

fn timetable_message(error: &LookupError, file: Option<&str>) -> String {
    match (error, file) {
        (LookupError::TimetableNotFound { .. }, _) | (_, None) => error.user_friendly_message(),
        (_, Some(file)) => format!("Error: Failed to read timetable data from '{}'.", file),
    }
}

pub fn render_table(report: &LookupReport, title: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==\n", title);

    let _ = writeln!(out, "Your Information");
    match &report.student {
        Panel::Available { data, .. } => out.push_str(&format_dataset(data)),
        Panel::NotAvailable(e) => {
            let _ = writeln!(out, "{}", e.user_friendly_message());
        }
    }

    let _ = writeln!(out, "\nBatchmates");
    match &report.batchmates {
        Panel::Available { data, .. } if !data.is_empty() => out.push_str(&format_dataset(data)),
        Panel::Available { .. } => {
            let _ = writeln!(out, "Batchmate data not available.");
        }
        Panel::NotAvailable(e) => {
            let _ = writeln!(out, "{}", e.user_friendly_message());
        }
    }

    let _ = writeln!(out, "\nTimetable");
    match &report.timetable {
        Panel::Available { data, warning } => {
            if let Some(w) = warning {
                let _ = writeln!(out, "Warning: {}", w.user_friendly_message());
            }
            if data.is_empty() {
                let _ = writeln!(out, "Timetable data not available.");
            } else {
                out.push_str(&format_dataset(data));
            }
        }
        Panel::NotAvailable(e) => {
            let _ = writeln!(
                out,
                "{}",
                timetable_message(e, report.timetable_file.as_deref())
            );
        }
    }

    out
}

fn panel_json(panel: &Panel) -> serde_json::Value {
    match panel {
        Panel::Available { data, warning } => json!({
            "available": true,
            "source": data.name,
            "rows": data.to_json_records(),
            "warning": warning.as_ref().map(|w| w.to_string()),
        }),
        Panel::NotAvailable(e) => json!({
            "available": false,
            "message": e.user_friendly_message(),
            "error": e.to_string(),
        }),
    }
}

pub fn render_json(report: &LookupReport, title: &str) -> serde_json::Value {
    json!({
        "title": title,
        "erp_id": report.student_id,
        "student": panel_json(&report.student),
        "batchmates": panel_json(&report.batchmates),
        "timetable": panel_json(&report.timetable),
        "timetable_file": report.timetable_file,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::StudentId;

    fn dataset() -> Dataset {
        Dataset::new(
            "c to x.csv",
            vec!["ERP ID".into(), "Name".into(), "Batch".into()],
            vec![
                vec!["1001".into(), "Asha".into(), "K1".into()],
                vec!["1002".into(), "Bilal Khan".into(), "K1".into()],
            ],
        )
    }

    fn report(timetable: Panel, timetable_file: Option<&str>) -> LookupReport {
        LookupReport {
            student_id: StudentId(1001),
            student: Panel::Available {
                data: dataset().filter_rows(|r| r[0] == "1001"),
                warning: None,
            },
            batchmates: Panel::Available {
                data: dataset(),
                warning: None,
            },
            timetable,
            timetable_file: timetable_file.map(str::to_string),
        }
    }

    #[test]
    fn test_format_dataset_aligns_columns() {
        let text = format_dataset(&dataset());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "ERP ID | Name       | Batch");
        assert_eq!(lines[1], "-------+------------+------");
        assert_eq!(lines[2], "1001   | Asha       | K1");
        assert_eq!(lines[3], "1002   | Bilal Khan | K1");
    }

    #[test]
    fn test_missing_timetable_leaves_other_panels() {
        let r = report(
            Panel::NotAvailable(LookupError::TimetableNotFound {
                batch: "K1".into(),
            }),
            None,
        );
        let text = render_table(&r, "Practicals");
        assert!(text.starts_with("== Practicals =="));
        assert!(text.contains("Your Information\nERP ID"));
        assert!(text.contains("Bilal Khan"));
        assert!(text.contains("Timetable data not found for batch 'K1'."));
    }

    #[test]
    fn test_unreadable_timetable_names_file() {
        let r = report(
            Panel::NotAvailable(LookupError::ConfigError {
                message: "x".into(),
            }),
            Some("K1-timetable.csv"),
        );
        assert!(render_table(&r, "T")
            .contains("Error: Failed to read timetable data from 'K1-timetable.csv'."));
    }

    #[test]
    fn test_json_output() {
        let r = report(
            Panel::Available {
                data: Dataset::new(
                    "K1.csv",
                    vec!["Date".into()],
                    vec![vec!["05-03-2024".into()]],
                ),
                warning: None,
            },
            Some("K1.csv"),
        );
        let value = render_json(&r, "Practicals");
        assert_eq!(value["erp_id"], 1001);
        assert_eq!(value["batchmates"]["rows"].as_array().unwrap().len(), 2);
        assert_eq!(value["timetable"]["rows"][0]["Date"], "05-03-2024");
        assert_eq!(value["timetable_file"], "K1.csv");
        assert!(value["timetable"]["warning"].is_null());
    }
}
