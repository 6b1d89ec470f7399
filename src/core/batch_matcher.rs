use crate::core::Dataset;
use crate::domain::model::{StudentColumns, StudentId};
use crate::utils::error::{LookupError, Result};

fn require_column(dataset: &Dataset, column: &str) -> Result<usize> {
    dataset
        .column_index(column)
        .ok_or_else(|| LookupError::MissingColumn {
            column: column.to_string(),
            source_name: dataset.name.clone(),
        })
}

/// Cells that do not parse as integers never match any id.
fn id_matches(cell: &str, id: StudentId) -> bool {
    cell.trim().parse::<i64>().map(|v| v == id.0).unwrap_or(false)
}

/// Rows whose identifier equals `id`; at most one in well-formed data.
pub fn find_student(dataset: &Dataset, id: StudentId, id_column: &str) -> Result<Dataset> {
    let id_idx = require_column(dataset, id_column)?;
    let found = dataset.filter_rows(|row| id_matches(&row[id_idx], id));

    if found.is_empty() {
        return Err(LookupError::StudentNotFound { id: id.0 });
    }
    if found.len() > 1 {
        tracing::warn!(
            "ERP ID {} appears {} times in '{}'",
            id,
            found.len(),
            dataset.name
        );
    }
    Ok(found)
}

/// Batch value of the first row carrying `id`.
pub fn batch_of(dataset: &Dataset, id: StudentId, columns: &StudentColumns) -> Result<String> {
    let batch_idx = require_column(dataset, &columns.batch)?;
    let id_idx = require_column(dataset, &columns.id)?;

    dataset
        .rows
        .iter()
        .find(|row| id_matches(&row[id_idx], id))
        .map(|row| row[batch_idx].clone())
        .ok_or(LookupError::StudentNotFound { id: id.0 })
}

/// Every row sharing the student's batch, in source order, the student included.
pub fn find_batchmates(
    dataset: &Dataset,
    id: StudentId,
    columns: &StudentColumns,
) -> Result<Dataset> {
    let target = batch_of(dataset, id, columns)?;
    let batch_idx = require_column(dataset, &columns.batch)?;

    let mates = dataset.filter_rows(|row| row[batch_idx] == target);
    tracing::debug!(
        "Batch '{}' of student {} has {} members",
        target,
        id,
        mates.len()
    );
    Ok(mates)
}
