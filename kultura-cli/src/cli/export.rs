//! CSV export of a distance matrix.
//!
//! The layout mirrors the matrix itself: a header row of country names with
//! an empty corner cell, then one row per country. Values are written with
//! full precision so spreadsheets and downstream tooling can re-derive
//! rankings exactly.

use std::path::Path;

use kultura_core::DistanceMatrix;
use tracing::instrument;

use super::commands::CliError;

/// Writes `matrix` to `path` as CSV.
#[instrument(skip(matrix), fields(entities = matrix.len(), path = %path.display()))]
pub(super) fn write_matrix(matrix: &DistanceMatrix, path: &Path) -> Result<(), CliError> {
    let csv_error = |source: csv::Error| CliError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;

    let mut header = Vec::with_capacity(matrix.len() + 1);
    header.push("");
    header.extend(matrix.names().iter().map(String::as_str));
    writer.write_record(&header).map_err(csv_error)?;

    for name in matrix.names() {
        let row = matrix.row(name)?;
        let mut record = Vec::with_capacity(row.len() + 1);
        record.push(name.clone());
        record.extend(row.iter().map(|value| format!("{value}")));
        writer.write_record(&record).map_err(csv_error)?;
    }

    writer.flush().map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
