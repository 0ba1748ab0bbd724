use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{ObservationTable, MIN_COLUMNS};

// ---------------------------------------------------------------------------
// DataError
// ---------------------------------------------------------------------------

/// Errors from loading a result file. Loading is all or nothing: the
/// first bad row fails the whole file and nothing is skipped.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("cannot open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path} holds no data rows")]
    Empty { path: PathBuf },
    #[error("row {row}: expected at least {min} columns, found {found}")]
    TooNarrow { row: usize, min: usize, found: usize },
    #[error("row {row}, column {column}: '{value}' is not a number")]
    Parse {
        row: usize,
        column: usize,
        value: String,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

/// Load a result file into an [`ObservationTable`].
///
/// Format: comma-delimited numeric rows, no header, `#` lines skipped.
/// Whitespace around fields is tolerated (the simulator writes `", "`
/// separators). Every row must carry at least [`MIN_COLUMNS`] values and
/// all rows must share one width; a ragged row fails the load.
pub fn load_observations(path: &Path) -> Result<ObservationTable, DataError> {
    let file = File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(file);

    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (row_no, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() < MIN_COLUMNS {
            return Err(DataError::TooNarrow {
                row: row_no,
                min: MIN_COLUMNS,
                found: record.len(),
            });
        }

        let mut row = Vec::with_capacity(record.len());
        for (col_no, field) in record.iter().enumerate() {
            let value = field.parse::<f64>().map_err(|_| DataError::Parse {
                row: row_no,
                column: col_no,
                value: field.to_string(),
            })?;
            row.push(value);
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(DataError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(ObservationTable::from_rows(rows))
}
