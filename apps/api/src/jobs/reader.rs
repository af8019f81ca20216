//! Job listing reader. The CSV is re-read on every call so edits to the file
//! show up without a restart.

use std::path::{Path, PathBuf};

use csv::StringRecord;
use serde_json::{Map, Number, Value};
use thiserror::Error;
use tracing::debug;

/// One CSV row keyed by header name.
pub type JobRecord = Map<String, Value>;

#[derive(Debug, Error)]
pub enum JobListingError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed job listing: {0}")]
    Csv(#[from] csv::Error),

    #[error("job listing has no header row")]
    MissingHeader,
}

pub async fn list_jobs(path: &Path) -> Result<Vec<JobRecord>, JobListingError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| JobListingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let jobs = parse_jobs(&bytes)?;
    debug!("Read {} job listings from {}", jobs.len(), path.display());
    Ok(jobs)
}

pub fn parse_jobs(bytes: &[u8]) -> Result<Vec<JobRecord>, JobListingError> {
    let mut reader = csv::Reader::from_reader(bytes);
    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(JobListingError::MissingHeader);
    }

    let rows = reader
        .records()
        .collect::<Result<Vec<StringRecord>, _>>()?;

    let column_types: Vec<ColumnType> = (0..headers.len())
        .map(|col| ColumnType::infer(rows.iter().filter_map(|row| row.get(col))))
        .collect();

    Ok(rows
        .iter()
        .map(|row| {
            headers
                .iter()
                .zip(row.iter())
                .zip(&column_types)
                .map(|((column, cell), kind)| (column.to_string(), kind.convert(cell)))
                .collect()
        })
        .collect())
}

/// One type per column, the way a dataframe reader settles it: a column is
/// numeric or boolean only when every non-blank cell is, otherwise the whole
/// column stays text. Blank cells are null whatever the column type.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ColumnType {
    Integer,
    Float,
    Bool,
    Text,
}

impl ColumnType {
    fn infer<'a>(cells: impl Iterator<Item = &'a str>) -> Self {
        let mut integer = true;
        let mut float = true;
        let mut boolean = true;

        for cell in cells.map(str::trim).filter(|c| !c.is_empty()) {
            integer &= cell.parse::<i64>().is_ok();
            float &= parse_finite(cell).is_some();
            boolean &= parse_bool(cell).is_some();
            if !(integer || float || boolean) {
                return ColumnType::Text;
            }
        }

        if integer {
            ColumnType::Integer
        } else if float {
            ColumnType::Float
        } else if boolean {
            ColumnType::Bool
        } else {
            ColumnType::Text
        }
    }

    fn convert(self, raw: &str) -> Value {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Value::Null;
        }
        let typed = match self {
            ColumnType::Integer => trimmed.parse::<i64>().ok().map(|n| Value::Number(n.into())),
            ColumnType::Float => parse_finite(trimmed).map(Value::Number),
            ColumnType::Bool => parse_bool(trimmed).map(Value::Bool),
            ColumnType::Text => None,
        };
        typed.unwrap_or_else(|| Value::String(raw.to_string()))
    }
}

fn parse_finite(cell: &str) -> Option<Number> {
    cell.parse::<f64>().ok().and_then(Number::from_f64)
}

fn parse_bool(cell: &str) -> Option<bool> {
    match cell {
        "True" | "TRUE" | "true" => Some(true),
        "False" | "FALSE" | "false" => Some(false),
        _ => None,
    }
}
