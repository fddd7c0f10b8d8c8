use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use thiserror::Error;

use super::model::{REQUIRED_COLUMNS, Record, Table};

/// Why a data file could not be turned into a [`Table`].
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}: {message}")]
    Malformed { row: usize, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load graduate records from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row naming the five record columns, any order
/// * `.json`    – `[{ "state": ..., "sector": ..., ... }, ...]`
/// * `.parquet` – flat columns named like the record fields
///
/// Either the whole file loads or an error is returned; there is no partial
/// table. Reading the same unchanged file twice yields equal tables.
pub fn load_file(path: &Path) -> Result<Table, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };
    log::info!("Loaded {} records from {}", table.len(), path.display());
    Ok(table)
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Reject values a pre-cleaned data set must not contain.
fn validate(record: Record, row: usize) -> Result<Record, LoadError> {
    if !record.salary.is_finite() || record.salary < 0.0 {
        return Err(LoadError::Malformed {
            row,
            message: format!("salary must be a non-negative number, got {}", record.salary),
        });
    }
    Ok(record)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with at least `state, sector, employed, salary,
/// admission_year`. Extra columns are ignored; headers and fields are trimmed.
fn load_csv(path: &Path) -> Result<Table, LoadError> {
    let file = open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader.headers()?;
    for &col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(LoadError::MissingColumn(col.to_string()));
        }
    }

    let mut records = Vec::new();
    for (i, result) in reader.deserialize::<Record>().enumerate() {
        let row = i + 1;
        let record = result.map_err(|e| LoadError::Malformed {
            row,
            message: e.to_string(),
        })?;
        records.push(validate(record, row)?);
    }

    Ok(Table::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`:
///
/// ```json
/// [
///   { "state": "SP", "sector": "Tecnologia", "employed": "Sim",
///     "salary": 5200.0, "admission_year": 2021 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Table, LoadError> {
    let file = open(path)?;
    let records: Vec<Record> = serde_json::from_reader(BufReader::new(file))?;

    let records = records
        .into_iter()
        .enumerate()
        .map(|(i, rec)| validate(rec, i + 1))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Table::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per record field.
///
/// String columns may be Utf8 or LargeUtf8; `salary` and `admission_year`
/// may use any integer or float width and are cast to f64 / i32. Works with
/// files written by both **Pandas** and **Polars**.
fn load_parquet(path: &Path) -> Result<Table, LoadError> {
    let file = open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    let schema = builder.schema().clone();
    for &col in REQUIRED_COLUMNS {
        if schema.field_with_name(col).is_err() {
            return Err(LoadError::MissingColumn(col.to_string()));
        }
    }

    let reader = builder.build()?;
    let mut records = Vec::new();
    let mut offset = 0;

    for batch_result in reader {
        let batch = batch_result?;

        let state = cast(column(&batch, "state")?.as_ref(), &DataType::Utf8)?;
        let sector = cast(column(&batch, "sector")?.as_ref(), &DataType::Utf8)?;
        let employed = cast(column(&batch, "employed")?.as_ref(), &DataType::Utf8)?;
        let salary = cast(column(&batch, "salary")?.as_ref(), &DataType::Float64)?;
        // Through f64 so fractional years are caught instead of truncated.
        let year = cast(column(&batch, "admission_year")?.as_ref(), &DataType::Float64)?;

        let state = state.as_string::<i32>();
        let sector = sector.as_string::<i32>();
        let employed = employed.as_string::<i32>();
        let salary = salary.as_primitive::<Float64Type>();
        let year = year.as_primitive::<Float64Type>();

        for i in 0..batch.num_rows() {
            let row = offset + i + 1;
            let columns: [(&str, &dyn Array); 5] = [
                ("state", state),
                ("sector", sector),
                ("employed", employed),
                ("salary", salary),
                ("admission_year", year),
            ];
            if let Some((name, _)) = columns.iter().find(|(_, arr)| arr.is_null(i)) {
                return Err(LoadError::Malformed {
                    row,
                    message: format!("null or non-convertible value in '{name}'"),
                });
            }

            let record = Record {
                state: state.value(i).to_string(),
                sector: sector.value(i).to_string(),
                employed: employed.value(i).to_string(),
                salary: salary.value(i),
                admission_year: whole_year(year.value(i), row)?,
            };
            records.push(validate(record, row)?);
        }
        offset += batch.num_rows();
    }

    Ok(Table::from_records(records))
}

fn whole_year(value: f64, row: usize) -> Result<i32, LoadError> {
    if value.fract() != 0.0 || value < i32::MIN as f64 || value > i32::MAX as f64 {
        return Err(LoadError::Malformed {
            row,
            message: format!("admission_year must be a whole number, got {value}"),
        });
    }
    Ok(value as i32)
}

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef, LoadError> {
    batch
        .column_by_name(name)
        .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
}
