use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, Dataset, Record};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a tabular dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one record per line
/// * `.json`    – `[{ "Age": 56, "Gender": "Male", ... }, ...]`
/// * `.parquet` – flat scalar columns (strings, ints, floats, bools)
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} records with {} columns from {}",
        dataset.len(),
        dataset.column_names.len(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one record per line.
/// Empty cells and `NaN` become [`CellValue::Null`].
fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.is_empty() {
        bail!("CSV has no header row");
    }

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        if row.len() != headers.len() {
            bail!(
                "CSV row {row_no}: expected {} fields, found {}",
                headers.len(),
                row.len()
            );
        }

        let fields: BTreeMap<String, CellValue> = headers
            .iter()
            .zip(row.iter())
            .map(|(name, value)| (name.clone(), guess_cell_type(value)))
            .collect();

        records.push(Record { fields });
    }

    Ok(Dataset::from_records(headers, records))
}

fn guess_cell_type(s: &str) -> CellValue {
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("nan") || s.eq_ignore_ascii_case("na") {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Age": 56, "Gender": "Male", "Heart Disease Status": "No" },
///   ...
/// ]
/// ```
///
/// Column order follows first appearance across records (keys keep file order).
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut column_names: Vec<String> = Vec::new();
    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut fields = BTreeMap::new();
        for (key, val) in obj {
            if !column_names.contains(key) {
                column_names.push(key.clone());
            }
            fields.insert(key.clone(), json_to_cell(val));
        }
        records.push(Record { fields });
    }

    Ok(Dataset::from_records(column_names, records))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat scalar columns.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let column_names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        for row in 0..batch.num_rows() {
            let mut fields = BTreeMap::new();
            for (col_idx, field) in schema.fields().iter().enumerate() {
                let value = extract_cell_value(batch.column(col_idx), row)
                    .with_context(|| format!("Row {row}: column '{}'", field.name()))?;
                fields.insert(field.name().clone(), value);
            }
            records.push(Record { fields });
        }
    }

    Ok(Dataset::from_records(column_names, records))
}

// -- Parquet / Arrow helpers --

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell_value(col: &Arc<dyn Array>, row: usize) -> Result<CellValue> {
    if col.is_null(row) {
        return Ok(CellValue::Null);
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Utf8 => {
            let arr = any.downcast_ref::<StringArray>().context("expected StringArray")?;
            CellValue::String(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => CellValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => {
            let arr = any.downcast_ref::<Int32Array>().context("expected Int32Array")?;
            CellValue::Integer(arr.value(row) as i64)
        }
        DataType::Int64 => {
            let arr = any.downcast_ref::<Int64Array>().context("expected Int64Array")?;
            CellValue::Integer(arr.value(row))
        }
        DataType::Float32 => {
            let arr = any.downcast_ref::<Float32Array>().context("expected Float32Array")?;
            CellValue::Float(arr.value(row) as f64)
        }
        DataType::Float64 => {
            let arr = any.downcast_ref::<Float64Array>().context("expected Float64Array")?;
            CellValue::Float(arr.value(row))
        }
        DataType::Boolean => {
            let arr = any.downcast_ref::<BooleanArray>().context("expected BooleanArray")?;
            CellValue::Bool(arr.value(row))
        }
        other => bail!("unsupported column type {other:?}"),
    };
    Ok(value)
}
