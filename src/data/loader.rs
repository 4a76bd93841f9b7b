use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Dataset, Record, Value};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the cars table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row plus one record per line (the dashboard's input)
/// * `.json`    – `[{ "Company": "...", "Ex-Showroom_Price": 1234, ... }, ...]`
/// * `.parquet` – scalar columns (strings, ints, floats, bools)
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one car variant per record.
/// Cell types are inferred per cell; empty cells become missing values.
fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;

        // The reader rejects ragged rows, so cells line up with the header.
        let mut fields = BTreeMap::new();
        for (col_name, cell) in headers.iter().zip(row.iter()) {
            fields.insert(col_name.clone(), guess_value(cell));
        }
        records.push(Record::new(fields));
    }

    Ok(Dataset::from_records(records, headers))
}

fn guess_value(s: &str) -> Value {
    if s.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return Value::Float(f);
    }
    if s == "true" || s == "false" {
        return Value::Bool(s == "true");
    }
    Value::String(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Company": "Acme", "Model": "Alpha", "Ex-Showroom_Price": 649000 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    // Column order: first appearance across records.
    let mut column_names: Vec<String> = Vec::new();
    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut fields = BTreeMap::new();
        for (key, val) in obj {
            if !column_names.iter().any(|c| c == key) {
                column_names.push(key.clone());
            }
            fields.insert(key.clone(), json_to_value(val));
        }
        records.push(Record::new(fields));
    }

    Ok(Dataset::from_records(records, column_names))
}

fn json_to_value(val: &JsonValue) -> Value {
    match val {
        JsonValue::String(s) => Value::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Null => Value::Null,
        other => Value::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with scalar columns (strings, ints, floats, bools).
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut column_names: Vec<String> = Vec::new();
    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        if column_names.is_empty() {
            column_names = schema.fields().iter().map(|f| f.name().clone()).collect();
        }

        for row in 0..batch.num_rows() {
            let mut fields = BTreeMap::new();
            for (col_idx, field) in schema.fields().iter().enumerate() {
                let value = extract_value(batch.column(col_idx), row);
                fields.insert(field.name().clone(), value);
            }
            records.push(Record::new(fields));
        }
    }

    Ok(Dataset::from_records(records, column_names))
}

/// Extract a single scalar value from an Arrow column at a given row.
fn extract_value(col: &Arc<dyn Array>, row: usize) -> Value {
    if col.is_null(row) {
        return Value::Null;
    }
    match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 => {
            if let Some(s) = col.as_any().downcast_ref::<StringArray>() {
                Value::String(s.value(row).to_string())
            } else {
                // LargeStringArray
                let s = col.as_string::<i64>();
                Value::String(s.value(row).to_string())
            }
        }
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().unwrap();
            Value::Integer(arr.value(row) as i64)
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().unwrap();
            Value::Integer(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col.as_any().downcast_ref::<Float32Array>().unwrap();
            Value::Float(arr.value(row) as f64)
        }
        DataType::Float64 => {
            let arr = col.as_any().downcast_ref::<Float64Array>().unwrap();
            Value::Float(arr.value(row))
        }
        DataType::Boolean => {
            let arr = col.as_any().downcast_ref::<BooleanArray>().unwrap();
            Value::Bool(arr.value(row))
        }
        _ => Value::String(format!("{:?}", col.data_type())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn guess_value_infers_cell_types() {
        assert_eq!(guess_value(""), Value::Null);
        assert_eq!(guess_value("5"), Value::Integer(5));
        assert_eq!(guess_value("88.5"), Value::Float(88.5));
        assert_eq!(guess_value("true"), Value::Bool(true));
        assert_eq!(guess_value("Petrol"), Value::String("Petrol".into()));
    }

    #[test]
    fn csv_load_keeps_header_order_and_missing_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cars.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "Company,Model,Ex-Showroom_Price").unwrap();
        writeln!(f, "Acme,Alpha,649000").unwrap();
        writeln!(f, "Zen,,825000.5").unwrap();
        drop(f);

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(
            ds.column_names,
            vec!["Company", "Model", "Ex-Showroom_Price"]
        );
        assert_eq!(
            ds.records[0].value("Ex-Showroom_Price"),
            &Value::Integer(649000)
        );
        assert_eq!(ds.records[1].present("Model"), None);
        assert_eq!(
            ds.records[1].value("Ex-Showroom_Price"),
            &Value::Float(825000.5)
        );
    }

    #[test]
    fn json_load_reads_records_orientation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cars.json");
        std::fs::write(
            &path,
            r#"[{"Company":"Acme","Seating_Capacity":5},{"Company":"Zen","Seating_Capacity":null}]"#,
        )
        .unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].value("Seating_Capacity"), &Value::Integer(5));
        assert_eq!(ds.records[1].present("Seating_Capacity"), None);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        assert!(load_file(Path::new("cars.xlsx")).is_err());
    }
}
