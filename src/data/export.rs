use std::io::Write;
use std::path::Path;

use thiserror::Error;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// CSV export of the current filtered view
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("writing CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("flushing output: {0}")]
    Io(#[from] std::io::Error),
}

/// Serialize the given view back to CSV, preserving the view's row order and
/// every original column in source header order. Missing cells serialize as
/// empty fields, so the output round-trips through the loader.
pub fn write_csv<W: Write>(dataset: &Dataset, indices: &[usize], out: W) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(out);

    writer.write_record(&dataset.column_names)?;
    for &i in indices {
        let rec = &dataset.records[i];
        let row: Vec<String> = dataset
            .column_names
            .iter()
            .map(|col| rec.value(col).to_string())
            .collect();
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Export the view to a file path (the save-dialog target).
pub fn export_to_path(dataset: &Dataset, indices: &[usize], path: &Path) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    write_csv(dataset, indices, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_file;
    use crate::data::model::{Record, Value};

    fn rec(pairs: &[(&str, Value)]) -> Record {
        Record::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    fn dataset() -> Dataset {
        Dataset::from_records(
            vec![
                rec(&[
                    ("Company", Value::String("Acme".into())),
                    ("Model", Value::String("Alpha".into())),
                    ("Ex-Showroom_Price", Value::Integer(649000)),
                ]),
                rec(&[
                    ("Company", Value::String("Zen".into())),
                    ("Model", Value::Null),
                    ("Ex-Showroom_Price", Value::Float(825000.5)),
                ]),
                rec(&[
                    ("Company", Value::String("Bolt".into())),
                    ("Model", Value::String("Beta".into())),
                    ("Ex-Showroom_Price", Value::Null),
                ]),
            ],
            vec!["Company".into(), "Model".into(), "Ex-Showroom_Price".into()],
        )
    }

    #[test]
    fn export_round_trips_through_the_loader() {
        let ds = dataset();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.csv");

        export_to_path(&ds, &[0, 1, 2], &path).unwrap();
        let back = load_file(&path).unwrap();

        assert_eq!(back.len(), 3);
        assert_eq!(back.column_names, ds.column_names);
        for (orig, re) in ds.records.iter().zip(back.records.iter()) {
            for col in &ds.column_names {
                assert_eq!(orig.value(col), re.value(col), "column {col}");
            }
        }
    }

    #[test]
    fn export_respects_view_order_and_subset() {
        let ds = dataset();
        let mut buf = Vec::new();
        write_csv(&ds, &[2, 0], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Company,Model,Ex-Showroom_Price");
        assert_eq!(lines[1], "Bolt,Beta,");
        assert_eq!(lines[2], "Acme,Alpha,649000");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn empty_view_exports_header_only() {
        let ds = dataset();
        let mut buf = Vec::new();
        write_csv(&ds, &[], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.trim_end(), "Company,Model,Ex-Showroom_Price");
    }
}
