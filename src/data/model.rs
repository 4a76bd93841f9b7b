use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// Value – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value covering the dtypes found in the car data.
/// Using `BTreeMap` / `BTreeSet` downstream so `Value` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Missing field for this record.
    Null,
}

// -- Manual Eq/Ord so we can put Value in BTreeSet --

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use Value::*;
        fn discriminant(v: &Value) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::String(s) => s.hash(state),
            Value::Integer(i) => i.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Bool(b) => b.hash(state),
            Value::Null => {}
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => Ok(()),
        }
    }
}

impl Value {
    /// Try to interpret the value as an `f64` for numeric aggregation.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Whether this cell counts as missing.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

// ---------------------------------------------------------------------------
// Column names of the cars table
// ---------------------------------------------------------------------------

/// Exact (case-sensitive) column names the dashboard binds widgets to.
pub mod columns {
    pub const COMPANY: &str = "Company";
    pub const MODEL: &str = "Model";
    pub const VARIANT: &str = "Variant";
    pub const FUEL_TYPE: &str = "Fuel_Type";
    pub const DRIVETRAIN: &str = "Drivetrain";
    pub const SEATING_CAPACITY: &str = "Seating_Capacity";
    pub const PRICE: &str = "Ex-Showroom_Price";
    pub const POWER: &str = "Power_Value";
    pub const TORQUE: &str = "Torque_Value";
}

// ---------------------------------------------------------------------------
// Record – one row of the table (a car variant)
// ---------------------------------------------------------------------------

/// A single car variant (one row of the source table).
#[derive(Debug, Clone, Default)]
pub struct Record {
    /// Dynamic columns: column_name → value.
    pub fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new(fields: BTreeMap<String, Value>) -> Self {
        Record { fields }
    }

    /// The raw value for a column, `Null` when the column is absent.
    pub fn value(&self, column: &str) -> &Value {
        self.fields.get(column).unwrap_or(&Value::Null)
    }

    /// The value for a column, `None` when absent or missing.
    pub fn present(&self, column: &str) -> Option<&Value> {
        self.fields.get(column).filter(|v| !v.is_null())
    }

    /// The value for a column as a number, `None` when absent or non-numeric.
    pub fn numeric(&self, column: &str) -> Option<f64> {
        self.present(column).and_then(Value::as_f64)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table with pre-computed column indices.
/// Immutable after load; filtering and aggregation only ever read it.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All records (rows) in file order.
    pub records: Vec<Record>,
    /// Column names in the order they appeared in the source file.
    pub column_names: Vec<String>,
    /// For each column the sorted set of distinct non-missing values.
    pub unique_values: BTreeMap<String, BTreeSet<Value>>,
}

impl Dataset {
    /// Build column indices from loaded records. `column_names` keeps the
    /// source header order so exports reproduce the original layout.
    pub fn from_records(records: Vec<Record>, column_names: Vec<String>) -> Self {
        let mut unique_values: BTreeMap<String, BTreeSet<Value>> = BTreeMap::new();

        for rec in &records {
            for (col, val) in &rec.fields {
                if !val.is_null() {
                    unique_values
                        .entry(col.clone())
                        .or_default()
                        .insert(val.clone());
                }
            }
        }
        Dataset {
            records,
            column_names,
            unique_values,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the source file carried this column at all.
    pub fn has_column(&self, column: &str) -> bool {
        self.column_names.iter().any(|c| c == column)
    }

    /// Sorted distinct non-missing values of a column, rendered as text.
    /// Used to populate selector widgets.
    pub fn distinct_strings(&self, column: &str) -> Vec<String> {
        self.unique_values
            .get(column)
            .map(|vals| vals.iter().map(Value::to_string).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(pairs: &[(&str, Value)]) -> Record {
        Record::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn present_skips_nulls_and_absent_columns() {
        let r = rec(&[
            ("Company", Value::String("Acme".into())),
            ("Model", Value::Null),
        ]);
        assert_eq!(r.present("Company"), Some(&Value::String("Acme".into())));
        assert_eq!(r.present("Model"), None);
        assert_eq!(r.present("Variant"), None);
        assert_eq!(r.value("Variant"), &Value::Null);
    }

    #[test]
    fn numeric_coerces_integers() {
        let r = rec(&[
            ("Seating_Capacity", Value::Integer(5)),
            ("Power_Value", Value::Float(88.5)),
            ("Company", Value::String("Acme".into())),
        ]);
        assert_eq!(r.numeric("Seating_Capacity"), Some(5.0));
        assert_eq!(r.numeric("Power_Value"), Some(88.5));
        assert_eq!(r.numeric("Company"), None);
    }

    #[test]
    fn unique_values_exclude_missing() {
        let ds = Dataset::from_records(
            vec![
                rec(&[("Fuel_Type", Value::String("Petrol".into()))]),
                rec(&[("Fuel_Type", Value::Null)]),
                rec(&[("Fuel_Type", Value::String("Diesel".into()))]),
                rec(&[("Fuel_Type", Value::String("Petrol".into()))]),
            ],
            vec!["Fuel_Type".into()],
        );
        assert_eq!(ds.distinct_strings("Fuel_Type"), vec!["Diesel", "Petrol"]);
        assert!(ds.distinct_strings("Drivetrain").is_empty());
    }
}
