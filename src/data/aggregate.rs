use std::collections::{BTreeMap, HashMap};

use super::model::{Dataset, Value};

// ---------------------------------------------------------------------------
// Aggregates over a filtered view
// ---------------------------------------------------------------------------
//
// Every function here is a pure function of (dataset, view indices) and is
// recomputed on each filter change. Empty views produce empty outputs, never
// errors, so callers can always render "no matches" without special-casing
// the pipeline. Missing cells are only ever excluded, never imputed.

/// Occurrence count per distinct non-missing value of `column` within the
/// view, ordered by descending count; ties keep the value's first-seen order.
pub fn value_counts(dataset: &Dataset, indices: &[usize], column: &str) -> Vec<(Value, usize)> {
    let mut counts: Vec<(Value, usize)> = Vec::new();
    let mut slot: HashMap<Value, usize> = HashMap::new();

    for &i in indices {
        let Some(val) = dataset.records[i].present(column) else {
            continue;
        };
        match slot.get(val) {
            Some(&at) => counts[at].1 += 1,
            None => {
                slot.insert(val.clone(), counts.len());
                counts.push((val.clone(), 1));
            }
        }
    }

    // Stable sort: equal counts stay in first-seen order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Share of each count against the aggregate's own total, as percentages.
/// The total is always the sum within the aggregate, never the full table.
pub fn percentages(counts: &[(Value, usize)]) -> Vec<(Value, f64)> {
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    if total == 0 {
        return Vec::new();
    }
    counts
        .iter()
        .map(|(v, n)| (v.clone(), *n as f64 / total as f64 * 100.0))
        .collect()
}

/// Arithmetic mean of `value_column` per distinct `group_column` key.
///
/// Records with a missing group key are excluded; missing values are ignored
/// within a group; a group whose every value is missing is excluded from the
/// output rather than reported as zero.
pub fn grouped_mean(
    dataset: &Dataset,
    indices: &[usize],
    group_column: &str,
    value_column: &str,
) -> BTreeMap<Value, f64> {
    let mut sums: BTreeMap<Value, (f64, usize)> = BTreeMap::new();

    for &i in indices {
        let rec = &dataset.records[i];
        let Some(key) = rec.present(group_column) else {
            continue;
        };
        let Some(v) = rec.numeric(value_column) else {
            continue;
        };
        let entry = sums.entry(key.clone()).or_insert((0.0, 0));
        entry.0 += v;
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(key, (sum, n))| (key, sum / n as f64))
        .collect()
}

/// Plain arithmetic mean of a column's non-missing numeric values, `None`
/// when the view holds no such value.
pub fn mean(dataset: &Dataset, indices: &[usize], column: &str) -> Option<f64> {
    let mut sum = 0.0;
    let mut n = 0usize;
    for &i in indices {
        if let Some(v) = dataset.records[i].numeric(column) {
            sum += v;
            n += 1;
        }
    }
    (n > 0).then(|| sum / n as f64)
}

/// Indices of the `n` records with the largest (or smallest) value of
/// `column`, ties broken by original row order. Records missing the column
/// are excluded; short views return everything they have.
pub fn top_n_by_column(
    dataset: &Dataset,
    indices: &[usize],
    column: &str,
    n: usize,
    descending: bool,
) -> Vec<usize> {
    let mut ranked: Vec<(usize, f64)> = indices
        .iter()
        .filter_map(|&i| dataset.records[i].numeric(column).map(|v| (i, v)))
        .collect();

    // Stable sort keeps original row order among equal values.
    if descending {
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    } else {
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    }
    ranked.truncate(n);
    ranked.into_iter().map(|(i, _)| i).collect()
}

/// (x, y) pairs for records where both columns are present and numeric.
pub fn scatter_pairs(
    dataset: &Dataset,
    indices: &[usize],
    x_column: &str,
    y_column: &str,
) -> Vec<[f64; 2]> {
    indices
        .iter()
        .filter_map(|&i| {
            let rec = &dataset.records[i];
            let x = rec.numeric(x_column)?;
            let y = rec.numeric(y_column)?;
            Some([x, y])
        })
        .collect()
}

/// Fraction of missing cells per column, restricted to columns with at least
/// one missing cell, sorted by descending fraction (column name breaks ties).
/// Display only; nothing in the pipeline imputes or corrects values.
pub fn missing_summary(dataset: &Dataset) -> Vec<(String, f64)> {
    if dataset.is_empty() {
        return Vec::new();
    }
    let total = dataset.len() as f64;
    let mut out: Vec<(String, f64)> = dataset
        .column_names
        .iter()
        .filter_map(|col| {
            let missing = dataset
                .records
                .iter()
                .filter(|rec| rec.present(col).is_none())
                .count();
            (missing > 0).then(|| (col.clone(), missing as f64 / total))
        })
        .collect();

    out.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn rec(pairs: &[(&str, Value)]) -> Record {
        Record::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    fn s(v: &str) -> Value {
        Value::String(v.into())
    }

    fn dataset() -> Dataset {
        Dataset::from_records(
            vec![
                rec(&[("Fuel_Type", s("Petrol")), ("Ex-Showroom_Price", Value::Integer(700))]),
                rec(&[("Fuel_Type", s("Diesel")), ("Ex-Showroom_Price", Value::Integer(900))]),
                rec(&[("Fuel_Type", s("Petrol")), ("Ex-Showroom_Price", Value::Null)]),
                rec(&[("Fuel_Type", s("Electric")), ("Ex-Showroom_Price", Value::Integer(900))]),
                rec(&[("Fuel_Type", s("Diesel")), ("Ex-Showroom_Price", Value::Integer(500))]),
                rec(&[("Fuel_Type", s("CNG")), ("Ex-Showroom_Price", Value::Null)]),
            ],
            vec!["Fuel_Type".into(), "Ex-Showroom_Price".into()],
        )
    }

    fn all(ds: &Dataset) -> Vec<usize> {
        (0..ds.len()).collect()
    }

    #[test]
    fn value_counts_orders_by_count_then_first_seen() {
        let ds = dataset();
        let counts = value_counts(&ds, &all(&ds), "Fuel_Type");
        // Petrol and Diesel both count 2; Petrol appeared first.
        // Electric and CNG both count 1; Electric appeared first.
        assert_eq!(
            counts,
            vec![
                (s("Petrol"), 2),
                (s("Diesel"), 2),
                (s("Electric"), 1),
                (s("CNG"), 1),
            ]
        );
    }

    #[test]
    fn value_counts_sum_to_view_len_without_missing() {
        let ds = dataset();
        let idx = all(&ds);
        let total: usize = value_counts(&ds, &idx, "Fuel_Type")
            .iter()
            .map(|(_, n)| n)
            .sum();
        assert_eq!(total, idx.len());
    }

    #[test]
    fn percentages_use_aggregate_total() {
        let counts = vec![(s("a"), 3), (s("b"), 1)];
        let pct = percentages(&counts);
        assert_eq!(pct[0], (s("a"), 75.0));
        assert_eq!(pct[1], (s("b"), 25.0));
        assert!(percentages(&[]).is_empty());
    }

    #[test]
    fn grouped_mean_skips_all_missing_groups() {
        let ds = dataset();
        let means = grouped_mean(&ds, &all(&ds), "Fuel_Type", "Ex-Showroom_Price");
        // CNG's only price is missing → the group is absent, not zero.
        assert!(!means.contains_key(&s("CNG")));
        assert_eq!(means[&s("Petrol")], 700.0);
        assert_eq!(means[&s("Diesel")], 700.0);
        assert_eq!(means[&s("Electric")], 900.0);
    }

    #[test]
    fn grouped_mean_lies_within_input_bounds() {
        let ds = dataset();
        for (_, m) in grouped_mean(&ds, &all(&ds), "Fuel_Type", "Ex-Showroom_Price") {
            assert!((500.0..=900.0).contains(&m));
        }
    }

    #[test]
    fn top_n_ranks_with_stable_ties() {
        let ds = dataset();
        let top = top_n_by_column(&ds, &all(&ds), "Ex-Showroom_Price", 3, true);
        // 900 appears twice (rows 1 and 3, in that order), then 700.
        assert_eq!(top, vec![1, 3, 0]);

        let bottom = top_n_by_column(&ds, &all(&ds), "Ex-Showroom_Price", 2, false);
        assert_eq!(bottom, vec![4, 0]);
    }

    #[test]
    fn top_n_short_view_returns_everything() {
        let ds = dataset();
        let top = top_n_by_column(&ds, &[0, 4], "Ex-Showroom_Price", 10, true);
        assert_eq!(top, vec![0, 4]);
    }

    #[test]
    fn scatter_drops_rows_with_a_missing_side() {
        let ds = Dataset::from_records(
            vec![
                rec(&[("Power_Value", Value::Float(90.0)), ("Torque_Value", Value::Float(200.0))]),
                rec(&[("Power_Value", Value::Null), ("Torque_Value", Value::Float(150.0))]),
                rec(&[("Power_Value", Value::Float(120.0)), ("Torque_Value", Value::Null)]),
            ],
            vec!["Power_Value".into(), "Torque_Value".into()],
        );
        let pts = scatter_pairs(&ds, &[0, 1, 2], "Power_Value", "Torque_Value");
        assert_eq!(pts, vec![[90.0, 200.0]]);
    }

    #[test]
    fn mean_is_none_when_nothing_is_numeric() {
        let ds = dataset();
        assert_eq!(mean(&ds, &all(&ds), "Fuel_Type"), None);
        assert_eq!(mean(&ds, &[2, 5], "Ex-Showroom_Price"), None);
        assert_eq!(mean(&ds, &all(&ds), "Ex-Showroom_Price"), Some(750.0));
    }

    #[test]
    fn empty_view_yields_empty_everything() {
        let ds = dataset();
        let idx: Vec<usize> = Vec::new();
        assert!(value_counts(&ds, &idx, "Fuel_Type").is_empty());
        assert!(grouped_mean(&ds, &idx, "Fuel_Type", "Ex-Showroom_Price").is_empty());
        assert!(top_n_by_column(&ds, &idx, "Ex-Showroom_Price", 5, true).is_empty());
        assert!(scatter_pairs(&ds, &idx, "Power_Value", "Torque_Value").is_empty());
        assert_eq!(mean(&ds, &idx, "Ex-Showroom_Price"), None);
    }

    #[test]
    fn missing_summary_reports_only_gappy_columns() {
        let ds = dataset();
        let summary = missing_summary(&ds);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].0, "Ex-Showroom_Price");
        assert!((summary[0].1 - 2.0 / 6.0).abs() < 1e-12);

        let empty = Dataset::from_records(Vec::new(), Vec::new());
        assert!(missing_summary(&empty).is_empty());
    }
}
