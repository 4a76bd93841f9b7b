use super::model::{columns, Dataset, Value};

// ---------------------------------------------------------------------------
// Filter predicate: the user's company/model selection
// ---------------------------------------------------------------------------

/// Label shown for (and parsed as) the unrestricted choice.
pub const ALL: &str = "All";

/// One selector's state: either unrestricted or pinned to a single value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// Parse a selector widget label back into a selection.
    pub fn from_label(label: &str) -> Self {
        if label == ALL {
            Selection::All
        } else {
            Selection::Only(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Selection::All => ALL,
            Selection::Only(s) => s,
        }
    }

    /// Whether a record's cell satisfies this selection.
    /// A missing cell fails any specific selection.
    pub fn matches(&self, cell: Option<&Value>) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(want) => match cell {
                Some(Value::String(s)) => s == want,
                Some(other) => other.to_string() == *want,
                None => false,
            },
        }
    }
}

/// The current company/model selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub company: Selection,
    pub model: Selection,
}

// ---------------------------------------------------------------------------
// Selector options
// ---------------------------------------------------------------------------

/// Option lists for the two selector widgets, each with "All" prepended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptions {
    pub companies: Vec<String>,
    pub models: Vec<String>,
}

/// Build the selector option lists for the current company selection.
///
/// Model options are restricted to models appearing in records of the
/// selected company, so the two selectors stay consistent. Missing values
/// never show up as options. Deterministic for a given dataset + selection.
pub fn resolve_options(dataset: &Dataset, selected_company: &Selection) -> FilterOptions {
    let mut companies = vec![ALL.to_string()];
    companies.extend(dataset.distinct_strings(columns::COMPANY));

    let mut models = vec![ALL.to_string()];
    match selected_company {
        Selection::All => models.extend(dataset.distinct_strings(columns::MODEL)),
        Selection::Only(_) => {
            let mut restricted: Vec<String> = dataset
                .records
                .iter()
                .filter(|rec| selected_company.matches(rec.present(columns::COMPANY)))
                .filter_map(|rec| rec.present(columns::MODEL))
                .map(Value::to_string)
                .collect();
            restricted.sort();
            restricted.dedup();
            models.extend(restricted);
        }
    }

    FilterOptions { companies, models }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return indices of records matching the spec, preserving original order.
///
/// An empty result is a normal outcome, not an error; the dataset itself is
/// never touched. With both selections at "All" every index is returned.
pub fn filtered_indices(dataset: &Dataset, spec: &FilterSpec) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            spec.company.matches(rec.present(columns::COMPANY))
                && spec.model.matches(rec.present(columns::MODEL))
        })
        .map(|(i, _)| i)
        .collect()
}
