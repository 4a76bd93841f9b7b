use crate::data::filter::{filtered_indices, resolve_options, FilterOptions, FilterSpec, Selection};
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The dashboard's pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Overview,
    Explorer,
    Compare,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::Explorer => "Cars Explorer",
            View::Compare => "Compare Cars",
        }
    }
}

/// The full UI state, independent of rendering.
///
/// The loaded dataset is immutable; every user interaction recomputes
/// options → view indices → aggregates synchronously from it.
pub struct AppState {
    /// Loaded dataset (None until startup load or File → Open completes).
    pub dataset: Option<Dataset>,

    /// Currently displayed page.
    pub view: View,

    /// Sidebar selection being edited; takes effect on Apply.
    pub pending: FilterSpec,

    /// Selection last applied; drives `visible_indices`.
    pub applied: FilterSpec,

    /// Indices of records passing the applied filters (cached).
    pub visible_indices: Vec<usize>,

    /// Row picks for the compare page.
    pub compare_left: Option<usize>,
    pub compare_right: Option<usize>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            view: View::default(),
            pending: FilterSpec::default(),
            applied: FilterSpec::default(),
            visible_indices: Vec::new(),
            compare_left: None,
            compare_right: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset and reset selection state.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.pending = FilterSpec::default();
        self.applied = FilterSpec::default();
        self.visible_indices = (0..dataset.len()).collect();
        self.compare_left = None;
        self.compare_right = None;
        self.dataset = Some(dataset);
        self.status_message = None;
    }

    /// Selector option lists for the pending company selection.
    pub fn filter_options(&self) -> FilterOptions {
        match &self.dataset {
            Some(ds) => resolve_options(ds, &self.pending.company),
            None => FilterOptions {
                companies: vec![crate::data::filter::ALL.to_string()],
                models: vec![crate::data::filter::ALL.to_string()],
            },
        }
    }

    /// Change the pending company; the pending model is reset whenever it is
    /// no longer offered for the new company.
    pub fn set_pending_company(&mut self, company: Selection) {
        self.pending.company = company;
        if let Some(ds) = &self.dataset {
            let options = resolve_options(ds, &self.pending.company);
            if !options
                .models
                .iter()
                .any(|m| m == self.pending.model.label())
            {
                self.pending.model = Selection::All;
            }
        }
    }

    /// Whether the sidebar selection differs from what is applied.
    pub fn filters_dirty(&self) -> bool {
        self.pending != self.applied
    }

    /// Apply the pending selection. Filtering and aggregation only ever run
    /// off the applied spec, so edits stay inert until this is called.
    pub fn apply_filters(&mut self) {
        self.applied = self.pending.clone();
        self.refilter();
    }

    /// Recompute `visible_indices` from the applied spec.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(ds, &self.applied);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{columns, Record, Value};
    use std::collections::BTreeMap;

    fn car(company: &str, model: &str) -> Record {
        let mut fields = BTreeMap::new();
        fields.insert(
            columns::COMPANY.to_string(),
            Value::String(company.to_string()),
        );
        fields.insert(columns::MODEL.to_string(), Value::String(model.to_string()));
        Record::new(fields)
    }

    fn state() -> AppState {
        let mut st = AppState::default();
        st.set_dataset(Dataset::from_records(
            vec![car("Acme", "Alpha"), car("Zen", "Zeta"), car("Acme", "Axle")],
            vec![columns::COMPANY.into(), columns::MODEL.into()],
        ));
        st
    }

    #[test]
    fn edits_are_inert_until_applied() {
        let mut st = state();
        st.pending.company = Selection::Only("Zen".into());
        assert_eq!(st.visible_indices, vec![0, 1, 2]);
        assert!(st.filters_dirty());

        st.apply_filters();
        assert_eq!(st.visible_indices, vec![1]);
        assert!(!st.filters_dirty());
    }

    #[test]
    fn company_change_resets_stale_model() {
        let mut st = state();
        st.pending.model = Selection::Only("Zeta".into());
        st.set_pending_company(Selection::Only("Acme".into()));
        // Zeta is not an Acme model, so the pick falls back to All.
        assert_eq!(st.pending.model, Selection::All);

        st.set_pending_company(Selection::Only("Zen".into()));
        st.pending.model = Selection::Only("Zeta".into());
        st.set_pending_company(Selection::Only("Zen".into()));
        assert_eq!(st.pending.model, Selection::Only("Zeta".into()));
    }

    #[test]
    fn loading_a_dataset_resets_selections() {
        let mut st = state();
        st.pending.company = Selection::Only("Acme".into());
        st.apply_filters();
        st.set_dataset(Dataset::from_records(
            vec![car("Bolt", "Beta")],
            vec![columns::COMPANY.into(), columns::MODEL.into()],
        ));
        assert_eq!(st.applied, FilterSpec::default());
        assert_eq!(st.visible_indices, vec![0]);
    }
}
