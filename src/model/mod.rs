//! Pure Application Model
//!
//! State only, no I/O. Organized into focused sub-models:
//!
//! - **QueryList**: ordered free-text queries with stable ids
//! - **Filters / FilterCatalogs**: search filter values and pick lists
//! - **ResultsModel**: current result set + search sequence guard
//! - **SubmissionModel**: staging areas and the CSV line buffer
//! - **ModalStack**: LIFO overlay stack (image / video / keyframes)
//! - **UiModel**: focus, editing, view toggles, toasts

pub mod filters;
pub mod modal;
pub mod query;
pub mod results;
pub mod submission;
pub mod ui;

pub use filters::{FilterCatalogs, Filters};
pub use modal::{KeyframeBrowser, Modal, ModalStack, PlayerSource, PlayerState};
pub use query::{QueryItem, QueryList};
pub use results::{
    ResultCard, ResultsModel, TemporalKeyframe, TemporalQuerySection, TemporalVideoCard,
};
pub use submission::{CommitResult, Staging, SubmissionModel};
pub use ui::{
    control_rows, ControlRow, EditTarget, Focus, PickerKind, PickerState, UiModel,
};

/// Which retrieval backend ranks the queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retriever {
    Clip, // semantic (embedding) ranking
    Es,   // full-text ranking
}

impl Retriever {
    pub fn as_str(&self) -> &str {
        match self {
            Retriever::Clip => "clip",
            Retriever::Es => "es",
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Retriever::Clip => "CLIP (semantic)",
            Retriever::Es => "Elasticsearch (text)",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Retriever::Clip => Retriever::Es,
            Retriever::Es => Retriever::Clip,
        }
    }
}

/// Search tuning parameters sent with every request
#[derive(Debug, Clone, Copy)]
pub struct SearchParams {
    pub retriever: Retriever,
    pub top_k_per_query: u32,
    pub top_k: u32,
}

pub const MIN_TOP_K_PER_QUERY: u32 = 1;
pub const MAX_TOP_K_PER_QUERY: u32 = 50;
pub const MIN_TOP_K: u32 = 1;
pub const MAX_TOP_K: u32 = 1000;

impl SearchParams {
    pub fn new() -> Self {
        Self {
            retriever: Retriever::Clip,
            top_k_per_query: 10,
            top_k: 100,
        }
    }

    pub fn set_top_k_per_query(&mut self, value: u32) {
        self.top_k_per_query = value.clamp(MIN_TOP_K_PER_QUERY, MAX_TOP_K_PER_QUERY);
    }

    pub fn set_top_k(&mut self, value: u32) {
        self.top_k = value.clamp(MIN_TOP_K, MAX_TOP_K);
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        Self::new()
    }
}

/// Root application model composed of focused sub-models
#[derive(Debug, Clone)]
pub struct Model {
    pub queries: QueryList,
    pub filters: Filters,
    pub catalogs: FilterCatalogs,
    pub params: SearchParams,
    pub results: ResultsModel,
    pub submission: SubmissionModel,
    pub modals: ModalStack,
    pub ui: UiModel,
}

impl Model {
    pub fn new() -> Self {
        Self {
            queries: QueryList::new(),
            filters: Filters::default(),
            catalogs: FilterCatalogs::default(),
            params: SearchParams::new(),
            results: ResultsModel::new(),
            submission: SubmissionModel::new(),
            modals: ModalStack::new(),
            ui: UiModel::new(),
        }
    }

    pub fn has_modal(&self) -> bool {
        self.modals.is_open()
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.ui.show_toast(message);
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_creation() {
        let model = Model::new();
        assert_eq!(model.queries.len(), 1);
        assert!(!model.has_modal());
        assert!(!model.results.is_searching());
        assert_eq!(model.ui.grid_cols, 3);
    }

    #[test]
    fn test_model_is_cloneable() {
        let model = Model::new();
        let _cloned = model.clone();
    }

    #[test]
    fn test_top_k_clamping() {
        let mut params = SearchParams::new();
        params.set_top_k_per_query(500);
        assert_eq!(params.top_k_per_query, MAX_TOP_K_PER_QUERY);
        params.set_top_k(0);
        assert_eq!(params.top_k, MIN_TOP_K);
    }
}
