//! Search coordination
//!
//! Builds the request from the query list and filters, classifies it single
//! vs. temporal, and issues it through the background API service tagged
//! with a monotonic sequence number.

use tracing::debug;

use crate::logic;
use crate::services::api::ApiRequest;
use crate::App;

impl App {
    /// Issue a search for the current queries and filters.
    ///
    /// With nothing to search for (no non-empty query, no active filter)
    /// the result state is cleared without a network call. While a request
    /// is outstanding the search control is disabled; the sequence guard
    /// additionally discards any response a newer request has overtaken.
    pub(crate) fn start_search(&mut self) {
        if self.model.results.is_searching() {
            return;
        }

        let queries = self.model.queries.active_texts();
        if !logic::search::should_search(&queries, &self.model.filters) {
            self.model.results.clear();
            self.model.ui.results_selected = 0;
            self.model.ui.results_scroll_row = 0;
            return;
        }

        let temporal = logic::search::is_temporal(&queries);
        let body = logic::search::build_request(queries, &self.model.params, &self.model.filters);
        let seq = self.model.results.begin_search();

        debug!(seq, temporal, "starting search");
        let _ = self.api_tx.send(ApiRequest::Search {
            seq,
            temporal,
            body,
        });
    }
}
