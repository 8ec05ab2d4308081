//! Claims list pipeline: what to fetch, and which loaded rows to show.
//!
//! Pagination is server-driven. The state tracks the current page and hands
//! back the [`ClaimsQuery`] to issue whenever the page, the search text, the
//! server-side criteria or the client filter change; any of the latter three
//! resets to page 1. Filtering and sorting then run over the loaded page
//! only.

pub mod filter;
pub mod sort;

pub use filter::ClaimFilter;
pub use sort::{SortDirection, SortKey, SortState};

use crate::backend::{ClaimsQuery, Page, Pagination, SearchCriteria};
use crate::models::Claim;

#[derive(Debug, Clone)]
pub struct ClaimsListState {
    pub page: u32,
    pub limit: u32,
    pub search: String,
    pub criteria: SearchCriteria,
    pub filter: ClaimFilter,
    pub sort: SortState,
    pub claims: Vec<Claim>,
    pub pagination: Pagination,
    pub loading: bool,
    pub error: Option<String>,
}

impl ClaimsListState {
    pub fn new(limit: u32) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
            search: String::new(),
            criteria: SearchCriteria::default(),
            filter: ClaimFilter::default(),
            sort: SortState::default(),
            claims: Vec::new(),
            pagination: Pagination::default(),
            loading: false,
            error: None,
        }
    }

    /// The request for the current page and criteria.
    pub fn query(&self) -> ClaimsQuery {
        if self.criteria.is_empty() {
            ClaimsQuery::List {
                page: self.page,
                limit: self.limit,
                search: Some(self.search.clone()).filter(|s| !s.trim().is_empty()),
            }
        } else {
            ClaimsQuery::Search {
                criteria: self.criteria.clone(),
                page: self.page,
                limit: self.limit,
            }
        }
    }

    pub fn set_search(&mut self, search: String) -> ClaimsQuery {
        self.search = search;
        self.page = 1;
        self.query()
    }

    /// Switch to server-side search criteria (or back to the plain list when empty).
    pub fn apply_criteria(&mut self, criteria: SearchCriteria) -> ClaimsQuery {
        self.criteria = criteria;
        self.page = 1;
        self.query()
    }

    pub fn apply_filter(&mut self, filter: ClaimFilter) -> ClaimsQuery {
        self.filter = filter;
        self.page = 1;
        self.query()
    }

    /// Clear search, criteria and filter in one go.
    pub fn reset_filters(&mut self) -> ClaimsQuery {
        self.search.clear();
        self.criteria = SearchCriteria::default();
        self.filter.clear();
        self.page = 1;
        self.query()
    }

    /// Move to `page` if it exists according to the last response.
    pub fn go_to_page(&mut self, page: u32) -> Option<ClaimsQuery> {
        let last = self.pagination.pages.max(1);
        if page < 1 || page > last || page == self.page {
            return None;
        }
        self.page = page;
        Some(self.query())
    }

    pub fn next_page(&mut self) -> Option<ClaimsQuery> {
        self.go_to_page(self.page.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> Option<ClaimsQuery> {
        self.go_to_page(self.page.saturating_sub(1))
    }

    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort.toggle(key);
    }

    pub fn begin_fetch(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn on_loaded(&mut self, page: Page<Claim>) {
        self.claims = page.data;
        self.pagination = page.pagination;
        self.loading = false;
        self.error = None;
    }

    /// Failed fetches leave an empty list until a successful refetch.
    pub fn on_failed(&mut self, message: String) {
        self.claims.clear();
        self.loading = false;
        self.error = Some(message);
    }

    /// Filtered, then sorted, rows of the loaded page.
    pub fn visible_rows(&self) -> Vec<&Claim> {
        let mut rows = self.filter.apply(&self.claims);
        self.sort.apply(&mut rows);
        rows
    }

    /// Distinct employees present in the loaded page, for the filter dialog.
    pub fn employees_on_page(&self) -> Vec<(i64, String)> {
        let mut seen: Vec<(i64, String)> = Vec::new();
        for claim in &self.claims {
            if !seen.iter().any(|(id, _)| *id == claim.employee_id) {
                seen.push((claim.employee_id, claim.employee_display()));
            }
        }
        seen.sort_by(|a, b| a.1.cmp(&b.1));
        seen
    }

    /// "Page 2 of 5 (27 claims)"
    pub fn page_label(&self) -> String {
        format!(
            "Page {} of {} ({} claims)",
            self.page,
            self.pagination.pages.max(1),
            self.pagination.total
        )
    }
}

impl Default for ClaimsListState {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_PAGE_SIZE)
    }
}
