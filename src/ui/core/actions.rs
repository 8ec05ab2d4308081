use crate::backend::{BackendError, ClaimsQuery, Lookups, Page, SearchCriteria};
use crate::claims_list::ClaimFilter;
use crate::forms::FieldErrors;
use crate::models::{Claim, Customer, Employee, User};
use crate::routes::Route;

use super::operations::Submission;

/// Data a route's page needs, as delivered by its background load.
#[derive(Debug, Clone)]
pub enum PageData {
    Dashboard(Page<Claim>),
    Claims(Page<Claim>),
    Claim(Claim),
    ClaimForm { claim: Option<Claim>, lookups: Lookups },
    Customers(Vec<Customer>),
    Employees(Vec<Employee>),
    Analytics(Page<Claim>),
    Profile(User),
}

#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    Navigate(Route),
    Refresh,
    NextRow,
    PreviousRow,

    // Page loading
    FetchClaims(ClaimsQuery),
    PageLoaded {
        route: Route,
        data: PageData,
    },
    PageLoadFailed {
        route: Route,
        error: BackendError,
    },

    // Claims list
    /// Free-text search for the list endpoint plus server-side criteria;
    /// any non-empty criterion switches to the search endpoint.
    ApplySearch {
        search: String,
        criteria: SearchCriteria,
    },
    ApplyFilter(ClaimFilter),

    // Writes
    Submit(Submission),
    SubmitSucceeded {
        message: String,
        next: Option<Route>,
    },
    SubmitFailed {
        message: String,
        field_errors: FieldErrors,
    },

    // UI operations
    ShowDialog(DialogType),
    HideDialog,
    Notify(String),

    // App control
    Logout,
    Quit,
    None,
}

#[derive(Debug, Clone)]
pub enum DialogType {
    DeleteConfirmation {
        claim_id: i64,
        policy_number: String,
    },
    ClaimFilter {
        filter: ClaimFilter,
        employees: Vec<(i64, String)>,
    },
    ClaimSearch {
        search: String,
        criteria: SearchCriteria,
    },
    /// Jump to a typed path such as `/claims/42`.
    GoTo,
    Error(String),
    Info(String),
    Help,
    Logs,
}
