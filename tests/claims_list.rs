use chrono::NaiveDate;
use claimdesk::backend::{ClaimsQuery, Page, Pagination, SearchCriteria};
use claimdesk::claims_list::{ClaimFilter, ClaimsListState, SortDirection, SortKey};
use claimdesk::models::{Claim, ClaimStatus, Documentation, Priority};

fn claim(id: i64, employee_id: i64, status: ClaimStatus, amount: f64, incident: Option<(i32, u32, u32)>) -> Claim {
    Claim {
        id,
        policy_number: format!("POL-{id:03}"),
        policy_type_id: Some(1),
        customer_id: 100 + id,
        customer_name: Some(format!("Customer {id}")),
        employee_id,
        employee_name: Some(format!("Employee {employee_id}")),
        status,
        priority: Priority::Medium,
        amount,
        incident_date: incident.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
        details: String::new(),
        documentation: Documentation::default(),
        created_at: None,
        updated_at: None,
    }
}

fn loaded(claims: Vec<Claim>, pages: u32) -> ClaimsListState {
    let mut state = ClaimsListState::new(6);
    let total = claims.len() as u64;
    state.on_loaded(Page {
        data: claims,
        pagination: Pagination { total, page: 1, pages },
    });
    state
}

fn ids(state: &ClaimsListState) -> Vec<i64> {
    state.visible_rows().iter().map(|c| c.id).collect()
}

#[test]
fn test_sort_toggle_flips_and_stays_stable() {
    let mut state = loaded(
        vec![
            claim(1, 7, ClaimStatus::Pending, 200.0, None),
            claim(2, 7, ClaimStatus::Approved, 100.0, None),
            claim(3, 8, ClaimStatus::Pending, 200.0, None),
            claim(4, 8, ClaimStatus::Rejected, 50.0, None),
        ],
        1,
    );

    // Server order until a key is chosen
    assert_eq!(ids(&state), vec![1, 2, 3, 4]);

    state.toggle_sort(SortKey::Amount);
    assert_eq!(state.sort.direction, SortDirection::Ascending);
    assert_eq!(ids(&state), vec![4, 2, 1, 3]);

    state.toggle_sort(SortKey::Amount);
    assert_eq!(state.sort.direction, SortDirection::Descending);
    // Equal amounts keep their server order
    assert_eq!(ids(&state), vec![1, 3, 2, 4]);

    state.toggle_sort(SortKey::Status);
    assert_eq!(state.sort.direction, SortDirection::Ascending);
    assert_eq!(ids(&state), vec![2, 1, 3, 4]);
}

#[test]
fn test_missing_incident_dates_sort_first() {
    let mut state = loaded(
        vec![
            claim(1, 7, ClaimStatus::Pending, 1.0, Some((2024, 5, 1))),
            claim(2, 7, ClaimStatus::Pending, 1.0, None),
            claim(3, 7, ClaimStatus::Pending, 1.0, Some((2023, 1, 9))),
        ],
        1,
    );
    state.toggle_sort(SortKey::IncidentDate);
    assert_eq!(ids(&state), vec![2, 3, 1]);
}

#[test]
fn test_employee_and_date_filters_are_anded() {
    let mut state = loaded(
        vec![
            claim(1, 7, ClaimStatus::Pending, 1.0, Some((2024, 1, 10))),
            claim(2, 8, ClaimStatus::Pending, 1.0, Some((2024, 1, 10))),
            claim(3, 7, ClaimStatus::Pending, 1.0, Some((2023, 12, 1))),
            claim(4, 7, ClaimStatus::Pending, 1.0, None),
        ],
        1,
    );

    let mut filter = ClaimFilter::default();
    filter.toggle_employee(7);
    state.apply_filter(filter.clone());
    assert_eq!(ids(&state), vec![1, 3, 4]);

    filter.date_from = NaiveDate::from_ymd_opt(2024, 1, 1);
    state.apply_filter(filter.clone());
    assert_eq!(ids(&state), vec![1]);

    // Toggling the same employee again removes the constraint
    filter.toggle_employee(7);
    state.apply_filter(filter);
    assert_eq!(ids(&state), vec![1, 2]);
}

#[test]
fn test_empty_status_selection_matches_everything() {
    let state = loaded(
        vec![
            claim(1, 7, ClaimStatus::Pending, 1.0, None),
            claim(2, 7, ClaimStatus::Completed, 1.0, None),
        ],
        1,
    );
    assert!(state.filter.is_empty());
    assert_eq!(ids(&state), vec![1, 2]);
}

#[test]
fn test_criteria_change_resets_to_first_page_on_search_endpoint() {
    let mut state = loaded(vec![claim(1, 7, ClaimStatus::Pending, 1.0, None)], 3);

    let query = state.next_page().expect("page 2 exists");
    assert_eq!(query.page(), 2);
    assert_eq!(query.path(), "/claims");

    let query = state.apply_criteria(SearchCriteria {
        status: Some(ClaimStatus::Approved),
        ..Default::default()
    });
    assert_eq!(state.page, 1);
    assert_eq!(query.path(), "/claims/search_claims");
    assert!(query.params().contains(&("status", "APPROVED".to_string())));
    assert!(query.params().contains(&("page", "1".to_string())));

    // Clearing everything goes back to the plain list
    let query = state.reset_filters();
    assert_eq!(
        query,
        ClaimsQuery::List {
            page: 1,
            limit: 6,
            search: None
        }
    );
}

#[test]
fn test_page_navigation_is_bounded() {
    let mut state = loaded(vec![], 2);
    assert!(state.previous_page().is_none());
    assert!(state.next_page().is_some());
    assert!(state.next_page().is_none());
    assert_eq!(state.page, 2);
    assert_eq!(state.page_label(), "Page 2 of 2 (0 claims)");
}

#[test]
fn test_search_text_goes_to_list_endpoint() {
    let mut state = loaded(vec![], 4);
    state.go_to_page(3);
    let query = state.set_search("POL-9".to_string());
    assert_eq!(query.page(), 1);
    assert_eq!(query.path(), "/claims");
    assert!(query.params().contains(&("search", "POL-9".to_string())));
}

#[test]
fn test_failed_fetch_empties_rows() {
    let mut state = loaded(vec![claim(1, 7, ClaimStatus::Pending, 1.0, None)], 1);
    state.begin_fetch();
    assert!(state.loading);
    state.on_failed("boom".to_string());
    assert!(!state.loading);
    assert!(state.visible_rows().is_empty());
    assert_eq!(state.error.as_deref(), Some("boom"));
}

#[test]
fn test_employees_on_page_are_distinct() {
    let state = loaded(
        vec![
            claim(1, 8, ClaimStatus::Pending, 1.0, None),
            claim(2, 7, ClaimStatus::Pending, 1.0, None),
            claim(3, 8, ClaimStatus::Pending, 1.0, None),
        ],
        1,
    );
    assert_eq!(
        state.employees_on_page(),
        vec![(7, "Employee 7".to_string()), (8, "Employee 8".to_string())]
    );
}

#[test]
fn test_amount_sort_is_total_with_non_finite_amounts() {
    let claims: Vec<Claim> = (0..40)
        .map(|id| {
            let amount = if id % 3 == 0 { f64::NAN } else { (40 - id) as f64 };
            claim(id, 7, ClaimStatus::Pending, amount, None)
        })
        .collect();
    let mut state = loaded(claims, 1);

    state.toggle_sort(SortKey::Amount);
    let rows = ids(&state);
    assert_eq!(rows.len(), 40);
    // Finite amounts come out ascending
    let finite: Vec<f64> = state
        .visible_rows()
        .iter()
        .map(|c| c.amount)
        .filter(|a| a.is_finite())
        .collect();
    assert!(finite.windows(2).all(|w| w[0] <= w[1]));

    state.toggle_sort(SortKey::Amount);
    assert_eq!(ids(&state).len(), 40);
}
