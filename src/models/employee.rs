use chrono::NaiveDate;

/// A claims handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub position: String,
    pub department: String,
    pub years_of_experience: u32,
    pub hire_date: Option<NaiveDate>,
}
