use serde::{Deserialize, Serialize};

/// An insurance product a claim is filed against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyType {
    pub id: i64,
    pub name: String,
    pub base_premium: f64,
    #[serde(default)]
    pub description: String,
}
