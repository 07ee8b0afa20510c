//! Response types for the VIES lookup API.

use serde::{Deserialize, Serialize};

/// Body returned by the per-member-state lookup endpoint.
///
/// Only `valid` is guaranteed. Member states that do not disclose trader
/// details omit `name` and `address`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ViesResponse {
    #[serde(alias = "isValid")]
    pub valid: bool,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub request_date: Option<String>,
}
