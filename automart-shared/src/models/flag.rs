//! Reports raised against listings.

use serde::{Deserialize, Serialize};

use super::RecordId;

/// A report raised against a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flag {
    /// Report identifier, absent before the server assigns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Listing being reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_id: Option<RecordId>,
    /// Short reason, e.g. "pricing".
    #[serde(default)]
    pub reason: String,
    /// Free-text details.
    #[serde(default)]
    pub description: String,
}

/// Body of `POST /flag`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateFlagRequest {
    /// Listing being reported.
    pub car_id: RecordId,
    /// Short reason.
    pub reason: String,
    /// Free-text details.
    pub description: String,
}
