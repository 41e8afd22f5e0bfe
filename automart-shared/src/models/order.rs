//! Purchase offers and their request bodies.

use serde::{Deserialize, Serialize};

use super::{RecordId, lenient::optional_number_or_string};

/// An offer placed on a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Order identifier, needed to revise the offer later.
    pub id: RecordId,
    /// Listing the offer is for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_id: Option<RecordId>,
    /// Offered amount.
    #[serde(
        default,
        deserialize_with = "optional_number_or_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<f64>,
    /// Server-side order status, e.g. "pending".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Body of `POST /order`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    /// Listing the offer is for.
    pub car_id: RecordId,
    /// Offered amount.
    pub amount: f64,
}

/// Body of `PATCH /order/{id}/price`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderPriceUpdate {
    /// Revised offer amount.
    pub new_price: f64,
}
