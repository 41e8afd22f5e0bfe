//! Listings, listing filters and listing request bodies.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fmt, str::FromStr};

use super::{
    RecordId,
    lenient::{number_or_string, optional_number_or_string},
};

/// Price filter values above this threshold mean "no limit" and are not sent.
pub const NO_PRICE_LIMIT: u64 = 100_000_000;

/// Availability of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CarStatus {
    /// Open for offers.
    #[default]
    Available,
    /// Closed by the seller.
    Sold,
    /// A status this client does not know how to edit.
    Other(String),
}

impl CarStatus {
    /// Return the wire representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Available => "available",
            Self::Sold => "sold",
            Self::Other(value) => value,
        }
    }
}

impl From<String> for CarStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "available" => Self::Available,
            "sold" => Self::Sold,
            _ => Self::Other(value),
        }
    }
}

impl From<CarStatus> for String {
    fn from(status: CarStatus) -> Self {
        match status {
            CarStatus::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for CarStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a status a seller may set; only `available` and `sold` are accepted.
impl FromStr for CarStatus {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "available" => Ok(Self::Available),
            "sold" => Ok(Self::Sold),
            _ => Err("Please select a valid status"),
        }
    }
}

/// A car listing as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    /// Listing identifier.
    pub id: RecordId,
    /// Manufacturer, e.g. "Toyota".
    #[serde(default)]
    pub make: String,
    /// Model name, e.g. "Camry".
    #[serde(default)]
    pub model: String,
    /// Asking price.
    #[serde(deserialize_with = "number_or_string")]
    pub price: f64,
    /// City or area of the listing.
    #[serde(default)]
    pub location: String,
    /// Condition of the vehicle, e.g. "new" or "used".
    #[serde(default)]
    pub state: String,
    /// Body style, e.g. "sedan".
    #[serde(default)]
    pub body_type: String,
    /// Free-form seller description.
    #[serde(default)]
    pub description: String,
    /// Availability.
    #[serde(default)]
    pub status: CarStatus,
    /// Photo URLs.
    #[serde(default)]
    pub images: Vec<String>,
    /// Index into `images` of the cover photo.
    #[serde(
        rename = "mainPhotoIndex",
        default,
        deserialize_with = "number_or_string"
    )]
    pub main_photo_index: usize,
    /// Contact email of the seller, when exposed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_email: Option<String>,
}

impl Car {
    /// "Make Model" headline of the listing.
    #[must_use]
    pub fn title(&self) -> String {
        format!("{} {}", self.make, self.model)
    }

    /// The cover photo, falling back to the first image.
    #[must_use]
    pub fn main_image(&self) -> Option<&str> {
        self.images
            .get(self.main_photo_index)
            .or_else(|| self.images.first())
            .map(String::as_str)
    }
}

/// Listing filters sent as a query string on `GET /car`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarQuery {
    /// Manufacturer to match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    /// Body style to match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_type: Option<String>,
    /// Condition to match, "new" or "used".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Price ceiling; see [`CarQuery::with_max_price`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<u64>,
    /// One-based page number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl CarQuery {
    /// Sets the price ceiling; values above [`NO_PRICE_LIMIT`] clear it.
    #[must_use]
    pub fn with_max_price(mut self, max_price: Option<u64>) -> Self {
        self.max_price = max_price.filter(|value| *value <= NO_PRICE_LIMIT);
        self
    }

    /// True when no filter is set and the bare collection path should be used.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Response of `GET /car`: one page of listings plus counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarPage {
    /// Status echoed by the server, number or string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    /// Listings; use [`CarPage::cars`] to read them.
    #[serde(default)]
    pub data: Option<Vec<Car>>,
    /// Listings matching the filters across all pages.
    #[serde(rename = "totalCars", default)]
    pub total_cars: u64,
    /// Matching listings still available.
    #[serde(rename = "totalAvailableCars", default)]
    pub total_available_cars: u64,
    /// Page this response holds.
    #[serde(default, deserialize_with = "optional_number_or_string")]
    pub page: Option<u32>,
    /// Number of pages for the current filters.
    #[serde(
        rename = "totalPages",
        default,
        deserialize_with = "optional_number_or_string"
    )]
    pub total_pages: Option<u32>,
}

impl CarPage {
    /// Listings on this page; a missing or null `data` is an empty page.
    #[must_use]
    pub fn cars(&self) -> &[Car] {
        self.data.as_deref().unwrap_or_default()
    }
}

/// What the signed-in user already did on a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarUserActions {
    /// An offer was already placed.
    #[serde(rename = "hasOrdered", default)]
    pub has_ordered: bool,
    /// The listing was already reported.
    #[serde(rename = "hasFlagged", default)]
    pub has_flagged: bool,
}

/// Fields of a new listing, sent as multipart form fields next to the photos.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCar {
    /// Manufacturer.
    pub make: String,
    /// Model name.
    pub model: String,
    /// Asking price.
    pub price: f64,
    /// City or area.
    pub location: String,
    /// Condition, "new" or "used".
    pub state: String,
    /// Body style.
    pub body_type: String,
    /// Seller description.
    pub description: String,
    /// Index of the cover photo among the uploaded files.
    pub main_photo_index: usize,
}

impl NewCar {
    /// Form fields in the order the API expects them. New listings are
    /// always created as available.
    #[must_use]
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("make", self.make.clone()),
            ("model", self.model.clone()),
            ("price", self.price.to_string()),
            ("location", self.location.clone()),
            ("state", self.state.clone()),
            ("body_type", self.body_type.clone()),
            ("description", self.description.clone()),
            ("status", CarStatus::Available.to_string()),
            ("mainPhotoIndex", self.main_photo_index.to_string()),
        ]
    }
}

/// Body of `PATCH /car/{id}/price`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceUpdate {
    /// New asking price.
    pub price: f64,
}

/// Body of `PATCH /car/{id}/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    /// New availability.
    pub status: CarStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn car_accepts_string_prices_and_missing_fields() {
        let car: Car = serde_json::from_value(json!({
            "id": 3,
            "make": "Toyota",
            "model": "Camry",
            "price": "4500000.00",
            "status": "sold",
            "images": ["a.jpg", "b.jpg"],
            "mainPhotoIndex": "1"
        }))
        .unwrap();

        assert_eq!(car.id, RecordId::Number(3));
        assert!((car.price - 4_500_000.0).abs() < f64::EPSILON);
        assert_eq!(car.status, CarStatus::Sold);
        assert_eq!(car.main_image(), Some("b.jpg"));
        assert_eq!(car.title(), "Toyota Camry");
        assert!(car.owner_email.is_none());
    }

    #[test]
    fn main_image_falls_back_to_first() {
        let car: Car = serde_json::from_value(json!({
            "id": "c1", "price": 10, "images": ["only.png"], "mainPhotoIndex": 4
        }))
        .unwrap();
        assert_eq!(car.main_image(), Some("only.png"));
    }

    #[test]
    fn editable_status_parsing() {
        assert_eq!("available".parse::<CarStatus>(), Ok(CarStatus::Available));
        assert_eq!("sold".parse::<CarStatus>(), Ok(CarStatus::Sold));
        assert_eq!(
            "pending".parse::<CarStatus>(),
            Err("Please select a valid status")
        );
        assert_eq!(
            CarStatus::from("pending".to_string()),
            CarStatus::Other("pending".into())
        );
    }

    #[test]
    fn query_skips_unset_filters() {
        let query = CarQuery {
            make: Some("Honda".into()),
            page: Some(1),
            ..CarQuery::default()
        };
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value, json!({ "make": "Honda", "page": 1 }));
        assert!(CarQuery::default().is_empty());
        assert!(!query.is_empty());
    }

    #[test]
    fn max_price_above_threshold_means_no_limit() {
        let capped = CarQuery::default().with_max_price(Some(5_000_000));
        assert_eq!(capped.max_price, Some(5_000_000));
        let unlimited = CarQuery::default().with_max_price(Some(NO_PRICE_LIMIT + 1));
        assert_eq!(unlimited.max_price, None);
    }

    #[test]
    fn car_page_tolerates_null_data() {
        let page: CarPage = serde_json::from_value(json!({
            "status": 200, "data": null, "totalCars": 0, "page": 1, "totalPages": "1"
        }))
        .unwrap();
        assert!(page.cars().is_empty());
        assert_eq!(page.total_pages, Some(1));
    }

    #[test]
    fn new_car_form_fields_mark_listing_available() {
        let car = NewCar {
            make: "Kia".into(),
            model: "Rio".into(),
            price: 2_500_000.0,
            location: "Lagos".into(),
            state: "used".into(),
            body_type: "hatchback".into(),
            description: String::new(),
            main_photo_index: 0,
        };
        let fields = car.form_fields();
        assert!(fields.contains(&("price", "2500000".to_string())));
        assert!(fields.contains(&("status", "available".to_string())));
        assert!(fields.contains(&("mainPhotoIndex", "0".to_string())));
    }

    #[test]
    fn user_actions_use_camel_case() {
        let actions: CarUserActions =
            serde_json::from_value(json!({ "hasOrdered": true, "hasFlagged": false })).unwrap();
        assert!(actions.has_ordered);
        assert!(!actions.has_flagged);
    }
}
