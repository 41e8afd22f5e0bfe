//! Listings: browsing, publishing, editing and moderation.

use reqwest::multipart::{Form, Part};
use serde_json::Value;
use shared::models::{
    Car, CarPage, CarQuery, CarStatus, CarUserActions, Envelope, NewCar, PriceUpdate, RecordId,
    StatusUpdate,
};

use super::{Notice, notice, require_data};
use crate::{
    error::ApiError,
    gateway::Gateway,
    validation::{self, ValidationError},
};

const CARS: &str = "/car";

/// An image attached to a new listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    file_name: String,
    content_type: &'static str,
    bytes: Vec<u8>,
}

impl Photo {
    /// Wrap an image, rejecting anything but JPEG/PNG within the size limit.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] for unsupported or oversized files.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, ValidationError> {
        let file_name = file_name.into();
        let content_type = validation::photo(&file_name, bytes.len())?;
        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }

    /// Name the file is uploaded under.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// MIME type sent with the part.
    #[must_use]
    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    fn into_part(self) -> Result<Part, reqwest::Error> {
        Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(self.content_type)
    }
}

/// `/car` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct CarApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> CarApi<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Create a listing from form fields plus one `images` part per photo.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn create(&self, car: &NewCar, photos: Vec<Photo>) -> Result<Notice, ApiError> {
        let mut form = Form::new();
        for (name, value) in car.form_fields() {
            form = form.text(name, value);
        }
        for photo in photos {
            let part = photo.into_part().map_err(|source| ApiError::Transport {
                path: CARS.to_string(),
                source,
            })?;
            form = form.part("images", part);
        }

        let envelope: Envelope<Value> = self.gateway.request_multipart(CARS, form).await?;
        Ok(notice(&envelope))
    }

    /// One page of listings; an empty query requests the bare collection.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn list(&self, query: &CarQuery) -> Result<CarPage, ApiError> {
        if query.is_empty() {
            self.gateway.get(CARS).await
        } else {
            self.gateway.get_with_query(CARS, query).await
        }
    }

    /// Listings owned by the signed-in user.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn list_mine(&self) -> Result<Vec<Car>, ApiError> {
        let envelope: Envelope<Vec<Car>> = self.gateway.get("/car/user").await?;
        Ok(envelope.into_data().unwrap_or_default())
    }

    /// Every listing, for moderation.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn list_admin(&self) -> Result<Vec<Car>, ApiError> {
        let envelope: Envelope<Vec<Car>> = self.gateway.get("/car/admin").await?;
        Ok(envelope.into_data().unwrap_or_default())
    }

    /// A single listing.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn get(&self, car_id: &RecordId) -> Result<Car, ApiError> {
        let path = format!("/car/{car_id}");
        let envelope: Envelope<Car> = self.gateway.get(&path).await?;
        require_data(envelope, &path)
    }

    /// Change the asking price.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn update_price(&self, car_id: &RecordId, price: f64) -> Result<Notice, ApiError> {
        let envelope: Envelope<Value> = self
            .gateway
            .patch(&format!("/car/{car_id}/price"), &PriceUpdate { price })
            .await?;
        Ok(notice(&envelope))
    }

    /// Mark the listing available or sold.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn update_status(
        &self,
        car_id: &RecordId,
        status: CarStatus,
    ) -> Result<Notice, ApiError> {
        let envelope: Envelope<Value> = self
            .gateway
            .patch(&format!("/car/{car_id}/status"), &StatusUpdate { status })
            .await?;
        Ok(notice(&envelope))
    }

    /// Remove a listing.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn delete(&self, car_id: &RecordId) -> Result<Notice, ApiError> {
        let envelope: Envelope<Value> = self.gateway.delete(&format!("/car/{car_id}")).await?;
        Ok(notice(&envelope))
    }

    /// Whether the signed-in user already made an offer on or reported the
    /// listing.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn user_actions(&self, car_id: &RecordId) -> Result<CarUserActions, ApiError> {
        let path = format!("/car/{car_id}/actions");
        let envelope: Envelope<CarUserActions> = self.gateway.get(&path).await?;
        require_data(envelope, &path)
    }
}
