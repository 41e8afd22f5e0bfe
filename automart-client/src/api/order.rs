//! Offers on listings.

use serde_json::Value;
use shared::models::{CreateOrderRequest, Envelope, Order, OrderPriceUpdate, RecordId};

use super::{Notice, notice, require_data};
use crate::{error::ApiError, gateway::Gateway};

/// `/order` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct OrderApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> OrderApi<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Place an offer; the returned order id is needed to revise it.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn create(&self, request: &CreateOrderRequest) -> Result<Order, ApiError> {
        let envelope: Envelope<Order> = self.gateway.post("/order", request).await?;
        require_data(envelope, "/order")
    }

    /// Revise the amount of a pending offer.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn update_price(
        &self,
        order_id: &RecordId,
        new_price: f64,
    ) -> Result<Notice, ApiError> {
        let envelope: Envelope<Value> = self
            .gateway
            .patch(&format!("/order/{order_id}/price"), &OrderPriceUpdate { new_price })
            .await?;
        Ok(notice(&envelope))
    }
}
