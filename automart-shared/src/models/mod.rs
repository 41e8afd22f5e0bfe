//! Wire models for the `AutoMart` REST API.

pub mod auth;
pub mod car;
pub mod envelope;
pub mod flag;
pub mod id;
mod lenient;
pub mod order;
pub mod user;

pub use auth::{
    AuthPayload, ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest,
    UpdatePasswordRequest,
};
pub use car::{
    Car, CarPage, CarQuery, CarStatus, CarUserActions, NO_PRICE_LIMIT, NewCar, PriceUpdate,
    StatusUpdate,
};
pub use envelope::{Envelope, FALLBACK_ERROR_MESSAGE, failure_message};
pub use flag::{CreateFlagRequest, Flag};
pub use id::RecordId;
pub use order::{CreateOrderRequest, Order, OrderPriceUpdate};
pub use user::{ShowUserResponse, UserRecord, UserRole};
