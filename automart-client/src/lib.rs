//! Client-side session model for the `AutoMart` marketplace.
//!
//! The layers, leaf first:
//!
//! * [`storage`] / [`store`]: the persisted credential and cached user.
//! * [`gateway`]: authorized JSON and multipart requests with uniform
//!   envelope unwrapping.
//! * [`api`]: one thin façade per REST resource.
//! * [`session`]: login/logout/registration and password flows, derived
//!   login/admin state and page guards.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![deny(warnings, clippy::pedantic)]
#![allow(clippy::multiple_crate_versions)]

pub mod api;
pub mod error;
pub mod gateway;
pub mod inflight;
pub mod navigator;
pub mod session;
pub mod storage;
pub mod store;
pub mod validation;

pub use error::{ApiError, AuthFailure, AuthResult, ErrorKind};
pub use gateway::Gateway;
pub use navigator::{Destination, Navigator};
pub use session::{SessionManager, SessionState};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use store::SessionStore;
