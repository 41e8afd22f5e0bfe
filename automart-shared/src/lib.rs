//! Wire models and client configuration shared by the `AutoMart` crates.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![deny(warnings, clippy::pedantic)]
#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod models;
