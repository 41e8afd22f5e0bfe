//! # Configuration
//!
//! Client settings resolved from defaults, an optional file, environment
//! variables and command-line overrides.

#[cfg(not(target_arch = "wasm32"))]
pub mod client;
