// server/src/lib.rs

//! HTTP front end for the storefront services.
//!
//! The binary in `main.rs` wires these modules together; tests build the same `App`
//! from `web::configure_app_routes` and an `AppState` over any repository.

pub mod config;
pub mod errors;
pub mod state;
pub mod storage;
pub mod web;
