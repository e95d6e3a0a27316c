//! Scanned-book term search.
//!
//! Finds every line of scanned book text that contains a literal search term
//! and reports where it was found (book identifier, page, line).
//!
//! - **`services`**: the matching routine and the input guard in front of it.
//! - **`models`**: book records, request and response shapes.
//! - **`routes`**: the axum endpoints exposing the search over HTTP.
//! - **`config`**: environment-driven settings for the service binary.

pub mod config;
pub mod models;
pub mod routes;
pub mod services;
