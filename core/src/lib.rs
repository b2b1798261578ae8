//! I/O-free client for the todos JSON API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values for the six
//! `/api/todos` routes without touching the network. The caller performs the
//! round-trip with whatever HTTP stack it has, so every method here is
//! deterministic and unit-testable.
//!
//! # Design
//! - `TodoClient` holds only `base_url`.
//! - Each route is a `build_*` / `parse_*` pair.
//! - DTOs are declared here rather than imported from the server crate; the
//!   black-box tests against a live server catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::TodoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{Todo, TodoFields, TodoList};
