//! Client core for the product catalog.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). `ProductApi` pairs that with a
//! host-supplied `Transport`; `FetchController` turns each call into
//! observable idle/loading/success/failed state; the screen types bind
//! controllers, form input and navigation for the five catalog screens.
//!
//! # Design
//! - `ProductClient` is stateless. It holds only `base_url`.
//! - Each operation is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit and the FFI crate
//!   can expose it unchanged.
//! - Every failure a controller sees collapses to one fixed message per
//!   operation; the underlying `TransportError` only reaches the logs.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod controllers;
pub mod error;
pub mod fetch;
pub mod form;
pub mod http;
pub mod navigation;
pub mod screens;
pub mod transport;
pub mod types;

#[cfg(test)]
mod testing;

pub use client::ProductClient;
pub use error::{TransportError, ValidationError};
pub use fetch::{FetchController, FetchState, FetchStatus, Outcome};
pub use form::{FormField, ProductForm};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use navigation::{ConfirmDialog, Navigator, Prompt, Route};
pub use screens::{
    CreateProductScreen, DeleteOutcome, DeleteProductScreen, EditProductScreen, ProductDetailScreen,
    ProductListScreen, SubmitOutcome,
};
pub use transport::{ProductApi, Transport};
pub use types::{NewProduct, Product, ProductId, Rating};
