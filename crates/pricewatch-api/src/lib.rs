//! JSON REST API for Pricewatch.
//!
//! Exposes an axum [`Router`] backed by any [`pricewatch_core::store::PriceStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api/v1", pricewatch_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod products;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post},
};
use pricewatch_core::store::PriceStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: PriceStore + 'static,
{
  Router::new()
    .route("/products", post(products::register::<S>))
    .route("/users/{user_id}/products", get(products::list::<S>))
    .route(
      "/users/{user_id}/products/{product_id}",
      delete(products::remove::<S>),
    )
    .with_state(store)
}
