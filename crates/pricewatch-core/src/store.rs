//! The `PriceStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `pricewatch-store-sqlite`). Higher layers (`pricewatch-api`) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  error::Classify,
  product::Product,
  source::{NewPriceSnapshot, NewProductSource, PriceSnapshot, ProductSource},
  summary::ProductSummary,
  user::{NewUser, User},
};

/// Abstraction over a Pricewatch storage backend.
///
/// Multi-statement writes are atomic: a failing operation leaves the store
/// exactly as it was. Uniqueness races between concurrent callers are settled
/// by the backend's own constraints, never by application-level locking.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait PriceStore: Send + Sync {
  type Error: std::error::Error + Classify + Send + Sync + 'static;

  // ── Watchlist ─────────────────────────────────────────────────────────

  /// Find or create the product called `product_name` and add it to the
  /// user's watchlist, in one transaction.
  ///
  /// Concurrent calls with the same name converge on one product row. Fails
  /// with [`ErrorKind::UniqueViolation`](crate::ErrorKind::UniqueViolation)
  /// if the user already watches it and with
  /// [`ErrorKind::ForeignKeyViolation`](crate::ErrorKind::ForeignKeyViolation)
  /// if the user does not exist; in both cases nothing is persisted.
  fn register_product<'a>(
    &'a self,
    user_id: i64,
    product_name: &'a str,
  ) -> impl Future<Output = Result<Product, Self::Error>> + Send + 'a;

  /// The user's watched products, most recently added first, each priced
  /// from the latest snapshot of every source.
  ///
  /// An unknown user yields an empty list.
  fn fetch_watched_products(
    &self,
    user_id: i64,
  ) -> impl Future<Output = Result<Vec<ProductSummary>, Self::Error>> + Send + '_;

  /// Remove a product from the user's watchlist.
  ///
  /// Fails with [`ErrorKind::NotFound`](crate::ErrorKind::NotFound) if the
  /// pair was not being watched.
  fn remove_watch(
    &self,
    user_id: i64,
    product_id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Ingestion ─────────────────────────────────────────────────────────

  /// Persist a user whose credential has already been hashed.
  fn add_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  /// Start tracking a product on a selling platform.
  fn add_product_source(
    &self,
    input: NewProductSource,
  ) -> impl Future<Output = Result<ProductSource, Self::Error>> + Send + '_;

  /// Append a price observation and bump the product's `last_checked_at`.
  fn record_price_snapshot(
    &self,
    input: NewPriceSnapshot,
  ) -> impl Future<Output = Result<PriceSnapshot, Self::Error>> + Send + '_;

  /// Set the image shown for a product.
  fn set_product_image(
    &self,
    product_id: i64,
    image_url: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
