//! Product sources and price snapshots.
//!
//! Both are written by the ingestion pipeline. Snapshots are append-only: a
//! price change is a new row, never an update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Currency recorded when the ingestion pipeline does not name one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// One (product, selling platform) pairing tracked for prices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSource {
  pub source_id:           i64,
  pub product_id:          i64,
  pub platform:            String,
  pub platform_product_id: String,
  pub url:                 String,
}

#[derive(Debug, Clone)]
pub struct NewProductSource {
  pub product_id:          i64,
  pub platform:            String,
  pub platform_product_id: String,
  pub url:                 String,
}

/// An immutable point-in-time price and availability observation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSnapshot {
  pub snapshot_id: i64,
  pub source_id:   i64,
  pub price:       f64,
  pub currency:    String,
  pub in_stock:    bool,
  pub checked_at:  DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPriceSnapshot {
  pub source_id:  i64,
  pub price:      f64,
  /// Defaults to [`DEFAULT_CURRENCY`].
  pub currency:   Option<String>,
  pub in_stock:   bool,
  /// Defaults to the time of insertion.
  pub checked_at: Option<DateTime<Utc>>,
}

impl NewPriceSnapshot {
  /// A snapshot observed now, in the default currency.
  pub fn new(source_id: i64, price: f64, in_stock: bool) -> Self {
    Self {
      source_id,
      price,
      currency: None,
      in_stock,
      checked_at: None,
    }
  }
}
