//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings (UTC, microsecond
//! precision) so that lexicographic order in SQL equals chronological order.

use chrono::{DateTime, SecondsFormat, Utc};
use pricewatch_core::{
  product::Product,
  source::{PriceSnapshot, ProductSource},
  summary::ProductSummary,
  user::User,
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Columns returned by the product upsert.
pub struct RawProduct {
  pub product_id:   i64,
  pub product_name: String,
  pub created_at:   String,
}

impl RawProduct {
  /// A freshly registered product has no prices yet.
  pub fn into_product(self) -> Result<Product> {
    Ok(Product {
      product_id:   self.product_id,
      product_name: self.product_name,
      created_at:   decode_dt(&self.created_at)?,
      prices:       Vec::new(),
    })
  }
}

/// One row of the watchlist aggregation query.
pub struct RawProductSummary {
  pub product_id:      i64,
  pub product_name:    String,
  pub image_url:       String,
  pub added_at:        String,
  pub last_checked_at: Option<String>,
  pub lowest_price:    f64,
  pub lowest_source:   String,
  pub in_stock:        bool,
}

impl RawProductSummary {
  pub fn into_summary(self) -> Result<ProductSummary> {
    Ok(ProductSummary {
      product_id:      self.product_id,
      product_name:    self.product_name,
      image_url:       self.image_url,
      added_at:        decode_dt(&self.added_at)?,
      last_checked_at: self.last_checked_at.as_deref().map(decode_dt).transpose()?,
      lowest_price:    self.lowest_price,
      lowest_source:   self.lowest_source,
      in_stock:        self.in_stock,
    })
  }
}

pub struct RawUser {
  pub user_id:    i64,
  pub email:      String,
  pub created_at: String,
}

impl RawUser {
  pub fn into_user(self) -> Result<User> {
    Ok(User {
      user_id:    self.user_id,
      email:      self.email,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

pub struct RawPriceSnapshot {
  pub snapshot_id: i64,
  pub source_id:   i64,
  pub price:       f64,
  pub currency:    String,
  pub in_stock:    bool,
  pub checked_at:  String,
}

impl RawPriceSnapshot {
  pub fn into_snapshot(self) -> Result<PriceSnapshot> {
    Ok(PriceSnapshot {
      snapshot_id: self.snapshot_id,
      source_id:   self.source_id,
      price:       self.price,
      currency:    self.currency,
      in_stock:    self.in_stock,
      checked_at:  decode_dt(&self.checked_at)?,
    })
  }
}

/// Expects columns `id, product_id, platform, platform_product_id,
/// product_url` in that order.
pub fn source_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ProductSource> {
  Ok(ProductSource {
    source_id:           row.get(0)?,
    product_id:          row.get(1)?,
    platform:            row.get(2)?,
    platform_product_id: row.get(3)?,
    url:                 row.get(4)?,
  })
}
