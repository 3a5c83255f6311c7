//! The per-user watchlist read model — never stored, always derived.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of a user's watchlist, priced from the latest observations.
///
/// `lowest_price` is the minimum over the most recent snapshot of each source.
/// Prices are compared numerically regardless of currency. A product with no
/// observed source reports `0.0`, an empty `lowest_source`, and
/// `in_stock == false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSummary {
  pub product_id:      i64,
  pub product_name:    String,
  pub image_url:       String,
  pub added_at:        DateTime<Utc>,
  pub last_checked_at: Option<DateTime<Utc>>,
  pub lowest_price:    f64,
  pub lowest_source:   String,
  pub in_stock:        bool,
}

impl ProductSummary {
  /// Whether any source of this product has been observed yet.
  pub fn is_priced(&self) -> bool { !self.lowest_source.is_empty() }
}
