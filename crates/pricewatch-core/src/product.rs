//! Products and the name rules that make them shareable across users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Shortest product name accepted for registration, ignoring surrounding
/// whitespace.
pub const MIN_PRODUCT_NAME_LEN: usize = 2;

/// A tracked product, as returned by registration.
///
/// A product is created once per distinct name and shared by every user who
/// watches it. `prices` is empty until the ingestion pipeline has run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
  pub product_id:   i64,
  pub product_name: String,
  pub created_at:   DateTime<Utc>,
  pub prices:       Vec<PriceData>,
}

/// One observed price, as presented alongside a [`Product`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceData {
  pub source:    String,
  pub price:     f64,
  pub in_stock:  bool,
  pub timestamp: DateTime<Utc>,
}

/// Check that `name` is long enough to register.
///
/// The name is returned exactly as given; product names are matched verbatim,
/// so `"Keyboard "` and `"Keyboard"` are different products.
pub fn validate_product_name(name: &str) -> Result<&str> {
  if name.trim().chars().count() < MIN_PRODUCT_NAME_LEN {
    return Err(Error::ProductNameTooShort(name.to_owned()));
  }
  Ok(name)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn returns_the_name_unchanged() {
    assert_eq!(validate_product_name("  Keyboard \n").unwrap(), "  Keyboard \n");
  }

  #[test]
  fn rejects_short_names() {
    assert!(matches!(
      validate_product_name(" a "),
      Err(Error::ProductNameTooShort(_))
    ));
    assert!(validate_product_name("").is_err());
  }

  #[test]
  fn counts_characters_not_bytes() {
    assert!(validate_product_name("é").is_err());
    assert!(validate_product_name("éé").is_ok());
  }
}
