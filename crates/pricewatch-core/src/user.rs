//! Users — owned by the authentication subsystem; the store only persists
//! them so watch relationships have something to reference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub user_id:    i64,
  pub email:      String,
  pub created_at: DateTime<Utc>,
}

/// Input for [`PriceStore::add_user`](crate::store::PriceStore::add_user).
///
/// `password_hash` is produced by the caller; the store never sees the
/// plaintext credential.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub email:         String,
  pub password_hash: String,
}
