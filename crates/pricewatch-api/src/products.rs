//! Handlers for the watchlist endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/products` | Body: [`RegisterBody`]; returns 201 + product |
//! | `GET`    | `/users/{user_id}/products` | Watched products, newest first |
//! | `DELETE` | `/users/{user_id}/products/{product_id}` | 204, or 404 if not watched |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use pricewatch_core::{store::PriceStore, summary::ProductSummary};
use serde::Deserialize;

use crate::error::ApiError;

/// Ids are SQLite row ids and never negative.
fn non_negative(field: &str, id: i64) -> Result<(), ApiError> {
  if id < 0 {
    return Err(ApiError::BadRequest(format!("{field} must not be negative")));
  }
  Ok(())
}

// ─── Register ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
  pub user_id:      i64,
  pub product_name: String,
}

/// `POST /products` — returns 201 + the registered
/// [`Product`](pricewatch_core::product::Product) with no prices yet.
pub async fn register<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<RegisterBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PriceStore,
{
  non_negative("user_id", body.user_id)?;

  let product = store
    .register_product(body.user_id, &body.product_name)
    .await
    .map_err(ApiError::from_store)?;

  tracing::info!(
    user_id = body.user_id,
    product_id = product.product_id,
    "product added to watchlist"
  );
  Ok((StatusCode::CREATED, Json(product)))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /users/{user_id}/products`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Path(user_id): Path<i64>,
) -> Result<Json<Vec<ProductSummary>>, ApiError>
where
  S: PriceStore,
{
  non_negative("user_id", user_id)?;

  let products = store
    .fetch_watched_products(user_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(products))
}

// ─── Remove ───────────────────────────────────────────────────────────────────

/// `DELETE /users/{user_id}/products/{product_id}`
pub async fn remove<S>(
  State(store): State<Arc<S>>,
  Path((user_id, product_id)): Path<(i64, i64)>,
) -> Result<StatusCode, ApiError>
where
  S: PriceStore,
{
  non_negative("user_id", user_id)?;
  non_negative("product_id", product_id)?;

  store
    .remove_watch(user_id, product_id)
    .await
    .map_err(ApiError::from_store)?;

  tracing::info!(user_id, product_id, "product removed from watchlist");
  Ok(StatusCode::NO_CONTENT)
}
