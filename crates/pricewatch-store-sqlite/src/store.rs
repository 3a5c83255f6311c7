//! [`SqliteStore`] — the SQLite implementation of [`PriceStore`].

use std::path::Path;

use chrono::Utc;
use pricewatch_core::{
  product::{Product, validate_product_name},
  source::{
    DEFAULT_CURRENCY, NewPriceSnapshot, NewProductSource, PriceSnapshot,
    ProductSource,
  },
  store::PriceStore,
  summary::ProductSummary,
  user::{NewUser, User},
};

use crate::{
  Error, Result,
  encode::{
    RawPriceSnapshot, RawProduct, RawProductSummary, RawUser, encode_dt,
    source_from_row,
  },
  schema::SCHEMA,
  tx::{with_read_transaction, with_transaction},
};

// ─── Queries ─────────────────────────────────────────────────────────────────

/// Insert-or-fetch a product by name in one statement.
///
/// On a name conflict the row is rewritten in place with its own name, which
/// makes `RETURNING` yield the existing row. The uniqueness check happens
/// inside SQLite's insert, so two concurrent registrations of the same name
/// can never both insert.
const UPSERT_PRODUCT: &str = "
  INSERT INTO products (product_name, created_at)
  VALUES (?1, ?2)
  ON CONFLICT (product_name) DO UPDATE
    SET product_name = excluded.product_name
  RETURNING id, product_name, created_at";

const INSERT_WATCH: &str = "
  INSERT INTO user_watchlist (user_id, product_id, added_at)
  VALUES (?1, ?2, ?3)";

/// Latest snapshot per source, then the cheapest of those per product.
///
/// - `latest_prices` ranks each source's snapshots newest first
///   (`checked_at`, then insertion order); sources without snapshots drop out
///   here, so they never count towards the minimum.
/// - `ranked_prices` ranks each product's latest observations by price; equal
///   prices fall back to the older source.
/// - Products without any observation get `0 / '' / false` via `COALESCE`.
///
/// Prices are compared as plain numbers; `currency` is not consulted.
const WATCHED_PRODUCTS: &str = "
  WITH latest_prices AS (
    SELECT
      pso.id AS source_id, pso.product_id, pso.platform,
      psnap.price, psnap.in_stock,
      ROW_NUMBER() OVER (
        PARTITION BY pso.id
        ORDER BY psnap.checked_at DESC, psnap.id DESC
      ) AS recency
    FROM product_sources pso
    JOIN price_snapshots psnap ON psnap.product_source_id = pso.id
    WHERE pso.product_id IN (
      SELECT product_id FROM user_watchlist WHERE user_id = ?1
    )
  ),
  ranked_prices AS (
    SELECT
      product_id, platform, price, in_stock,
      ROW_NUMBER() OVER (
        PARTITION BY product_id
        ORDER BY price ASC, source_id ASC
      ) AS price_rank
    FROM latest_prices
    WHERE recency = 1
  )
  SELECT
    p.id, p.product_name, p.image_url, p.last_checked_at,
    uw.added_at,
    COALESCE(rp.price, 0.0)    AS lowest_price,
    COALESCE(rp.platform, '')  AS lowest_source,
    COALESCE(rp.in_stock, 0)   AS in_stock
  FROM user_watchlist uw
  JOIN products p ON p.id = uw.product_id
  LEFT JOIN ranked_prices rp ON rp.product_id = p.id AND rp.price_rank = 1
  WHERE uw.user_id = ?1
  ORDER BY uw.added_at DESC, uw.id DESC";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Pricewatch store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted, and every
/// clone queues its work onto the same database thread.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── PriceStore impl ─────────────────────────────────────────────────────────

impl PriceStore for SqliteStore {
  type Error = Error;

  // ── Watchlist ─────────────────────────────────────────────────────────────

  async fn register_product(&self, user_id: i64, product_name: &str) -> Result<Product> {
    let name    = validate_product_name(product_name)?.to_owned();
    let now_str = encode_dt(Utc::now());

    let raw: RawProduct = with_transaction(&self.conn, move |tx| {
      let raw = tx.query_row(
        UPSERT_PRODUCT,
        rusqlite::params![name, now_str],
        |row| {
          Ok(RawProduct {
            product_id:   row.get(0)?,
            product_name: row.get(1)?,
            created_at:   row.get(2)?,
          })
        },
      )?;

      // Unique or foreign-key failures here undo the upsert above.
      tx.execute(
        INSERT_WATCH,
        rusqlite::params![user_id, raw.product_id, now_str],
      )?;

      Ok(raw)
    })
    .await?;

    raw.into_product()
  }

  async fn fetch_watched_products(&self, user_id: i64) -> Result<Vec<ProductSummary>> {
    let raws: Vec<RawProductSummary> = with_read_transaction(&self.conn, move |tx| {
      let mut stmt = tx.prepare(WATCHED_PRODUCTS)?;
      let rows = stmt
        .query_map(rusqlite::params![user_id], |row| {
          Ok(RawProductSummary {
            product_id:      row.get(0)?,
            product_name:    row.get(1)?,
            image_url:       row.get(2)?,
            last_checked_at: row.get(3)?,
            added_at:        row.get(4)?,
            lowest_price:    row.get(5)?,
            lowest_source:   row.get(6)?,
            in_stock:        row.get(7)?,
          })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
      Ok(rows)
    })
    .await?;

    raws.into_iter().map(RawProductSummary::into_summary).collect()
  }

  async fn remove_watch(&self, user_id: i64, product_id: i64) -> Result<()> {
    with_transaction(&self.conn, move |tx| {
      let affected = tx.execute(
        "DELETE FROM user_watchlist WHERE user_id = ?1 AND product_id = ?2",
        rusqlite::params![user_id, product_id],
      )?;

      if affected == 0 {
        return Err(Error::NotInWatchlist { user_id, product_id });
      }
      Ok(())
    })
    .await
  }

  // ── Ingestion ─────────────────────────────────────────────────────────────

  async fn add_user(&self, input: NewUser) -> Result<User> {
    let at_str = encode_dt(Utc::now());

    let raw: RawUser = with_transaction(&self.conn, move |tx| {
      Ok(tx.query_row(
        "INSERT INTO users (email, password_hash, created_at)
         VALUES (?1, ?2, ?3)
         RETURNING id, email, created_at",
        rusqlite::params![input.email, input.password_hash, at_str],
        |row| {
          Ok(RawUser {
            user_id:    row.get(0)?,
            email:      row.get(1)?,
            created_at: row.get(2)?,
          })
        },
      )?)
    })
    .await?;

    raw.into_user()
  }

  async fn add_product_source(&self, input: NewProductSource) -> Result<ProductSource> {
    with_transaction(&self.conn, move |tx| {
      Ok(tx.query_row(
        "INSERT INTO product_sources (product_id, platform, platform_product_id, product_url)
         VALUES (?1, ?2, ?3, ?4)
         RETURNING id, product_id, platform, platform_product_id, product_url",
        rusqlite::params![
          input.product_id,
          input.platform,
          input.platform_product_id,
          input.url,
        ],
        source_from_row,
      )?)
    })
    .await
  }

  async fn record_price_snapshot(&self, input: NewPriceSnapshot) -> Result<PriceSnapshot> {
    let checked_at_str = encode_dt(input.checked_at.unwrap_or_else(Utc::now));
    let currency       = input.currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_owned());

    let raw: RawPriceSnapshot = with_transaction(&self.conn, move |tx| {
      let raw = tx.query_row(
        "INSERT INTO price_snapshots (product_source_id, price, currency, in_stock, checked_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         RETURNING id, product_source_id, price, currency, in_stock, checked_at",
        rusqlite::params![
          input.source_id,
          input.price,
          currency,
          input.in_stock,
          checked_at_str,
        ],
        |row| {
          Ok(RawPriceSnapshot {
            snapshot_id: row.get(0)?,
            source_id:   row.get(1)?,
            price:       row.get(2)?,
            currency:    row.get(3)?,
            in_stock:    row.get(4)?,
            checked_at:  row.get(5)?,
          })
        },
      )?;

      // Backfilled observations must not move the marker backwards.
      tx.execute(
        "UPDATE products
         SET last_checked_at = ?1
         WHERE id = (SELECT product_id FROM product_sources WHERE id = ?2)
           AND (last_checked_at IS NULL OR last_checked_at < ?1)",
        rusqlite::params![raw.checked_at, raw.source_id],
      )?;

      Ok(raw)
    })
    .await?;

    raw.into_snapshot()
  }

  async fn set_product_image(&self, product_id: i64, image_url: String) -> Result<()> {
    with_transaction(&self.conn, move |tx| {
      let affected = tx.execute(
        "UPDATE products SET image_url = ?1 WHERE id = ?2",
        rusqlite::params![image_url, product_id],
      )?;

      if affected == 0 {
        return Err(Error::ProductNotFound(product_id));
      }
      Ok(())
    })
    .await
  }
}
