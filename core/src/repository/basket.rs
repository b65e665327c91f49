// core/src/repository/basket.rs

//! Basket lifecycle: fetch-or-create the pending basket, line-item edits,
//! aggregation, totals, and checkout.

use crate::dao::{BasketDao, BasketItemDao, ProductDao};
use crate::error::{ShopError, ShopResult};
use crate::models::{Basket, BasketItem, BasketItemRecord, BasketStatus};
use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, SqlitePool};
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

/// Most units of one product a basket line may hold.
pub const MAX_LINE_QUANTITY: i64 = 10_000;

fn overflow(what: &str) -> ShopError {
  ShopError::validation(format!("{what} overflows"))
}

fn check_line_quantity(quantity: i64) -> ShopResult<()> {
  if quantity > MAX_LINE_QUANTITY {
    return Err(ShopError::validation(format!(
      "a basket line holds at most {MAX_LINE_QUANTITY} units, got {quantity}"
    )));
  }
  Ok(())
}

/// Direction of a one-unit quantity adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepDirection {
  Up,
  Down,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BasketTotals {
  pub total_cents: i64,
  pub units: i64,
}

/// Outcome of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutReceipt {
  /// The basket that was just purchased, now `checked`.
  pub checked: Basket,
  /// The fresh pending basket future adds go to.
  pub next: Basket,
  /// Aggregated lines that were sold.
  pub lines: Vec<BasketItem>,
  pub total_cents: i64,
}

/// Merges rows that share a product into one line with the summed quantity.
///
/// Lines come out in first-seen product order. Each merged line keeps the
/// identity of the group's last row.
pub fn aggregate_basket_products(items: Vec<BasketItem>) -> ShopResult<Vec<BasketItem>> {
  let mut order: Vec<i64> = Vec::new();
  let mut merged: HashMap<i64, BasketItem> = HashMap::new();

  for item in items {
    match merged.get_mut(&item.product.id) {
      Some(line) => {
        let quantity = line
          .quantity
          .checked_add(item.quantity)
          .ok_or_else(|| overflow("line quantity"))?;
        *line = BasketItem { quantity, ..item };
      }
      None => {
        order.push(item.product.id);
        merged.insert(item.product.id, item);
      }
    }
  }

  Ok(order.into_iter().filter_map(|product_id| merged.remove(&product_id)).collect())
}

/// Price and unit totals over already-aggregated (or raw) lines.
pub fn basket_totals(items: &[BasketItem]) -> ShopResult<BasketTotals> {
  items.iter().try_fold(BasketTotals::default(), |acc, item| -> ShopResult<BasketTotals> {
    Ok(BasketTotals {
      total_cents: acc
        .total_cents
        .checked_add(item.line_total_cents()?)
        .ok_or_else(|| overflow("basket total"))?,
      units: acc.units.checked_add(item.quantity).ok_or_else(|| overflow("basket units"))?,
    })
  })
}

#[derive(Clone)]
pub struct BasketRepository {
  pool: SqlitePool,
  baskets: BasketDao,
  items: BasketItemDao,
  /// Tries per write transaction before contention is reported.
  checkout_attempts: u32,
}

impl BasketRepository {
  pub fn new(pool: SqlitePool) -> Self {
    Self {
      baskets: BasketDao::new(pool.clone()),
      items: BasketItemDao::new(pool.clone()),
      pool,
      checkout_attempts: 3,
    }
  }

  pub fn with_checkout_attempts(mut self, attempts: u32) -> Self {
    self.checkout_attempts = attempts.max(1);
    self
  }

  /// Fails with `Conflict` if the user already has a pending basket.
  #[instrument(name = "basket::create", skip(self), err(Display))]
  pub async fn create_basket(&self, user_id: i64) -> ShopResult<Basket> {
    self.baskets.create(Basket::pending_for(user_id)).await
  }

  /// Writes `basket` over its stored row. A checked basket never returns to pending.
  #[instrument(name = "basket::update", skip(self, basket), fields(basket_id = basket.id), err(Display))]
  pub async fn update_basket(&self, basket: &Basket) -> ShopResult<Basket> {
    let current = self
      .baskets
      .find(basket.id)
      .await?
      .ok_or_else(|| ShopError::not_found("Basket", basket.id))?;
    if current.status == BasketStatus::Checked && basket.status == BasketStatus::Pending {
      return Err(ShopError::validation(format!(
        "basket {} is already checked out",
        basket.id
      )));
    }
    self
      .baskets
      .update(basket, basket.id)
      .await?
      .ok_or_else(|| ShopError::not_found("Basket", basket.id))
  }

  /// The user's pending basket, if any. Never creates one.
  #[instrument(name = "basket::fetch_latest", skip(self), err(Display))]
  pub async fn fetch_latest_basket(&self, user_id: i64) -> ShopResult<Option<Basket>> {
    self.baskets.latest_pending(user_id).await
  }

  /// Raw rows of the user's pending basket.
  ///
  /// Opens an empty pending basket first when the user has none, so this read
  /// can write.
  #[instrument(name = "basket::fetch_latest_items", skip(self), err(Display))]
  pub async fn fetch_latest_basket_items(&self, user_id: i64) -> ShopResult<Vec<BasketItem>> {
    let mut conn = self.pool.acquire().await?;
    let basket = match BasketDao::latest_pending_on(&mut conn, user_id).await? {
      Some(basket) => basket,
      None => {
        info!("No pending basket, opening one.");
        BasketDao::open_pending_on(&mut conn, user_id).await?
      }
    };
    let records = BasketItemDao::for_basket_on(&mut conn, basket.id).await?;
    debug!(basket_id = basket.id, rows = records.len(), "Basket rows loaded.");
    BasketItemDao::hydrate_all_on(&mut conn, records).await
  }

  /// Like `fetch_latest_basket_items` but with duplicate rows already merged by the store.
  #[instrument(name = "basket::fetch_lines", skip(self), err(Display))]
  pub async fn fetch_basket_lines(&self, user_id: i64) -> ShopResult<Vec<BasketItem>> {
    let basket = self.baskets.open_pending(user_id).await?;
    self.items.lines_for_basket(basket.id).await
  }

  /// Appends a new row for `product_id` (never merged into an existing one)
  /// and returns the user's refreshed raw rows.
  #[instrument(name = "basket::add_item", skip(self, basket), fields(basket_id = basket.id), err(Display))]
  pub async fn add_item_to_basket(
    &self,
    user_id: i64,
    basket: &Basket,
    product_id: i64,
    qty: i64,
  ) -> ShopResult<Vec<BasketItem>> {
    if qty <= 0 {
      return Err(ShopError::validation(format!("quantity must be positive, got {qty}")));
    }
    check_line_quantity(qty)?;

    let mut attempt = 1;
    let record = loop {
      match self.add_once(user_id, basket.id, product_id, qty).await {
        Ok(record) => break record,
        Err(err) if err.is_retryable() && attempt < self.checkout_attempts => {
          warn!(attempt, error = %err, "Adding to the basket hit contention, retrying.");
          attempt += 1;
        }
        Err(err) => return Err(err),
      }
    };
    info!(item_id = record.id, product_id, qty, "Item added to basket.");

    self.fetch_latest_basket_items(user_id).await
  }

  async fn add_once(&self, user_id: i64, basket_id: i64, product_id: i64, qty: i64) -> ShopResult<BasketItemRecord> {
    let mut tx = self.pool.begin().await?;
    let target = if basket_id == 0 {
      BasketDao::open_pending_on(&mut tx, user_id).await?
    } else {
      BasketDao::find_on(&mut tx, basket_id)
        .await?
        .ok_or_else(|| ShopError::not_found("Basket", basket_id))?
    };
    if target.user_id != user_id || !target.is_pending() {
      warn!(owner = target.user_id, status = %target.status, "Refusing to add to a basket that is not the user's pending basket.");
      return Err(ShopError::validation(format!(
        "basket {} is not the pending basket of user {user_id}",
        target.id
      )));
    }

    let product = ProductDao::find_on(&mut tx, product_id)
      .await?
      .ok_or_else(|| ShopError::not_found("Product", product_id))?;

    let held = BasketItemDao::product_quantity_on(&mut tx, target.id, product.id).await?;
    check_line_quantity(held.checked_add(qty).ok_or_else(|| overflow("line quantity"))?)?;

    let record = BasketItemDao::create_in_pending_on(
      &mut tx,
      BasketItemRecord {
        id: 0,
        basket_id: target.id,
        product_id: product.id,
        quantity: qty,
      },
    )
    .await?
    .ok_or_else(|| ShopError::validation(format!("basket {} was checked out", target.id)))?;
    tx.commit().await?;
    Ok(record)
  }

  /// Deletes every row of `item`'s product in `item`'s basket.
  #[instrument(name = "basket::remove_item", skip(self, item), fields(basket_id = item.basket.id, product_id = item.product.id), err(Display))]
  pub async fn remove_item_from_basket(&self, item: &BasketItem) -> ShopResult<bool> {
    let removed = self.items.remove_product(item.basket.id, item.product.id).await?;
    info!(removed, "Basket line removed.");
    Ok(removed)
  }

  /// Sets the quantity of the stored row `item.id`. Every other field of
  /// `item` is ignored, and the row's basket must still be pending.
  #[instrument(name = "basket::update_item", skip(self, item), fields(item_id = item.id, quantity = item.quantity), err(Display))]
  pub async fn update_basket_item(&self, item: &BasketItem) -> ShopResult<BasketItem> {
    if item.quantity <= 0 {
      return Err(ShopError::validation(
        "quantity must stay positive, remove the line instead",
      ));
    }
    check_line_quantity(item.quantity)?;

    let mut tx = self.pool.begin().await?;
    let stored = BasketItemDao::find_on(&mut tx, item.id)
      .await?
      .ok_or_else(|| ShopError::not_found("Basket item", item.id))?;
    Self::require_pending_on(&mut tx, stored.basket_id).await?;

    let held = BasketItemDao::product_quantity_on(&mut tx, stored.basket_id, stored.product_id).await?;
    check_line_quantity(held - stored.quantity + item.quantity)?;

    let record = BasketItemRecord {
      quantity: item.quantity,
      ..stored
    };
    let stored = BasketItemDao::update_on(&mut tx, &record, item.id)
      .await?
      .ok_or_else(|| ShopError::not_found("Basket item", item.id))?;
    let line = BasketItemDao::hydrate_on(&mut tx, stored).await?;
    tx.commit().await?;
    Ok(line)
  }

  async fn require_pending_on(conn: &mut SqliteConnection, basket_id: i64) -> ShopResult<Basket> {
    let basket = BasketDao::find_on(conn, basket_id)
      .await?
      .ok_or_else(|| ShopError::not_found("Basket", basket_id))?;
    if !basket.is_pending() {
      return Err(ShopError::validation(format!("basket {basket_id} is already checked out")));
    }
    Ok(basket)
  }

  /// Sets the line for `item`'s product to `quantity`, collapsing duplicate
  /// rows into `item`'s stored row. Zero removes the line and returns `None`.
  #[instrument(name = "basket::set_line_quantity", skip(self, item), fields(item_id = item.id), err(Display))]
  pub async fn set_line_quantity(&self, item: &BasketItem, quantity: i64) -> ShopResult<Option<BasketItem>> {
    if quantity < 0 {
      return Err(ShopError::validation(format!("quantity cannot be {quantity}")));
    }
    check_line_quantity(quantity)?;
    if quantity == 0 {
      self.remove_item_from_basket(item).await?;
      return Ok(None);
    }

    let mut tx = self.pool.begin().await?;
    let stored = BasketItemDao::find_on(&mut tx, item.id)
      .await?
      .ok_or_else(|| ShopError::not_found("Basket item", item.id))?;
    Self::require_pending_on(&mut tx, stored.basket_id).await?;
    BasketItemDao::remove_duplicates_on(&mut tx, stored.basket_id, stored.product_id, stored.id).await?;
    let record = BasketItemRecord { quantity, ..stored };
    let stored = BasketItemDao::update_on(&mut tx, &record, item.id)
      .await?
      .ok_or_else(|| ShopError::not_found("Basket item", item.id))?;
    let line = BasketItemDao::hydrate_on(&mut tx, stored).await?;
    tx.commit().await?;
    Ok(Some(line))
  }

  /// One-unit adjustment from the basket view. Stepping down from 1 removes the line.
  pub async fn step_basket_item(&self, item: &BasketItem, direction: StepDirection) -> ShopResult<Option<BasketItem>> {
    let quantity = match direction {
      StepDirection::Up => item.quantity.checked_add(1),
      StepDirection::Down => item.quantity.checked_sub(1),
    }
    .ok_or_else(|| overflow("line quantity"))?;
    self.set_line_quantity(item, quantity).await
  }

  /// Marks the pending basket checked, opens the next pending basket and
  /// takes every sold line out of stock, all in one transaction. The whole
  /// transaction is retried when the store reports contention.
  #[instrument(name = "basket::checkout", skip(self), err(Display))]
  pub async fn checkout(&self, user_id: i64) -> ShopResult<CheckoutReceipt> {
    let mut attempt = 1;
    loop {
      match self.checkout_once(user_id).await {
        Ok(receipt) => {
          info!(
            basket_id = receipt.checked.id,
            next_basket_id = receipt.next.id,
            total_cents = receipt.total_cents,
            "Checkout complete."
          );
          return Ok(receipt);
        }
        Err(err) if err.is_retryable() && attempt < self.checkout_attempts => {
          warn!(attempt, error = %err, "Checkout hit contention, retrying.");
          attempt += 1;
        }
        Err(err) => return Err(err),
      }
    }
  }

  async fn checkout_once(&self, user_id: i64) -> ShopResult<CheckoutReceipt> {
    let mut tx = self.pool.begin().await?;

    let basket = BasketDao::latest_pending_on(&mut tx, user_id)
      .await?
      .ok_or_else(|| ShopError::validation(format!("user {user_id} has no pending basket")))?;
    let records = BasketItemDao::aggregated_for_basket_on(&mut tx, basket.id).await?;
    if records.is_empty() {
      return Err(ShopError::validation("cannot check out an empty basket"));
    }
    let mut lines = BasketItemDao::hydrate_all_on(&mut tx, records).await?;
    let total_cents = basket_totals(&lines)?.total_cents;

    if !BasketDao::mark_checked_on(&mut tx, basket.id).await? {
      return Err(ShopError::Conflict(format!(
        "basket {} was checked out concurrently",
        basket.id
      )));
    }
    let next = BasketDao::open_pending_on(&mut tx, user_id).await?;

    for line in &lines {
      if !ProductDao::decrement_stock_on(&mut tx, line.product.id, line.quantity).await? {
        return Err(ShopError::not_found("Product", line.product.id));
      }
    }

    tx.commit().await?;

    let checked = Basket {
      status: BasketStatus::Checked,
      ..basket
    };
    for line in &mut lines {
      line.basket = checked.clone();
    }
    Ok(CheckoutReceipt {
      checked,
      next,
      lines,
      total_cents,
    })
  }
}
