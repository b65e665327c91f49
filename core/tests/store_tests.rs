// tests/store_tests.rs
mod common;
use common::*;
use farmersfirst::dao::{BasketDao, ProductDao, UserDao};
use farmersfirst::models::{Basket, BasketStatus, Product, User};
use farmersfirst::store::{self, Accessor, SqlValue};
use farmersfirst::ShopError;

#[tokio::test]
async fn create_assigns_ids_and_find_reads_back() {
  let pool = memory_pool().await;
  let products = ProductDao::new(pool.clone());

  let created = products
    .create(Product::new("Mulch", "Organic mulch", 120, 599, "https://img/mulch.jpg"))
    .await
    .unwrap();
  assert!(created.id > 0);

  let found = products.find(created.id).await.unwrap();
  assert_eq!(found, Some(created));
  assert_eq!(products.find(9_999).await.unwrap(), None);
}

#[tokio::test]
async fn update_requires_exactly_one_row() {
  let pool = memory_pool().await;
  let users = UserDao::new(pool.clone());
  let user = users.create(User::new("a@farm.test")).await.unwrap();

  let renamed = User {
    email: "b@farm.test".to_string(),
    ..user.clone()
  };
  let stored = users.update(&renamed, user.id).await.unwrap();
  assert_eq!(stored, Some(renamed.clone()));

  assert_eq!(users.update(&renamed, user.id + 100).await.unwrap(), None);
}

#[tokio::test]
async fn delete_reports_whether_anything_went() {
  let pool = memory_pool().await;
  let users = UserDao::new(pool.clone());
  let user = users.create(User::new("gone@farm.test")).await.unwrap();

  assert!(users.delete(user.id).await.unwrap());
  assert!(!users.delete(user.id).await.unwrap());
  assert_eq!(users.count().await.unwrap(), 0);
}

#[tokio::test]
async fn predicates_bind_their_parameters() {
  let pool = memory_pool().await;
  insert_product(&pool, "Seeds", 200, 899).await;
  insert_product(&pool, "Tractor", 10, 1_500_000).await;
  insert_product(&pool, "Grow Lights", 10, 14_999).await;
  let products = ProductDao::new(pool.clone());

  let low_stock = products
    .query_where("items_stock = ? ORDER BY id", &[SqlValue::Int(10)])
    .await
    .unwrap();
  let names: Vec<_> = low_stock.iter().map(|p| p.name.as_str()).collect();
  assert_eq!(names, vec!["Tractor", "Grow Lights"]);

  assert!(products.delete_where("name = ?", &["Tractor".into()]).await.unwrap());
  assert!(!products.delete_where("name = ?", &["Tractor".into()]).await.unwrap());
  assert_eq!(products.find_all().await.unwrap().len(), 2);
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
  let pool = memory_pool().await;
  insert_user(&pool, "twice@farm.test").await;
  let err = UserDao::new(pool.clone())
    .create(User::new("twice@farm.test"))
    .await
    .unwrap_err();
  assert!(matches!(err, ShopError::Conflict(_)), "got {err:?}");
}

#[tokio::test]
async fn store_rejects_a_second_pending_basket() {
  let pool = memory_pool().await;
  let user = insert_user(&pool, "one@farm.test").await;
  let baskets = BasketDao::new(pool.clone());

  baskets.create(Basket::pending_for(user.id)).await.unwrap();
  let err = baskets.create(Basket::pending_for(user.id)).await.unwrap_err();
  assert!(matches!(err, ShopError::Conflict(_)));

  // Any number of checked baskets is fine.
  let checked = Basket {
    status: BasketStatus::Checked,
    ..Basket::pending_for(user.id)
  };
  baskets.create(checked.clone()).await.unwrap();
  baskets.create(checked).await.unwrap();
}

#[tokio::test]
async fn basket_owner_resolves_the_user() {
  let pool = memory_pool().await;
  let user = insert_user(&pool, "owner@farm.test").await;
  let baskets = BasketDao::new(pool.clone());
  let basket = baskets.open_pending(user.id).await.unwrap();

  assert_eq!(baskets.open_pending(user.id).await.unwrap(), basket);
  assert_eq!(baskets.owner(&basket).await.unwrap(), Some(user));
}

#[tokio::test]
async fn negative_stock_is_rejected_by_the_store() {
  let pool = memory_pool().await;
  let err = Accessor::<Product>::new(pool.clone())
    .create(Product::new("Broken", "", -1, 100, ""))
    .await
    .unwrap_err();
  assert!(matches!(err, ShopError::Conflict(_)), "got {err:?}");
}

#[tokio::test]
async fn refresh_empties_every_table() {
  let pool = memory_pool().await;
  insert_user(&pool, "x@farm.test").await;
  insert_product(&pool, "Seeds", 1, 1).await;

  store::refresh(&pool).await.unwrap();

  assert_eq!(UserDao::new(pool.clone()).count().await.unwrap(), 0);
  assert_eq!(ProductDao::new(pool.clone()).count().await.unwrap(), 0);
}
