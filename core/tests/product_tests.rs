// tests/product_tests.rs
mod common;
use common::*;
use farmersfirst::models::Product;
use farmersfirst::repository::ProductRepository;
use farmersfirst::seed::{catalogue, seed_catalogue};
use farmersfirst::ShopError;

#[tokio::test]
async fn seeding_happens_once() {
  let pool = memory_pool().await;
  let products = ProductRepository::new(pool.clone());

  assert_eq!(seed_catalogue(&products).await.unwrap(), catalogue().len());
  assert_eq!(seed_catalogue(&products).await.unwrap(), 0);
  assert_eq!(products.show_all_products().await.unwrap().len(), 20);
}

#[tokio::test]
async fn search_matches_name_or_description() {
  let pool = memory_pool().await;
  let products = ProductRepository::new(pool.clone());
  seed_catalogue(&products).await.unwrap();

  let irrigation: Vec<String> = products
    .search_product("irrigation")
    .await
    .unwrap()
    .into_iter()
    .map(|p| p.name)
    .collect();
  assert!(irrigation.contains(&"Irrigation System".to_string()));
  assert!(irrigation.contains(&"Drip Irrigation Kit".to_string()));

  assert!(products.search_product("  zeppelin ").await.unwrap().is_empty());
}

#[tokio::test]
async fn search_treats_wildcards_literally() {
  let pool = memory_pool().await;
  insert_product(&pool, "Seeds", 10, 100).await;
  let products = ProductRepository::new(pool.clone());

  assert!(products.search_product("%").await.unwrap().is_empty());
  assert!(products.search_product("_").await.unwrap().is_empty());
}

#[tokio::test]
async fn find_products_keeps_the_requested_order() {
  let pool = memory_pool().await;
  let a = insert_product(&pool, "Seeds", 10, 100).await;
  let b = insert_product(&pool, "Mulch", 10, 100).await;
  let products = ProductRepository::new(pool.clone());

  let pair: Vec<i64> = products
    .find_products(b.id, a.id)
    .await
    .unwrap()
    .iter()
    .map(|p| p.id)
    .collect();
  assert_eq!(pair, vec![b.id, a.id]);

  assert_eq!(products.find_products(a.id, a.id).await.unwrap().len(), 1);
  assert_eq!(products.find_products(a.id, 999).await.unwrap().len(), 1);
}

#[tokio::test]
async fn selling_floors_stock_at_zero() {
  let pool = memory_pool().await;
  let tractor = insert_product(&pool, "Tractor", 10, 1_500_000).await;
  let products = ProductRepository::new(pool.clone());

  let after = products.update_product_stock(&tractor, 4).await.unwrap();
  assert_eq!(after.stock, 6);
  let after = products.update_product_stock(&after, 50).await.unwrap();
  assert_eq!(after.stock, 0);

  assert!(matches!(
    products.update_product_stock(&after, -1).await,
    Err(ShopError::Validation(_))
  ));
  let ghost = Product { id: 404, ..after };
  assert!(matches!(
    products.update_product_stock(&ghost, 1).await,
    Err(ShopError::NotFound { .. })
  ));
}

#[tokio::test]
async fn add_product_rejects_negative_prices() {
  let pool = memory_pool().await;
  let products = ProductRepository::new(pool.clone());
  let err = products
    .add_product(Product::new("Refund", "", 1, -5, ""))
    .await
    .unwrap_err();
  assert!(matches!(err, ShopError::Validation(_)));
  assert_eq!(products.find(1).await.unwrap(), None);
}
