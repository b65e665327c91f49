use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use farmersfirst::models::{Basket, BasketItem, Product};
use farmersfirst::repository::{aggregate_basket_products, parse_recommendation, BasketRepository};
use farmersfirst::store;
use farmersfirst::StoreConfig;
use tokio::runtime::Runtime; // To run async code within Criterion

// --- Helper: raw basket rows spread over `products` distinct products ---
fn basket_rows(rows: usize, products: usize) -> Vec<BasketItem> {
  let basket = Basket {
    id: 1,
    ..Basket::pending_for(1)
  };
  let catalogue: Vec<Product> = (0..products)
    .map(|i| Product {
      id: i as i64 + 1,
      ..Product::new(format!("product-{i}"), "", 100, 999, "")
    })
    .collect();
  (0..rows)
    .map(|i| BasketItem {
      id: i as i64 + 1,
      basket: basket.clone(),
      product: catalogue[i % products].clone(),
      quantity: (i % 4) as i64 + 1,
    })
    .collect()
}

// --- Benchmark Functions ---

fn bench_aggregation(c: &mut Criterion) {
  let mut group = c.benchmark_group("aggregate_basket_products");
  for (rows, products) in [(10usize, 3usize), (100, 20), (1_000, 50)].iter() {
    group.throughput(Throughput::Elements(*rows as u64));
    group.bench_with_input(
      BenchmarkId::from_parameter(format!("{rows}_rows_{products}_products")),
      &(*rows, *products),
      |b, &(rows, products)| {
        b.iter_batched(
          || basket_rows(rows, products),
          aggregate_basket_products,
          BatchSize::SmallInput,
        )
      },
    );
  }
  group.finish();
}

fn bench_recommendation_parsing(c: &mut Criterion) {
  let mut group = c.benchmark_group("parse_recommendation");
  group.bench_function("well_formed", |b| b.iter(|| parse_recommendation("  [12, 7]\n")));
  group.bench_function("prose", |b| {
    b.iter(|| parse_recommendation("I would suggest the seeds and the mulch."))
  });
  group.finish();
}

fn bench_fetch_lines(c: &mut Criterion) {
  let rt = Runtime::new().unwrap();
  let (baskets, user_id) = rt.block_on(async {
    let pool = store::connect(&StoreConfig::in_memory()).await.unwrap();
    sqlx::query("INSERT INTO users (email_address) VALUES ('bench@farm.test')")
      .execute(&pool)
      .await
      .unwrap();
    for i in 0..20 {
      sqlx::query("INSERT INTO products (name, description, items_stock, unit_price_cents, image_url) VALUES (?, '', 100, 999, '')")
        .bind(format!("product-{i}"))
        .execute(&pool)
        .await
        .unwrap();
    }
    let baskets = BasketRepository::new(pool);
    let basket = baskets.create_basket(1).await.unwrap();
    for i in 0..100 {
      baskets.add_item_to_basket(1, &basket, (i % 20) + 1, 1).await.unwrap();
    }
    (baskets, 1)
  });

  let mut group = c.benchmark_group("basket_store");
  group.throughput(Throughput::Elements(100));
  group.bench_function("fetch_basket_lines_100_rows", |b| {
    b.to_async(&rt).iter(|| async { baskets.fetch_basket_lines(user_id).await.unwrap() })
  });
  group.bench_function("fetch_latest_basket_items_100_rows", |b| {
    b.to_async(&rt).iter(|| async { baskets.fetch_latest_basket_items(user_id).await.unwrap() })
  });
  group.finish();
}

criterion_group!(
  benches,
  bench_aggregation,
  bench_recommendation_parsing,
  bench_fetch_lines
);
criterion_main!(benches);
