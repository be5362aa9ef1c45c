// tests/memory_store_tests.rs
mod common;
use common::setup_tracing;
use storefront::store::NewProduct;
use storefront::{CartRepository, CategoryRepository, MemoryStore, ProductRepository};

#[tokio::test]
async fn each_table_numbers_its_rows_from_one() {
  setup_tracing();
  let store = MemoryStore::new();

  let laptops = store.create_category("Laptops").await.unwrap();
  let phones = store.create_category("Phones").await.unwrap();
  let product = store
    .create_product(&NewProduct {
      name: "Zephyrus".to_string(),
      price: 1500.0,
      inventory: 3,
      category_id: laptops.id,
    })
    .await
    .unwrap();
  let cart = store.create_cart("user-1").await.unwrap();
  let item = store.create_cart_item(cart.id, product.id, 1).await.unwrap();

  assert_eq!((laptops.id, phones.id), (1, 2));
  assert_eq!(product.id, 1);
  assert_eq!(cart.id, 1);
  assert_eq!(item.id, 1);
}

#[tokio::test]
async fn ids_are_not_reused_after_a_delete() {
  setup_tracing();
  let store = MemoryStore::new();
  let category = store.create_category("Laptops").await.unwrap();
  let new_product = NewProduct {
    name: "Aspire".to_string(),
    price: 700.0,
    inventory: 1,
    category_id: category.id,
  };

  let first = store.create_product(&new_product).await.unwrap();
  assert_eq!(store.delete_product(first.id).await.unwrap(), 1);
  let second = store.create_product(&new_product).await.unwrap();

  assert_eq!(second.id, first.id + 1);
}

#[tokio::test]
async fn clones_share_the_same_tables() {
  setup_tracing();
  let store = MemoryStore::new();
  let other = store.clone();

  let cart = store.create_cart("user-1").await.unwrap();

  assert_eq!(other.find_cart(cart.id).await.unwrap(), Some(cart));
}
