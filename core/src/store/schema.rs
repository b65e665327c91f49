// core/src/store/schema.rs

//! Table and column names plus the DDL for the four shop tables.

pub const TABLE_USERS: &str = "users";
pub const TABLE_PRODUCTS: &str = "products";
pub const TABLE_BASKET: &str = "basket";
pub const TABLE_BASKET_ITEMS: &str = "basket_items";

pub const USER_EMAIL: &str = "email_address";

pub const PRODUCT_NAME: &str = "name";
pub const PRODUCT_DESC: &str = "description";
pub const PRODUCT_STOCK: &str = "items_stock";
pub const PRODUCT_PRICE: &str = "unit_price_cents";
pub const PRODUCT_IMAGE: &str = "image_url";

pub const BASKET_USER: &str = "user_id";
pub const BASKET_STATUS: &str = "status";

pub const BASKET_ITEM_BASKET: &str = "basket_id";
pub const BASKET_ITEM_PRODUCT: &str = "product_id";
pub const BASKET_ITEM_QTY: &str = "quantity";

pub(crate) const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  email_address TEXT NOT NULL UNIQUE
)"#;

pub(crate) const CREATE_PRODUCTS: &str = r#"
CREATE TABLE IF NOT EXISTS products (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  name TEXT NOT NULL,
  description TEXT NOT NULL,
  items_stock INTEGER NOT NULL CHECK (items_stock >= 0),
  unit_price_cents INTEGER NOT NULL CHECK (unit_price_cents >= 0),
  image_url TEXT NOT NULL
)"#;

pub(crate) const CREATE_BASKET: &str = r#"
CREATE TABLE IF NOT EXISTS basket (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  user_id INTEGER NOT NULL REFERENCES users(id),
  status TEXT NOT NULL CHECK (status IN ('pending', 'checked'))
)"#;

// At most one pending basket per user.
pub(crate) const CREATE_PENDING_INDEX: &str = r#"
CREATE UNIQUE INDEX IF NOT EXISTS basket_one_pending_per_user
  ON basket (user_id) WHERE status = 'pending'"#;

pub(crate) const CREATE_BASKET_ITEMS: &str = r#"
CREATE TABLE IF NOT EXISTS basket_items (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  basket_id INTEGER NOT NULL REFERENCES basket(id),
  product_id INTEGER NOT NULL REFERENCES products(id),
  quantity INTEGER NOT NULL CHECK (quantity > 0)
)"#;

pub(crate) const CREATE_BASKET_ITEMS_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS basket_items_by_basket
  ON basket_items (basket_id, product_id)"#;

pub(crate) const CREATE_ALL: &[&str] = &[
  CREATE_USERS,
  CREATE_PRODUCTS,
  CREATE_BASKET,
  CREATE_PENDING_INDEX,
  CREATE_BASKET_ITEMS,
  CREATE_BASKET_ITEMS_INDEX,
];

// Children first so foreign keys never dangle mid-drop.
pub(crate) const DROP_ALL: &[&str] = &[
  "DROP TABLE IF EXISTS basket_items",
  "DROP TABLE IF EXISTS basket",
  "DROP TABLE IF EXISTS products",
  "DROP TABLE IF EXISTS users",
];
