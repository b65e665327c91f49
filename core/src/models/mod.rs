// core/src/models/mod.rs

//! Rows of the four shop tables and the hydrated basket line built from them.

pub mod basket;
pub mod basket_item;
pub mod product;
pub mod user;

pub use basket::{Basket, BasketStatus};
pub use basket_item::{BasketItem, BasketItemRecord};
pub use product::Product;
pub use user::User;
