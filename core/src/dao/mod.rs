// core/src/dao/mod.rs

//! One accessor per table. Each supplies the column mapping for its row type
//! and the lookups the domain services need beyond plain CRUD.

pub mod basket_dao;
pub mod basket_item_dao;
pub mod product_dao;
pub mod user_dao;

pub use basket_dao::BasketDao;
pub use basket_item_dao::BasketItemDao;
pub use product_dao::ProductDao;
pub use user_dao::UserDao;
