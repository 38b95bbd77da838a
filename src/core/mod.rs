pub mod cart;
pub mod product;

pub use crate::domain::model::{Cart, CartRow, Product, Record};
pub use crate::domain::ports::{CartStore, ProductStore};
pub use crate::utils::error::Result;
