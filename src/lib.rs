pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{JsonFileStore, MemoryStore};
pub use config::ShopConfig;
pub use crate::core::{
    cart::{CartService, MalformedRowPolicy},
    product::ProductService,
};
pub use domain::model::{Cart, CartRow, Product, Record};
pub use domain::ports::{CartStore, ProductStore};
pub use utils::error::{Result, ShopError};
