use crate::adapters::state::ShopSnapshot;
use crate::core::{CartRow, CartStore, ProductStore, Record};
use crate::utils::error::{Result, ShopError};
use std::sync::{Mutex, MutexGuard};

/// In-process store implementing both ports.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<ShopSnapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a cart row verbatim, malformed contents included.
    pub fn insert_cart_row(&self, row: CartRow) -> Result<()> {
        self.lock()?.carts.push(row);
        Ok(())
    }

    /// Drops a product record without touching carts that reference it.
    pub fn remove_product(&self, product_id: i64) -> Result<()> {
        self.lock()?
            .products
            .retain(|record| record.get("id").and_then(|v| v.as_i64()) != Some(product_id));
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, ShopSnapshot>> {
        self.state
            .lock()
            .map_err(|_| ShopError::store("memory store lock poisoned"))
    }
}

impl ProductStore for MemoryStore {
    fn list_products(&self) -> Result<Vec<Record>> {
        Ok(self.lock()?.products.clone())
    }

    fn get_product(&self, product_id: i64) -> Result<Option<Record>> {
        Ok(self.lock()?.find_product(product_id).cloned())
    }

    fn add_product(&self, record: &Record) -> Result<()> {
        self.lock()?.add_product(record)
    }

    fn update_qty(&self, product_id: i64, qty: i64) -> Result<()> {
        self.lock()?.update_qty(product_id, qty)
    }
}

impl CartStore for MemoryStore {
    fn get_cart(&self, username: &str) -> Result<Vec<Record>> {
        Ok(self.lock()?.cart_rows(username))
    }

    fn add_to_cart(&self, username: &str, product_id: i64) -> Result<()> {
        self.lock()?.add_to_cart(username, product_id)
    }

    fn remove_from_cart(&self, username: &str, product_id: i64) -> Result<()> {
        self.lock()?.remove_from_cart(username, product_id)
    }

    fn delete_cart(&self, username: &str) -> Result<()> {
        self.lock()?.delete_cart(username);
        Ok(())
    }
}
