use crate::domain::model::{decimal_from_value, CartRow, Record};
use crate::utils::error::{Result, ShopError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Everything a store adapter persists. Mutation rules live here so every adapter shares them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopSnapshot {
    #[serde(default)]
    pub products: Vec<Record>,
    #[serde(default)]
    pub carts: Vec<CartRow>,
}

fn record_id(record: &Record) -> Option<i64> {
    record.get("id").and_then(|v| v.as_i64())
}

impl ShopSnapshot {
    pub fn find_product(&self, product_id: i64) -> Option<&Record> {
        self.products
            .iter()
            .find(|record| record_id(record) == Some(product_id))
    }

    fn product_cost(&self, product_id: i64) -> Decimal {
        self.find_product(product_id)
            .and_then(|record| record.get("cost"))
            .and_then(|value| decimal_from_value("cost", value).ok())
            .unwrap_or(Decimal::ZERO)
    }

    pub fn add_product(&mut self, record: &Record) -> Result<()> {
        let id = record.require_i64("id")?;
        if self.find_product(id).is_some() {
            return Err(ShopError::store(format!("product {} already exists", id)));
        }
        self.products.push(record.clone());
        Ok(())
    }

    pub fn update_qty(&mut self, product_id: i64, qty: i64) -> Result<()> {
        let record = self
            .products
            .iter_mut()
            .find(|record| record_id(record) == Some(product_id))
            .ok_or_else(|| ShopError::product_not_found(product_id))?;
        record.insert("qty", qty);
        Ok(())
    }

    pub fn cart_rows(&self, username: &str) -> Vec<Record> {
        self.carts
            .iter()
            .filter(|row| row.username == username)
            .map(CartRow::to_record)
            .collect()
    }

    /// Appends to the user's first readable row, opening a new row if none can be read.
    pub fn add_to_cart(&mut self, username: &str, product_id: i64) -> Result<()> {
        let cost = self.product_cost(product_id);

        let readable = self.carts.iter().enumerate().find_map(|(index, row)| {
            if row.username != username {
                return None;
            }
            row.product_ids().ok().map(|ids| (index, ids))
        });

        let (index, mut ids) = match readable {
            Some(found) => found,
            None => {
                let next_id = self
                    .carts
                    .iter()
                    .map(|row| row.id)
                    .max()
                    .unwrap_or(0)
                    .checked_add(1)
                    .ok_or_else(|| ShopError::store("cart row ids exhausted"))?;
                self.carts.push(CartRow::new(next_id, username));
                (self.carts.len() - 1, Vec::new())
            }
        };

        let row = &mut self.carts[index];
        ids.push(product_id);
        row.set_product_ids(&ids)?;
        row.cost += cost;
        Ok(())
    }

    /// Removes the first occurrence of the product across the user's readable rows. Missing items are a no-op.
    ///
    /// The row cost is reduced by the product's current catalog cost, not the cost at the time
    /// it was added, so a price change in between leaves the row cost off by the difference.
    pub fn remove_from_cart(&mut self, username: &str, product_id: i64) -> Result<()> {
        let cost = self.product_cost(product_id);

        for row in self.carts.iter_mut().filter(|row| row.username == username) {
            let Ok(mut ids) = row.product_ids() else {
                continue;
            };
            if let Some(position) = ids.iter().position(|id| *id == product_id) {
                ids.remove(position);
                row.set_product_ids(&ids)?;
                row.cost = (row.cost - cost).max(Decimal::ZERO);
                return Ok(());
            }
        }

        tracing::debug!("Product {} not in cart of '{}'", product_id, username);
        Ok(())
    }

    pub fn delete_cart(&mut self, username: &str) {
        self.carts.retain(|row| row.username != username);
    }
}
