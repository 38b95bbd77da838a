use crate::core::product::ProductService;
use crate::core::{Cart, CartStore, Product, ProductStore, Record};
use crate::utils::error::{Result, ShopError};
use serde_json::Value;
use std::str::FromStr;

/// What to do with a cart row whose `contents` cannot be read as a list of product IDs.
///
/// Only row parsing is governed by this; a failed product lookup always aborts resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedRowPolicy {
    /// Drop the row and keep resolving the rest.
    #[default]
    Skip,
    /// Abort with [`ShopError::MalformedRow`].
    Fail,
}

impl FromStr for MalformedRowPolicy {
    type Err = ShopError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "fail" => Ok(Self::Fail),
            other => Err(ShopError::ConfigError {
                message: format!("unknown malformed row policy '{}'", other),
            }),
        }
    }
}

/// Reads the product IDs out of a raw cart row. An absent `contents` means an empty cart row.
pub fn parse_row_contents(row: &Record) -> std::result::Result<Vec<i64>, String> {
    match row.get("contents") {
        None => Ok(Vec::new()),
        Some(Value::String(raw)) => serde_json::from_str::<Vec<i64>>(raw)
            .map_err(|e| format!("contents is not a JSON list of product IDs: {}", e)),
        Some(other) => Err(format!("contents is not a string: {}", other)),
    }
}

pub struct CartService<'a, C: CartStore + ?Sized, P: ProductStore + ?Sized> {
    store: &'a C,
    products: ProductService<'a, P>,
    policy: MalformedRowPolicy,
}

impl<'a, C: CartStore + ?Sized, P: ProductStore + ?Sized> CartService<'a, C, P> {
    pub fn new(store: &'a C, products: &'a P) -> Self {
        Self {
            store,
            products: ProductService::new(products),
            policy: MalformedRowPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: MalformedRowPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Resolves every product referenced by the user's cart rows.
    ///
    /// Products come back in row order, then in each row's array order. Rows that
    /// fail to parse follow the configured [`MalformedRowPolicy`]; a product lookup
    /// error aborts the whole call.
    pub fn get_cart(&self, username: &str) -> Result<Vec<Product>> {
        let rows = self.store.get_cart(username)?;
        if rows.is_empty() {
            tracing::debug!("No cart rows for '{}'", username);
            return Ok(Vec::new());
        }

        let mut products = Vec::new();
        for (index, row) in rows.iter().enumerate() {
            let Some(ids) = self.row_product_ids(username, index, row)? else {
                continue;
            };
            products.extend(self.resolve(&ids)?);
        }

        tracing::debug!(
            "Resolved {} products from {} rows for '{}'",
            products.len(),
            rows.len(),
            username
        );
        Ok(products)
    }

    /// One [`Cart`] per stored row, each with its own resolved contents.
    pub fn get_cart_details(&self, username: &str) -> Result<Vec<Cart>> {
        let rows = self.store.get_cart(username)?;
        let mut carts = Vec::with_capacity(rows.len());

        for (index, row) in rows.iter().enumerate() {
            let Some(ids) = self.row_product_ids(username, index, row)? else {
                continue;
            };
            let contents = self.resolve(&ids)?;
            carts.push(Cart::from_row(row, contents)?);
        }

        Ok(carts)
    }

    pub fn add_to_cart(&self, username: &str, product_id: i64) -> Result<()> {
        tracing::debug!("Adding product {} to cart of '{}'", product_id, username);
        self.store.add_to_cart(username, product_id)
    }

    pub fn remove_from_cart(&self, username: &str, product_id: i64) -> Result<()> {
        tracing::debug!("Removing product {} from cart of '{}'", product_id, username);
        self.store.remove_from_cart(username, product_id)
    }

    pub fn delete_cart(&self, username: &str) -> Result<()> {
        tracing::debug!("Deleting cart of '{}'", username);
        self.store.delete_cart(username)
    }

    fn row_product_ids(&self, username: &str, index: usize, row: &Record) -> Result<Option<Vec<i64>>> {
        match parse_row_contents(row) {
            Ok(ids) => Ok(Some(ids)),
            Err(reason) => match self.policy {
                MalformedRowPolicy::Skip => {
                    tracing::warn!(
                        "Skipping cart row {} for '{}': {}",
                        index,
                        username,
                        reason
                    );
                    Ok(None)
                }
                MalformedRowPolicy::Fail => Err(ShopError::MalformedRow {
                    username: username.to_string(),
                    reason,
                }),
            },
        }
    }

    fn resolve(&self, ids: &[i64]) -> Result<Vec<Product>> {
        ids.iter().map(|id| self.products.get_product(*id)).collect()
    }
}
