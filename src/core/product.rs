use crate::core::{Product, ProductStore, Record};
use crate::domain::model::decimal_from_value;
use crate::utils::error::{Result, ShopError};
use crate::utils::validation::{
    validate_non_negative, validate_non_negative_decimal, validate_required_keys,
};

/// Catalog operations over a [`ProductStore`].
pub struct ProductService<'a, S: ProductStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: ProductStore + ?Sized> ProductService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// All products, in the order the store returns them.
    pub fn list_products(&self) -> Result<Vec<Product>> {
        let records = self.store.list_products()?;
        tracing::debug!("Loaded {} product records", records.len());
        records.iter().map(Product::load).collect()
    }

    pub fn get_product(&self, product_id: i64) -> Result<Product> {
        match self.store.get_product(product_id)? {
            Some(record) => Product::load(&record),
            None => {
                tracing::debug!("Product {} not found", product_id);
                Err(ShopError::product_not_found(product_id))
            }
        }
    }

    /// Validates a raw product record and hands it to the store unchanged.
    pub fn add_product(&self, record: &Record) -> Result<()> {
        validate_required_keys(record, &Product::REQUIRED_FIELDS, "Product")?;

        if let Some(value) = record.get("cost") {
            let cost = decimal_from_value("cost", value)
                .map_err(|e| ShopError::validation(e.to_string()))?;
            validate_non_negative_decimal("Product cost", cost)?;
        }

        // 確保之後讀取時可以正常轉換
        let product = Product::load(record).map_err(|e| ShopError::validation(e.to_string()))?;

        tracing::debug!("Adding product {} ({})", product.id, product.name);
        self.store.add_product(record)
    }

    pub fn update_qty(&self, product_id: i64, qty: i64) -> Result<()> {
        validate_non_negative("Quantity", qty)?;
        tracing::debug!("Updating qty of product {} to {}", product_id, qty);
        self.store.update_qty(product_id, qty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .add_product(
                &Record::from_json(json!({"id": 1, "name": "Mug", "description": "Blue", "cost": 9.5}))
                    .unwrap(),
            )
            .unwrap();
        store
    }

    #[test]
    fn test_get_product_maps_record() {
        let store = seeded();
        let service = ProductService::new(&store);

        let product = service.get_product(1).unwrap();
        assert_eq!(product.name, "Mug");
        assert_eq!(product.cost, Decimal::new(95, 1));
        assert_eq!(product.qty, 0);
    }

    #[test]
    fn test_get_product_not_found() {
        let store = seeded();
        let service = ProductService::new(&store);

        let err = service.get_product(99).unwrap_err();
        assert!(matches!(err, ShopError::NotFound { id: 99, .. }));
    }

    #[test]
    fn test_add_product_rejects_non_numeric_cost() {
        let store = MemoryStore::new();
        let service = ProductService::new(&store);
        let record = Record::from_json(
            json!({"id": 2, "name": "Pen", "description": "", "cost": "cheap"}),
        )
        .unwrap();

        let err = service.add_product(&record).unwrap_err();
        assert!(matches!(err, ShopError::ValidationError { .. }));
        assert!(service.list_products().unwrap().is_empty());
    }
}
