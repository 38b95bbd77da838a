mod common;

use anyhow::Result;
use common::{product, record, RecordingStore};
use rust_decimal::Decimal;
use serde_json::json;
use small_shop::{MemoryStore, Product, ProductService, ShopError};

#[test]
fn test_list_products_keeps_store_order() -> Result<()> {
    let store = RecordingStore::with_products(vec![
        product(3, "Lamp", 20.0),
        product(1, "Mug", 9.5),
        product(2, "Pen", 1.25),
    ]);
    let service = ProductService::new(&store);

    let ids: Vec<i64> = service.list_products()?.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![3, 1, 2]);
    Ok(())
}

#[test]
fn test_list_products_surfaces_missing_field() {
    let store = RecordingStore::with_products(vec![
        product(1, "Mug", 9.5),
        record(json!({"id": 2, "name": "Broken", "cost": 1})),
    ]);
    let service = ProductService::new(&store);

    let err = service.list_products().unwrap_err();
    assert!(matches!(err, ShopError::MissingField { ref field } if field == "description"));
}

#[test]
fn test_load_then_serialize_reproduces_fields() -> Result<()> {
    let source = json!({"id": 5, "name": "Kettle", "description": "Steel", "cost": 34.99, "qty": 12});
    let store = RecordingStore::with_products(vec![record(source.clone())]);
    let service = ProductService::new(&store);

    let loaded = service.get_product(5)?;
    assert_eq!(serde_json::to_value(loaded.to_record())?, source);

    let without_qty = Product::load(&record(json!({"id": 6, "name": "Cup", "description": "", "cost": 3})))?;
    assert_eq!(without_qty.qty, 0);
    Ok(())
}

#[test]
fn test_get_product_not_found() {
    let store = RecordingStore::with_products(vec![product(1, "Mug", 9.5)]);
    let service = ProductService::new(&store);

    let err = service.get_product(404).unwrap_err();
    assert!(matches!(err, ShopError::NotFound { id: 404, .. }));
    assert_eq!(err.to_string(), "Product with ID 404 not found.");
}

#[test]
fn test_add_product_rejects_each_missing_key() {
    let store = RecordingStore::default();
    let service = ProductService::new(&store);
    let full = json!({"id": 1, "name": "Mug", "description": "Blue", "cost": 9.5});

    for key in ["id", "name", "description", "cost"] {
        let mut value = full.clone();
        value.as_object_mut().unwrap().remove(key);

        let err = service.add_product(&record(value)).unwrap_err();
        assert!(
            matches!(err, ShopError::ValidationError { .. }),
            "missing {} gave {:?}",
            key,
            err
        );
    }

    assert!(store.calls().is_empty());
}

#[test]
fn test_add_product_rejects_negative_cost() {
    let store = RecordingStore::default();
    let service = ProductService::new(&store);

    let err = service
        .add_product(&record(json!({"id": 1, "name": "Mug", "description": "", "cost": -0.01})))
        .unwrap_err();

    assert!(matches!(err, ShopError::ValidationError { .. }));
    assert!(store.calls().is_empty());
}

#[test]
fn test_add_product_delegates_valid_record() -> Result<()> {
    let store = RecordingStore::default();
    let service = ProductService::new(&store);

    service.add_product(&record(json!({"id": 9, "name": "Free", "description": "", "cost": 0})))?;
    assert_eq!(store.calls(), vec!["add_product(9)".to_string()]);
    Ok(())
}

#[test]
fn test_update_qty_negative_never_reaches_store() {
    let store = RecordingStore::default();
    let service = ProductService::new(&store);

    let err = service.update_qty(1, -1).unwrap_err();
    assert!(matches!(err, ShopError::ValidationError { .. }));
    assert!(store.calls().is_empty());
}

#[test]
fn test_update_qty_persists() -> Result<()> {
    let store = MemoryStore::new();
    let service = ProductService::new(&store);
    service.add_product(&product(1, "Mug", 9.5))?;

    service.update_qty(1, 0)?;
    service.update_qty(1, 7)?;

    let mug = service.get_product(1)?;
    assert_eq!(mug.qty, 7);
    assert_eq!(mug.cost, Decimal::new(95, 1));
    Ok(())
}
