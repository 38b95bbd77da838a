#![allow(dead_code)]

use serde_json::{json, Value};
use small_shop::{CartStore, ProductStore, Record, Result};
use std::cell::RefCell;

pub fn record(value: Value) -> Record {
    Record::from_json(value).unwrap()
}

pub fn product(id: i64, name: &str, cost: f64) -> Record {
    record(json!({"id": id, "name": name, "description": format!("{} description", name), "cost": cost}))
}

/// Store returning canned records and logging every call it receives.
#[derive(Default)]
pub struct RecordingStore {
    pub products: Vec<Record>,
    pub cart_rows: Vec<Record>,
    pub calls: RefCell<Vec<String>>,
}

impl RecordingStore {
    pub fn with_products(products: Vec<Record>) -> Self {
        Self {
            products,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn log(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl ProductStore for RecordingStore {
    fn list_products(&self) -> Result<Vec<Record>> {
        self.log("list_products".to_string());
        Ok(self.products.clone())
    }

    fn get_product(&self, product_id: i64) -> Result<Option<Record>> {
        self.log(format!("get_product({})", product_id));
        Ok(self
            .products
            .iter()
            .find(|r| r.get("id").and_then(|v| v.as_i64()) == Some(product_id))
            .cloned())
    }

    fn add_product(&self, record: &Record) -> Result<()> {
        self.log(format!("add_product({})", record.get("id").cloned().unwrap_or(Value::Null)));
        Ok(())
    }

    fn update_qty(&self, product_id: i64, qty: i64) -> Result<()> {
        self.log(format!("update_qty({}, {})", product_id, qty));
        Ok(())
    }
}

impl CartStore for RecordingStore {
    fn get_cart(&self, username: &str) -> Result<Vec<Record>> {
        self.log(format!("get_cart({})", username));
        Ok(self
            .cart_rows
            .iter()
            .filter(|r| r.get("username").and_then(|v| v.as_str()) == Some(username))
            .cloned()
            .collect())
    }

    fn add_to_cart(&self, username: &str, product_id: i64) -> Result<()> {
        self.log(format!("add_to_cart({}, {})", username, product_id));
        Ok(())
    }

    fn remove_from_cart(&self, username: &str, product_id: i64) -> Result<()> {
        self.log(format!("remove_from_cart({}, {})", username, product_id));
        Ok(())
    }

    fn delete_cart(&self, username: &str) -> Result<()> {
        self.log(format!("delete_cart({})", username));
        Ok(())
    }
}
