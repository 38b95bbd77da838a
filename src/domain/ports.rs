use crate::domain::model::Record;
use crate::utils::error::Result;

pub trait ProductStore {
    fn list_products(&self) -> Result<Vec<Record>>;
    fn get_product(&self, product_id: i64) -> Result<Option<Record>>;
    fn add_product(&self, record: &Record) -> Result<()>;
    fn update_qty(&self, product_id: i64, qty: i64) -> Result<()>;
}

pub trait CartStore {
    /// Zero or more raw rows; each may carry an optional `contents` string.
    fn get_cart(&self, username: &str) -> Result<Vec<Record>>;
    fn add_to_cart(&self, username: &str, product_id: i64) -> Result<()>;
    fn remove_from_cart(&self, username: &str, product_id: i64) -> Result<()>;
    fn delete_cart(&self, username: &str) -> Result<()>;
}
