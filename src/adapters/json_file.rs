use crate::adapters::state::ShopSnapshot;
use crate::core::{CartStore, ProductStore, Record};
use crate::utils::error::{Result, ShopError};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Store backed by a single pretty-printed JSON file, rewritten after every mutation.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    state: Mutex<ShopSnapshot>,
}

impl JsonFileStore {
    /// 開啟資料檔；檔案不存在時從空資料開始
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let snapshot = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                ShopSnapshot::default()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            tracing::info!("Data file {} not found, starting empty", path.display());
            ShopSnapshot::default()
        };

        tracing::debug!(
            "Opened {} with {} products and {} cart rows",
            path.display(),
            snapshot.products.len(),
            snapshot.carts.len()
        );

        Ok(Self {
            path,
            state: Mutex::new(snapshot),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, ShopSnapshot>> {
        self.state
            .lock()
            .map_err(|_| ShopError::store("json store lock poisoned"))
    }

    /// Applies a mutation and writes the result; the file is left untouched if the mutation fails.
    fn mutate<F>(&self, change: F) -> Result<()>
    where
        F: FnOnce(&mut ShopSnapshot) -> Result<()>,
    {
        let mut state = self.lock()?;
        let mut next = state.clone();
        change(&mut next)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(&next)?)?;

        *state = next;
        Ok(())
    }
}

impl ProductStore for JsonFileStore {
    fn list_products(&self) -> Result<Vec<Record>> {
        Ok(self.lock()?.products.clone())
    }

    fn get_product(&self, product_id: i64) -> Result<Option<Record>> {
        Ok(self.lock()?.find_product(product_id).cloned())
    }

    fn add_product(&self, record: &Record) -> Result<()> {
        self.mutate(|state| state.add_product(record))
    }

    fn update_qty(&self, product_id: i64, qty: i64) -> Result<()> {
        self.mutate(|state| state.update_qty(product_id, qty))
    }
}

impl CartStore for JsonFileStore {
    fn get_cart(&self, username: &str) -> Result<Vec<Record>> {
        Ok(self.lock()?.cart_rows(username))
    }

    fn add_to_cart(&self, username: &str, product_id: i64) -> Result<()> {
        self.mutate(|state| state.add_to_cart(username, product_id))
    }

    fn remove_from_cart(&self, username: &str, product_id: i64) -> Result<()> {
        self.mutate(|state| state.remove_from_cart(username, product_id))
    }

    fn delete_cart(&self, username: &str) -> Result<()> {
        self.mutate(|state| {
            state.delete_cart(username);
            Ok(())
        })
    }
}
