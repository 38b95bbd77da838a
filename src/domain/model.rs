use crate::utils::error::{Result, ShopError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;

/// Loosely-typed mapping exchanged with the stores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    pub data: HashMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from a JSON object; anything else is a serialization error.
    pub fn from_json(value: Value) -> Result<Self> {
        let data = serde_json::from_value(value)?;
        Ok(Self { data })
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.data.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    fn require(&self, field: &str) -> Result<&Value> {
        self.data.get(field).ok_or_else(|| ShopError::MissingField {
            field: field.to_string(),
        })
    }

    pub fn require_i64(&self, field: &str) -> Result<i64> {
        let value = self.require(field)?;
        value.as_i64().ok_or_else(|| invalid(field, "expected an integer", value))
    }

    pub fn require_string(&self, field: &str) -> Result<String> {
        let value = self.require(field)?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| invalid(field, "expected a string", value))
    }

    pub fn require_decimal(&self, field: &str) -> Result<Decimal> {
        decimal_from_value(field, self.require(field)?)
    }

    /// `null` counts as absent.
    pub fn optional_i64(&self, field: &str) -> Result<Option<i64>> {
        match self.data.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => value
                .as_i64()
                .map(Some)
                .ok_or_else(|| invalid(field, "expected an integer", value)),
        }
    }
}

fn invalid(field: &str, reason: &str, value: &Value) -> ShopError {
    ShopError::InvalidField {
        field: field.to_string(),
        reason: format!("{}, got {}", reason, value),
    }
}

/// Reads a decimal from a JSON number or numeric string without going through f64.
pub fn decimal_from_value(field: &str, value: &Value) -> Result<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        other => return Err(invalid(field, "expected a number", other)),
    };

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|e| ShopError::InvalidField {
            field: field.to_string(),
            reason: format!("'{}' is not a decimal: {}", text, e),
        })
}

/// Writes a JSON number when it reads back as the same decimal, otherwise the exact string.
pub fn decimal_to_value(value: Decimal) -> Value {
    let text = value.to_string();
    match serde_json::Number::from_str(&text) {
        Ok(number) if Decimal::from_str(&number.to_string()).ok() == Some(value) => {
            Value::Number(number)
        }
        _ => Value::String(text),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub cost: Decimal,
    pub qty: i64,
}

impl Product {
    pub const REQUIRED_FIELDS: [&'static str; 4] = ["id", "name", "description", "cost"];

    /// Maps a store record into a product. `qty` defaults to 0; cost is not range-checked here.
    pub fn load(record: &Record) -> Result<Self> {
        Ok(Self {
            id: record.require_i64("id")?,
            name: record.require_string("name")?,
            description: record.require_string("description")?,
            cost: record.require_decimal("cost")?,
            qty: record.optional_i64("qty")?.unwrap_or(0),
        })
    }

    pub fn to_record(&self) -> Record {
        Record::new()
            .with("id", self.id)
            .with("name", self.name.as_str())
            .with("description", self.description.as_str())
            .with("cost", decimal_to_value(self.cost))
            .with("qty", self.qty)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub id: i64,
    pub username: String,
    pub contents: Vec<Product>,
    pub cost: Decimal,
}

impl Cart {
    pub const REQUIRED_FIELDS: [&'static str; 3] = ["id", "username", "cost"];

    /// Maps a record whose `contents` (if any) is a list of product records.
    pub fn load(record: &Record) -> Result<Self> {
        let contents = match record.get("contents") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| Record::from_json(item.clone()).and_then(|r| Product::load(&r)))
                .collect::<Result<Vec<_>>>()?,
            Some(other) => {
                return Err(invalid("contents", "expected a list of products", other));
            }
        };
        Self::from_row(record, contents)
    }

    /// Builds a cart from a stored row, taking already-resolved contents.
    pub fn from_row(record: &Record, contents: Vec<Product>) -> Result<Self> {
        Ok(Self {
            id: record.require_i64("id")?,
            username: record.require_string("username")?,
            contents,
            cost: record.require_decimal("cost")?,
        })
    }

    pub fn item_count(&self) -> usize {
        self.contents.len()
    }

    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "id": self.id,
            "username": self.username,
            "contents": self
                .contents
                .iter()
                .map(|p| serde_json::to_value(p.to_record()).unwrap_or(Value::Null))
                .collect::<Vec<_>>(),
            "cost": decimal_to_value(self.cost),
        })
    }
}

/// A persisted cart row: product IDs kept as a JSON-encoded string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartRow {
    pub id: i64,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
    pub cost: Decimal,
}

impl CartRow {
    pub fn new(id: i64, username: &str) -> Self {
        Self {
            id,
            username: username.to_string(),
            contents: Some("[]".to_string()),
            cost: Decimal::ZERO,
        }
    }

    pub fn with_contents(mut self, contents: &str) -> Self {
        self.contents = Some(contents.to_string());
        self
    }

    pub fn without_contents(mut self) -> Self {
        self.contents = None;
        self
    }

    pub fn with_cost(mut self, cost: Decimal) -> Self {
        self.cost = cost;
        self
    }

    pub fn product_ids(&self) -> Result<Vec<i64>> {
        let raw = self.contents.as_deref().unwrap_or("[]");
        Ok(serde_json::from_str(raw)?)
    }

    pub fn set_product_ids(&mut self, ids: &[i64]) -> Result<()> {
        self.contents = Some(serde_json::to_string(ids)?);
        Ok(())
    }

    pub fn to_record(&self) -> Record {
        let mut record = Record::new()
            .with("id", self.id)
            .with("username", self.username.as_str())
            .with("cost", decimal_to_value(self.cost));
        if let Some(contents) = &self.contents {
            record.insert("contents", contents.as_str());
        }
        record
    }
}
