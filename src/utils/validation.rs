use crate::domain::model::Record;
use crate::utils::error::{Result, ShopError};
use rust_decimal::Decimal;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_required_keys(record: &Record, required: &[&str], entity: &str) -> Result<()> {
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|key| !record.contains_key(key))
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    Err(ShopError::validation(format!(
        "{} data must include keys: {} (missing: {})",
        entity,
        required.join(", "),
        missing.join(", ")
    )))
}

pub fn validate_non_negative_decimal(field_name: &str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(ShopError::validation(format!(
            "{} cannot be negative (got {})",
            field_name, value
        )));
    }
    Ok(())
}

pub fn validate_non_negative(field_name: &str, value: i64) -> Result<()> {
    if value < 0 {
        return Err(ShopError::validation(format!(
            "{} cannot be negative (got {})",
            field_name, value
        )));
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(ShopError::ConfigError {
            message: format!("{}: path cannot be empty", field_name),
        });
    }

    if path.contains('\0') {
        return Err(ShopError::ConfigError {
            message: format!("{}: path contains null bytes", field_name),
        });
    }

    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(ShopError::ConfigError {
        message: format!(
            "{}: unsupported value '{}'. Valid values: {}",
            field_name,
            value,
            allowed.join(", ")
        ),
    })
}
