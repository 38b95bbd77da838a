use crate::core::cart::MalformedRowPolicy;
use crate::utils::error::{Result, ShopError};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{validate_one_of, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_DATA_PATH: &str = "./shop-data.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub cart: CartConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub data_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_path: DEFAULT_DATA_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartConfig {
    /// "skip" 或 "fail"
    pub on_malformed_row: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// "compact" 或 "json"
    pub format: Option<String>,
}

impl ShopConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ShopError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SHOP_DATA})；未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ShopError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn data_path(&self) -> &str {
        &self.store.data_path
    }

    pub fn malformed_row_policy(&self) -> Result<MalformedRowPolicy> {
        match &self.cart.on_malformed_row {
            Some(value) => value.parse(),
            None => Ok(MalformedRowPolicy::default()),
        }
    }

    pub fn log_format(&self) -> LogFormat {
        match self.logging.format.as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

impl Validate for ShopConfig {
    fn validate(&self) -> Result<()> {
        validate_path("store.data_path", &self.store.data_path)?;

        self.malformed_row_policy()?;

        if let Some(format) = &self.logging.format {
            validate_one_of("logging.format", format, &["compact", "json"])?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let config = ShopConfig::from_toml_str(
            r#"
[store]
data_path = "./data/shop.json"

[cart]
on_malformed_row = "fail"

[logging]
format = "json"
"#,
        )
        .unwrap();

        assert_eq!(config.data_path(), "./data/shop.json");
        assert_eq!(config.malformed_row_policy().unwrap(), MalformedRowPolicy::Fail);
        assert_eq!(config.log_format(), LogFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ShopConfig::from_toml_str("").unwrap();

        assert_eq!(config.data_path(), DEFAULT_DATA_PATH);
        assert_eq!(config.malformed_row_policy().unwrap(), MalformedRowPolicy::Skip);
        assert_eq!(config.log_format(), LogFormat::Compact);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SMALL_SHOP_TEST_DATA", "/tmp/from-env.json");

        let config = ShopConfig::from_toml_str(
            r#"
[store]
data_path = "${SMALL_SHOP_TEST_DATA}"
"#,
        )
        .unwrap();

        assert_eq!(config.data_path(), "/tmp/from-env.json");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let config = ShopConfig::from_toml_str(
            r#"
[cart]
on_malformed_row = "ignore"
"#,
        )
        .unwrap();
        assert!(matches!(config.validate(), Err(ShopError::ConfigError { .. })));

        assert!(ShopConfig::from_toml_str("[store]\ndata_path = 3").is_err());
    }

    #[test]
    fn test_policy_case_matches_parser() {
        let config = ShopConfig::from_toml_str(
            r#"
[cart]
on_malformed_row = "Fail"
"#,
        )
        .unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.malformed_row_policy().unwrap(), MalformedRowPolicy::Fail);
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[store]\ndata_path = \"shop.json\"").unwrap();

        let config = ShopConfig::from_file(file.path()).unwrap();
        assert_eq!(config.data_path(), "shop.json");
    }
}
