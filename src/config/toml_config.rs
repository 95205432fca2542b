use crate::utils::error::{DashboardError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_YEAR: i32 = 2000;
pub const DEFAULT_COUNTRY_COUNT: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub page: PageSettings,
    pub filters: FilterSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSettings {
    pub title: String,
    pub heading: String,
    pub source_label: String,
    pub source_url: String,
    pub author: String,
    pub author_url: String,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            title: "Dashboard de Nacimientos y Muertes Estimadas".to_string(),
            heading: "Dashboard de Nacimientos 🍼 y Muertes ⚰️ Estimadas".to_string(),
            source_label: "Kaggle Dataset".to_string(),
            source_url: "https://www.kaggle.com/datasets/shreyasur965/births-and-deaths"
                .to_string(),
            author: "Ariel Cerda".to_string(),
            author_url: "https://x.com/arielcerdap".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    pub default_year: i32,
    pub default_country_count: usize,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            default_year: DEFAULT_YEAR,
            default_country_count: DEFAULT_COUNTRY_COUNT,
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DashboardError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DashboardError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DASHBOARD_AUTHOR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DashboardError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("page.title", &self.page.title)?;
        validation::validate_url("page.source_url", &self.page.source_url)?;
        validation::validate_url("page.author_url", &self.page.author_url)?;
        validation::validate_range("filters.default_year", self.filters.default_year, 0, 3000)?;
        validation::validate_positive_number(
            "filters.default_country_count",
            self.filters.default_country_count,
            1,
        )?;
        Ok(())
    }
}
