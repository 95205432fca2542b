pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use toml_config::{PageSettings, TomlConfig};

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "births-deaths-dashboard")]
#[command(about = "Interactive births and deaths dashboard served over HTTP")]
pub struct CliConfig {
    /// Semicolon-delimited CSV with the births/deaths dataset
    #[arg(long, default_value = "births-and-deaths-projected-to-2100.csv")]
    pub data_path: String,

    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, default_value = "8501")]
    pub port: u16,

    /// Optional TOML file with page texts and filter defaults
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the year selected when no filter is given
    #[arg(long)]
    pub default_year: Option<i32>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    /// Load and summarize the dataset, then exit without serving
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 合併命令列參數與 TOML 檔案設定
    pub fn resolve(&self) -> Result<DashboardConfig> {
        let mut file_config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading page configuration from: {}", path);
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };

        if let Some(year) = self.default_year {
            tracing::info!("🔧 Default year overridden to: {}", year);
            file_config.filters.default_year = year;
        }

        Ok(DashboardConfig {
            data_path: self.data_path.clone(),
            host: self.host.clone(),
            port: self.port,
            settings: file_config,
        })
    }
}

/// Fully resolved settings the server runs with.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub data_path: String,
    pub host: String,
    pub port: u16,
    pub settings: TomlConfig,
}

impl DashboardConfig {
    pub fn page(&self) -> &PageSettings {
        &self.settings.page
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: "births-and-deaths-projected-to-2100.csv".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8501,
            settings: TomlConfig::default(),
        }
    }
}

impl ConfigProvider for DashboardConfig {
    fn data_path(&self) -> &str {
        &self.data_path
    }

    fn default_year(&self) -> i32 {
        self.settings.filters.default_year
    }

    fn default_country_count(&self) -> usize {
        self.settings.filters.default_country_count
    }
}

impl Validate for DashboardConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("data_path", &self.data_path)?;
        validation::validate_non_empty_string("host", &self.host)?;
        validation::validate_positive_number("port", self.port as usize, 1)?;
        self.settings.validate()
    }
}
