pub mod config;
pub mod core;
pub mod domain;
pub mod render;
pub mod server;
pub mod utils;

pub use config::{cli::LocalStorage, DashboardConfig};

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use core::dashboard::Dashboard;
pub use utils::error::{DashboardError, Result};
