use crate::utils::error::Result;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

/// Settings the dashboard needs at startup, regardless of where they come from.
pub trait ConfigProvider: Send + Sync {
    fn data_path(&self) -> &str;
    fn default_year(&self) -> i32;
    fn default_country_count(&self) -> usize;
}
