pub mod dashboard;
pub mod filter;
pub mod loader;
pub mod normalize;

pub use crate::domain::model::{Dataset, Record};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
