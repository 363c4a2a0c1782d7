pub mod document;
pub mod engine;
pub mod render;
pub mod tree;

pub use crate::domain::model::{MenuItem, PageItem, SiteDocument};
pub use crate::domain::ports::{ConfigProvider, DocumentStage, OutputFormat, Storage};
pub use crate::utils::error::Result;
