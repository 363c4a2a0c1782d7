pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::cli::LocalStorage;

pub use core::{document::DocumentPipeline, engine::NavEngine, tree::MenuTree};
pub use domain::model::{MenuItem, PageItem, SiteDocument};
pub use utils::error::{NavError, Result};
