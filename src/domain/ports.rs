use crate::domain::model::SiteDocument;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Toml,
    Outline,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Toml => "toml",
            OutputFormat::Outline => "txt",
        }
    }
}

/// Tree operations requested by the caller, applied in a fixed order:
/// collapse, expand, then reveal.
pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_format(&self) -> OutputFormat;
    fn expand_all(&self) -> bool;
    fn collapse_all(&self) -> bool;
    fn reveal(&self) -> Option<&str>;
}

#[async_trait]
pub trait DocumentStage: Send + Sync {
    async fn load(&self) -> Result<SiteDocument>;
    async fn apply(&self, document: SiteDocument) -> Result<SiteDocument>;
    async fn store(&self, document: SiteDocument) -> Result<String>;
}
