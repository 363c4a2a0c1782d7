use crate::config::toml_config::TomlDocument;
use crate::core::render::{render_outline, render_pages, OutlineOptions};
use crate::core::tree::MenuTree;
use crate::domain::model::SiteDocument;
use crate::domain::ports::{ConfigProvider, DocumentStage, OutputFormat, Storage};
use crate::utils::error::{NavError, Result};
use async_trait::async_trait;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Toml,
}

impl InputFormat {
    pub fn from_path(path: &str) -> Result<Self> {
        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => Ok(InputFormat::Json),
            Some("toml") => Ok(InputFormat::Toml),
            _ => Err(NavError::UnsupportedFormat {
                path: path.to_string(),
            }),
        }
    }
}

pub fn parse_document(format: InputFormat, data: &[u8]) -> Result<SiteDocument> {
    match format {
        InputFormat::Json => Ok(serde_json::from_slice(data)?),
        InputFormat::Toml => {
            let text = std::str::from_utf8(data).map_err(|e| {
                NavError::invalid_field("input", "<binary>", format!("not UTF-8: {}", e))
            })?;
            TomlDocument::from_toml_str(text)
        }
    }
}

pub fn encode_document(format: OutputFormat, document: &SiteDocument) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(document)?),
        OutputFormat::Toml => TomlDocument::to_toml_string(document),
        OutputFormat::Outline => {
            let tree = MenuTree::new(document.menu.clone());
            let mut out = render_outline(
                &tree,
                OutlineOptions {
                    respect_expanded: true,
                    show_urls: true,
                },
            );
            if !document.pages.is_empty() {
                out.push_str("\nPages:\n");
                out.push_str(&render_pages(&document.pages));
            }
            Ok(out)
        }
    }
}

/// Reads the input through `input`, writes the result through `output`.
pub struct DocumentPipeline<S: Storage, C: ConfigProvider> {
    input: S,
    output: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> DocumentPipeline<S, C> {
    pub fn new(input: S, output: S, config: C) -> Self {
        Self {
            input,
            output,
            config,
        }
    }

    fn output_file_name(&self) -> String {
        let stem = Path::new(self.config.input_path())
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("menu");
        format!("{}.{}", stem, self.config.output_format().extension())
    }

    /// True when the output location is the input file itself. A target
    /// that does not exist yet cannot be the input.
    async fn targets_input(&self, output_location: &Path) -> bool {
        let input = tokio::fs::canonicalize(self.config.input_path()).await;
        let output = tokio::fs::canonicalize(output_location).await;
        matches!((input, output), (Ok(input), Ok(output)) if input == output)
    }
}

#[async_trait]
impl<S: Storage, C: ConfigProvider> DocumentStage for DocumentPipeline<S, C> {
    async fn load(&self) -> Result<SiteDocument> {
        let path = self.config.input_path();
        let format = InputFormat::from_path(path)?;
        tracing::debug!("Reading {} as {:?}", path, format);

        let data = self.input.read_file(path).await?;
        parse_document(format, &data)
    }

    async fn apply(&self, document: SiteDocument) -> Result<SiteDocument> {
        let mut tree = MenuTree::new(document.menu);

        if self.config.collapse_all() {
            tree.collapse_all();
            tracing::info!("Collapsed all menu items");
        }
        if self.config.expand_all() {
            tree.expand_all();
            tracing::info!("Expanded all menu items");
        }
        if let Some(id) = self.config.reveal() {
            tree.expand_to(id)?;
            tracing::info!("Revealed menu item '{}'", id);
        }

        Ok(SiteDocument {
            menu: tree.into_items(),
            ..document
        })
    }

    async fn store(&self, document: SiteDocument) -> Result<String> {
        let body = encode_document(self.config.output_format(), &document)?;
        let file_name = self.output_file_name();
        let location = Path::new(self.config.output_path()).join(&file_name);

        if self.targets_input(&location).await {
            tracing::warn!("Refusing to overwrite input {}", location.display());
            return Err(NavError::WouldOverwriteInput {
                path: location.to_string_lossy().into_owned(),
            });
        }

        self.output.write_file(&file_name, body.as_bytes()).await?;
        Ok(location.to_string_lossy().into_owned())
    }
}
