pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::ports::{ConfigProvider, OutputFormat};
#[cfg(feature = "cli")]
use crate::utils::error::{NavError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Json,
    Toml,
    Outline,
}

#[cfg(feature = "cli")]
impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Toml => OutputFormat::Toml,
            FormatArg::Outline => OutputFormat::Outline,
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "navtree")]
#[command(about = "Load, check and reshape site navigation menus")]
pub struct CliConfig {
    /// Menu document (.json or .toml)
    #[arg(short, long)]
    pub input: String,

    /// Output directory
    #[arg(short, long = "output", default_value = "./output")]
    pub output_path: String,

    #[arg(short, long, value_enum, default_value = "json")]
    pub format: FormatArg,

    #[arg(long, conflicts_with = "collapse_all")]
    pub expand_all: bool,

    #[arg(long)]
    pub collapse_all: bool,

    /// Expand every ancestor of this menu item id
    #[arg(long)]
    pub reveal: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_format(&self) -> OutputFormat {
        self.format.into()
    }

    fn expand_all(&self) -> bool {
        self.expand_all
    }

    fn collapse_all(&self) -> bool {
        self.collapse_all
    }

    fn reveal(&self) -> Option<&str> {
        self.reveal.as_deref()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        crate::utils::validation::validate_non_empty_string("input", &self.input)?;
        crate::utils::validation::validate_non_empty_string("output_path", &self.output_path)?;
        if self.expand_all && self.collapse_all {
            return Err(NavError::ConfigError {
                message: "--expand-all and --collapse-all are mutually exclusive".to_string(),
            });
        }
        if let Some(id) = &self.reveal {
            crate::utils::validation::validate_non_empty_string("reveal", id)?;
        }
        Ok(())
    }
}
