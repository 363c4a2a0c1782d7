use crate::core::tree::MenuTree;
use crate::domain::ports::DocumentStage;
use crate::utils::error::Result;
use crate::utils::validation::Validate;

pub struct NavEngine<S: DocumentStage> {
    stage: S,
}

impl<S: DocumentStage> NavEngine<S> {
    pub fn new(stage: S) -> Self {
        Self { stage }
    }

    /// load → validate → apply → store. Returns the output location.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("Loading menu document...");
        let document = self.stage.load().await?;

        let tree = MenuTree::new(document.menu.clone());
        tracing::info!(
            "Loaded {} menu items ({} levels) and {} pages",
            tree.len(),
            tree.depth(),
            document.pages.len()
        );

        document.validate()?;
        tracing::debug!("Document passed validation");

        let document = self.stage.apply(document).await?;

        let output_path = self.stage.store(document).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
