use crate::core::{Pipeline, RunOutcome};
use crate::utils::error::Result;
use std::time::Instant;

pub struct ReconcileEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ReconcileEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs extract, transform and load in order, stopping at the first error.
    pub async fn run(&self) -> Result<RunOutcome> {
        let started = Instant::now();
        tracing::info!("Starting price reconciliation...");

        // Extract
        let batch = self.pipeline.extract().await?;
        tracing::debug!(
            "Extracted {} products and {} price changes in {:?}",
            batch.products.len(),
            batch.changes.len(),
            started.elapsed()
        );

        // Transform
        let reconciliation = self.pipeline.transform(&batch)?;

        // Load
        let outcome = self.pipeline.load(&reconciliation).await?;
        tracing::info!(
            "Reconciliation finished in {:?}: {} matches, {} reports written",
            started.elapsed(),
            outcome.matched,
            outcome.written.len()
        );

        Ok(outcome)
    }
}
