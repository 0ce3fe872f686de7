use crate::adapters::inventory::read_inventory;
use crate::adapters::supplier::SupplierReader;
use crate::config::settings::Settings;
use crate::core::matcher::{duplicate_upcs, match_records};
use crate::core::report::{Report, ReportMode};
use crate::core::{ConfigProvider, Storage};
use crate::domain::model::{MatchRecord, PriceChangeRecord, Product};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Both inputs, fully read into memory.
#[derive(Debug, Clone, Default)]
pub struct Batch {
    pub products: Vec<Product>,
    pub changes: Vec<PriceChangeRecord>,
}

/// Matches and the reports derived from them, borrowing from a [`Batch`].
#[derive(Debug, Clone)]
pub struct Reconciliation<'a> {
    pub matches: Vec<MatchRecord<'a>>,
    pub verbose: Report<'a>,
    pub minimal: Report<'a>,
    pub missing_suggested_retail: Report<'a>,
}

impl Reconciliation<'_> {
    pub fn missing_upcs(&self) -> Vec<&str> {
        self.missing_suggested_retail.upcs().collect()
    }
}

/// Result of a run. A run "fails" only when some match has no suggested
/// retail; hard errors are returned as `Err` instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutcome {
    pub matched: usize,
    pub written: Vec<String>,
    pub missing_suggested_retail: Vec<String>,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        self.missing_suggested_retail.is_empty()
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Batch>;
    fn transform<'a>(&self, batch: &'a Batch) -> Result<Reconciliation<'a>>;
    async fn load(&self, result: &Reconciliation<'_>) -> Result<RunOutcome>;
}

pub struct ReconcilePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    settings: Settings,
}

impl<S: Storage, C: ConfigProvider> ReconcilePipeline<S, C> {
    pub fn new(storage: S, config: C, settings: Settings) -> Self {
        Self {
            storage,
            config,
            settings,
        }
    }

    async fn write_report(&self, name: &str, report: &Report<'_>) -> Result<()> {
        let data = serde_json::to_vec_pretty(report)?;
        tracing::debug!("Writing {} ({} entries, {} bytes)", name, report.len(), data.len());
        self.storage.write_file(name, &data).await
    }
}

#[async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ReconcilePipeline<S, C> {
    async fn extract(&self) -> Result<Batch> {
        let inventory_file = self.config.inventory_file();
        tracing::info!("Revel inventory file: {}", inventory_file.display());
        let products = read_inventory(inventory_file, &self.settings.inventory)?;
        tracing::info!("Read {} inventory items", products.len());

        let pricechange_file = self.config.pricechange_file();
        tracing::info!("Price change file: {}", pricechange_file.display());
        let changes = SupplierReader::open(pricechange_file, &self.settings.supplier)?
            .collect::<Result<Vec<_>>>()?;
        tracing::info!("Read {} price change records", changes.len());

        Ok(Batch { products, changes })
    }

    fn transform<'a>(&self, batch: &'a Batch) -> Result<Reconciliation<'a>> {
        let matches = match_records(&batch.changes, &batch.products);
        tracing::info!(
            "Matched {} of {} price changes to inventory",
            matches.len(),
            batch.changes.len()
        );

        for upc in duplicate_upcs(&matches) {
            tracing::warn!("UPC {} has more than one price change; the last one is reported", upc);
        }

        let missing: Vec<_> = matches
            .iter()
            .filter(|m| !m.change.has_suggested_retail())
            .collect();

        Ok(Reconciliation {
            verbose: Report::from_matches(&matches, ReportMode::Verbose),
            minimal: Report::from_matches(&matches, ReportMode::Minimal),
            missing_suggested_retail: Report::from_matches(missing, ReportMode::Verbose),
            matches,
        })
    }

    async fn load(&self, result: &Reconciliation<'_>) -> Result<RunOutcome> {
        let reports = &self.settings.reports;
        let output_dir = self.config.output_dir();

        if result.matches.is_empty() {
            tracing::warn!("No price changes matched the inventory; writing empty reports");
        }

        self.write_report(&reports.verbose, &result.verbose).await?;
        tracing::info!(
            "Created verbose report @ {}",
            output_dir.join(&reports.verbose).display()
        );

        self.write_report(&reports.minimal, &result.minimal).await?;
        tracing::info!(
            "Created minimal report @ {}",
            output_dir.join(&reports.minimal).display()
        );

        let mut outcome = RunOutcome {
            matched: result.matches.len(),
            written: vec![reports.verbose.clone(), reports.minimal.clone()],
            missing_suggested_retail: Vec::new(),
        };

        let missing_path = output_dir.join(&reports.missing_suggested_retail);
        if result.missing_suggested_retail.is_empty() {
            self.storage
                .remove_file(&reports.missing_suggested_retail)
                .await?;
            tracing::info!("No records were missing suggested retail.");
            return Ok(outcome);
        }

        let missing = result.missing_upcs();
        tracing::error!("The following UPCs had no suggested retail: {:?}", missing);
        tracing::error!("See {} for specifics.", missing_path.display());

        self.write_report(
            &reports.missing_suggested_retail,
            &result.missing_suggested_retail,
        )
        .await?;

        outcome
            .written
            .push(reports.missing_suggested_retail.clone());
        outcome.missing_suggested_retail = missing.into_iter().map(str::to_string).collect();
        Ok(outcome)
    }
}
