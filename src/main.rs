use anyhow::Context;
use clap::Parser;
use price_reconcile::utils::{logger, validation::Validate};
use price_reconcile::{
    CliConfig, LocalStorage, ReconcileEngine, ReconcileError, ReconcilePipeline, RunOutcome,
};
use std::process::ExitCode;

const EXIT_MISSING_SUGGESTED_RETAIL: u8 = 1;
const EXIT_FAILURE: u8 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    match run(config).await {
        Ok(outcome) if outcome.is_success() => {
            tracing::info!("✅ Reconciliation completed: {} matches", outcome.matched);
            ExitCode::SUCCESS
        }
        Ok(outcome) => {
            tracing::error!(
                "❌ {} matched item(s) have no suggested retail",
                outcome.missing_suggested_retail.len()
            );
            ExitCode::from(EXIT_MISSING_SUGGESTED_RETAIL)
        }
        Err(e) => {
            tracing::error!("❌ Reconciliation failed: {:#}", e);
            if let Some(err) = e.downcast_ref::<ReconcileError>() {
                tracing::error!("💡 Suggestion: {}", err.recovery_suggestion());
            }
            eprintln!("❌ {:#}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

async fn run(config: CliConfig) -> anyhow::Result<RunOutcome> {
    let settings = config.settings().context("failed to load settings")?;
    settings.validate().context("invalid settings")?;
    tracing::debug!("Settings: {:?}", settings);

    let storage = LocalStorage::new(config.outdir.clone());
    let pipeline = ReconcilePipeline::new(storage, config, settings);
    let engine = ReconcileEngine::new(pipeline);

    let outcome = engine.run().await?;
    Ok(outcome)
}
