pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::storage::LocalStorage;
pub use config::{CliConfig, Settings};
pub use core::{
    engine::ReconcileEngine,
    pipeline::{ReconcilePipeline, RunOutcome},
};
pub use utils::error::{ReconcileError, Result};
