pub mod engine;
pub mod matcher;
pub mod pipeline;
pub mod report;

pub use crate::domain::model::{MatchRecord, PriceChangeRecord, Product};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
pub use pipeline::{Batch, Pipeline, Reconciliation, RunOutcome};
