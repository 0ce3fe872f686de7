use thiserror::Error;

/// 商品資料不符合基本約束
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductError {
    #[error("either sku or barcode must be set")]
    MissingIdentifier,
}

#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Spreadsheet error: {0}")]
    SpreadsheetError(#[from] calamine::Error),

    #[error("Workbook contains no worksheet")]
    MissingSheet,

    #[error("Field layout error in `{field}`: {reason}")]
    LayoutError { field: String, reason: String },

    #[error("Invalid product at row {row}: {source}")]
    InvalidProduct {
        row: u32,
        #[source]
        source: ProductError,
    },

    #[error("Invalid cell {column}{row} ({value:?}): {reason}")]
    InvalidCell {
        row: u32,
        column: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}' ({value:?}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl ReconcileError {
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ReconcileError::IoError(_) => {
                "Check that the input files are readable and the output directory is writable"
            }
            ReconcileError::SerializationError(_) => "Report data could not be encoded as JSON",
            ReconcileError::SpreadsheetError(_) | ReconcileError::MissingSheet => {
                "Re-export the inventory from the point of sale as an .xlsx workbook"
            }
            ReconcileError::LayoutError { .. } => {
                "The fixed-width field layout is inconsistent; fix the layout table"
            }
            ReconcileError::InvalidProduct { .. } => {
                "Every inventory row needs a SKU or a barcode; fill one in and re-export"
            }
            ReconcileError::InvalidCell { .. } => {
                "Fix the offending inventory cell so it holds a plain decimal amount"
            }
            ReconcileError::ConfigError { .. }
            | ReconcileError::InvalidConfigValueError { .. } => {
                "Review the settings file against the documented keys"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ReconcileError>;
