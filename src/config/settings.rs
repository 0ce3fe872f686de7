use crate::utils::error::{ReconcileError, Result};
use crate::utils::validation::{
    validate_member_number, validate_non_empty_string, validate_positive_number, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Tunables loaded from the optional `--config` TOML file. Every key has a
/// default matching the production feed and POS export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub supplier: SupplierSettings,
    pub inventory: InventorySettings,
    pub reports: ReportSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplierSettings {
    pub record_code: String,
    pub member_number: String,
}

impl Default for SupplierSettings {
    fn default() -> Self {
        Self {
            record_code: "PC1".to_string(),
            member_number: "06969".to_string(),
        }
    }
}

impl SupplierSettings {
    /// Prefix a line must start with to be read as a price-change record.
    pub fn record_prefix(&self) -> String {
        format!("{}{}", self.record_code, self.member_number)
    }
}

/// 1-based anchor of the product table (row 29, column A by default).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventorySettings {
    pub anchor_row: u32,
    pub anchor_column: u32,
}

impl Default for InventorySettings {
    fn default() -> Self {
        Self {
            anchor_row: 29,
            anchor_column: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub verbose: String,
    pub minimal: String,
    pub missing_suggested_retail: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            verbose: "verbose_report.json".to_string(),
            minimal: "minimal_report.json".to_string(),
            missing_suggested_retail: "no_suggested_retail.json".to_string(),
        }
    }
}

impl Settings {
    /// 從 TOML 檔案載入設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ReconcileError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析設定
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ReconcileError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MEMBER_NUMBER})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ReconcileError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        let code = &self.supplier.record_code;
        validate_non_empty_string("supplier.record_code", code)?;
        if code.chars().count() != 3 {
            return Err(ReconcileError::InvalidConfigValueError {
                field: "supplier.record_code".to_string(),
                value: code.clone(),
                reason: "Record code must be exactly 3 characters".to_string(),
            });
        }
        validate_member_number("supplier.member_number", &self.supplier.member_number)?;

        validate_positive_number("inventory.anchor_row", self.inventory.anchor_row as usize, 1)?;
        validate_positive_number(
            "inventory.anchor_column",
            self.inventory.anchor_column as usize,
            1,
        )?;

        let reports = [
            ("reports.verbose", &self.reports.verbose),
            ("reports.minimal", &self.reports.minimal),
            (
                "reports.missing_suggested_retail",
                &self.reports.missing_suggested_retail,
            ),
        ];
        let mut seen = HashSet::new();
        for (field, name) in reports {
            validate_non_empty_string(field, name)?;
            if !seen.insert(name.as_str()) {
                return Err(ReconcileError::InvalidConfigValueError {
                    field: field.to_string(),
                    value: name.clone(),
                    reason: "Report file names must be distinct".to_string(),
                });
            }
        }

        Ok(())
    }
}
