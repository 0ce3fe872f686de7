//! Point-of-sale inventory export reader.
//!
//! The export is a workbook whose product table starts at a fixed anchor cell
//! (A29). Columns map positionally onto [`ProductDraft`] fields. The table ends
//! at the first row holding any empty cell, so a blank optional cell also ends
//! the scan; the export is relied on to fill every column.

use crate::config::settings::InventorySettings;
use crate::domain::model::{Product, ProductDraft};
use crate::utils::error::{ReconcileError, Result};
use calamine::{open_workbook_auto, DataType, Range, Reader};
use std::path::Path;

/// Number of columns read per product row.
pub const PRODUCT_COLUMNS: u32 = 10;

const PRODUCT_CLASS: usize = 0;
const CATEGORY: usize = 1;
const SUBCATEGORY: usize = 2;
const NAME: usize = 3;
const DESCRIPTION: usize = 4;
const PRICE: usize = 5;
const COST: usize = 6;
const SKU: usize = 7;
const BARCODE: usize = 8;
const ACTIVE: usize = 9;

/// Converts a 1-based column index to its spreadsheet letters (1 -> A, 27 -> AA).
pub fn column_name(mut column: u32) -> String {
    let mut name = Vec::new();
    while column > 0 {
        let rem = ((column - 1) % 26) as u8;
        name.push((b'A' + rem) as char);
        column = (column - 1) / 26;
    }
    name.iter().rev().collect()
}

/// Opens the workbook and reads every product from its first worksheet.
pub fn read_inventory<P: AsRef<Path>>(
    path: P,
    settings: &InventorySettings,
) -> Result<Vec<Product>> {
    let mut workbook = open_workbook_auto(path.as_ref())?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ReconcileError::MissingSheet)??;

    ProductRows::new(&range, settings).collect()
}

/// Lazily yields products from a worksheet range, starting at the anchor.
pub struct ProductRows<'r> {
    range: &'r Range<DataType>,
    row: u32,
    first_column: u32,
    finished: bool,
}

impl<'r> ProductRows<'r> {
    pub fn new(range: &'r Range<DataType>, settings: &InventorySettings) -> Self {
        Self {
            range,
            row: settings.anchor_row.saturating_sub(1),
            first_column: settings.anchor_column.saturating_sub(1),
            finished: false,
        }
    }

    fn cells(&self) -> Vec<&'r DataType> {
        (0..PRODUCT_COLUMNS)
            .map(|offset| {
                self.range
                    .get_value((self.row, self.first_column + offset))
                    .unwrap_or(&DataType::Empty)
            })
            .collect()
    }

    fn parse_row(&self, cells: &[&DataType]) -> Result<Product> {
        let excel_row = self.row + 1;
        let cents = |index: usize| -> Result<Option<i64>> {
            to_cents(cells[index]).map_err(|reason| ReconcileError::InvalidCell {
                row: excel_row,
                column: column_name(self.first_column + index as u32 + 1),
                value: cells[index].to_string(),
                reason,
            })
        };

        let price = cents(PRICE)?.unwrap_or(0);
        let cost = cents(COST)?.filter(|&cost| cost != 0);

        let draft = ProductDraft {
            product_class: text(cells[PRODUCT_CLASS]),
            category: text(cells[CATEGORY]),
            subcategory: text(cells[SUBCATEGORY]),
            name: text(cells[NAME]),
            description: Some(text(cells[DESCRIPTION])),
            price,
            cost,
            sku: Some(text(cells[SKU])),
            barcode: Some(text(cells[BARCODE])),
            active: matches!(cells[ACTIVE], DataType::String(s) if s == "Yes"),
        };

        Product::try_from(draft).map_err(|source| ReconcileError::InvalidProduct {
            row: excel_row,
            source,
        })
    }
}

impl Iterator for ProductRows<'_> {
    type Item = Result<Product>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let cells = self.cells();
        if cells.iter().any(|cell| is_blank(cell)) {
            tracing::debug!("Inventory table ends before row {}", self.row + 1);
            self.finished = true;
            return None;
        }

        let product = self.parse_row(&cells);
        if product.is_err() {
            self.finished = true;
        }
        self.row += 1;
        Some(product)
    }
}

fn is_blank(cell: &DataType) -> bool {
    match cell {
        DataType::Empty => true,
        DataType::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Cell text with whole numbers rendered without a fraction, so numeric
/// barcodes read back as digits.
fn text(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.trim().to_string(),
        DataType::Int(i) => i.to_string(),
        DataType::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}

/// Decimal currency to integer cents. Empty cells give `None`.
fn to_cents(cell: &DataType) -> std::result::Result<Option<i64>, String> {
    let amount = match cell {
        DataType::Empty => return Ok(None),
        DataType::Int(i) => return Ok(Some(i * 100)),
        DataType::Float(f) => *f,
        DataType::String(s) => {
            let cleaned: String = s
                .trim()
                .chars()
                .filter(|c| !matches!(c, '$' | ','))
                .collect();
            if cleaned.is_empty() {
                return Ok(None);
            }
            cleaned
                .parse::<f64>()
                .map_err(|_| "not a decimal amount".to_string())?
        }
        _ => return Err("not a decimal amount".to_string()),
    };

    if !amount.is_finite() {
        return Err("amount is not finite".to_string());
    }
    Ok(Some((amount * 100.0).round() as i64))
}
