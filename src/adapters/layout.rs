//! Fixed-width field layouts of the supplier price-change feed.
//!
//! Positions are 1-based and inclusive, as printed in the supplier's record
//! documentation. A layout is checked once with [`validate_layout`] before any
//! line is read; extraction itself never fails.

use crate::domain::model::RecordField;
use crate::utils::error::{ReconcileError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Single(usize),
    Range(usize, usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub position: Position,
    pub description: &'static str,
}

impl FieldSpec {
    pub const fn single(name: &'static str, column: usize, description: &'static str) -> Self {
        Self {
            name,
            position: Position::Single(column),
            description,
        }
    }

    pub const fn range(
        name: &'static str,
        start: usize,
        end: usize,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            position: Position::Range(start, end),
            description,
        }
    }

    /// Zero-based start column and width.
    fn span(&self) -> Result<(usize, usize)> {
        let invalid = |reason: String| ReconcileError::LayoutError {
            field: self.name.to_string(),
            reason,
        };

        match self.position {
            Position::Single(0) => Err(invalid("position 0 is not a 1-based column".into())),
            Position::Single(column) => Ok((column - 1, 1)),
            Position::Range(0, _) => Err(invalid("range starts at column 0".into())),
            Position::Range(start, end) if end < start => Err(invalid(format!(
                "range end {} precedes start {}",
                end, start
            ))),
            Position::Range(start, end) => Ok((start - 1, end - start + 1)),
        }
    }

    /// Raw text of this field in `line`. Short lines yield whatever part of the
    /// field is present.
    pub fn extract(&self, line: &str) -> String {
        match self.span() {
            Ok((start, width)) => line.chars().skip(start).take(width).collect(),
            Err(_) => String::new(),
        }
    }
}

pub fn validate_layout(layout: &[FieldSpec]) -> Result<()> {
    for spec in layout {
        spec.span()?;
    }
    Ok(())
}

/// Checks positions and that the table lines up with [`RecordField::ALL`].
pub fn validate_record_layout(layout: &[FieldSpec]) -> Result<()> {
    validate_layout(layout)?;

    if layout.len() != RecordField::COUNT {
        return Err(ReconcileError::LayoutError {
            field: "<layout>".to_string(),
            reason: format!(
                "expected {} record fields, found {}",
                RecordField::COUNT,
                layout.len()
            ),
        });
    }

    for (spec, field) in layout.iter().zip(RecordField::ALL) {
        if spec.name != field.name() {
            return Err(ReconcileError::LayoutError {
                field: spec.name.to_string(),
                reason: format!("expected `{}` at this position", field.name()),
            });
        }
    }

    Ok(())
}

/// Looks up a field by name and extracts it.
pub fn extract_named(layout: &[FieldSpec], line: &str, name: &str) -> String {
    layout
        .iter()
        .find(|spec| spec.name == name)
        .map(|spec| spec.extract(line))
        .unwrap_or_default()
}

pub const FILE_HEADER_LAYOUT: [FieldSpec; 7] = [
    FieldSpec::range("record_type", 1, 3, "Should be H01, indicating file header."),
    FieldSpec::range("file_type", 4, 10, "Should be PRCCHGS, a price change file."),
    FieldSpec::range(
        "member_number",
        11,
        16,
        "First 5 bytes numeric, right justified, zero filled. Suffix alpha char or space.",
    ),
    FieldSpec::range("date", 17, 24, "YYYYMMDD"),
    FieldSpec::range("time", 25, 30, "HHMMSS"),
    FieldSpec::range("version_no", 31, 34, "Version number, 01.1"),
    FieldSpec::range("filler", 35, 80, "Spaces"),
];

pub const FILE_TRAILER_LAYOUT: [FieldSpec; 7] = [
    FieldSpec::range("record_type", 1, 3, "Should be T01, indicating file trailer."),
    FieldSpec::range("file_type", 4, 10, "Should be PRCCHGS, a price change file."),
    FieldSpec::range("member_number", 11, 16, "Member number, same as the H01 record."),
    FieldSpec::range("date", 17, 24, "YYYYMMDD"),
    FieldSpec::range("time", 25, 30, "HHMMSS"),
    FieldSpec::range(
        "total_records",
        31,
        37,
        "Total record count for the batch including all levels, zero filled.",
    ),
    FieldSpec::range("filler", 38, 80, "Spaces"),
];

pub const PRICE_CHANGE_LAYOUT: [FieldSpec; RecordField::COUNT] = [
    FieldSpec::range("record_code", 1, 3, "Should be PC1, indicating price change record."),
    FieldSpec::range("member_num", 4, 9, "Format 99999X. Zero padded, suffix alpha character or space."),
    FieldSpec::range("sku", 10, 15, "Supplier SKU."),
    FieldSpec::range(
        "product_code",
        16,
        29,
        "Right justified, zero filled, spaces if unavailable. 8 digit EAN, 12 digit UPC, 13 digit EAN or 14 digit SCC.",
    ),
    FieldSpec::range("item_price_change", 30, 37, "New member cost, the highest cost for the item."),
    FieldSpec::range("unit_of_measure", 38, 39, "Unit of measure for which this price applies."),
    FieldSpec::single("item_type", 40, "I = IMCS, G = Generic."),
    FieldSpec::single(
        "price_status_code",
        41,
        "N = permanent increase, P = promotional pricing, I = IMCS maintenance, V = lower cost high margin.",
    ),
    FieldSpec::range("effective_date", 42, 49, "YYYYMMDD. Date the price change becomes effective."),
    FieldSpec::single("promo_status_code", 50, "Space = no promotion, 6 = on promotion."),
    FieldSpec::range("reorder_start_date", 51, 58, "YYYYMMDD. First date to order at sale cost."),
    FieldSpec::range("reorder_end_date", 59, 66, "YYYYMMDD. Last date of sale cost."),
    FieldSpec::range("sale_start_date", 67, 74, "YYYYMMDD. Promotion start at the point of sale."),
    FieldSpec::range("sale_code", 75, 76, "Two character sale code."),
    FieldSpec::range("sale_end_date", 77, 84, "Promotion end at the point of sale."),
    FieldSpec::single("member_cost_option", 85, "C = Classic costing, V = Vision costing."),
    FieldSpec::range("mult_3", 86, 90, "9(5). Smallest order multiple, zero if not sold in it."),
    FieldSpec::range("cost_3", 91, 98, "9(5)V999. Mult 3 member cost."),
    FieldSpec::range("mult_2", 99, 103, "9(5). Second largest order multiple, usually the inner pack."),
    FieldSpec::range("cost_2", 104, 111, "9(5)V999. Mult 2 member cost."),
    FieldSpec::range("mult_1", 112, 116, "9(5). Largest order multiple, usually case or pallet."),
    FieldSpec::range("cost_1", 117, 124, "9(5)V999. Mult 1 member cost."),
    FieldSpec::range("member_retail", 125, 131, "9(5)V99. Member retail, zeros when there is none."),
    FieldSpec::range("gross_margin", 132, 136, "+99.9 or -99.9."),
    FieldSpec::range(
        "suggested_retail",
        137,
        143,
        "9(5)V99. Suggested retail for the purchasing unit, promotional retail when price status is P.",
    ),
    FieldSpec::range("suggested_aux_retail", 144, 150, "9(5)V99. Suggested selling-unit retail."),
    FieldSpec::range("suggested_margin", 151, 154, "S99V9"),
    FieldSpec::range("private1", 155, 161, "Supplier use only."),
    FieldSpec::range("private2", 162, 165, "Supplier use only."),
    FieldSpec::single("mbr_aux_retail_switch", 166, "N = purchasing unit retail, Y = aux retail."),
    FieldSpec::range(
        "aux_unit",
        167,
        168,
        "Selling unit of measure. Spaces mean the purchasing unit applies.",
    ),
    FieldSpec::range(
        "aux_quantity",
        169,
        173,
        "9(5). Selling units per purchasing unit, zeros when not applicable.",
    ),
    FieldSpec::single(
        "status_code",
        174,
        "N = normal, 1 = to be discontinued, 2 = probably out of stock, 3 = discontinued, 9 = new.",
    ),
    FieldSpec::range("personal_sku", 175, 183, "Member's personal SKU, spaces if unused."),
    FieldSpec::range("filler", 184, 200, "Spaces."),
];
