//! Report projections of matched records.
//!
//! A report maps each UPC to its match details. Verbose entries pass the
//! supplier's fixed-width values through untouched; minimal entries keep only
//! the values needed to reprice, with leading zeros removed. Serialization is
//! left to the caller.

use crate::domain::model::{strip_leading_zeros, MatchRecord, RecordField};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    Verbose,
    Minimal,
}

/// UPC keyed report. Keys are sorted; a later match for the same UPC
/// replaces an earlier one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report<'a>(BTreeMap<&'a str, ReportEntry<'a>>);

impl<'a> Report<'a> {
    pub fn from_matches<'m>(
        matches: impl IntoIterator<Item = &'m MatchRecord<'a>>,
        mode: ReportMode,
    ) -> Self
    where
        'a: 'm,
    {
        let entries = matches
            .into_iter()
            .filter_map(|record| Some((record.upc()?, ReportEntry::new(record, mode))))
            .collect();
        Self(entries)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, upc: &str) -> Option<&ReportEntry<'a>> {
        self.0.get(upc)
    }

    pub fn upcs(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.0.keys().copied()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry<'a> {
    pub sku: Option<&'a str>,
    pub sku_matches: bool,
    /// Supplier SKU, present only when it disagrees with the POS SKU.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_sku: Option<&'a str>,
    pub revel_price: RevelPrice,
    pub change_details: ChangeDetails<'a>,
}

impl<'a> ReportEntry<'a> {
    pub fn new(record: &MatchRecord<'a>, mode: ReportMode) -> Self {
        let supplier_sku = (!record.sku_matches).then(|| record.change.sku().trim());
        let change_details = match mode {
            ReportMode::Verbose => ChangeDetails::Verbose(VerboseDetails::new(record)),
            ReportMode::Minimal => ChangeDetails::Minimal(MinimalDetails::new(record)),
        };

        Self {
            sku: record.sku(),
            sku_matches: record.sku_matches,
            supplier_sku,
            revel_price: RevelPrice {
                cost: record.product.cost(),
                price: record.product.price(),
            },
            change_details,
        }
    }
}

/// POS cost and price in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RevelPrice {
    pub cost: Option<i64>,
    pub price: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChangeDetails<'a> {
    Verbose(VerboseDetails<'a>),
    Minimal(MinimalDetails<'a>),
}

/// One order-multiple tier, serialized as `{"mult_N": .., "cost_N": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tier<'a> {
    pub level: u8,
    pub mult: &'a str,
    pub cost: &'a str,
}

impl Serialize for Tier<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(&format!("mult_{}", self.level), self.mult)?;
        map.serialize_entry(&format!("cost_{}", self.level), self.cost)?;
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerboseDetails<'a> {
    #[serde(rename = "3")]
    pub tier_3: Tier<'a>,
    #[serde(rename = "2")]
    pub tier_2: Tier<'a>,
    #[serde(rename = "1")]
    pub tier_1: Tier<'a>,
    pub member_retail: &'a str,
    pub suggested_retail: &'a str,
    pub suggested_aux_retail: &'a str,
    pub suggested_margin: &'a str,
    pub aux_unit: &'a str,
    pub aux_quantity: &'a str,
    pub price_status_code: &'a str,
    pub promo_status_code: &'a str,
    pub status_code: &'a str,
    pub item_price_change: &'a str,
    pub unit_of_measure: &'a str,
}

impl<'a> VerboseDetails<'a> {
    fn new(record: &MatchRecord<'a>) -> Self {
        let change = record.change;
        let tier = |level, mult, cost| Tier {
            level,
            mult: change.get(mult),
            cost: change.get(cost),
        };

        Self {
            tier_3: tier(3, RecordField::Mult3, RecordField::Cost3),
            tier_2: tier(2, RecordField::Mult2, RecordField::Cost2),
            tier_1: tier(1, RecordField::Mult1, RecordField::Cost1),
            member_retail: change.get(RecordField::MemberRetail),
            suggested_retail: change.get(RecordField::SuggestedRetail),
            suggested_aux_retail: change.get(RecordField::SuggestedAuxRetail),
            suggested_margin: change.get(RecordField::SuggestedMargin),
            aux_unit: change.get(RecordField::AuxUnit),
            aux_quantity: change.get(RecordField::AuxQuantity),
            price_status_code: change.get(RecordField::PriceStatusCode),
            promo_status_code: change.get(RecordField::PromoStatusCode),
            status_code: change.get(RecordField::StatusCode),
            item_price_change: change.get(RecordField::ItemPriceChange),
            unit_of_measure: change.get(RecordField::UnitOfMeasure),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinimalDetails<'a> {
    pub suggested_retail: Option<&'a str>,
    pub item_price_change: Option<&'a str>,
    pub unit_of_measure: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_aux_retail: Option<&'a str>,
    #[serde(flatten)]
    pub aux: Option<AuxSelling<'a>>,
}

/// Selling unit, reported only when the supplier gives one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuxSelling<'a> {
    pub aux_unit: &'a str,
    pub aux_quantity: Option<&'a str>,
}

impl<'a> MinimalDetails<'a> {
    fn new(record: &MatchRecord<'a>) -> Self {
        let change = record.change;
        let stripped = |field| present(change.get(field)).map(strip_leading_zeros);

        let aux = present(change.get(RecordField::AuxUnit)).map(|aux_unit| AuxSelling {
            aux_unit,
            aux_quantity: stripped(RecordField::AuxQuantity),
        });

        Self {
            suggested_retail: stripped(RecordField::SuggestedRetail),
            item_price_change: stripped(RecordField::ItemPriceChange),
            unit_of_measure: change.get(RecordField::UnitOfMeasure),
            suggested_aux_retail: stripped(RecordField::SuggestedAuxRetail),
            aux,
        }
    }
}

fn present(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{PriceChangeRecord, Product, ProductDraft};
    use serde_json::json;

    fn product() -> Product {
        Product::try_from(ProductDraft {
            name: "Hammer".to_string(),
            price: 1999,
            cost: Some(1050),
            sku: Some("SKU1".to_string()),
            barcode: Some("012345678905".to_string()),
            active: true,
            ..Default::default()
        })
        .unwrap()
    }

    fn change(sku: &str) -> PriceChangeRecord {
        PriceChangeRecord::blank(7)
            .with(RecordField::Sku, sku)
            .with(RecordField::ProductCode, "00012345678905")
            .with(RecordField::ItemPriceChange, "00012345")
            .with(RecordField::UnitOfMeasure, "EA")
            .with(RecordField::Mult3, "00001")
            .with(RecordField::Cost3, "00010500")
            .with(RecordField::Mult2, "00006")
            .with(RecordField::Cost2, "00010000")
            .with(RecordField::Mult1, "00024")
            .with(RecordField::Cost1, "00009500")
            .with(RecordField::MemberRetail, "0000000")
            .with(RecordField::SuggestedRetail, "0001999")
            .with(RecordField::SuggestedAuxRetail, "0000000")
            .with(RecordField::SuggestedMargin, "+450")
            .with(RecordField::PriceStatusCode, "N")
            .with(RecordField::PromoStatusCode, " ")
            .with(RecordField::StatusCode, "N")
            .with(RecordField::AuxUnit, "  ")
            .with(RecordField::AuxQuantity, "00000")
    }

    #[test]
    fn test_minimal_entry_with_matching_sku() {
        let product = product();
        let change = change("SKU1");
        let matches = [MatchRecord::new(&change, &product)];

        let report = Report::from_matches(&matches, ReportMode::Minimal);

        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "12345678905": {
                    "sku": "SKU1",
                    "sku_matches": true,
                    "revel_price": {"cost": 1050, "price": 1999},
                    "change_details": {
                        "suggested_retail": "1999",
                        "item_price_change": "12345",
                        "unit_of_measure": "EA",
                        "suggested_aux_retail": ""
                    }
                }
            })
        );
    }

    #[test]
    fn test_sku_mismatch_adds_supplier_sku() {
        let product = product();
        let change = change("SKU2  ");
        let matches = [MatchRecord::new(&change, &product)];

        for mode in [ReportMode::Minimal, ReportMode::Verbose] {
            let report = Report::from_matches(&matches, mode);
            let entry = report.get("12345678905").unwrap();
            assert!(!entry.sku_matches);
            assert_eq!(entry.supplier_sku, Some("SKU2"));

            let value = serde_json::to_value(&report).unwrap();
            assert_eq!(value["12345678905"]["supplier_sku"], "SKU2");
        }
    }

    #[test]
    fn test_blank_aux_unit_omits_aux_pair() {
        let product = product();
        let change = change("SKU1").with(RecordField::SuggestedAuxRetail, "       ");
        let record = MatchRecord::new(&change, &product);

        let value = serde_json::to_value(ReportEntry::new(&record, ReportMode::Minimal)).unwrap();
        let details = value["change_details"].as_object().unwrap();

        assert!(!details.contains_key("aux_unit"));
        assert!(!details.contains_key("aux_quantity"));
        assert!(!details.contains_key("suggested_aux_retail"));
        assert!(!value.as_object().unwrap().contains_key("supplier_sku"));
    }

    #[test]
    fn test_aux_unit_includes_stripped_quantity() {
        let product = product();
        let change = change("SKU1")
            .with(RecordField::AuxUnit, "FT")
            .with(RecordField::AuxQuantity, "00010");
        let record = MatchRecord::new(&change, &product);

        let entry = ReportEntry::new(&record, ReportMode::Minimal);

        match entry.change_details {
            ChangeDetails::Minimal(details) => {
                let aux = details.aux.unwrap();
                assert_eq!(aux.aux_unit, "FT");
                assert_eq!(aux.aux_quantity, Some("10"));
            }
            other => panic!("expected minimal details, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_suggested_retail_is_null_in_minimal() {
        let product = product();
        let change = change("SKU1").with(RecordField::SuggestedRetail, "");
        let record = MatchRecord::new(&change, &product);

        let value = serde_json::to_value(ReportEntry::new(&record, ReportMode::Minimal)).unwrap();
        assert!(value["change_details"]["suggested_retail"].is_null());
    }

    #[test]
    fn test_verbose_uses_each_tiers_own_fields() {
        let product = product();
        let change = change("SKU1");
        let record = MatchRecord::new(&change, &product);

        let value = serde_json::to_value(ReportEntry::new(&record, ReportMode::Verbose)).unwrap();
        let details = &value["change_details"];

        assert_eq!(details["3"], json!({"mult_3": "00001", "cost_3": "00010500"}));
        assert_eq!(details["2"], json!({"mult_2": "00006", "cost_2": "00010000"}));
        assert_eq!(details["1"], json!({"mult_1": "00024", "cost_1": "00009500"}));
        assert_eq!(details["suggested_retail"], "0001999");
        assert_eq!(details["aux_unit"], "  ");
        assert_eq!(details["promo_status_code"], " ");
        assert_eq!(details["item_price_change"], "00012345");
        assert_eq!(value["revel_price"]["cost"], 1050);
    }

    #[test]
    fn test_later_match_replaces_earlier_for_same_upc() {
        let product = product();
        let first = change("SKU1").with(RecordField::SuggestedRetail, "0000100");
        let second = change("SKU1").with(RecordField::SuggestedRetail, "0000200");
        let matches = [
            MatchRecord::new(&first, &product),
            MatchRecord::new(&second, &product),
        ];

        let report = Report::from_matches(&matches, ReportMode::Verbose);

        assert_eq!(report.len(), 1);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["12345678905"]["change_details"]["suggested_retail"], "0000200");
    }

    #[test]
    fn test_empty_report_serializes_to_empty_object() {
        let report = Report::default();
        assert!(report.is_empty());
        assert_eq!(serde_json::to_string(&report).unwrap(), "{}");
    }
}
