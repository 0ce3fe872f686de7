use crate::domain::model::{strip_leading_zeros, MatchRecord, PriceChangeRecord, Product};
use std::collections::HashSet;

/// Joins price changes to inventory products by barcode.
///
/// Product codes and barcodes are compared with leading zeros stripped. Each
/// change is matched against the first product in inventory order; changes
/// with a blank product code or no matching product are dropped. Output keeps
/// the order of `changes`.
pub fn match_records<'a>(
    changes: &'a [PriceChangeRecord],
    products: &'a [Product],
) -> Vec<MatchRecord<'a>> {
    changes
        .iter()
        .filter_map(|change| {
            let code = change.product_code();
            if code.trim().is_empty() {
                return None;
            }
            let code = strip_leading_zeros(code);

            let product = products.iter().find(|product| {
                product
                    .barcode()
                    .is_some_and(|barcode| strip_leading_zeros(barcode) == code)
            });

            match product {
                Some(product) => Some(MatchRecord::new(change, product)),
                None => {
                    tracing::trace!(
                        "No inventory item for product code {} (line {})",
                        code,
                        change.line_number
                    );
                    None
                }
            }
        })
        .collect()
}

/// UPCs that more than one match resolves to, in first-seen order.
pub fn duplicate_upcs<'a>(matches: &[MatchRecord<'a>]) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();

    for upc in matches.iter().filter_map(MatchRecord::upc) {
        if !seen.insert(upc) && reported.insert(upc) {
            duplicates.push(upc);
        }
    }
    duplicates
}
