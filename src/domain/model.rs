use crate::utils::error::ProductError;

/// Strips surrounding whitespace and leading zeros, the normalization used for
/// barcodes, product codes and SKUs.
pub fn strip_leading_zeros(value: &str) -> &str {
    value.trim().trim_start_matches('0')
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Raw inventory row values, before the sku/barcode invariant is checked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    pub product_class: String,
    pub category: String,
    pub subcategory: String,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub cost: Option<i64>,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub active: bool,
}

/// 一筆 POS 庫存商品，金額單位為分
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    product_class: String,
    category: String,
    subcategory: String,
    name: String,
    description: Option<String>,
    price: i64,
    cost: Option<i64>,
    sku: Option<String>,
    barcode: Option<String>,
    active: bool,
}

impl TryFrom<ProductDraft> for Product {
    type Error = ProductError;

    fn try_from(draft: ProductDraft) -> std::result::Result<Self, Self::Error> {
        let sku = non_blank(draft.sku);
        let barcode = non_blank(draft.barcode);
        if sku.is_none() && barcode.is_none() {
            return Err(ProductError::MissingIdentifier);
        }

        Ok(Self {
            product_class: draft.product_class,
            category: draft.category,
            subcategory: draft.subcategory,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            cost: draft.cost,
            sku,
            barcode,
            active: draft.active,
        })
    }
}

impl Product {
    pub fn product_class(&self) -> &str {
        &self.product_class
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn subcategory(&self) -> &str {
        &self.subcategory
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn price(&self) -> i64 {
        self.price
    }

    pub fn cost(&self) -> Option<i64> {
        self.cost
    }

    pub fn sku(&self) -> Option<&str> {
        self.sku.as_deref()
    }

    pub fn barcode(&self) -> Option<&str> {
        self.barcode.as_deref()
    }

    pub fn active(&self) -> bool {
        self.active
    }
}

/// Named fields of a supplier price-change (`PC1`) record, in layout order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    RecordCode,
    MemberNum,
    Sku,
    ProductCode,
    ItemPriceChange,
    UnitOfMeasure,
    ItemType,
    PriceStatusCode,
    EffectiveDate,
    PromoStatusCode,
    ReorderStartDate,
    ReorderEndDate,
    SaleStartDate,
    SaleCode,
    SaleEndDate,
    MemberCostOption,
    Mult3,
    Cost3,
    Mult2,
    Cost2,
    Mult1,
    Cost1,
    MemberRetail,
    GrossMargin,
    SuggestedRetail,
    SuggestedAuxRetail,
    SuggestedMargin,
    Private1,
    Private2,
    MbrAuxRetailSwitch,
    AuxUnit,
    AuxQuantity,
    StatusCode,
    PersonalSku,
    Filler,
}

impl RecordField {
    pub const COUNT: usize = 35;

    pub const ALL: [RecordField; Self::COUNT] = [
        RecordField::RecordCode,
        RecordField::MemberNum,
        RecordField::Sku,
        RecordField::ProductCode,
        RecordField::ItemPriceChange,
        RecordField::UnitOfMeasure,
        RecordField::ItemType,
        RecordField::PriceStatusCode,
        RecordField::EffectiveDate,
        RecordField::PromoStatusCode,
        RecordField::ReorderStartDate,
        RecordField::ReorderEndDate,
        RecordField::SaleStartDate,
        RecordField::SaleCode,
        RecordField::SaleEndDate,
        RecordField::MemberCostOption,
        RecordField::Mult3,
        RecordField::Cost3,
        RecordField::Mult2,
        RecordField::Cost2,
        RecordField::Mult1,
        RecordField::Cost1,
        RecordField::MemberRetail,
        RecordField::GrossMargin,
        RecordField::SuggestedRetail,
        RecordField::SuggestedAuxRetail,
        RecordField::SuggestedMargin,
        RecordField::Private1,
        RecordField::Private2,
        RecordField::MbrAuxRetailSwitch,
        RecordField::AuxUnit,
        RecordField::AuxQuantity,
        RecordField::StatusCode,
        RecordField::PersonalSku,
        RecordField::Filler,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RecordField::RecordCode => "record_code",
            RecordField::MemberNum => "member_num",
            RecordField::Sku => "sku",
            RecordField::ProductCode => "product_code",
            RecordField::ItemPriceChange => "item_price_change",
            RecordField::UnitOfMeasure => "unit_of_measure",
            RecordField::ItemType => "item_type",
            RecordField::PriceStatusCode => "price_status_code",
            RecordField::EffectiveDate => "effective_date",
            RecordField::PromoStatusCode => "promo_status_code",
            RecordField::ReorderStartDate => "reorder_start_date",
            RecordField::ReorderEndDate => "reorder_end_date",
            RecordField::SaleStartDate => "sale_start_date",
            RecordField::SaleCode => "sale_code",
            RecordField::SaleEndDate => "sale_end_date",
            RecordField::MemberCostOption => "member_cost_option",
            RecordField::Mult3 => "mult_3",
            RecordField::Cost3 => "cost_3",
            RecordField::Mult2 => "mult_2",
            RecordField::Cost2 => "cost_2",
            RecordField::Mult1 => "mult_1",
            RecordField::Cost1 => "cost_1",
            RecordField::MemberRetail => "member_retail",
            RecordField::GrossMargin => "gross_margin",
            RecordField::SuggestedRetail => "suggested_retail",
            RecordField::SuggestedAuxRetail => "suggested_aux_retail",
            RecordField::SuggestedMargin => "suggested_margin",
            RecordField::Private1 => "private1",
            RecordField::Private2 => "private2",
            RecordField::MbrAuxRetailSwitch => "mbr_aux_retail_switch",
            RecordField::AuxUnit => "aux_unit",
            RecordField::AuxQuantity => "aux_quantity",
            RecordField::StatusCode => "status_code",
            RecordField::PersonalSku => "personal_sku",
            RecordField::Filler => "filler",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// One supplier price-change line. Every field is the raw fixed-width text;
/// interpretation is left to consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceChangeRecord {
    values: Vec<String>,
    pub line_number: usize,
}

impl PriceChangeRecord {
    /// Builds a record from values in [`RecordField::ALL`] order. Missing
    /// trailing values are treated as empty.
    pub fn from_values(mut values: Vec<String>, line_number: usize) -> Self {
        values.resize(RecordField::COUNT, String::new());
        Self {
            values,
            line_number,
        }
    }

    /// A record with every field empty.
    pub fn blank(line_number: usize) -> Self {
        Self::from_values(Vec::new(), line_number)
    }

    pub fn with(mut self, field: RecordField, value: impl Into<String>) -> Self {
        self.values[field.index()] = value.into();
        self
    }

    pub fn get(&self, field: RecordField) -> &str {
        &self.values[field.index()]
    }

    pub fn sku(&self) -> &str {
        self.get(RecordField::Sku)
    }

    pub fn product_code(&self) -> &str {
        self.get(RecordField::ProductCode)
    }

    pub fn suggested_retail(&self) -> &str {
        self.get(RecordField::SuggestedRetail)
    }

    pub fn has_suggested_retail(&self) -> bool {
        !self.suggested_retail().trim().is_empty()
    }
}

/// A price-change record joined to the inventory product sharing its barcode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchRecord<'a> {
    pub change: &'a PriceChangeRecord,
    pub product: &'a Product,
    pub sku_matches: bool,
}

impl<'a> MatchRecord<'a> {
    pub fn new(change: &'a PriceChangeRecord, product: &'a Product) -> Self {
        let sku_matches = match (change.sku().trim(), product.sku()) {
            ("", _) | (_, None) => false,
            (supplier, Some(revel)) => {
                strip_leading_zeros(supplier) == strip_leading_zeros(revel)
            }
        };

        Self {
            change,
            product,
            sku_matches,
        }
    }

    /// Product barcode with leading zeros stripped.
    pub fn upc(&self) -> Option<&'a str> {
        self.product.barcode().map(strip_leading_zeros)
    }

    pub fn sku(&self) -> Option<&'a str> {
        self.product.sku()
    }
}
