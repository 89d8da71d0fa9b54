use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The kind of billing document a set of line items belongs to.
///
/// The inclusive calculator treats all kinds alike; the kind is carried so
/// callers can route results back to the right entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    #[default]
    Invoice,
    Credit,
    Quote,
    PurchaseOrder,
    RecurringInvoice,
}

impl DocumentKind {
    /// Entity name as used by the REST API.
    pub fn entity(&self) -> &'static str {
        match self {
            Self::Invoice => "invoice",
            Self::Credit => "credit",
            Self::Quote => "quote",
            Self::PurchaseOrder => "purchase_order",
            Self::RecurringInvoice => "recurring_invoice",
        }
    }
}

/// A billing document: the header fields the calculator reads plus its lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub kind: DocumentKind,
    /// Ordered line items. Output preserves this order.
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    /// True = `discount` is an absolute amount, false = a percentage.
    #[serde(default)]
    pub is_amount_discount: bool,
    /// Document-level discount.
    #[serde(default)]
    pub discount: Decimal,
}

impl Document {
    pub fn new(kind: DocumentKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// True when a document-level discount has to be reconciled.
    pub fn has_discount(&self) -> bool {
        !self.discount.is_zero()
    }
}

/// A single line of a billing document.
///
/// Input fields are `cost`, `quantity`, `discount` and the three tax slots.
/// `line_total`, `is_amount_discount`, `gross_line_total` and `tax_amount`
/// are owned by the calculator and overwritten on every run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    /// Unit price, tax included.
    pub cost: Decimal,
    pub quantity: Decimal,
    /// Line discount; amount or percent depending on the document's mode.
    pub discount: Decimal,
    pub tax_name1: String,
    pub tax_rate1: Decimal,
    pub tax_name2: String,
    pub tax_rate2: Decimal,
    pub tax_name3: String,
    pub tax_rate3: Decimal,
    pub product_key: String,
    pub notes: String,
    /// Line type as sent by the API ("1" product, "2" service, ...).
    pub type_id: String,
    pub line_total: Decimal,
    /// Copied from the document; lines have no discount mode of their own.
    pub is_amount_discount: bool,
    /// Equal to `line_total`: inclusive tax is reported, never added.
    pub gross_line_total: Decimal,
    /// Set by the second pass only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_amount: Option<Decimal>,
}

impl LineItem {
    /// The three `(name, rate)` tax slots in order.
    pub fn tax_slots(&self) -> [(&str, Decimal); 3] {
        [
            (self.tax_name1.as_str(), self.tax_rate1),
            (self.tax_name2.as_str(), self.tax_rate2),
            (self.tax_name3.as_str(), self.tax_rate3),
        ]
    }
}
