use rust_decimal::Decimal;

use super::error::SumError;
use super::types::*;
use super::validation;

/// Builder for constructing documents to sum.
///
/// ```
/// use taxsum::core::*;
/// use rust_decimal_macros::dec;
///
/// let credit = DocumentBuilder::new(DocumentKind::Credit)
///     .percent_discount(dec!(5))
///     .add_line(LineItemBuilder::new(dec!(49.90), dec!(2))
///         .tax1("MwSt", dec!(19))
///         .build())
///     .build()
///     .unwrap();
/// assert_eq!(credit.line_items.len(), 1);
/// ```
pub struct DocumentBuilder {
    kind: DocumentKind,
    is_amount_discount: bool,
    discount: Decimal,
    lines: Vec<LineItem>,
}

impl DocumentBuilder {
    pub fn new(kind: DocumentKind) -> Self {
        Self {
            kind,
            is_amount_discount: false,
            discount: Decimal::ZERO,
            lines: Vec::new(),
        }
    }

    /// Absolute document discount; line discounts become amounts too.
    pub fn amount_discount(mut self, amount: Decimal) -> Self {
        self.is_amount_discount = true;
        self.discount = amount;
        self
    }

    /// Percentage document discount; line discounts become percentages too.
    pub fn percent_discount(mut self, percent: Decimal) -> Self {
        self.is_amount_discount = false;
        self.discount = percent;
        self
    }

    pub fn add_line(mut self, line: LineItem) -> Self {
        self.lines.push(line);
        self
    }

    /// Build the document and run input validation.
    /// Returns all validation errors (not just the first).
    pub fn build(self) -> Result<Document, SumError> {
        let document = self.build_unchecked();

        let errors = validation::validate_document(&document);
        if !errors.is_empty() {
            let msg = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(SumError::Validation(msg));
        }

        Ok(document)
    }

    /// Build without validation, for tests or for importing external data.
    pub fn build_unchecked(self) -> Document {
        Document {
            kind: self.kind,
            line_items: self.lines,
            is_amount_discount: self.is_amount_discount,
            discount: self.discount,
        }
    }
}

/// Builder for LineItem.
pub struct LineItemBuilder {
    item: LineItem,
}

impl LineItemBuilder {
    pub fn new(cost: Decimal, quantity: Decimal) -> Self {
        Self {
            item: LineItem {
                cost,
                quantity,
                ..LineItem::default()
            },
        }
    }

    pub fn discount(mut self, discount: Decimal) -> Self {
        self.item.discount = discount;
        self
    }

    pub fn tax1(mut self, name: impl Into<String>, rate: Decimal) -> Self {
        self.item.tax_name1 = name.into();
        self.item.tax_rate1 = rate;
        self
    }

    pub fn tax2(mut self, name: impl Into<String>, rate: Decimal) -> Self {
        self.item.tax_name2 = name.into();
        self.item.tax_rate2 = rate;
        self
    }

    pub fn tax3(mut self, name: impl Into<String>, rate: Decimal) -> Self {
        self.item.tax_name3 = name.into();
        self.item.tax_rate3 = rate;
        self
    }

    pub fn product_key(mut self, key: impl Into<String>) -> Self {
        self.item.product_key = key.into();
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.item.notes = notes.into();
        self
    }

    pub fn type_id(mut self, type_id: impl Into<String>) -> Self {
        self.item.type_id = type_id.into();
        self
    }

    pub fn build(self) -> LineItem {
        self.item
    }
}
