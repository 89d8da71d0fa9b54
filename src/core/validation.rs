use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::ValidationError;
use super::types::*;

/// Maximum number of lines accepted on one document.
pub const MAX_LINE_ITEMS: usize = 10_000;

/// Check a document's numeric input before it is summed.
/// Returns all validation errors found (not just the first).
///
/// The calculator does not call this itself; callers that receive
/// documents from outside should.
pub fn validate_document(document: &Document) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if document.line_items.len() > MAX_LINE_ITEMS {
        errors.push(ValidationError::new(
            "line_items",
            format!("document cannot have more than {MAX_LINE_ITEMS} line items"),
        ));
    }

    if document.discount < Decimal::ZERO {
        errors.push(ValidationError::new(
            "discount",
            "document discount must not be negative",
        ));
    } else if !document.is_amount_discount && document.discount > dec!(100) {
        errors.push(ValidationError::new(
            "discount",
            format!(
                "percentage discount {} exceeds 100",
                document.discount
            ),
        ));
    }

    for (i, line) in document.line_items.iter().enumerate() {
        validate_line(line, i, document.is_amount_discount, &mut errors);
    }

    errors
}

fn validate_line(
    line: &LineItem,
    index: usize,
    is_amount_discount: bool,
    errors: &mut Vec<ValidationError>,
) {
    let prefix = format!("line_items.{index}");

    if line.cost < Decimal::ZERO {
        errors.push(ValidationError::new(
            format!("{prefix}.cost"),
            "cost must not be negative",
        ));
    }

    if line.quantity < Decimal::ZERO {
        errors.push(ValidationError::new(
            format!("{prefix}.quantity"),
            "quantity must not be negative",
        ));
    }

    if line.discount < Decimal::ZERO {
        errors.push(ValidationError::new(
            format!("{prefix}.discount"),
            "discount must not be negative",
        ));
    } else if !is_amount_discount && line.discount > dec!(100) {
        errors.push(ValidationError::new(
            format!("{prefix}.discount"),
            format!("percentage discount {} exceeds 100", line.discount),
        ));
    }

    for (slot, (name, rate)) in line.tax_slots().into_iter().enumerate() {
        let slot = slot + 1;
        if rate < Decimal::ZERO {
            errors.push(ValidationError::new(
                format!("{prefix}.tax_rate{slot}"),
                format!("tax rate {rate} must not be negative"),
            ));
        }
        if !name.is_empty() && name.trim().is_empty() {
            errors.push(ValidationError::new(
                format!("{prefix}.tax_name{slot}"),
                "tax name must not be blank",
            ));
        }
    }
}
