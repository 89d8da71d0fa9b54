use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::config::CalculatorConfig;
use super::error::SumError;
use super::tax_group::{TaxCollection, TaxGroup};
use super::types::{Document, LineItem};

/// Extract the tax already contained in a tax-inclusive `amount`.
///
/// `amount - amount / (1 + rate / 100)`. A zero rate yields zero; a negative
/// amount yields a negative tax. Fails only when the divisor is zero
/// (rate of -100) or the result overflows.
pub fn calc_inclusive_line_tax(rate: Decimal, amount: Decimal) -> Result<Decimal, SumError> {
    if rate.is_zero() {
        return Ok(Decimal::ZERO);
    }

    let divisor = Decimal::ONE + rate / dec!(100);
    amount
        .checked_div(divisor)
        .and_then(|net| amount.checked_sub(net))
        .ok_or_else(|| {
            SumError::Arithmetic(format!(
                "cannot extract {rate}% inclusive tax from {amount}"
            ))
        })
}

/// Result of the first pass over a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FirstPass {
    /// Computed lines in input order.
    pub line_items: Vec<LineItem>,
    /// Sum of `line_total`.
    pub sub_total: Decimal,
    /// Sum of `gross_line_total`.
    pub gross_sub_total: Decimal,
    /// Inclusive tax extracted across all lines.
    pub total_taxes: Decimal,
    /// One entry per named tax slot per line, never merged.
    pub tax_collection: TaxCollection,
}

impl FirstPass {
    fn push(mut self, line: ComputedLine, index: usize) -> Result<Self, SumError> {
        self.sub_total = add(self.sub_total, line.item.line_total, index)?;
        self.gross_sub_total = add(self.gross_sub_total, line.item.gross_line_total, index)?;
        self.total_taxes = add(self.total_taxes, line.tax, index)?;
        for group in line.groups {
            self.tax_collection.push(group);
        }
        self.line_items.push(line.item);
        Ok(self)
    }
}

/// Result of re-deriving taxes once the document discount is allocated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecondPass {
    /// First-pass lines, updated in place where `line_total > 0`.
    pub line_items: Vec<LineItem>,
    /// Tax extracted during this pass only.
    pub total_taxes: Decimal,
    /// Entries recorded during this pass only.
    pub tax_collection: TaxCollection,
}

impl SecondPass {
    /// First-pass plus second-pass tax, the figure older clients display
    /// when they keep accumulating across both passes.
    pub fn carried_total_taxes(&self, first: &FirstPass) -> Result<Decimal, SumError> {
        first
            .total_taxes
            .checked_add(self.total_taxes)
            .ok_or_else(|| SumError::Arithmetic("overflow carrying tax total".into()))
    }
}

/// Both passes for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub first: FirstPass,
    /// Present when the document carries an amount discount.
    pub second: Option<SecondPass>,
}

impl DocumentSummary {
    /// Lines from the last pass that ran.
    pub fn line_items(&self) -> &[LineItem] {
        match &self.second {
            Some(second) => &second.line_items,
            None => &self.first.line_items,
        }
    }

    /// Tax groups from the last pass that ran.
    pub fn tax_collection(&self) -> &TaxCollection {
        match &self.second {
            Some(second) => &second.tax_collection,
            None => &self.first.tax_collection,
        }
    }

    /// Tax total of the last pass that ran (not the carried sum).
    pub fn total_taxes(&self) -> Decimal {
        match &self.second {
            Some(second) => second.total_taxes,
            None => self.first.total_taxes,
        }
    }

    pub fn sub_total(&self) -> Decimal {
        self.first.sub_total
    }
}

/// When a tax slot contributes an entry to the tax collection.
#[derive(Debug, Clone, Copy)]
enum Recording {
    /// Every slot with a name, even when the tax is zero.
    NamedSlots,
    /// Any slot whose tax is non-zero, named or not.
    NonZeroTax,
}

struct ComputedLine {
    item: LineItem,
    tax: Decimal,
    groups: Vec<TaxGroup>,
}

/// Tax-inclusive line item calculator for one document.
///
/// ```
/// use taxsum::core::*;
/// use rust_decimal_macros::dec;
///
/// let document = DocumentBuilder::new(DocumentKind::Invoice)
///     .add_line(LineItemBuilder::new(dec!(100), dec!(1)).tax1("VAT", dec!(10)).build())
///     .build()
///     .unwrap();
///
/// let first = InclusiveTaxCalculator::new(&document).process().unwrap();
/// assert_eq!(first.sub_total, dec!(100));
/// assert_eq!(first.total_taxes.round_dp(2), dec!(9.09));
/// assert_eq!(first.tax_collection.as_slice()[0].key, "VAT10");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct InclusiveTaxCalculator<'a> {
    document: &'a Document,
    config: CalculatorConfig,
}

impl<'a> InclusiveTaxCalculator<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self::with_config(document, CalculatorConfig::default())
    }

    pub fn with_config(document: &'a Document, config: CalculatorConfig) -> Self {
        Self { document, config }
    }

    pub fn document(&self) -> &'a Document {
        self.document
    }

    /// First pass: line totals, line discounts and inclusive taxes.
    ///
    /// The input document is not modified. An empty document yields an
    /// empty result with zero totals.
    pub fn process(&self) -> Result<FirstPass, SumError> {
        let lines = &self.document.line_items;
        debug!(
            kind = self.document.kind.entity(),
            lines = lines.len(),
            is_amount_discount = self.document.is_amount_discount,
            "summing line items"
        );

        let pass = lines
            .iter()
            .enumerate()
            .try_fold(FirstPass::default(), |pass, (index, item)| -> Result<FirstPass, SumError> {
                let line = self.compute_line(index, item)?;
                pass.push(line, index)
            })?;

        debug!(
            sub_total = %pass.sub_total,
            total_taxes = %pass.total_taxes,
            groups = pass.tax_collection.len(),
            "first pass complete"
        );
        Ok(pass)
    }

    /// Second pass: spread the document discount over the lines by their
    /// share of the subtotal and extract inclusive tax from what remains.
    ///
    /// Lines with `line_total <= 0` are left exactly as the first pass
    /// produced them. `total_taxes` of the result covers this pass only.
    pub fn calculate_taxes_with_amount_discount(
        &self,
        first: &FirstPass,
    ) -> Result<SecondPass, SumError> {
        let discount = self.document.discount;
        let sub_total = first.sub_total;

        let seed = SecondPass {
            line_items: first.line_items.clone(),
            ..SecondPass::default()
        };

        let pass = first
            .line_items
            .iter()
            .enumerate()
            .try_fold(seed, |mut pass, (index, item)| -> Result<SecondPass, SumError> {
                if item.line_total <= Decimal::ZERO {
                    trace!(index, line_total = %item.line_total, "skipping line");
                    return Ok(pass);
                }

                let amount = if sub_total > Decimal::ZERO {
                    item.line_total
                        .checked_div(sub_total)
                        .and_then(|share| discount.checked_mul(share))
                        .and_then(|allocated| item.line_total.checked_sub(allocated))
                        .ok_or_else(|| overflow(index, "document discount allocation"))?
                } else {
                    Decimal::ZERO
                };

                let (tax, groups) = extract_taxes(item, amount, Recording::NonZeroTax, index)?;

                let mut updated = item.clone();
                updated.gross_line_total = updated.line_total;
                updated.tax_amount = Some(tax);
                pass.line_items[index] = updated;

                pass.total_taxes = add(pass.total_taxes, tax, index)?;
                for group in groups {
                    pass.tax_collection.push(group);
                }
                Ok(pass)
            })?;

        debug!(
            discount = %discount,
            total_taxes = %pass.total_taxes,
            groups = pass.tax_collection.len(),
            "second pass complete"
        );
        Ok(pass)
    }

    /// Run the first pass, and the second one when the document carries an
    /// amount discount.
    pub fn summarize(&self) -> Result<DocumentSummary, SumError> {
        let first = self.process()?;
        let second = if self.document.is_amount_discount && self.document.has_discount() {
            Some(self.calculate_taxes_with_amount_discount(&first)?)
        } else {
            None
        };
        Ok(DocumentSummary { first, second })
    }

    fn compute_line(&self, index: usize, item: &LineItem) -> Result<ComputedLine, SumError> {
        let item = normalize(item.clone());
        let item = sum_line(item, index)?;
        let item = self.apply_discount(item, index)?;
        let line = self.calculate_taxes(item, index)?;
        trace!(
            index,
            line_total = %line.item.line_total,
            tax = %line.tax,
            "line computed"
        );
        Ok(line)
    }

    fn apply_discount(&self, mut item: LineItem, index: usize) -> Result<LineItem, SumError> {
        let discounted = if self.document.is_amount_discount {
            item.line_total.checked_sub(item.discount)
        } else {
            percent_of(item.line_total, item.discount)
                .and_then(|off| item.line_total.checked_sub(off))
        };
        let discounted = discounted.ok_or_else(|| overflow(index, "line discount"))?;

        item.line_total = self.config.round_line_total(discounted);
        item.is_amount_discount = self.document.is_amount_discount;
        Ok(item)
    }

    fn calculate_taxes(&self, mut item: LineItem, index: usize) -> Result<ComputedLine, SumError> {
        // Percentage document discounts are approximated per line here; the
        // second pass handles amount discounts.
        let amount = if self.document.is_amount_discount {
            item.line_total
        } else {
            percent_of(item.line_total, self.document.discount)
                .and_then(|off| item.line_total.checked_sub(off))
                .ok_or_else(|| overflow(index, "document discount"))?
        };

        let (tax, groups) = extract_taxes(&item, amount, Recording::NamedSlots, index)?;
        item.gross_line_total = item.line_total;

        Ok(ComputedLine { item, tax, groups })
    }
}

/// Reset the derived fields so stale values from an earlier run never leak.
fn normalize(mut item: LineItem) -> LineItem {
    item.line_total = Decimal::ZERO;
    item.gross_line_total = Decimal::ZERO;
    item.tax_amount = None;
    item
}

fn sum_line(mut item: LineItem, index: usize) -> Result<LineItem, SumError> {
    item.line_total = item
        .cost
        .checked_mul(item.quantity)
        .ok_or_else(|| overflow(index, "cost * quantity"))?;
    Ok(item)
}

fn extract_taxes(
    item: &LineItem,
    amount: Decimal,
    recording: Recording,
    index: usize,
) -> Result<(Decimal, Vec<TaxGroup>), SumError> {
    let mut item_tax = Decimal::ZERO;
    let mut groups = Vec::new();

    for (name, rate) in item.tax_slots() {
        let tax = calc_inclusive_line_tax(rate, amount).map_err(|e| at_line(index, e))?;
        item_tax = add(item_tax, tax, index)?;

        let record = match recording {
            Recording::NamedSlots => !name.is_empty(),
            Recording::NonZeroTax => !tax.is_zero(),
        };
        if record {
            groups.push(TaxGroup::new(name, rate, tax));
        }
    }

    Ok((item_tax, groups))
}

fn percent_of(value: Decimal, percent: Decimal) -> Option<Decimal> {
    value.checked_mul(percent / dec!(100))
}

fn add(a: Decimal, b: Decimal, index: usize) -> Result<Decimal, SumError> {
    a.checked_add(b).ok_or_else(|| overflow(index, "running total"))
}

fn overflow(index: usize, what: &str) -> SumError {
    SumError::Arithmetic(format!("line {index}: overflow computing {what}"))
}

fn at_line(index: usize, err: SumError) -> SumError {
    match err {
        SumError::Arithmetic(msg) => SumError::Arithmetic(format!("line {index}: {msg}")),
        other => other,
    }
}
