use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::SumError;

/// Inclusive tax collected for one (name, rate) pair on one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxGroup {
    /// Tax name followed by the rate, e.g. "VAT10" or "GST7.5".
    pub key: String,
    /// Display label, e.g. "VAT 10 %".
    pub name: String,
    pub total: Decimal,
}

impl TaxGroup {
    pub fn new(name: &str, rate: Decimal, total: Decimal) -> Self {
        let rate = rate.normalize();
        let rate_str = rate.to_string().replace(' ', "");

        Self {
            key: format!("{name}{rate_str}"),
            name: format!("{name} {rate} %"),
            total,
        }
    }
}

/// Append-only list of tax groups in the order they were recorded.
///
/// Entries sharing a key are kept apart; use [`TaxCollection::totals_by_key`]
/// to get one figure per tax rate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxCollection {
    groups: Vec<TaxGroup>,
}

impl TaxCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, group: TaxGroup) {
        self.groups.push(group);
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TaxGroup> {
        self.groups.iter()
    }

    pub fn as_slice(&self) -> &[TaxGroup] {
        &self.groups
    }

    /// Sum of every recorded entry.
    pub fn total(&self) -> Result<Decimal, SumError> {
        self.groups.iter().try_fold(Decimal::ZERO, |sum, group| {
            sum.checked_add(group.total)
                .ok_or_else(|| overflow(&group.key))
        })
    }

    /// One group per distinct key, in order of first appearance.
    pub fn totals_by_key(&self) -> Result<Vec<TaxGroup>, SumError> {
        let mut reduced: Vec<TaxGroup> = Vec::new();
        for group in &self.groups {
            match reduced.iter_mut().find(|g| g.key == group.key) {
                Some(existing) => {
                    existing.total = existing
                        .total
                        .checked_add(group.total)
                        .ok_or_else(|| overflow(&group.key))?;
                }
                None => reduced.push(group.clone()),
            }
        }
        Ok(reduced)
    }
}

fn overflow(key: &str) -> SumError {
    SumError::Arithmetic(format!("overflow summing tax group '{key}'"))
}

impl<'a> IntoIterator for &'a TaxCollection {
    type Item = &'a TaxGroup;
    type IntoIter = std::slice::Iter<'a, TaxGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}
