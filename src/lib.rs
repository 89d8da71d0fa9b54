//! # taxsum
//!
//! Line item calculator for tax-inclusive billing documents: invoices,
//! credits, quotes, purchase orders and recurring invoices.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use taxsum::core::*;
//! use rust_decimal_macros::dec;
//!
//! let invoice = DocumentBuilder::new(DocumentKind::Invoice)
//!     .amount_discount(dec!(20))
//!     .add_line(LineItemBuilder::new(dec!(60), dec!(1)).tax1("VAT", dec!(20)).build())
//!     .add_line(LineItemBuilder::new(dec!(40), dec!(1)).tax1("VAT", dec!(20)).build())
//!     .build()
//!     .unwrap();
//!
//! let calc = InclusiveTaxCalculator::new(&invoice);
//! let first = calc.process().unwrap();
//! assert_eq!(first.sub_total, dec!(100));
//!
//! // Spread the 20.00 discount over both lines and extract tax again.
//! let second = calc.calculate_taxes_with_amount_discount(&first).unwrap();
//! assert_eq!(second.total_taxes.round_dp(2), dec!(13.33));
//! assert_eq!(second.tax_collection.totals_by_key().unwrap().len(), 1);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Document types, validation, inclusive tax calculator |
//! | `json` | Read/write REST API JSON payloads |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "json")]
pub mod json;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
