//! Core document types, validation, and the inclusive tax calculator.
//!
//! Line items carry tax-inclusive prices. The calculator derives line totals,
//! applies line discounts, and extracts the tax contained in each line,
//! grouped by tax name and rate.

mod builder;
mod config;
mod error;
mod inclusive;
mod tax_group;
mod types;
mod validation;

pub use builder::*;
pub use config::*;
pub use error::*;
pub use inclusive::*;
pub use tax_group::*;
pub use types::*;
pub use validation::*;
