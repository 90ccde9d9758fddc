//! Invoice arithmetic: line amounts, totals and currency display.
//!
//! Every function here is pure. Raw user input goes in as strings, exact
//! decimal values come out, and formatting happens only at the edge.

pub mod common;
pub mod currency;
pub mod line_item;
pub mod totals;

pub use currency::format_currency;
pub use line_item::{LineAmount, line_amount};
pub use totals::{TotalsCalculator, parse_tax_rate};
