//! Quote models.

mod quote;

pub use quote::{calc_change_percent, IndexValue, QuoteSnapshot, UPDATED_AT_FORMAT};
