//! Domain types.
//!
//! - [`Date`]: calendar date with whole-day arithmetic
//! - [`Tenor`]: period such as `3M` or `10Y`

mod date;
mod tenor;

pub use date::Date;
pub use tenor::{Tenor, TenorUnit};
