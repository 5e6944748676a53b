//! # Curvebox Core
//!
//! Dates and market conventions shared by the curvebox crates.
//!
//! This crate provides:
//!
//! - **Types**: [`Date`] with whole-day arithmetic and [`Tenor`](types::Tenor)
//! - **Day Count Conventions**: year fractions between two dates
//! - **Business Day Calendars**: holiday detection and date adjustment
//! - **Reference Data**: identifier-based lookup of calendars
//!
//! Conventions are pure functions; nothing here holds mutable state.
//!
//! ## Example
//!
//! ```rust
//! use curvebox_core::prelude::*;
//!
//! let ref_data = ReferenceData::standard();
//! let calendar = ref_data.calendar(WEEKEND_CALENDAR).unwrap();
//! let spot = calendar.add_business_days(Date::from_ymd(2025, 1, 3).unwrap(), 2).unwrap();
//! assert_eq!(spot, Date::from_ymd(2025, 1, 7).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod reference_data;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{BusinessDayConvention, Calendar, HolidayCalendar, WeekendCalendar};
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::reference_data::{ReferenceData, WEEKEND_CALENDAR};
    pub use crate::types::{Date, Tenor, TenorUnit};
}

pub use error::{CoreError, CoreResult};
pub use reference_data::ReferenceData;
pub use types::{Date, Tenor};
