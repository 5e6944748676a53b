//! Business day calendars and conventions.
//!
//! Calendars are looked up by identifier through
//! [`ReferenceData`](crate::reference_data::ReferenceData) and only ever
//! queried as pure functions of a date.

mod conventions;

pub use conventions::BusinessDayConvention;

use std::collections::HashSet;

use crate::error::CoreResult;
use crate::types::Date;

/// A business day calendar.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is a holiday.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Adjusts a date according to the given business day convention.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if adjustment runs off the date range.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> CoreResult<Date> {
        conventions::adjust(date, convention, self)
    }

    /// Moves a date by a number of business days.
    ///
    /// Zero days returns the date unchanged even if it is a holiday.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the walk runs off the date range.
    fn add_business_days(&self, date: Date, days: i32) -> CoreResult<Date> {
        let mut result = date;
        let mut remaining = days.unsigned_abs();
        let direction: i64 = if days >= 0 { 1 } else { -1 };

        while remaining > 0 {
            result = result.add_days(direction)?;
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }

        Ok(result)
    }
}

/// A weekend-only calendar (no holidays).
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &str {
        "Weekend Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}

/// Weekends plus an explicit set of holiday dates.
#[derive(Debug, Clone)]
pub struct HolidayCalendar {
    name: String,
    holidays: HashSet<Date>,
}

impl HolidayCalendar {
    /// Creates a calendar from a list of holidays.
    pub fn new(name: impl Into<String>, holidays: impl IntoIterator<Item = Date>) -> Self {
        Self {
            name: name.into(),
            holidays: holidays.into_iter().collect(),
        }
    }
}

impl Calendar for HolidayCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !self.holidays.contains(&date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekend_calendar() {
        let cal = WeekendCalendar;

        assert!(cal.is_business_day(Date::from_ymd(2025, 1, 6).unwrap()));
        assert!(cal.is_holiday(Date::from_ymd(2025, 1, 4).unwrap()));
        assert!(cal.is_holiday(Date::from_ymd(2025, 1, 5).unwrap()));
    }

    #[test]
    fn test_add_business_days() {
        let cal = WeekendCalendar;

        // Friday + 1 business day = Monday
        let friday = Date::from_ymd(2025, 1, 3).unwrap();
        assert_eq!(
            cal.add_business_days(friday, 1).unwrap(),
            Date::from_ymd(2025, 1, 6).unwrap()
        );
        assert_eq!(
            cal.add_business_days(friday, -5).unwrap(),
            Date::from_ymd(2024, 12, 27).unwrap()
        );
        assert_eq!(cal.add_business_days(friday, 0).unwrap(), friday);
    }

    #[test]
    fn test_add_business_days_past_range() {
        let last = Date::from(chrono::NaiveDate::MAX);
        assert!(WeekendCalendar.add_business_days(last, 5).is_err());
    }

    #[test]
    fn test_holiday_calendar() {
        let new_year = Date::from_ymd(2025, 1, 1).unwrap();
        let cal = HolidayCalendar::new("Test", [new_year]);

        assert_eq!(cal.name(), "Test");
        assert!(cal.is_holiday(new_year));
        assert!(cal.is_business_day(Date::from_ymd(2025, 1, 2).unwrap()));

        // Dec 31 2024 (Tue) + 1 business day skips the holiday
        let dec31 = Date::from_ymd(2024, 12, 31).unwrap();
        assert_eq!(
            cal.add_business_days(dec31, 1).unwrap(),
            Date::from_ymd(2025, 1, 2).unwrap()
        );
    }
}
