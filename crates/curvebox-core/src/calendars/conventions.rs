//! Business day adjustment conventions.

use serde::{Deserialize, Serialize};

use super::Calendar;
use crate::error::CoreResult;
use crate::types::Date;

/// How to move a date that falls on a non-business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BusinessDayConvention {
    /// Use the date as-is.
    Unadjusted,

    /// Move to the following business day.
    Following,

    /// Following, unless that crosses into the next month, then preceding.
    #[default]
    ModifiedFollowing,

    /// Move to the preceding business day.
    Preceding,
}

impl std::fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BusinessDayConvention::Unadjusted => "Unadjusted",
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
        };
        write!(f, "{name}")
    }
}

/// Adjusts a date according to the given convention.
pub fn adjust<C: Calendar + ?Sized>(
    date: Date,
    convention: BusinessDayConvention,
    calendar: &C,
) -> CoreResult<Date> {
    if calendar.is_business_day(date) {
        return Ok(date);
    }

    match convention {
        BusinessDayConvention::Unadjusted => Ok(date),
        BusinessDayConvention::Following => following(date, calendar),
        BusinessDayConvention::ModifiedFollowing => {
            // a failed forward roll falls back to preceding, as a month change would
            match following(date, calendar) {
                Ok(adjusted) if adjusted.month() == date.month() => Ok(adjusted),
                _ => preceding(date, calendar),
            }
        }
        BusinessDayConvention::Preceding => preceding(date, calendar),
    }
}

fn following<C: Calendar + ?Sized>(mut date: Date, calendar: &C) -> CoreResult<Date> {
    while !calendar.is_business_day(date) {
        date = date.add_days(1)?;
    }
    Ok(date)
}

fn preceding<C: Calendar + ?Sized>(mut date: Date, calendar: &C) -> CoreResult<Date> {
    while !calendar.is_business_day(date) {
        date = date.add_days(-1)?;
    }
    Ok(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::WeekendCalendar;

    #[test]
    fn test_following() {
        let saturday = Date::from_ymd(2025, 1, 4).unwrap();
        let adjusted = adjust(saturday, BusinessDayConvention::Following, &WeekendCalendar).unwrap();
        assert_eq!(adjusted, Date::from_ymd(2025, 1, 6).unwrap());
    }

    #[test]
    fn test_preceding() {
        let sunday = Date::from_ymd(2025, 1, 5).unwrap();
        let adjusted = adjust(sunday, BusinessDayConvention::Preceding, &WeekendCalendar).unwrap();
        assert_eq!(adjusted, Date::from_ymd(2025, 1, 3).unwrap());
    }

    #[test]
    fn test_modified_following_month_end() {
        // Saturday May 31 2025 would roll into June, so go back to Friday
        let saturday = Date::from_ymd(2025, 5, 31).unwrap();
        let adjusted = adjust(
            saturday,
            BusinessDayConvention::ModifiedFollowing,
            &WeekendCalendar,
        )
        .unwrap();
        assert_eq!(adjusted, Date::from_ymd(2025, 5, 30).unwrap());
    }

    #[test]
    fn test_unadjusted_and_business_day() {
        let saturday = Date::from_ymd(2025, 1, 4).unwrap();
        assert_eq!(
            adjust(saturday, BusinessDayConvention::Unadjusted, &WeekendCalendar).unwrap(),
            saturday
        );
        let monday = Date::from_ymd(2025, 1, 6).unwrap();
        assert_eq!(
            adjust(monday, BusinessDayConvention::Preceding, &WeekendCalendar).unwrap(),
            monday
        );
    }
}
