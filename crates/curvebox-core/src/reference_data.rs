//! Reference data: the lookup capability used to resolve conventions.
//!
//! Node dates are resolved against a valuation date and a `ReferenceData`
//! instance that maps calendar identifiers to calendars. The registry is
//! immutable once built and cheap to clone.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::calendars::{Calendar, WeekendCalendar};
use crate::error::{CoreError, CoreResult};

/// Identifier of the weekend-only calendar registered by [`ReferenceData::standard`].
pub const WEEKEND_CALENDAR: &str = "WEEKEND";

/// Immutable registry of calendars keyed by identifier.
///
/// ```rust
/// use curvebox_core::reference_data::{ReferenceData, WEEKEND_CALENDAR};
///
/// let ref_data = ReferenceData::standard();
/// assert!(ref_data.calendar(WEEKEND_CALENDAR).is_ok());
/// assert!(ref_data.calendar("GBLO").is_err());
/// ```
#[derive(Clone, Default)]
pub struct ReferenceData {
    calendars: HashMap<String, Arc<dyn Calendar>>,
}

impl ReferenceData {
    /// Creates an empty registry.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a registry holding the weekend-only calendar.
    #[must_use]
    pub fn standard() -> Self {
        Self::empty().with_calendar(WEEKEND_CALENDAR, Arc::new(WeekendCalendar))
    }

    /// Returns a copy of this registry with an extra calendar.
    ///
    /// An existing entry with the same identifier is replaced.
    #[must_use]
    pub fn with_calendar(mut self, id: impl Into<String>, calendar: Arc<dyn Calendar>) -> Self {
        self.calendars.insert(id.into(), calendar);
        self
    }

    /// Looks up a calendar.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownCalendar` if nothing is registered under `id`.
    pub fn calendar(&self, id: &str) -> CoreResult<Arc<dyn Calendar>> {
        self.calendars
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::unknown_calendar(id))
    }
}

impl fmt::Debug for ReferenceData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&String> = self.calendars.keys().collect();
        ids.sort();
        f.debug_struct("ReferenceData")
            .field("calendars", &ids)
            .finish()
    }
}
