use std::collections::HashSet;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use crate::core::errors::{BookingError, FieldError};
use crate::core::models::reservation::Reservation;

/// Customers can cancel a reservation within 15 minutes of booking it.
/// Eligibility depends only on how recently the booking was made, not on
/// how close the reserved dates are.
pub const CANCELLATION_WINDOW_MINUTES: i64 = 15;

/// A validated reservation window: `start` strictly precedes `end`, both
/// calendar dates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, BookingError> {
        if start >= end {
            return Err(BookingError::InvalidInput(
                "start_date".to_string(),
                FieldError {
                    field: "start_date".to_string(),
                    title: "Invalid date range".to_string(),
                    description: "Start date must be before end date".to_string(),
                },
            ));
        }
        Ok(DateRange { start, end })
    }

    /// Inclusive-bounds overlap test: `[s1,e1]` conflicts with `[s2,e2]`
    /// iff `s1 <= e2 && e1 >= s2`. Touching ranges (`e1 == s2`) conflict,
    /// so a checkout day can never double as someone else's checkin day.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

impl From<&Reservation> for DateRange {
    fn from(reservation: &Reservation) -> Self {
        // Persisted reservations were validated at creation.
        DateRange {
            start: reservation.start_date,
            end: reservation.end_date,
        }
    }
}

/// First existing reservation that overlaps the requested window, if any.
/// O(n) over the studio's reservations.
pub fn find_conflict<'a>(existing: &'a [Reservation], window: &DateRange) -> Option<&'a Reservation> {
    existing.iter().find(|r| DateRange::from(*r).overlaps(window))
}

/// Grace-period check, inclusive at exactly 15 minutes.
pub fn within_cancellation_window(created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now.signed_duration_since(created_at) <= Duration::minutes(CANCELLATION_WINDOW_MINUTES)
}

/// Every day of the given calendar year not covered by any reservation.
/// Pure function over a snapshot; recomputed on demand, never persisted.
pub fn available_days(year: i32, reservations: &[Reservation]) -> Vec<NaiveDate> {
    let reserved: HashSet<NaiveDate> = reservations
        .iter()
        .flat_map(|r| DateRange::from(r).days().collect::<Vec<_>>())
        .collect();

    let Some(first) = NaiveDate::from_ymd_opt(year, 1, 1) else {
        return Vec::new();
    };
    first
        .iter_days()
        .take_while(|d| d.year() == year)
        .filter(|d| !reserved.contains(d))
        .collect()
}
