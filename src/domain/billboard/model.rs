use chrono::{DateTime, Utc};

use crate::domain::address::Address;
use crate::domain::booking::Booking;

/// A billboard face offered for booking
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Billboard {
    pub id: i32,
    /// Human-facing inventory code
    pub code: Option<String>,
    pub description: Option<String>,
    pub sub_description: Option<String>,
    pub image_path: Option<String>,
    pub size: Option<String>,
    pub highway: Option<String>,
    pub start_booking: DateTime<Utc>,
    pub end_booking: Option<DateTime<Utc>>,
    pub is_available: Option<bool>,
    pub number_of_faces: Option<i32>,
    /// Display type (e.g. "Unipole", "Mega")
    pub kind: Option<String>,
    pub location_url: Option<String>,
    /// At most one billboard per address
    pub address_id: Option<i32>,

    pub address: Option<Box<Address>>,
    pub bookings: Option<Vec<Booking>>,
}

impl Billboard {
    /// Available flag set and the booking window contains `at`.
    /// An open-ended window (`end_booking` unset) never closes.
    pub fn is_available_at(&self, at: DateTime<Utc>) -> bool {
        self.is_available == Some(true)
            && self.start_booking <= at
            && self.end_booking.map_or(true, |end| end >= at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn availability_window() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let mut b = Billboard {
            start_booking: now - Duration::days(1),
            is_available: Some(true),
            ..Default::default()
        };
        assert!(b.is_available_at(now));

        b.end_booking = Some(now - Duration::hours(1));
        assert!(!b.is_available_at(now));

        b.end_booking = None;
        b.is_available = None;
        assert!(!b.is_available_at(now));
    }
}
