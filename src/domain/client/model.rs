use chrono::{DateTime, Utc};

use crate::domain::booking::Booking;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Client {
    pub id: i32,
    pub name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub logo_path: Option<String>,
    pub bookings: Option<Vec<Booking>>,
}

impl Client {
    pub fn new(name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            name: Some(name.into()),
            created_at: Some(created_at),
            ..Default::default()
        }
    }
}
