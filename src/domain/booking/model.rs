use chrono::{DateTime, Utc};

use crate::domain::billboard::Billboard;
use crate::domain::client::Client;

/// A client's reservation of a billboard.
///
/// Overlapping bookings of the same billboard are not rejected.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Booking {
    pub id: i32,
    pub client_id: Option<i32>,
    pub billboard_id: Option<i32>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,

    pub client: Option<Box<Client>>,
    pub billboard: Option<Box<Billboard>>,
}

impl Booking {
    pub fn new(client_id: i32, billboard_id: i32, start_date: DateTime<Utc>) -> Self {
        Self {
            client_id: Some(client_id),
            billboard_id: Some(billboard_id),
            start_date,
            ..Default::default()
        }
    }
}
