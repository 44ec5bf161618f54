use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::domain::billboard::Billboard;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactStatus {
    #[default]
    Pending,
    InProgress,
    Resolved,
}

impl ContactStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactStatus::Pending => "Pending",
            ContactStatus::InProgress => "InProgress",
            ContactStatus::Resolved => "Resolved",
        }
    }
}

impl fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(ContactStatus::Pending),
            "InProgress" => Ok(ContactStatus::InProgress),
            "Resolved" => Ok(ContactStatus::Resolved),
            other => Err(format!("unknown contact status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContactInquiry {
    pub id: i32,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub submitted_at: DateTime<Utc>,
    /// Cleared when the billboard is deleted
    pub billboard_id: Option<i32>,
    pub status: ContactStatus,

    pub billboard: Option<Box<Billboard>>,
}
