//! Contact-us inquiries submitted from the public site

pub mod model;
pub mod repository;

pub use model::{ContactInquiry, ContactStatus};
pub use repository::{ContactInquiryFilter, ContactInquiryRelation, ContactInquiryRepository};
