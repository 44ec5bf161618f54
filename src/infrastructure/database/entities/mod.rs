//! Database entities module

pub mod address;
pub mod admin_user;
pub mod billboard;
pub mod booking;
pub mod client;
pub mod contact_inquiry;
pub mod refresh_token;

pub use address::Entity as Address;
pub use admin_user::Entity as AdminUser;
pub use billboard::Entity as Billboard;
pub use booking::Entity as Booking;
pub use client::Entity as Client;
pub use contact_inquiry::Entity as ContactInquiry;
pub use refresh_token::Entity as RefreshToken;
