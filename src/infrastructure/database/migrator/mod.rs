//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_admin_users;
mod m20250101_000002_create_refresh_tokens;
mod m20250101_000003_create_addresses;
mod m20250101_000004_create_billboards;
mod m20250101_000005_create_clients;
mod m20250101_000006_create_bookings;
mod m20250101_000007_create_contact_inquiries;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_admin_users::Migration),
            Box::new(m20250101_000002_create_refresh_tokens::Migration),
            Box::new(m20250101_000003_create_addresses::Migration),
            Box::new(m20250101_000004_create_billboards::Migration),
            Box::new(m20250101_000005_create_clients::Migration),
            Box::new(m20250101_000006_create_bookings::Migration),
            Box::new(m20250101_000007_create_contact_inquiries::Migration),
        ]
    }
}
