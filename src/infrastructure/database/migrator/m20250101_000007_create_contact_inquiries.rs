//! Create contact_inquiries table

use sea_orm_migration::prelude::*;

use super::m20250101_000004_create_billboards::Billboards;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ContactInquiries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContactInquiries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContactInquiries::Name).string().null())
                    .col(ColumnDef::new(ContactInquiries::Email).string().null())
                    .col(ColumnDef::new(ContactInquiries::Phone).string().null())
                    .col(ColumnDef::new(ContactInquiries::Message).text().null())
                    .col(
                        ColumnDef::new(ContactInquiries::SubmittedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ContactInquiries::BillboardId).integer().null())
                    .col(
                        ColumnDef::new(ContactInquiries::Status)
                            .string_len(20)
                            .not_null()
                            .default("Pending"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contact_inquiries_billboard")
                            .from(ContactInquiries::Table, ContactInquiries::BillboardId)
                            .to(Billboards::Table, Billboards::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ContactInquiries::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ContactInquiries {
    Table,
    Id,
    Name,
    Email,
    Phone,
    Message,
    SubmittedAt,
    BillboardId,
    Status,
}
