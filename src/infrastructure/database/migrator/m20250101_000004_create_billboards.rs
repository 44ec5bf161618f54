//! Create billboards table

use sea_orm_migration::prelude::*;

use super::m20250101_000003_create_addresses::Addresses;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Billboards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Billboards::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Billboards::Code).string().null())
                    .col(ColumnDef::new(Billboards::Description).text().null())
                    .col(ColumnDef::new(Billboards::SubDescription).text().null())
                    .col(ColumnDef::new(Billboards::ImagePath).string().null())
                    .col(ColumnDef::new(Billboards::Size).string().null())
                    .col(ColumnDef::new(Billboards::Highway).string().null())
                    .col(
                        ColumnDef::new(Billboards::StartBooking)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Billboards::EndBooking)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Billboards::IsAvailable).boolean().null())
                    .col(ColumnDef::new(Billboards::NumberOfFaces).integer().null())
                    .col(ColumnDef::new(Billboards::Kind).string().null())
                    .col(ColumnDef::new(Billboards::LocationUrl).string().null())
                    .col(ColumnDef::new(Billboards::AddressId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_billboards_address")
                            .from(Billboards::Table, Billboards::AddressId)
                            .to(Addresses::Table, Addresses::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // One billboard per address
        manager
            .create_index(
                Index::create()
                    .name("idx_billboards_address_id")
                    .table(Billboards::Table)
                    .col(Billboards::AddressId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Billboards::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Billboards {
    Table,
    Id,
    Code,
    Description,
    SubDescription,
    ImagePath,
    Size,
    Highway,
    StartBooking,
    EndBooking,
    IsAvailable,
    NumberOfFaces,
    Kind,
    LocationUrl,
    AddressId,
}
