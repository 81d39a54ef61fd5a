//! Create `brand` table.
//!
//! Device manufacturers; `order_index` is the global manual display order.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Brand::Table)
                    .if_not_exists()
                    .col(uuid(Brand::Id).primary_key())
                    .col(string_len(Brand::Name, 128).not_null())
                    .col(string_len(Brand::Logo, 512).not_null())
                    .col(integer(Brand::OrderIndex).not_null())
                    .col(timestamp_with_time_zone(Brand::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Brand::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Brand::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Brand { Table, Id, Name, Logo, OrderIndex, CreatedAt, UpdatedAt }
