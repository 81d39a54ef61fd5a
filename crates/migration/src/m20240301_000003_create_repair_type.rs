//! Create `repair_type` table.
//!
//! Shared repair catalog; carries no price. Names are unique (case-sensitive).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RepairType::Table)
                    .if_not_exists()
                    .col(uuid(RepairType::Id).primary_key())
                    .col(string_len(RepairType::Name, 128).unique_key().not_null())
                    .col(ColumnDef::new(RepairType::Description).text().null())
                    .col(ColumnDef::new(RepairType::DurationMinutes).integer().null())
                    .col(string_len(RepairType::Icon, 64).not_null())
                    .col(integer(RepairType::OrderIndex).not_null())
                    .col(timestamp_with_time_zone(RepairType::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(RepairType::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(RepairType::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum RepairType {
    Table,
    Id,
    Name,
    Description,
    DurationMinutes,
    Icon,
    OrderIndex,
    CreatedAt,
    UpdatedAt,
}
