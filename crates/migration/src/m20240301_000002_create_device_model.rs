//! Create `device_model` table with FK to `brand`.
//!
//! `order_index` is scoped per brand. Brand deletion is restricted while
//! models still reference it.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DeviceModel::Table)
                    .if_not_exists()
                    .col(uuid(DeviceModel::Id).primary_key())
                    .col(uuid(DeviceModel::BrandId).not_null())
                    .col(string_len(DeviceModel::Name, 128).not_null())
                    .col(ColumnDef::new(DeviceModel::Year).integer().null())
                    .col(ColumnDef::new(DeviceModel::ImageUrl).string_len(512).null())
                    .col(string_len(DeviceModel::DeviceKind, 16).not_null())
                    .col(integer(DeviceModel::OrderIndex).not_null())
                    .col(timestamp_with_time_zone(DeviceModel::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(DeviceModel::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_device_model_brand")
                            .from(DeviceModel::Table, DeviceModel::BrandId)
                            .to(Brand::Table, Brand::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(DeviceModel::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum DeviceModel {
    Table,
    Id,
    BrandId,
    Name,
    Year,
    ImageUrl,
    DeviceKind,
    OrderIndex,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Brand { Table, Id }
