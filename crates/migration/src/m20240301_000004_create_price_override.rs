//! Create `price_override` table with FKs to `device_model` and `repair_type`.
//!
//! One row per (model, repair type); both FKs cascade so no override outlives
//! either side.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PriceOverride::Table)
                    .if_not_exists()
                    .col(uuid(PriceOverride::Id).primary_key())
                    .col(uuid(PriceOverride::ModelId).not_null())
                    .col(uuid(PriceOverride::RepairTypeId).not_null())
                    .col(ColumnDef::new(PriceOverride::Price).double().null())
                    .col(boolean(PriceOverride::Hidden).not_null().default(false))
                    .col(timestamp_with_time_zone(PriceOverride::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_price_override_model")
                            .from(PriceOverride::Table, PriceOverride::ModelId)
                            .to(DeviceModel::Table, DeviceModel::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_price_override_repair_type")
                            .from(PriceOverride::Table, PriceOverride::RepairTypeId)
                            .to(RepairType::Table, RepairType::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(PriceOverride::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum PriceOverride { Table, Id, ModelId, RepairTypeId, Price, Hidden, CreatedAt }

#[derive(DeriveIden)]
enum DeviceModel { Table, Id }

#[derive(DeriveIden)]
enum RepairType { Table, Id }
