use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Brand: listing order
        manager
            .create_index(
                Index::create()
                    .name("idx_brand_order")
                    .table(Brand::Table)
                    .col(Brand::OrderIndex)
                    .to_owned(),
            )
            .await?;

        // DeviceModel: per-brand listing order. Not unique: a reorder batch
        // passes through transient duplicates before it commits.
        manager
            .create_index(
                Index::create()
                    .name("idx_device_model_brand_order")
                    .table(DeviceModel::Table)
                    .col(DeviceModel::BrandId)
                    .col(DeviceModel::OrderIndex)
                    .to_owned(),
            )
            .await?;

        // RepairType: catalog order
        manager
            .create_index(
                Index::create()
                    .name("idx_repair_type_order")
                    .table(RepairType::Table)
                    .col(RepairType::OrderIndex)
                    .to_owned(),
            )
            .await?;

        // PriceOverride: at most one override per (model, repair type)
        manager
            .create_index(
                Index::create()
                    .name("uniq_price_override_model_repair")
                    .table(PriceOverride::Table)
                    .col(PriceOverride::ModelId)
                    .col(PriceOverride::RepairTypeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // BookingLine: lookup by booking
        manager
            .create_index(
                Index::create()
                    .name("idx_booking_line_booking")
                    .table(BookingLine::Table)
                    .col(BookingLine::BookingId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_brand_order").table(Brand::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_device_model_brand_order").table(DeviceModel::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_repair_type_order").table(RepairType::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_price_override_model_repair").table(PriceOverride::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_booking_line_booking").table(BookingLine::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Brand { Table, OrderIndex }

#[derive(DeriveIden)]
enum DeviceModel { Table, BrandId, OrderIndex }

#[derive(DeriveIden)]
enum RepairType { Table, OrderIndex }

#[derive(DeriveIden)]
enum PriceOverride { Table, ModelId, RepairTypeId }

#[derive(DeriveIden)]
enum BookingLine { Table, BookingId }
