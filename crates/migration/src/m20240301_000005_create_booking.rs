//! Create `booking` and `booking_line` tables.
//!
//! Lines snapshot the repair name and the price quoted at booking time, so
//! later catalog edits do not rewrite accepted bookings.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Booking::Table)
                    .if_not_exists()
                    .col(uuid(Booking::Id).primary_key())
                    .col(ColumnDef::new(Booking::ModelId).uuid().null())
                    .col(string_len(Booking::ModelName, 128).not_null())
                    .col(string_len(Booking::CustomerName, 128).not_null())
                    .col(string_len(Booking::Email, 256).not_null())
                    .col(ColumnDef::new(Booking::Phone).string_len(64).null())
                    .col(ColumnDef::new(Booking::PreferredDate).string_len(32).null())
                    .col(ColumnDef::new(Booking::Notes).text().null())
                    .col(ColumnDef::new(Booking::TotalPrice).double().null())
                    .col(boolean(Booking::PriceOnRequest).not_null())
                    .col(timestamp_with_time_zone(Booking::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_model")
                            .from(Booking::Table, Booking::ModelId)
                            .to(DeviceModel::Table, DeviceModel::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BookingLine::Table)
                    .if_not_exists()
                    .col(uuid(BookingLine::Id).primary_key())
                    .col(uuid(BookingLine::BookingId).not_null())
                    .col(ColumnDef::new(BookingLine::RepairTypeId).uuid().null())
                    .col(string_len(BookingLine::RepairName, 128).not_null())
                    .col(ColumnDef::new(BookingLine::Price).double().null())
                    .col(integer(BookingLine::Position).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_line_booking")
                            .from(BookingLine::Table, BookingLine::BookingId)
                            .to(Booking::Table, Booking::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_line_repair_type")
                            .from(BookingLine::Table, BookingLine::RepairTypeId)
                            .to(RepairType::Table, RepairType::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(BookingLine::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Booking::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Booking {
    Table,
    Id,
    ModelId,
    ModelName,
    CustomerName,
    Email,
    Phone,
    PreferredDate,
    Notes,
    TotalPrice,
    PriceOnRequest,
    CreatedAt,
}

#[derive(DeriveIden)]
enum BookingLine { Table, Id, BookingId, RepairTypeId, RepairName, Price, Position }

#[derive(DeriveIden)]
enum DeviceModel { Table, Id }

#[derive(DeriveIden)]
enum RepairType { Table, Id }
