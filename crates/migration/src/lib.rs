//! Migrator registering catalog, override, and intake tables in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_brand;
mod m20240301_000002_create_device_model;
mod m20240301_000003_create_repair_type;
mod m20240301_000004_create_price_override;
mod m20240301_000005_create_booking;
mod m20240301_000006_create_contact_message;
mod m20240301_000099_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_brand::Migration),
            Box::new(m20240301_000002_create_device_model::Migration),
            Box::new(m20240301_000003_create_repair_type::Migration),
            Box::new(m20240301_000004_create_price_override::Migration),
            Box::new(m20240301_000005_create_booking::Migration),
            Box::new(m20240301_000006_create_contact_message::Migration),
            // Indexes should always be applied last
            Box::new(m20240301_000099_add_indexes::Migration),
        ]
    }
}
