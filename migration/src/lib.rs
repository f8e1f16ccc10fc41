pub use sea_orm_migration::prelude::*;

mod m20260601_000001_create_currencies;
mod m20260601_000002_create_currency_rates;
mod m20260603_000001_create_metals;
mod m20260603_000002_create_metal_reference_history;
mod m20260605_000001_create_variants;
mod m20260605_000002_create_quotes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260601_000001_create_currencies::Migration),
            Box::new(m20260601_000002_create_currency_rates::Migration),
            Box::new(m20260603_000001_create_metals::Migration),
            Box::new(m20260603_000002_create_metal_reference_history::Migration),
            Box::new(m20260605_000001_create_variants::Migration),
            Box::new(m20260605_000002_create_quotes::Migration),
        ]
    }
}
