pub use sea_orm_migration::prelude::*;

mod m20250310_000001_create_products;
mod m20250310_000002_create_prices;
mod m20250310_000003_create_computed_indices;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250310_000001_create_products::Migration),
            Box::new(m20250310_000002_create_prices::Migration),
            Box::new(m20250310_000003_create_computed_indices::Migration),
        ]
    }
}
