use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Prices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Prices::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Prices::ProductId).integer().not_null())
                    .col(ColumnDef::new(Prices::Year).integer().not_null())
                    .col(
                        ColumnDef::new(Prices::Value)
                            .decimal_len(18, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Prices::QuantityConsumed)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        // Observations go away with their product
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_prices_product_id")
                    .from(Prices::Table, Prices::ProductId)
                    .to(Products::Table, Products::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        // No unique (product_id, year): the first observation found for a year wins
        manager
            .create_index(
                Index::create()
                    .name("idx_prices_product_year")
                    .table(Prices::Table)
                    .col(Prices::ProductId)
                    .col(Prices::Year)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Prices::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Prices {
    Table,
    Id,
    ProductId,
    Year,
    Value,
    QuantityConsumed,
}

#[derive(Iden)]
enum Products {
    Table,
    Id,
}
