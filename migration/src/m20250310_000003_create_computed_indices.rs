use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Append-only log of computed index values. Repeated computations for the
        // same (type, base_year, current_year) add rows, so there is no unique key.
        manager
            .create_table(
                Table::create()
                    .table(ComputedIndices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ComputedIndices::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ComputedIndices::IndexType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ComputedIndices::BaseYear).integer().not_null())
                    .col(ColumnDef::new(ComputedIndices::CurrentYear).integer().not_null())
                    .col(
                        ColumnDef::new(ComputedIndices::Value)
                            .decimal_len(18, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ComputedIndices::ComputedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_computed_indices_period")
                    .table(ComputedIndices::Table)
                    .col(ComputedIndices::BaseYear)
                    .col(ComputedIndices::CurrentYear)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ComputedIndices::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ComputedIndices {
    Table,
    Id,
    IndexType,
    BaseYear,
    CurrentYear,
    Value,
    ComputedAt,
}
