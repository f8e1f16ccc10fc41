use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Append-only exchange-rate history; rows are never updated or deleted
        manager
            .create_table(
                Table::create()
                    .table(CurrencyRates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CurrencyRates::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CurrencyRates::CurrencyId).integer().not_null())
                    .col(
                        ColumnDef::new(CurrencyRates::Rate)
                            .decimal_len(24, 8)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CurrencyRates::EffectiveAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CurrencyRates::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .col(ColumnDef::new(CurrencyRates::CreatedBy).string_len(64).null())
                    .to_owned(),
            )
            .await?;

        // Fast "current rate" lookup: (currency_id, effective_at DESC)
        manager
            .create_index(
                Index::create()
                    .name("idx_currency_rates_currency_effective")
                    .table(CurrencyRates::Table)
                    .col(CurrencyRates::CurrencyId)
                    .col((CurrencyRates::EffectiveAt, IndexOrder::Desc))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CurrencyRates::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CurrencyRates {
    Table,
    Id,
    CurrencyId,
    Rate,
    EffectiveAt,
    CreatedAt,
    CreatedBy,
}
