use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Variants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Variants::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Variants::MetalId).integer().not_null())
                    .col(ColumnDef::new(Variants::Name).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Variants::Sku)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Variants::Purity).decimal_len(10, 6).not_null())
                    .col(
                        ColumnDef::new(Variants::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Variants::IsFavorite)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Variants::PricingMode)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Variants::BuyFactor)
                            .decimal_len(24, 8)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Variants::SaleFactor)
                            .decimal_len(24, 8)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Variants::PurchasePriceOverride)
                            .decimal_len(24, 8)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Variants::SalePriceOverride)
                            .decimal_len(24, 8)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Variants::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_variants_metal")
                    .table(Variants::Table)
                    .col(Variants::MetalId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Variants::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Variants {
    Table,
    Id,
    MetalId,
    Name,
    Sku,
    Purity,
    IsActive,
    IsFavorite,
    PricingMode,
    BuyFactor,
    SaleFactor,
    PurchasePriceOverride,
    SalePriceOverride,
    CreatedAt,
}
