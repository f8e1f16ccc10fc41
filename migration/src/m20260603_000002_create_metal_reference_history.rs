use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Append-only reference-value history, one row per change (manual edit
        // or base-currency recomputation)
        manager
            .create_table(
                Table::create()
                    .table(MetalReferenceHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MetalReferenceHistory::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MetalReferenceHistory::MetalId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MetalReferenceHistory::ReferenceValue)
                            .decimal_len(24, 8)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MetalReferenceHistory::EffectiveAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MetalReferenceHistory::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .col(
                        ColumnDef::new(MetalReferenceHistory::CreatedBy)
                            .string_len(64)
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_metal_reference_history_metal_effective")
                    .table(MetalReferenceHistory::Table)
                    .col(MetalReferenceHistory::MetalId)
                    .col((MetalReferenceHistory::EffectiveAt, IndexOrder::Desc))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MetalReferenceHistory::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum MetalReferenceHistory {
    Table,
    Id,
    MetalId,
    ReferenceValue,
    EffectiveAt,
    CreatedAt,
    CreatedBy,
}
