use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Metals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Metals::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Metals::Name)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Metals::Symbol).string_len(8).null())
                    .col(
                        ColumnDef::new(Metals::ReferenceValue)
                            .decimal_len(24, 8)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Metals::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Metals::SortOrder).integer().not_null())
                    .col(
                        ColumnDef::new(Metals::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_metals_sort_order")
                    .table(Metals::Table)
                    .col(Metals::SortOrder)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Metals::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Metals {
    Table,
    Id,
    Name,
    Symbol,
    ReferenceValue,
    IsActive,
    SortOrder,
    CreatedAt,
}
