//! Migration to create professors table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Professors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Professors::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Professors::FirstNames).string_len(100).not_null())
                    .col(ColumnDef::new(Professors::LastNames).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Professors::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_professors_name")
                    .table(Professors::Table)
                    .col(Professors::LastNames)
                    .col(Professors::FirstNames)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Professors::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Professors {
    Table,
    Id,
    FirstNames,
    LastNames,
    CreatedAt,
}
