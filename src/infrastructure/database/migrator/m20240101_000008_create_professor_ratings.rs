//! Migration to create professor_ratings table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProfessorRatings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProfessorRatings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProfessorRatings::ProfessorId).integer().not_null())
                    .col(ColumnDef::new(ProfessorRatings::UserId).integer().not_null())
                    .col(ColumnDef::new(ProfessorRatings::CourseId).integer().null())
                    .col(
                        ColumnDef::new(ProfessorRatings::Score)
                            .integer()
                            .not_null()
                            .check(Expr::col(ProfessorRatings::Score).between(1, 5)),
                    )
                    .col(ColumnDef::new(ProfessorRatings::Comment).text().null())
                    .col(
                        ColumnDef::new(ProfessorRatings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_professor_ratings_professor")
                            .from(ProfessorRatings::Table, ProfessorRatings::ProfessorId)
                            .to(Professors::Table, Professors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_professor_ratings_user")
                            .from(ProfessorRatings::Table, ProfessorRatings::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_professor_ratings_course")
                            .from(ProfessorRatings::Table, ProfessorRatings::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // One rating per student and professor
        manager
            .create_index(
                Index::create()
                    .name("idx_professor_ratings_professor_user")
                    .table(ProfessorRatings::Table)
                    .col(ProfessorRatings::ProfessorId)
                    .col(ProfessorRatings::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProfessorRatings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ProfessorRatings {
    Table,
    Id,
    ProfessorId,
    UserId,
    CourseId,
    Score,
    Comment,
    CreatedAt,
}

#[derive(Iden)]
enum Professors {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
}
