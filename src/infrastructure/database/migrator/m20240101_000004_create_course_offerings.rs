//! Migration to create course_offerings table (which professor taught which
//! course, and when)

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CourseOfferings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseOfferings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CourseOfferings::CourseId).integer().not_null())
                    .col(ColumnDef::new(CourseOfferings::ProfessorId).integer().not_null())
                    .col(ColumnDef::new(CourseOfferings::Year).integer().not_null())
                    .col(ColumnDef::new(CourseOfferings::Semester).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_offerings_course")
                            .from(CourseOfferings::Table, CourseOfferings::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_offerings_professor")
                            .from(CourseOfferings::Table, CourseOfferings::ProfessorId)
                            .to(Professors::Table, Professors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_course_offerings_course")
                    .table(CourseOfferings::Table)
                    .col(CourseOfferings::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_course_offerings_professor")
                    .table(CourseOfferings::Table)
                    .col(CourseOfferings::ProfessorId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CourseOfferings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CourseOfferings {
    Table,
    Id,
    CourseId,
    ProfessorId,
    Year,
    Semester,
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
}

#[derive(Iden)]
enum Professors {
    Table,
    Id,
}
