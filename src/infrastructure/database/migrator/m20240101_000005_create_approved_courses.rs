//! Migration to create approved_courses table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ApprovedCourses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ApprovedCourses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ApprovedCourses::UserId).integer().not_null())
                    .col(ColumnDef::new(ApprovedCourses::CourseId).integer().not_null())
                    .col(ColumnDef::new(ApprovedCourses::Year).integer().not_null())
                    .col(ColumnDef::new(ApprovedCourses::Semester).integer().not_null())
                    .col(
                        ColumnDef::new(ApprovedCourses::RegisteredAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_approved_courses_user")
                            .from(ApprovedCourses::Table, ApprovedCourses::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_approved_courses_course")
                            .from(ApprovedCourses::Table, ApprovedCourses::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // A course can be approved once per student
        manager
            .create_index(
                Index::create()
                    .name("idx_approved_courses_user_course")
                    .table(ApprovedCourses::Table)
                    .col(ApprovedCourses::UserId)
                    .col(ApprovedCourses::CourseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ApprovedCourses::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ApprovedCourses {
    Table,
    Id,
    UserId,
    CourseId,
    Year,
    Semester,
    RegisteredAt,
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
