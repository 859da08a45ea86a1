//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users;
mod m20240101_000002_create_courses;
mod m20240101_000003_create_professors;
mod m20240101_000004_create_course_offerings;
mod m20240101_000005_create_approved_courses;
mod m20240101_000006_create_publications;
mod m20240101_000007_create_comments;
mod m20240101_000008_create_professor_ratings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users::Migration),
            Box::new(m20240101_000002_create_courses::Migration),
            Box::new(m20240101_000003_create_professors::Migration),
            Box::new(m20240101_000004_create_course_offerings::Migration),
            Box::new(m20240101_000005_create_approved_courses::Migration),
            Box::new(m20240101_000006_create_publications::Migration),
            Box::new(m20240101_000007_create_comments::Migration),
            Box::new(m20240101_000008_create_professor_ratings::Migration),
        ]
    }
}
