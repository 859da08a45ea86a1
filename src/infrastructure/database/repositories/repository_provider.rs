//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::{
    CourseRepository, ProfessorRepository, PublicationRepository, RepositoryProvider,
    UserRepository,
};

use super::course_repository::SeaOrmCourseRepository;
use super::professor_repository::SeaOrmProfessorRepository;
use super::publication_repository::SeaOrmPublicationRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let page = repos.courses().list(&params).await?;
/// let me = repos.users().find_by_student_id("202400001").await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    courses: SeaOrmCourseRepository,
    professors: SeaOrmProfessorRepository,
    publications: SeaOrmPublicationRepository,
    users: SeaOrmUserRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            courses: SeaOrmCourseRepository::new(db.clone()),
            professors: SeaOrmProfessorRepository::new(db.clone()),
            publications: SeaOrmPublicationRepository::new(db.clone()),
            users: SeaOrmUserRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn courses(&self) -> &dyn CourseRepository {
        &self.courses
    }

    fn professors(&self) -> &dyn ProfessorRepository {
        &self.professors
    }

    fn publications(&self) -> &dyn PublicationRepository {
        &self.publications
    }

    fn users(&self) -> &dyn UserRepository {
        &self.users
    }
}
