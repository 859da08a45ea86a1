//! Repository traits for the domain layer

use super::course::CourseRepository;
use super::professor::ProfessorRepository;
use super::publication::PublicationRepository;
use super::user::UserRepository;

/// Unified access to all per-aggregate repositories.
///
/// Handlers and services depend on this trait rather than on the
/// concrete SeaORM implementations.
pub trait RepositoryProvider: Send + Sync {
    fn courses(&self) -> &dyn CourseRepository;
    fn professors(&self) -> &dyn ProfessorRepository;
    fn publications(&self) -> &dyn PublicationRepository;
    fn users(&self) -> &dyn UserRepository;
}
