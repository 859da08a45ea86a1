//! Domain layer
//!
//! Read models returned by the API, write commands, and the repository
//! interfaces the infrastructure layer implements.

pub mod course;
pub mod professor;
pub mod publication;
pub mod repositories;
pub mod user;

pub use course::{AreaSummary, CourseDetail, CourseProfessor, CourseRepository, CourseSummary};
pub use professor::{
    NewRating, ProfessorCourse, ProfessorDetail, ProfessorRating, ProfessorRepository,
    ProfessorSummary, RankedProfessor,
};
pub use publication::{
    CommentView, NewComment, NewPublication, PublicationKind, PublicationRepository,
    PublicationView,
};
pub use repositories::RepositoryProvider;
pub use user::{
    ApprovedCourse, AreaProgress, KindCount, NewApproval, NewUser, ProfileOverview, ProfileUpdate,
    StudentRecord, UserAccount, UserProfile, UserRepository, UserStats, YearProgress,
};

pub use crate::shared::errors::{DomainError, DomainResult};
