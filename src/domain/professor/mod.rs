//! Professor aggregate

pub mod model;
pub mod repository;

pub use model::{
    NewRating, ProfessorCourse, ProfessorDetail, ProfessorRating, ProfessorSummary,
    RankedProfessor,
};
pub use repository::ProfessorRepository;
