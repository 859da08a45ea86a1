//! Course aggregate

pub mod model;
pub mod repository;

pub use model::{AreaSummary, CourseDetail, CourseProfessor, CourseSummary};
pub use repository::CourseRepository;
