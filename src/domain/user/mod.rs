//! User aggregate (students and their academic record)

pub mod model;
pub mod repository;

pub use model::{
    ApprovedCourse, AreaProgress, KindCount, NewApproval, NewUser, ProfileOverview, ProfileUpdate,
    StudentRecord, UserAccount, UserProfile, UserStats, YearProgress,
};
pub use repository::UserRepository;
