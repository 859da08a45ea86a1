//! Database entities module

pub mod approved_course;
pub mod comment;
pub mod course;
pub mod course_offering;
pub mod professor;
pub mod professor_rating;
pub mod publication;
pub mod user;

pub use approved_course::Entity as ApprovedCourse;
pub use comment::Entity as Comment;
pub use course::Entity as Course;
pub use course_offering::Entity as CourseOffering;
pub use professor::Entity as Professor;
pub use professor_rating::Entity as ProfessorRating;
pub use publication::Entity as Publication;
pub use user::Entity as User;
