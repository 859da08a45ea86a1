//! Course DTOs

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::CourseSummary;
use crate::shared::PaginationMeta;

/// Shape of `GET /api/courses`
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct CoursePage {
    pub courses: Vec<CourseSummary>,
    pub pagination: PaginationMeta,
}

/// Term in which the course was passed
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ApproveCourseRequest {
    #[validate(range(min = 1950, max = 2100, message = "year must be between 1950 and 2100"))]
    pub year: i32,
    #[validate(range(min = 1, max = 2, message = "semester must be 1 or 2"))]
    pub semester: i32,
}
