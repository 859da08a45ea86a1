//! Professor DTOs

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::ProfessorSummary;
use crate::shared::PaginationMeta;

/// Shape of `GET /api/professors`
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct ProfessorPage {
    pub professors: Vec<ProfessorSummary>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RateProfessorRequest {
    #[validate(range(min = 1, max = 5, message = "score must be between 1 and 5"))]
    pub score: i32,
    #[validate(length(max = 1000, message = "comment must be at most 1000 characters"))]
    pub comment: Option<String>,
    /// Course in which the professor taught the student
    pub course_id: Option<i32>,
}
