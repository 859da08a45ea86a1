//! User DTOs

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{NewApproval, ProfileUpdate};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "first names are required"))]
    pub first_names: String,
    #[validate(length(min = 1, max = 100, message = "last names are required"))]
    pub last_names: String,
    #[validate(email(message = "invalid email format"))]
    pub email: String,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(request: UpdateProfileRequest) -> Self {
        Self {
            first_names: request.first_names,
            last_names: request.last_names,
            email: request.email,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ApprovalRequest {
    #[serde(alias = "curso_id")]
    pub course_id: i32,
    #[validate(range(min = 1950, max = 2100, message = "year must be between 1950 and 2100"))]
    pub year: i32,
    #[validate(range(min = 1, max = 2, message = "semester must be 1 or 2"))]
    pub semester: i32,
}

impl From<ApprovalRequest> for NewApproval {
    fn from(request: ApprovalRequest) -> Self {
        Self {
            course_id: request.course_id,
            year: request.year,
            semester: request.semester,
        }
    }
}
