//! Profile API handlers
//!
//! All routes act on the authenticated student.
//! Delegates to `ProfileService` from the application layer.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{ApprovalRequest, UpdateProfileRequest};
use crate::domain::{ApprovedCourse, ProfileOverview, StudentRecord, UserProfile, UserStats};
use crate::interfaces::http::common::{ApiError, ApiResponse, ApiResult, EmptyData, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::router::ApiState;

#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own profile with approved courses and recent publications", body = ApiResponse<ProfileOverview>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_me(
    State(state): State<ApiState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<ProfileOverview> {
    let overview = state.profiles.overview(user.user_id).await?;
    Ok(Json(ApiResponse::success(overview)))
}

#[utoipa::path(
    put,
    path = "/api/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<UserProfile>),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Email belongs to another user"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn update_me(
    State(state): State<ApiState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<UserProfile> {
    let profile = state.profiles.update(user.user_id, request.into()).await?;
    Ok(Json(ApiResponse::success(profile)))
}

#[utoipa::path(
    get,
    path = "/api/users/me/approved-courses",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Approved courses, most recent term first", body = ApiResponse<Vec<ApprovedCourse>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_approved_courses(
    State(state): State<ApiState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Vec<ApprovedCourse>> {
    let courses = state.profiles.approved_courses(user.user_id).await?;
    Ok(Json(ApiResponse::success(courses)))
}

#[utoipa::path(
    post,
    path = "/api/users/me/approved-courses",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = ApprovalRequest,
    responses(
        (status = 201, description = "Course approved", body = ApiResponse<ApprovedCourse>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Course not found"),
        (status = 409, description = "Already approved")
    )
)]
pub async fn add_approved_course(
    State(state): State<ApiState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<ApprovalRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ApprovedCourse>>), ApiError> {
    let approved = state.profiles.approve(user.user_id, request.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(approved))))
}

#[utoipa::path(
    delete,
    path = "/api/users/me/approved-courses/{course_id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("course_id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Approval removed", body = ApiResponse<EmptyData>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Course was not approved")
    )
)]
pub async fn remove_approved_course(
    State(state): State<ApiState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(course_id): Path<i32>,
) -> ApiResult<EmptyData> {
    state
        .profiles
        .remove_approval(user.user_id, course_id)
        .await?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}

#[utoipa::path(
    get,
    path = "/api/users/me/stats",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Approvals by area and year, publications by kind", body = ApiResponse<UserStats>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_stats(
    State(state): State<ApiState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<UserStats> {
    let stats = state.profiles.stats(user.user_id).await?;
    Ok(Json(ApiResponse::success(stats)))
}

#[utoipa::path(
    get,
    path = "/api/users/search/{student_id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("student_id" = String, Path, description = "Registration number")),
    responses(
        (status = 200, description = "Public academic record", body = ApiResponse<StudentRecord>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    )
)]
pub async fn find_student(
    State(state): State<ApiState>,
    Path(student_id): Path<String>,
) -> ApiResult<StudentRecord> {
    let record = state.profiles.public_record(&student_id).await?;
    Ok(Json(ApiResponse::success(record)))
}
