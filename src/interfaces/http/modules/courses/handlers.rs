//! Course API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{ApproveCourseRequest, CoursePage};
use crate::domain::{ApprovedCourse, AreaSummary, CourseDetail, CourseSummary, NewApproval};
use crate::interfaces::http::common::{ApiError, ApiResponse, ApiResult, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::router::ApiState;
use crate::shared::{PageEnvelope, QueryParams};

#[utoipa::path(
    get,
    path = "/api/courses",
    tag = "Courses",
    params(
        ("page" = Option<u64>, Query, description = "Page number, 1-based"),
        ("limit" = Option<u64>, Query, description = "Page size, 1 to 100 (default 20)"),
        ("area" = Option<String>, Query, description = "Exact area name")
    ),
    responses(
        (status = 200, description = "Page of courses ordered by code", body = CoursePage),
        (status = 500, description = "Query failed")
    )
)]
pub async fn list_courses(
    State(state): State<ApiState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<PageEnvelope<CourseSummary>>, ApiError> {
    Ok(Json(state.repos.courses().list(&params).await?))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    tag = "Courses",
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course with professors and recent publications", body = ApiResponse<CourseDetail>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_course(
    State(state): State<ApiState>,
    Path(id): Path<i32>,
) -> ApiResult<CourseDetail> {
    let detail = state
        .repos
        .courses()
        .find_detail(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Course not found".into()))?;
    Ok(Json(ApiResponse::success(detail)))
}

#[utoipa::path(
    get,
    path = "/api/courses/search/{term}",
    tag = "Courses",
    params(("term" = String, Path, description = "Part of the code or name")),
    responses((status = 200, description = "Matching courses, at most 50", body = ApiResponse<Vec<CourseSummary>>))
)]
pub async fn search_courses(
    State(state): State<ApiState>,
    Path(term): Path<String>,
) -> ApiResult<Vec<CourseSummary>> {
    let courses = state.repos.courses().search(&term).await?;
    Ok(Json(ApiResponse::success(courses)))
}

#[utoipa::path(
    get,
    path = "/api/courses/areas",
    tag = "Courses",
    responses((status = 200, description = "Areas with course counts", body = ApiResponse<Vec<AreaSummary>>))
)]
pub async fn list_areas(State(state): State<ApiState>) -> ApiResult<Vec<AreaSummary>> {
    let areas = state.repos.courses().areas().await?;
    Ok(Json(ApiResponse::success(areas)))
}

#[utoipa::path(
    post,
    path = "/api/courses/{id}/approve",
    tag = "Courses",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Course ID")),
    request_body = ApproveCourseRequest,
    responses(
        (status = 201, description = "Course added to the student's record", body = ApiResponse<ApprovedCourse>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Course not found"),
        (status = 409, description = "Already approved"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn approve_course(
    State(state): State<ApiState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<ApproveCourseRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ApprovedCourse>>), ApiError> {
    let approval = NewApproval {
        course_id: id,
        year: request.year,
        semester: request.semester,
    };
    let approved = state.profiles.approve(user.user_id, approval).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(approved))))
}
