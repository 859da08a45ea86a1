//! Professor API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{ProfessorPage, RateProfessorRequest};
use crate::domain::{NewRating, ProfessorDetail, ProfessorRating, ProfessorSummary, RankedProfessor};
use crate::interfaces::http::common::{ApiError, ApiResponse, ApiResult, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::router::ApiState;
use crate::shared::{PageEnvelope, PageRequest, QueryParams};

/// Default size of the ranking
const TOP_DEFAULT_LIMIT: u64 = 10;

#[utoipa::path(
    get,
    path = "/api/professors",
    tag = "Professors",
    params(
        ("page" = Option<u64>, Query, description = "Page number, 1-based"),
        ("limit" = Option<u64>, Query, description = "Page size, 1 to 100 (default 20)"),
        ("course_id" = Option<i32>, Query, description = "Only professors who taught this course (alias `curso_id`)"),
        ("sort_by" = Option<String>, Query, description = "`name` (default), `rating` or `popularity`")
    ),
    responses((status = 200, description = "Page of professors", body = ProfessorPage))
)]
pub async fn list_professors(
    State(state): State<ApiState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<PageEnvelope<ProfessorSummary>>, ApiError> {
    Ok(Json(state.repos.professors().list(&params).await?))
}

#[utoipa::path(
    get,
    path = "/api/professors/{id}",
    tag = "Professors",
    params(("id" = i32, Path, description = "Professor ID")),
    responses(
        (status = 200, description = "Professor with courses taught and recent publications", body = ApiResponse<ProfessorDetail>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_professor(
    State(state): State<ApiState>,
    Path(id): Path<i32>,
) -> ApiResult<ProfessorDetail> {
    let detail = state
        .repos
        .professors()
        .find_detail(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Professor not found".into()))?;
    Ok(Json(ApiResponse::success(detail)))
}

#[utoipa::path(
    get,
    path = "/api/professors/search/{name}",
    tag = "Professors",
    params(("name" = String, Path, description = "Part of the first names, last names or full name")),
    responses((status = 200, description = "Matching professors", body = ApiResponse<Vec<ProfessorSummary>>))
)]
pub async fn search_professors(
    State(state): State<ApiState>,
    Path(name): Path<String>,
) -> ApiResult<Vec<ProfessorSummary>> {
    let professors = state.repos.professors().search(&name).await?;
    Ok(Json(ApiResponse::success(professors)))
}

#[utoipa::path(
    get,
    path = "/api/professors/top",
    tag = "Professors",
    params(("limit" = Option<u64>, Query, description = "Ranking size, 1 to 100 (default 10)")),
    responses((status = 200, description = "Professors with publications, most discussed first", body = ApiResponse<Vec<RankedProfessor>>))
)]
pub async fn top_professors(
    State(state): State<ApiState>,
    Query(params): Query<QueryParams>,
) -> ApiResult<Vec<RankedProfessor>> {
    let request = PageRequest::normalize(
        None,
        params.get("limit").map(String::as_str),
        TOP_DEFAULT_LIMIT,
    );
    let ranking = state.repos.professors().top(request.limit).await?;
    Ok(Json(ApiResponse::success(ranking)))
}

#[utoipa::path(
    post,
    path = "/api/professors/{id}/ratings",
    tag = "Professors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Professor ID")),
    request_body = RateProfessorRequest,
    responses(
        (status = 201, description = "Rating stored", body = ApiResponse<ProfessorRating>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Professor or course not found"),
        (status = 409, description = "Already rated by this user"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn rate_professor(
    State(state): State<ApiState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<RateProfessorRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProfessorRating>>), ApiError> {
    let rating = NewRating {
        professor_id: id,
        user_id: user.user_id,
        course_id: request.course_id,
        score: request.score,
        comment: request
            .comment
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty()),
    };
    let stored = state.repos.professors().rate(rating).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(stored))))
}
