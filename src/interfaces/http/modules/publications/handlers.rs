//! Publication API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{CommentPage, CreateCommentRequest, CreatePublicationRequest, PublicationPage};
use crate::domain::{CommentView, NewComment, NewPublication, PublicationView};
use crate::interfaces::http::common::{ApiError, ApiResponse, ApiResult, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::router::ApiState;
use crate::shared::{PageEnvelope, QueryParams};

#[utoipa::path(
    get,
    path = "/api/publications",
    tag = "Publications",
    params(
        ("page" = Option<u64>, Query, description = "Page number, 1-based"),
        ("limit" = Option<u64>, Query, description = "Page size, 1 to 100 (default 10)"),
        ("course_id" = Option<i32>, Query, description = "Course ID (alias `curso_id`)"),
        ("professor_id" = Option<i32>, Query, description = "Professor ID (alias `catedratico_id`)"),
        ("kind" = Option<String>, Query, description = "Publication kind")
    ),
    responses((status = 200, description = "Page of publications, newest first", body = PublicationPage))
)]
pub async fn list_publications(
    State(state): State<ApiState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<PageEnvelope<PublicationView>>, ApiError> {
    Ok(Json(state.repos.publications().list(&params).await?))
}

#[utoipa::path(
    get,
    path = "/api/publications/{id}",
    tag = "Publications",
    params(("id" = i32, Path, description = "Publication ID")),
    responses(
        (status = 200, description = "Publication with author and target", body = ApiResponse<PublicationView>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_publication(
    State(state): State<ApiState>,
    Path(id): Path<i32>,
) -> ApiResult<PublicationView> {
    let publication = state
        .repos
        .publications()
        .find(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Publication not found".into()))?;
    Ok(Json(ApiResponse::success(publication)))
}

#[utoipa::path(
    get,
    path = "/api/publications/{id}/comments",
    tag = "Publications",
    params(
        ("id" = i32, Path, description = "Publication ID"),
        ("page" = Option<u64>, Query, description = "Page number, 1-based"),
        ("limit" = Option<u64>, Query, description = "Page size, 1 to 100 (default 20)")
    ),
    responses(
        (status = 200, description = "Page of comments, oldest first", body = CommentPage),
        (status = 404, description = "Publication not found")
    )
)]
pub async fn list_comments(
    State(state): State<ApiState>,
    Path(id): Path<i32>,
    Query(params): Query<QueryParams>,
) -> Result<Json<PageEnvelope<CommentView>>, ApiError> {
    Ok(Json(state.repos.publications().comments(id, &params).await?))
}

#[utoipa::path(
    post,
    path = "/api/publications",
    tag = "Publications",
    security(("bearer_auth" = [])),
    request_body = CreatePublicationRequest,
    responses(
        (status = 201, description = "Publication created", body = ApiResponse<PublicationView>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Course or professor not found"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_publication(
    State(state): State<ApiState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreatePublicationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PublicationView>>), ApiError> {
    let publication = NewPublication {
        user_id: user.user_id,
        kind: request.kind,
        message: request.message.trim().to_string(),
        course_id: request.course_id,
        professor_id: request.professor_id,
    };
    let created = state.repos.publications().create(publication).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

#[utoipa::path(
    post,
    path = "/api/publications/{id}/comments",
    tag = "Publications",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Publication ID")),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment added", body = ApiResponse<CommentView>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Publication not found"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn add_comment(
    State(state): State<ApiState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CommentView>>), ApiError> {
    let comment = NewComment {
        publication_id: id,
        user_id: user.user_id,
        message: request.message.trim().to_string(),
    };
    let created = state.repos.publications().add_comment(comment).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}
