//! Publication DTOs

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{CommentView, PublicationKind, PublicationView};
use crate::shared::PaginationMeta;

/// Shape of `GET /api/publications`
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct PublicationPage {
    pub publications: Vec<PublicationView>,
    pub pagination: PaginationMeta,
}

/// Shape of `GET /api/publications/{id}/comments`
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct CommentPage {
    pub comments: Vec<CommentView>,
    pub pagination: PaginationMeta,
}

/// New publication; without a course or professor it is a general post
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePublicationRequest {
    #[serde(default)]
    pub kind: PublicationKind,
    #[validate(length(min = 1, max = 2000, message = "message must be 1–2000 characters"))]
    pub message: String,
    #[serde(alias = "curso_id")]
    pub course_id: Option<i32>,
    #[serde(alias = "catedratico_id")]
    pub professor_id: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 1000, message = "message must be 1–1000 characters"))]
    pub message: String,
}
