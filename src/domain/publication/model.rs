//! Publication read models and commands

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// What a publication is about
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum PublicationKind {
    #[sea_orm(string_value = "discussion")]
    Discussion,
    #[sea_orm(string_value = "evaluation")]
    Evaluation,
    #[sea_orm(string_value = "question")]
    Question,
    #[sea_orm(string_value = "recommendation")]
    Recommendation,
    #[default]
    #[sea_orm(string_value = "general")]
    General,
}

impl std::fmt::Display for PublicationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Discussion => write!(f, "discussion"),
            Self::Evaluation => write!(f, "evaluation"),
            Self::Question => write!(f, "question"),
            Self::Recommendation => write!(f, "recommendation"),
            Self::General => write!(f, "general"),
        }
    }
}

/// Publication with its author and target resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult, ToSchema)]
pub struct PublicationView {
    pub id: i32,
    pub kind: PublicationKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub course_id: Option<i32>,
    pub professor_id: Option<i32>,
    pub author_student_id: String,
    pub author_name: String,
    pub course_code: Option<String>,
    pub course_name: Option<String>,
    pub professor_name: Option<String>,
    /// `"<code> - <name>"` for courses, the full name for professors
    pub target: String,
    pub total_comments: i64,
}

#[derive(Debug, Clone)]
pub struct NewPublication {
    pub user_id: i32,
    pub kind: PublicationKind,
    pub message: String,
    pub course_id: Option<i32>,
    pub professor_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult, ToSchema)]
pub struct CommentView {
    pub id: i32,
    pub publication_id: i32,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub author_student_id: String,
    pub author_name: String,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub publication_id: i32,
    pub user_id: i32,
    pub message: String,
}
