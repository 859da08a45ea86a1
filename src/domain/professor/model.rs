//! Professor read models and rating command

use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::publication::PublicationView;

/// Professor row with activity counters
#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult, ToSchema)]
pub struct ProfessorSummary {
    pub id: i32,
    pub first_names: String,
    pub last_names: String,
    pub full_name: String,
    /// Distinct courses taught
    pub total_courses: i64,
    /// Publications targeting this professor
    pub total_publications: i64,
    pub total_ratings: i64,
    /// Mean score, `null` until the first rating
    pub average_rating: Option<f64>,
}

/// A course together with one term in which the professor taught it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult, ToSchema)]
pub struct ProfessorCourse {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub area: String,
    pub credits: i32,
    pub year: i32,
    pub semester: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProfessorDetail {
    #[serde(flatten)]
    pub professor: ProfessorSummary,
    pub courses: Vec<ProfessorCourse>,
    pub recent_publications: Vec<PublicationView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RankedProfessor {
    #[serde(flatten)]
    pub professor: ProfessorSummary,
    /// 1-based position in the ranking
    pub ranking_position: u64,
}

#[derive(Debug, Clone)]
pub struct NewRating {
    pub professor_id: i32,
    pub user_id: i32,
    pub course_id: Option<i32>,
    /// 1 to 5
    pub score: i32,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProfessorRating {
    pub id: i32,
    pub professor_id: i32,
    pub user_id: i32,
    pub course_id: Option<i32>,
    pub score: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}
