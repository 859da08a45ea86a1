//! Course read models

use sea_orm::FromQueryResult;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::publication::PublicationView;

/// Course row used by listings and search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult, ToSchema)]
pub struct CourseSummary {
    pub id: i32,
    /// Official course code, unique
    pub code: String,
    pub name: String,
    pub area: String,
    pub credits: i32,
    /// Distinct professors who have taught the course
    pub total_professors: i64,
    /// Distinct students who marked the course as approved
    pub approved_students: i64,
}

/// A professor together with one term in which they taught a course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult, ToSchema)]
pub struct CourseProfessor {
    pub id: i32,
    pub first_names: String,
    pub last_names: String,
    pub full_name: String,
    pub year: i32,
    pub semester: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CourseDetail {
    #[serde(flatten)]
    pub course: CourseSummary,
    /// Most recent term first
    pub professors: Vec<CourseProfessor>,
    pub recent_publications: Vec<PublicationView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult, ToSchema)]
pub struct AreaSummary {
    pub area: String,
    pub total_courses: i64,
}
