//! User domain entity and read models

use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::publication::PublicationView;

/// Stored user, including the password hash. Never serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub id: i32,
    /// University registration number, used to log in
    pub student_id: String,
    pub first_names: String,
    pub last_names: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Public view of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UserProfile {
    pub id: i32,
    pub student_id: String,
    pub first_names: String,
    pub last_names: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserAccount> for UserProfile {
    fn from(account: UserAccount) -> Self {
        Self {
            id: account.id,
            student_id: account.student_id,
            first_names: account.first_names,
            last_names: account.last_names,
            email: account.email,
            created_at: account.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub student_id: String,
    pub first_names: String,
    pub last_names: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub first_names: String,
    pub last_names: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult, ToSchema)]
pub struct ApprovedCourse {
    pub course_id: i32,
    pub code: String,
    pub name: String,
    pub area: String,
    pub credits: i32,
    pub year: i32,
    pub semester: i32,
    pub registered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
pub struct NewApproval {
    pub course_id: i32,
    pub year: i32,
    pub semester: i32,
}

/// A student's approved courses and credit total
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StudentRecord {
    #[serde(flatten)]
    pub user: UserProfile,
    /// Most recent term first
    pub approved_courses: Vec<ApprovedCourse>,
    pub total_credits: i64,
    pub total_approved_courses: usize,
}

impl StudentRecord {
    pub fn new(user: UserProfile, approved_courses: Vec<ApprovedCourse>) -> Self {
        let total_credits = approved_courses.iter().map(|c| i64::from(c.credits)).sum();
        Self {
            user,
            total_approved_courses: approved_courses.len(),
            approved_courses,
            total_credits,
        }
    }
}

/// The authenticated user's own profile page
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProfileOverview {
    #[serde(flatten)]
    pub record: StudentRecord,
    pub recent_publications: Vec<PublicationView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult, ToSchema)]
pub struct AreaProgress {
    pub area: String,
    pub total_courses: i64,
    pub credits: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult, ToSchema)]
pub struct KindCount {
    pub kind: String,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult, ToSchema)]
pub struct YearProgress {
    pub year: i32,
    pub approved_courses: i64,
    pub credits: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UserStats {
    /// Largest area first
    pub by_area: Vec<AreaProgress>,
    pub by_kind: Vec<KindCount>,
    /// Chronological
    pub by_year: Vec<YearProgress>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approved(credits: i32) -> ApprovedCourse {
        ApprovedCourse {
            course_id: 1,
            code: "0101".into(),
            name: "Math".into(),
            area: "Sciences".into(),
            credits,
            year: 2024,
            semester: 1,
            registered_at: Utc::now(),
        }
    }

    fn profile() -> UserProfile {
        UserProfile {
            id: 1,
            student_id: "202400001".into(),
            first_names: "Ana".into(),
            last_names: "Lopez".into(),
            email: "ana@example.com".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn record_sums_credits() {
        let record = StudentRecord::new(profile(), vec![approved(4), approved(5)]);
        assert_eq!(record.total_credits, 9);
        assert_eq!(record.total_approved_courses, 2);
    }

    #[test]
    fn record_flattens_profile() {
        let json = serde_json::to_value(StudentRecord::new(profile(), vec![])).unwrap();
        assert_eq!(json["student_id"], "202400001");
        assert_eq!(json["total_credits"], 0);
        assert!(json.get("user").is_none());
        assert!(json.get("password_hash").is_none());
    }
}
