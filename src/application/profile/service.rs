//! Profile service: student record, approvals and personal statistics

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    ApprovedCourse, DomainError, DomainResult, NewApproval, ProfileOverview, ProfileUpdate,
    RepositoryProvider, StudentRecord, UserAccount, UserProfile, UserStats,
};

/// Recent publications shown on the own profile page
const RECENT_PUBLICATIONS: u64 = 10;

pub struct ProfileService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ProfileService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    async fn account(&self, user_id: i32) -> DomainResult<UserAccount> {
        self.repos
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", user_id))
    }

    async fn record(&self, user: UserAccount) -> DomainResult<StudentRecord> {
        let courses = self.repos.users().approved_courses(user.id).await?;
        Ok(StudentRecord::new(user.into(), courses))
    }

    /// The authenticated user's profile with recent publications
    pub async fn overview(&self, user_id: i32) -> DomainResult<ProfileOverview> {
        let record = self.record(self.account(user_id).await?).await?;
        let recent_publications = self
            .repos
            .publications()
            .recent_by_author(user_id, RECENT_PUBLICATIONS)
            .await?;

        Ok(ProfileOverview {
            record,
            recent_publications,
        })
    }

    /// Another student's public record, looked up by student id
    pub async fn public_record(&self, student_id: &str) -> DomainResult<StudentRecord> {
        let user = self
            .repos
            .users()
            .find_by_student_id(student_id.trim())
            .await?
            .ok_or_else(|| DomainError::not_found("User", "student_id", student_id))?;
        self.record(user).await
    }

    pub async fn update(&self, user_id: i32, update: ProfileUpdate) -> DomainResult<UserProfile> {
        let update = ProfileUpdate {
            first_names: update.first_names.trim().to_string(),
            last_names: update.last_names.trim().to_string(),
            email: update.email.trim().to_lowercase(),
        };
        let user = self.repos.users().update_profile(user_id, update).await?;
        info!(user_id, "Profile updated");
        Ok(user.into())
    }

    pub async fn approved_courses(&self, user_id: i32) -> DomainResult<Vec<ApprovedCourse>> {
        self.repos.users().approved_courses(user_id).await
    }

    pub async fn approve(&self, user_id: i32, approval: NewApproval) -> DomainResult<ApprovedCourse> {
        self.repos.users().approve_course(user_id, approval).await
    }

    pub async fn remove_approval(&self, user_id: i32, course_id: i32) -> DomainResult<()> {
        self.repos
            .users()
            .remove_approved_course(user_id, course_id)
            .await
    }

    pub async fn stats(&self, user_id: i32) -> DomainResult<UserStats> {
        self.repos.users().stats(user_id).await
    }
}
