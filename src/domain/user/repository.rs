//! User repository interface

use async_trait::async_trait;

use super::{ApprovedCourse, NewApproval, NewUser, ProfileUpdate, UserAccount, UserStats};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `Conflict` when the student id or email is taken
    async fn create(&self, user: NewUser) -> DomainResult<UserAccount>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<UserAccount>>;
    async fn find_by_student_id(&self, student_id: &str) -> DomainResult<Option<UserAccount>>;
    /// Fails with `Conflict` when the email belongs to another user
    async fn update_profile(&self, id: i32, update: ProfileUpdate) -> DomainResult<UserAccount>;
    async fn update_password(&self, id: i32, password_hash: &str) -> DomainResult<()>;

    async fn approved_courses(&self, user_id: i32) -> DomainResult<Vec<ApprovedCourse>>;
    /// Fails with `NotFound` for an unknown course and `Conflict` when
    /// already approved
    async fn approve_course(&self, user_id: i32, approval: NewApproval) -> DomainResult<ApprovedCourse>;
    /// Fails with `NotFound` when the course was not approved
    async fn remove_approved_course(&self, user_id: i32, course_id: i32) -> DomainResult<()>;
    async fn stats(&self, user_id: i32) -> DomainResult<UserStats>;
}
