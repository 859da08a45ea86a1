//! Course repository interface

use async_trait::async_trait;

use super::{AreaSummary, CourseDetail, CourseSummary};
use crate::domain::DomainResult;
use crate::shared::{PageEnvelope, QueryParams};

#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Paged course listing, filterable by `area`
    async fn list(&self, params: &QueryParams) -> DomainResult<PageEnvelope<CourseSummary>>;
    async fn find_detail(&self, id: i32) -> DomainResult<Option<CourseDetail>>;
    /// Courses whose code or name contains `term`
    async fn search(&self, term: &str) -> DomainResult<Vec<CourseSummary>>;
    async fn areas(&self) -> DomainResult<Vec<AreaSummary>>;
    async fn exists(&self, id: i32) -> DomainResult<bool>;
}
