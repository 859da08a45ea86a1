//! Professor repository interface

use async_trait::async_trait;

use super::{NewRating, ProfessorDetail, ProfessorRating, ProfessorSummary, RankedProfessor};
use crate::domain::DomainResult;
use crate::shared::{PageEnvelope, QueryParams};

#[async_trait]
pub trait ProfessorRepository: Send + Sync {
    /// Paged professor listing, filterable by course and sortable
    async fn list(&self, params: &QueryParams) -> DomainResult<PageEnvelope<ProfessorSummary>>;
    async fn find_detail(&self, id: i32) -> DomainResult<Option<ProfessorDetail>>;
    async fn search(&self, name: &str) -> DomainResult<Vec<ProfessorSummary>>;
    /// Professors with at least one publication, most discussed first
    async fn top(&self, limit: u64) -> DomainResult<Vec<RankedProfessor>>;
    async fn exists(&self, id: i32) -> DomainResult<bool>;
    /// Fails with `Conflict` when the user already rated the professor
    async fn rate(&self, rating: NewRating) -> DomainResult<ProfessorRating>;
}
