//! Publication repository interface

use async_trait::async_trait;

use super::{CommentView, NewComment, NewPublication, PublicationView};
use crate::domain::DomainResult;
use crate::shared::{PageEnvelope, QueryParams};

#[async_trait]
pub trait PublicationRepository: Send + Sync {
    /// Newest first, filterable by course, professor and kind
    async fn list(&self, params: &QueryParams) -> DomainResult<PageEnvelope<PublicationView>>;
    async fn find(&self, id: i32) -> DomainResult<Option<PublicationView>>;
    /// Latest publications written by a user
    async fn recent_by_author(&self, user_id: i32, limit: u64) -> DomainResult<Vec<PublicationView>>;
    /// Fails with `NotFound` when the target course or professor does not exist
    async fn create(&self, publication: NewPublication) -> DomainResult<PublicationView>;
    /// Oldest first
    async fn comments(
        &self,
        publication_id: i32,
        params: &QueryParams,
    ) -> DomainResult<PageEnvelope<CommentView>>;
    async fn add_comment(&self, comment: NewComment) -> DomainResult<CommentView>;
}
