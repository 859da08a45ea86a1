//! SeaORM implementation of PublicationRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};
use tracing::info;

use crate::domain::{
    CommentView, DomainError, DomainResult, NewComment, NewPublication, PublicationRepository,
    PublicationView,
};
use crate::infrastructure::database::entities::{comment, course, professor, publication};
use crate::infrastructure::database::listing::{FilterField, FilterValue, ListingQuery};
use crate::shared::{PageEnvelope, QueryParams};

const PUBLICATION_SELECT: &str = "SELECT pub.id, pub.kind, pub.message, pub.created_at, \
     pub.course_id, pub.professor_id, \
     u.student_id AS author_student_id, \
     u.first_names || ' ' || u.last_names AS author_name, \
     c.code AS course_code, c.name AS course_name, \
     pr.first_names || ' ' || pr.last_names AS professor_name, \
     CASE WHEN c.id IS NOT NULL THEN c.code || ' - ' || c.name \
          WHEN pr.id IS NOT NULL THEN pr.first_names || ' ' || pr.last_names \
          ELSE 'General' END AS target, \
     (SELECT COUNT(*) FROM comments cm WHERE cm.publication_id = pub.id) AS total_comments \
     FROM publications pub \
     JOIN users u ON u.id = pub.user_id \
     LEFT JOIN courses c ON c.id = pub.course_id \
     LEFT JOIN professors pr ON pr.id = pub.professor_id";

const PUBLICATION_FILTERS: &[FilterField] = &[
    FilterField::integer(&["course_id", "curso_id"], "pub.course_id = {}"),
    FilterField::integer(&["professor_id", "catedratico_id"], "pub.professor_id = {}"),
    FilterField::text(&["kind"], "pub.kind = {}"),
];

pub const PUBLICATIONS: ListingQuery = ListingQuery {
    collection: "publications",
    select: PUBLICATION_SELECT,
    count_from: "FROM publications pub",
    group_by: None,
    order_by: "pub.created_at DESC, pub.id DESC",
    sorts: &[],
    filters: PUBLICATION_FILTERS,
    default_limit: 10,
};

pub const COMMENTS: ListingQuery = ListingQuery {
    collection: "comments",
    select: "SELECT cm.id, cm.publication_id, cm.message, cm.created_at, \
             u.student_id AS author_student_id, \
             u.first_names || ' ' || u.last_names AS author_name \
             FROM comments cm JOIN users u ON u.id = cm.user_id",
    count_from: "FROM comments cm",
    group_by: None,
    order_by: "cm.created_at, cm.id",
    sorts: &[],
    filters: &[],
    default_limit: 20,
};

pub struct SeaOrmPublicationRepository {
    db: DatabaseConnection,
}

impl SeaOrmPublicationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn ensure_publication(&self, id: i32) -> DomainResult<()> {
        if publication::Entity::find_by_id(id).count(&self.db).await? == 0 {
            return Err(DomainError::not_found("Publication", "id", id));
        }
        Ok(())
    }

    async fn find_comment(&self, id: i32) -> DomainResult<CommentView> {
        COMMENTS
            .rows_where::<CommentView, _>(&self.db, "cm.id = {}", FilterValue::Integer(id.into()), 1)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::not_found("Comment", "id", id))
    }
}

#[async_trait]
impl PublicationRepository for SeaOrmPublicationRepository {
    async fn list(&self, params: &QueryParams) -> DomainResult<PageEnvelope<PublicationView>> {
        Ok(PUBLICATIONS.fetch(&self.db, params).await?)
    }

    async fn find(&self, id: i32) -> DomainResult<Option<PublicationView>> {
        Ok(PUBLICATIONS
            .rows_where::<PublicationView, _>(&self.db, "pub.id = {}", FilterValue::Integer(id.into()), 1)
            .await?
            .into_iter()
            .next())
    }

    async fn recent_by_author(&self, user_id: i32, limit: u64) -> DomainResult<Vec<PublicationView>> {
        Ok(PUBLICATIONS
            .rows_where(&self.db, "pub.user_id = {}", FilterValue::Integer(user_id.into()), limit)
            .await?)
    }

    async fn create(&self, new: NewPublication) -> DomainResult<PublicationView> {
        if let Some(course_id) = new.course_id {
            if course::Entity::find_by_id(course_id).count(&self.db).await? == 0 {
                return Err(DomainError::not_found("Course", "id", course_id));
            }
        }
        if let Some(professor_id) = new.professor_id {
            if professor::Entity::find_by_id(professor_id).count(&self.db).await? == 0 {
                return Err(DomainError::not_found("Professor", "id", professor_id));
            }
        }

        let model = publication::ActiveModel {
            user_id: Set(new.user_id),
            course_id: Set(new.course_id),
            professor_id: Set(new.professor_id),
            kind: Set(new.kind),
            message: Set(new.message),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!(publication_id = model.id, user_id = model.user_id, kind = %model.kind, "Publication created");

        self.find(model.id)
            .await?
            .ok_or_else(|| DomainError::not_found("Publication", "id", model.id))
    }

    async fn comments(
        &self,
        publication_id: i32,
        params: &QueryParams,
    ) -> DomainResult<PageEnvelope<CommentView>> {
        self.ensure_publication(publication_id).await?;

        let mut request = COMMENTS.request(params);
        request
            .filters
            .push("cm.publication_id = {}", FilterValue::Integer(publication_id.into()));

        Ok(COMMENTS.fetch_request(&self.db, &request).await?)
    }

    async fn add_comment(&self, new: NewComment) -> DomainResult<CommentView> {
        self.ensure_publication(new.publication_id).await?;

        let model = comment::ActiveModel {
            publication_id: Set(new.publication_id),
            user_id: Set(new.user_id),
            message: Set(new.message),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        self.find_comment(model.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PublicationKind;
    use crate::infrastructure::database::repositories::fixtures;
    use crate::infrastructure::database::test_support::migrated_connection;

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    /// 12 publications by user 1: odd ids about course 1, even ids about
    /// professor 1; every fourth one is an evaluation.
    async fn seeded() -> SeaOrmPublicationRepository {
        let db = migrated_connection().await;
        fixtures::user(&db, 1, "202400001", "Ana", "Lopez").await;
        fixtures::course(&db, 1, "0101", "Math", "Sciences", 5).await;
        fixtures::professor(&db, 1, "Luis", "Perez").await;
        for id in 1..=12 {
            let target = if id % 2 == 1 { (Some(1), None) } else { (None, Some(1)) };
            let kind = if id % 4 == 0 { "evaluation" } else { "general" };
            fixtures::publication(&db, id, 1, target, kind, id as u32).await;
        }
        SeaOrmPublicationRepository::new(db)
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let repo = seeded().await;
        let page = repo.list(&params(&[("page", "2"), ("limit", "5")])).await.unwrap();

        assert_eq!(page.collection, "publications");
        assert_eq!(
            page.items.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![7, 6, 5, 4, 3]
        );
        assert_eq!(page.pagination.total_items, 12);
        assert_eq!(page.pagination.total_pages, 3);
    }

    #[tokio::test]
    async fn default_limit_is_ten() {
        let repo = seeded().await;
        let page = repo.list(&QueryParams::new()).await.unwrap();
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.pagination.items_per_page, 10);
        assert_eq!(page.pagination.total_pages, 2);
    }

    #[tokio::test]
    async fn filters_combine() {
        let repo = seeded().await;

        let course = repo.list(&params(&[("curso_id", "1")])).await.unwrap();
        assert_eq!(course.pagination.total_items, 6);
        assert!(course.items.iter().all(|p| p.course_id == Some(1)));

        let evaluations = repo
            .list(&params(&[("professor_id", "1"), ("kind", "evaluation")]))
            .await
            .unwrap();
        assert_eq!(
            evaluations.items.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![12, 8, 4]
        );
    }

    #[tokio::test]
    async fn invalid_filter_is_ignored() {
        let repo = seeded().await;
        let page = repo
            .list(&params(&[("course_id", "abc"), ("limit", "500")]))
            .await
            .unwrap();
        assert_eq!(page.pagination.total_items, 12);
        assert_eq!(page.pagination.items_per_page, 100);
    }

    #[tokio::test]
    async fn view_resolves_author_and_target() {
        let repo = seeded().await;

        let about_course = repo.find(1).await.unwrap().unwrap();
        assert_eq!(about_course.author_name, "Ana Lopez");
        assert_eq!(about_course.author_student_id, "202400001");
        assert_eq!(about_course.target, "0101 - Math");
        assert_eq!(about_course.professor_name, None);

        let about_professor = repo.find(2).await.unwrap().unwrap();
        assert_eq!(about_professor.target, "Luis Perez");
        assert_eq!(about_professor.professor_name.as_deref(), Some("Luis Perez"));

        assert!(repo.find(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn create_checks_target() {
        let repo = seeded().await;

        let missing = repo
            .create(NewPublication {
                user_id: 1,
                kind: PublicationKind::Question,
                message: "Anyone?".into(),
                course_id: Some(42),
                professor_id: None,
            })
            .await;
        assert!(matches!(missing, Err(DomainError::NotFound { entity: "Course", .. })));

        let created = repo
            .create(NewPublication {
                user_id: 1,
                kind: PublicationKind::Question,
                message: "Anyone?".into(),
                course_id: None,
                professor_id: None,
            })
            .await
            .unwrap();
        assert_eq!(created.kind, PublicationKind::Question);
        assert_eq!(created.target, "General");
        assert_eq!(created.total_comments, 0);
    }

    #[tokio::test]
    async fn comments_are_paged_oldest_first() {
        let repo = seeded().await;
        for n in 0..3 {
            repo.add_comment(NewComment {
                publication_id: 5,
                user_id: 1,
                message: format!("comment {}", n),
            })
            .await
            .unwrap();
        }

        let page = repo
            .comments(5, &params(&[("limit", "2")]))
            .await
            .unwrap();
        assert_eq!(page.collection, "comments");
        assert_eq!(page.pagination.total_items, 3);
        assert_eq!(page.pagination.total_pages, 2);
        assert_eq!(page.items[0].message, "comment 0");

        let other = repo.comments(6, &QueryParams::new()).await.unwrap();
        assert_eq!(other.pagination.total_items, 0);

        assert_eq!(repo.find(5).await.unwrap().unwrap().total_comments, 3);
    }

    #[tokio::test]
    async fn comments_on_missing_publication() {
        let repo = seeded().await;
        assert!(matches!(
            repo.comments(404, &QueryParams::new()).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
