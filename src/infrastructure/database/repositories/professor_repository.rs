//! SeaORM implementation of ProfessorRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    PaginatorTrait, Set, Statement, Value,
};
use tracing::info;

use super::conflict_or_db;
use super::publication_repository::PUBLICATIONS;
use crate::domain::{
    DomainError, DomainResult, NewRating, ProfessorCourse, ProfessorDetail, ProfessorRating,
    ProfessorRepository, ProfessorSummary, PublicationView, RankedProfessor,
};
use crate::infrastructure::database::entities::{course, professor, professor_rating};
use crate::infrastructure::database::listing::{
    placeholder, FilterField, FilterValue, ListingQuery, SortOption,
};
use crate::shared::{PageEnvelope, QueryParams};

const PROFESSOR_SELECT: &str = "SELECT p.id, p.first_names, p.last_names, \
     p.first_names || ' ' || p.last_names AS full_name, \
     COUNT(DISTINCT o.course_id) AS total_courses, \
     COUNT(DISTINCT pub.id) AS total_publications, \
     COUNT(DISTINCT r.id) AS total_ratings, \
     CAST(AVG(r.score) AS DOUBLE PRECISION) AS average_rating \
     FROM professors p \
     LEFT JOIN course_offerings o ON o.professor_id = p.id \
     LEFT JOIN publications pub ON pub.professor_id = p.id \
     LEFT JOIN professor_ratings r ON r.professor_id = p.id";

const BY_NAME: &str = "p.last_names, p.first_names, p.id";
const BY_POPULARITY: &str = "COUNT(DISTINCT pub.id) DESC, COUNT(DISTINCT o.course_id) DESC, p.id";

const PROFESSOR_FILTERS: &[FilterField] = &[FilterField::integer(
    &["course_id", "curso_id"],
    "p.id IN (SELECT co.professor_id FROM course_offerings co WHERE co.course_id = {})",
)];

const PROFESSOR_SORTS: &[SortOption] = &[
    SortOption {
        key: "name",
        order_by: BY_NAME,
    },
    SortOption {
        key: "rating",
        order_by: "AVG(r.score) IS NULL, AVG(r.score) DESC, p.id",
    },
    SortOption {
        key: "popularity",
        order_by: BY_POPULARITY,
    },
];

pub const PROFESSORS: ListingQuery = ListingQuery {
    collection: "professors",
    select: PROFESSOR_SELECT,
    count_from: "FROM professors p",
    group_by: Some("p.id"),
    order_by: BY_NAME,
    sorts: PROFESSOR_SORTS,
    filters: PROFESSOR_FILTERS,
    default_limit: 20,
};

const RECENT_PUBLICATIONS: u64 = 10;

pub struct SeaOrmProfessorRepository {
    db: DatabaseConnection,
}

impl SeaOrmProfessorRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn statement(&self, sql: String, values: Vec<Value>) -> Statement {
        Statement::from_sql_and_values(self.db.get_database_backend(), sql, values)
    }
}

#[async_trait]
impl ProfessorRepository for SeaOrmProfessorRepository {
    async fn list(&self, params: &QueryParams) -> DomainResult<PageEnvelope<ProfessorSummary>> {
        Ok(PROFESSORS.fetch(&self.db, params).await?)
    }

    async fn find_detail(&self, id: i32) -> DomainResult<Option<ProfessorDetail>> {
        let Some(professor) = PROFESSORS
            .rows_where::<ProfessorSummary, _>(
                &self.db,
                "p.id = {}",
                FilterValue::Integer(id.into()),
                1,
            )
            .await?
            .into_iter()
            .next()
        else {
            return Ok(None);
        };

        let sql = format!(
            "SELECT c.id, c.code, c.name, c.area, c.credits, o.year, o.semester \
             FROM courses c JOIN course_offerings o ON o.course_id = c.id \
             WHERE o.professor_id = {} ORDER BY o.year DESC, o.semester DESC, c.id",
            placeholder(self.db.get_database_backend(), 1)
        );
        let courses = ProfessorCourse::find_by_statement(self.statement(sql, vec![id.into()]))
            .all(&self.db)
            .await?;

        let recent_publications = PUBLICATIONS
            .rows_where::<PublicationView, _>(
                &self.db,
                "pub.professor_id = {}",
                FilterValue::Integer(id.into()),
                RECENT_PUBLICATIONS,
            )
            .await?;

        Ok(Some(ProfessorDetail {
            professor,
            courses,
            recent_publications,
        }))
    }

    async fn search(&self, name: &str) -> DomainResult<Vec<ProfessorSummary>> {
        let backend = self.db.get_database_backend();
        let pattern = format!("%{}%", name.trim());
        let sql = format!(
            "{} WHERE (p.first_names LIKE {} OR p.last_names LIKE {} \
             OR p.first_names || ' ' || p.last_names LIKE {}) \
             GROUP BY p.id ORDER BY {}",
            PROFESSOR_SELECT,
            placeholder(backend, 1),
            placeholder(backend, 2),
            placeholder(backend, 3),
            BY_NAME,
        );
        let values: Vec<Value> = vec![pattern.clone().into(), pattern.clone().into(), pattern.into()];

        Ok(ProfessorSummary::find_by_statement(self.statement(sql, values))
            .all(&self.db)
            .await?)
    }

    async fn top(&self, limit: u64) -> DomainResult<Vec<RankedProfessor>> {
        let sql = format!(
            "{} GROUP BY p.id HAVING COUNT(DISTINCT pub.id) >= 1 ORDER BY {} LIMIT {}",
            PROFESSOR_SELECT,
            BY_POPULARITY,
            placeholder(self.db.get_database_backend(), 1),
        );
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = ProfessorSummary::find_by_statement(self.statement(sql, vec![limit.into()]))
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .zip(1..)
            .map(|(professor, ranking_position)| RankedProfessor {
                professor,
                ranking_position,
            })
            .collect())
    }

    async fn exists(&self, id: i32) -> DomainResult<bool> {
        Ok(professor::Entity::find_by_id(id).count(&self.db).await? > 0)
    }

    async fn rate(&self, rating: NewRating) -> DomainResult<ProfessorRating> {
        if !self.exists(rating.professor_id).await? {
            return Err(DomainError::not_found("Professor", "id", rating.professor_id));
        }
        if let Some(course_id) = rating.course_id {
            if course::Entity::find_by_id(course_id).count(&self.db).await? == 0 {
                return Err(DomainError::not_found("Course", "id", course_id));
            }
        }

        let model = professor_rating::ActiveModel {
            professor_id: Set(rating.professor_id),
            user_id: Set(rating.user_id),
            course_id: Set(rating.course_id),
            score: Set(rating.score),
            comment: Set(rating.comment),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| conflict_or_db(e, "Professor already rated by this user"))?;

        info!(
            professor_id = model.professor_id,
            user_id = model.user_id,
            score = model.score,
            "Professor rated"
        );
        Ok(model.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::fixtures;
    use crate::infrastructure::database::test_support::migrated_connection;

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn rating(professor_id: i32, user_id: i32, score: i32) -> NewRating {
        NewRating {
            professor_id,
            user_id,
            course_id: None,
            score,
            comment: None,
        }
    }

    /// Professors 1..=3 sorted by last name as Castro (3), Lopez (1), Perez (2).
    /// Lopez teaches courses 1 and 2, Perez teaches course 2.
    /// Perez has two publications, Lopez one, Castro none.
    async fn seeded() -> SeaOrmProfessorRepository {
        let db = migrated_connection().await;
        fixtures::user(&db, 1, "202400001", "Ana", "Diaz").await;
        fixtures::user(&db, 2, "202400002", "Juan", "Mora").await;
        fixtures::course(&db, 1, "0101", "Math", "Sciences", 5).await;
        fixtures::course(&db, 2, "0102", "Physics", "Sciences", 5).await;
        fixtures::professor(&db, 1, "Maria", "Lopez").await;
        fixtures::professor(&db, 2, "Luis", "Perez").await;
        fixtures::professor(&db, 3, "Rosa", "Castro").await;
        fixtures::offering(&db, 1, 1, 2023, 1).await;
        fixtures::offering(&db, 2, 1, 2024, 1).await;
        fixtures::offering(&db, 2, 2, 2024, 2).await;
        fixtures::publication(&db, 1, 1, (None, Some(2)), "evaluation", 1).await;
        fixtures::publication(&db, 2, 2, (None, Some(2)), "general", 2).await;
        fixtures::publication(&db, 3, 1, (None, Some(1)), "question", 3).await;
        SeaOrmProfessorRepository::new(db)
    }

    fn ids(page: &PageEnvelope<ProfessorSummary>) -> Vec<i32> {
        page.items.iter().map(|p| p.id).collect()
    }

    #[tokio::test]
    async fn default_order_is_by_name() {
        let repo = seeded().await;
        let page = repo.list(&QueryParams::new()).await.unwrap();

        assert_eq!(page.collection, "professors");
        assert_eq!(ids(&page), vec![3, 1, 2]);
        assert_eq!(page.items[1].full_name, "Maria Lopez");
        assert_eq!(page.items[1].total_courses, 2);
        assert_eq!(page.items[1].total_publications, 1);
        assert_eq!(page.items[2].total_publications, 2);
        assert_eq!(page.pagination.items_per_page, 20);
    }

    #[tokio::test]
    async fn course_filter_uses_offerings() {
        let repo = seeded().await;

        let course_two = repo.list(&params(&[("course_id", "2")])).await.unwrap();
        assert_eq!(ids(&course_two), vec![1, 2]);
        assert_eq!(course_two.pagination.total_items, 2);
        // the filter restricts rows, not the aggregated counters
        assert_eq!(course_two.items[0].total_courses, 2);

        let legacy = repo.list(&params(&[("curso_id", "1")])).await.unwrap();
        assert_eq!(ids(&legacy), vec![1]);
    }

    #[tokio::test]
    async fn sort_by_popularity_and_rating() {
        let repo = seeded().await;
        repo.rate(rating(3, 1, 5)).await.unwrap();
        repo.rate(rating(1, 1, 2)).await.unwrap();
        repo.rate(rating(1, 2, 4)).await.unwrap();

        let popular = repo.list(&params(&[("sort_by", "popularity")])).await.unwrap();
        assert_eq!(ids(&popular), vec![2, 1, 3]);

        let rated = repo.list(&params(&[("sortBy", "rating")])).await.unwrap();
        assert_eq!(ids(&rated), vec![3, 1, 2]);
        assert_eq!(rated.items[1].average_rating, Some(3.0));
        assert_eq!(rated.items[1].total_ratings, 2);
        assert_eq!(rated.items[2].average_rating, None);

        let unknown = repo.list(&params(&[("sort_by", "salary")])).await.unwrap();
        assert_eq!(ids(&unknown), vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn top_requires_a_publication() {
        let repo = seeded().await;
        let top = repo.top(10).await.unwrap();

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].professor.id, 2);
        assert_eq!(top[0].ranking_position, 1);
        assert_eq!(top[1].professor.id, 1);
        assert_eq!(top[1].ranking_position, 2);

        assert_eq!(repo.top(1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn search_matches_full_name() {
        let repo = seeded().await;
        assert_eq!(repo.search("Luis Perez").await.unwrap().len(), 1);
        assert_eq!(repo.search("ro").await.unwrap().len(), 1);
        assert!(repo.search("Nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn detail_lists_courses_and_publications() {
        let repo = seeded().await;
        let detail = repo.find_detail(1).await.unwrap().unwrap();

        assert_eq!(
            detail.courses.iter().map(|c| c.code.as_str()).collect::<Vec<_>>(),
            vec!["0102", "0101"]
        );
        assert_eq!(detail.recent_publications.len(), 1);
        assert_eq!(detail.recent_publications[0].target, "Maria Lopez");
        assert!(repo.find_detail(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn second_rating_conflicts() {
        let repo = seeded().await;
        let first = repo.rate(rating(2, 1, 4)).await.unwrap();
        assert_eq!(first.score, 4);

        let again = repo.rate(rating(2, 1, 5)).await;
        assert!(matches!(again, Err(DomainError::Conflict(_))));

        let missing = repo.rate(rating(99, 1, 5)).await;
        assert!(matches!(missing, Err(DomainError::NotFound { .. })));
    }
}
