//! SeaORM implementation of CourseRepository

use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, EntityTrait, FromQueryResult, PaginatorTrait, Statement,
    Value,
};

use super::publication_repository::PUBLICATIONS;
use crate::domain::{
    AreaSummary, CourseDetail, CourseProfessor, CourseRepository, CourseSummary, DomainResult,
    PublicationView,
};
use crate::infrastructure::database::entities::course;
use crate::infrastructure::database::listing::{placeholder, FilterField, FilterValue, ListingQuery};
use crate::shared::{PageEnvelope, QueryParams};

const COURSE_SELECT: &str = "SELECT c.id, c.code, c.name, c.area, c.credits, \
     COUNT(DISTINCT o.professor_id) AS total_professors, \
     COUNT(DISTINCT a.user_id) AS approved_students \
     FROM courses c \
     LEFT JOIN course_offerings o ON o.course_id = c.id \
     LEFT JOIN approved_courses a ON a.course_id = c.id";

const COURSE_FILTERS: &[FilterField] = &[FilterField::text(&["area"], "c.area = {}")];

pub const COURSES: ListingQuery = ListingQuery {
    collection: "courses",
    select: COURSE_SELECT,
    count_from: "FROM courses c",
    group_by: Some("c.id"),
    order_by: "c.code, c.id",
    sorts: &[],
    filters: COURSE_FILTERS,
    default_limit: 20,
};

/// Upper bound of course search results
const SEARCH_LIMIT: u64 = 50;
const RECENT_PUBLICATIONS: u64 = 10;

pub struct SeaOrmCourseRepository {
    db: DatabaseConnection,
}

impl SeaOrmCourseRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn statement(&self, sql: String, values: Vec<Value>) -> Statement {
        Statement::from_sql_and_values(self.db.get_database_backend(), sql, values)
    }
}

#[async_trait]
impl CourseRepository for SeaOrmCourseRepository {
    async fn list(&self, params: &QueryParams) -> DomainResult<PageEnvelope<CourseSummary>> {
        Ok(COURSES.fetch(&self.db, params).await?)
    }

    async fn find_detail(&self, id: i32) -> DomainResult<Option<CourseDetail>> {
        let Some(course) = COURSES
            .rows_where::<CourseSummary, _>(
                &self.db,
                "c.id = {}",
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
            "SELECT p.id, p.first_names, p.last_names, \
             p.first_names || ' ' || p.last_names AS full_name, o.year, o.semester \
             FROM professors p JOIN course_offerings o ON o.professor_id = p.id \
             WHERE o.course_id = {} ORDER BY o.year DESC, o.semester DESC, p.id",
            placeholder(self.db.get_database_backend(), 1)
        );
        let professors = CourseProfessor::find_by_statement(self.statement(sql, vec![id.into()]))
            .all(&self.db)
            .await?;

        let recent_publications = PUBLICATIONS
            .rows_where::<PublicationView, _>(
                &self.db,
                "pub.course_id = {}",
                FilterValue::Integer(id.into()),
                RECENT_PUBLICATIONS,
            )
            .await?;

        Ok(Some(CourseDetail {
            course,
            professors,
            recent_publications,
        }))
    }

    async fn search(&self, term: &str) -> DomainResult<Vec<CourseSummary>> {
        let backend = self.db.get_database_backend();
        let pattern = format!("%{}%", term.trim());
        let sql = format!(
            "{} WHERE (c.code LIKE {} OR c.name LIKE {}) GROUP BY c.id ORDER BY c.code LIMIT {}",
            COURSE_SELECT,
            placeholder(backend, 1),
            placeholder(backend, 2),
            placeholder(backend, 3),
        );
        let values: Vec<Value> = vec![
            pattern.clone().into(),
            pattern.into(),
            (SEARCH_LIMIT as i64).into(),
        ];

        Ok(CourseSummary::find_by_statement(self.statement(sql, values))
            .all(&self.db)
            .await?)
    }

    async fn areas(&self) -> DomainResult<Vec<AreaSummary>> {
        let sql = "SELECT area, COUNT(*) AS total_courses FROM courses GROUP BY area ORDER BY area";
        Ok(AreaSummary::find_by_statement(self.statement(sql.to_string(), vec![]))
            .all(&self.db)
            .await?)
    }

    async fn exists(&self, id: i32) -> DomainResult<bool> {
        Ok(course::Entity::find_by_id(id).count(&self.db).await? > 0)
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

    async fn seeded() -> SeaOrmCourseRepository {
        let db = migrated_connection().await;
        for i in 1..=12 {
            let area = if i % 3 == 0 { "Humanities" } else { "Sciences" };
            fixtures::course(&db, i, &format!("{:04}", i), &format!("Course {}", i), area, 4).await;
        }
        fixtures::professor(&db, 1, "Ana", "Lopez").await;
        fixtures::professor(&db, 2, "Luis", "Perez").await;
        fixtures::offering(&db, 1, 1, 2023, 1).await;
        fixtures::offering(&db, 1, 2, 2024, 2).await;
        fixtures::offering(&db, 1, 1, 2024, 1).await;
        SeaOrmCourseRepository::new(db)
    }

    #[tokio::test]
    async fn list_pages_by_code() {
        let repo = seeded().await;
        let page = repo.list(&params(&[("page", "2"), ("limit", "5")])).await.unwrap();

        assert_eq!(page.collection, "courses");
        assert_eq!(
            page.items.iter().map(|c| c.code.as_str()).collect::<Vec<_>>(),
            vec!["0006", "0007", "0008", "0009", "0010"]
        );
        assert_eq!(page.pagination.total_items, 12);
        assert_eq!(page.pagination.total_pages, 3);
    }

    #[tokio::test]
    async fn join_rows_do_not_inflate_counts() {
        let repo = seeded().await;
        let page = repo.list(&params(&[("limit", "1")])).await.unwrap();

        let first = &page.items[0];
        assert_eq!(first.id, 1);
        assert_eq!(first.total_professors, 2);
        assert_eq!(page.pagination.total_items, 12);
    }

    #[tokio::test]
    async fn area_filter_counts_matching_rows() {
        let repo = seeded().await;
        let page = repo.list(&params(&[("area", "Humanities")])).await.unwrap();

        assert_eq!(page.pagination.total_items, 4);
        assert_eq!(page.items.len(), 4);
        assert!(page.items.iter().all(|c| c.area == "Humanities"));
    }

    #[tokio::test]
    async fn detail_lists_professors_latest_term_first() {
        let repo = seeded().await;
        let detail = repo.find_detail(1).await.unwrap().unwrap();

        assert_eq!(detail.course.code, "0001");
        let terms: Vec<_> = detail.professors.iter().map(|p| (p.year, p.semester)).collect();
        assert_eq!(terms, vec![(2024, 2), (2024, 1), (2023, 1)]);
        assert_eq!(detail.professors[0].full_name, "Luis Perez");
        assert!(detail.recent_publications.is_empty());
    }

    #[tokio::test]
    async fn missing_course_has_no_detail() {
        let repo = seeded().await;
        assert!(repo.find_detail(404).await.unwrap().is_none());
        assert!(!repo.exists(404).await.unwrap());
        assert!(repo.exists(3).await.unwrap());
    }

    #[tokio::test]
    async fn search_matches_code_or_name() {
        let repo = seeded().await;
        let by_name = repo.search("Course 1").await.unwrap();
        // Course 1, 10, 11, 12
        assert_eq!(by_name.len(), 4);

        let by_code = repo.search("0007").await.unwrap();
        assert_eq!(by_code.len(), 1);
        assert_eq!(by_code[0].name, "Course 7");
    }

    #[tokio::test]
    async fn areas_are_counted() {
        let repo = seeded().await;
        let areas = repo.areas().await.unwrap();
        assert_eq!(
            areas,
            vec![
                AreaSummary {
                    area: "Humanities".into(),
                    total_courses: 4
                },
                AreaSummary {
                    area: "Sciences".into(),
                    total_courses: 8
                },
            ]
        );
    }
}
