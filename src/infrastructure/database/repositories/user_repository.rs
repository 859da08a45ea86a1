//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    FromQueryResult, PaginatorTrait, QueryFilter, Set, Statement, Value,
};
use tracing::info;

use super::conflict_or_db;
use crate::domain::{
    ApprovedCourse, AreaProgress, DomainError, DomainResult, KindCount, NewApproval, NewUser,
    ProfileUpdate, UserAccount, UserRepository, UserStats, YearProgress,
};
use crate::infrastructure::database::entities::{approved_course, course, user};
use crate::infrastructure::database::listing::placeholder;

const APPROVED_SELECT: &str = "SELECT ac.course_id, c.code, c.name, c.area, c.credits, \
     ac.year, ac.semester, ac.registered_at \
     FROM approved_courses ac JOIN courses c ON c.id = ac.course_id";

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn statement(&self, sql: String, values: Vec<Value>) -> Statement {
        Statement::from_sql_and_values(self.db.get_database_backend(), sql, values)
    }

    fn ph(&self, index: usize) -> String {
        placeholder(self.db.get_database_backend(), index)
    }

    async fn approved_rows(
        &self,
        user_id: i32,
        course_id: Option<i32>,
    ) -> DomainResult<Vec<ApprovedCourse>> {
        let mut sql = format!("{} WHERE ac.user_id = {}", APPROVED_SELECT, self.ph(1));
        let mut values: Vec<Value> = vec![user_id.into()];
        if let Some(course_id) = course_id {
            sql.push_str(&format!(" AND ac.course_id = {}", self.ph(2)));
            values.push(course_id.into());
        }
        sql.push_str(" ORDER BY ac.year DESC, ac.semester DESC, c.code");

        Ok(ApprovedCourse::find_by_statement(self.statement(sql, values))
            .all(&self.db)
            .await?)
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, new_user: NewUser) -> DomainResult<UserAccount> {
        let model = user::ActiveModel {
            student_id: Set(new_user.student_id),
            first_names: Set(new_user.first_names),
            last_names: Set(new_user.last_names),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| conflict_or_db(e, "Student id or email already registered"))?;

        info!(user_id = model.id, student_id = %model.student_id, "User registered");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<UserAccount>> {
        Ok(user::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Into::into))
    }

    async fn find_by_student_id(&self, student_id: &str) -> DomainResult<Option<UserAccount>> {
        Ok(user::Entity::find()
            .filter(user::Column::StudentId.eq(student_id))
            .one(&self.db)
            .await?
            .map(Into::into))
    }

    async fn update_profile(&self, id: i32, update: ProfileUpdate) -> DomainResult<UserAccount> {
        let taken = user::Entity::find()
            .filter(user::Column::Email.eq(update.email.as_str()))
            .filter(user::Column::Id.ne(id))
            .count(&self.db)
            .await?;
        if taken > 0 {
            return Err(DomainError::Conflict(
                "Email already used by another account".to_string(),
            ));
        }

        let existing = user::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", id))?;

        let mut active: user::ActiveModel = existing.into();
        active.first_names = Set(update.first_names);
        active.last_names = Set(update.last_names);
        active.email = Set(update.email);

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| conflict_or_db(e, "Email already used by another account"))?;
        Ok(model.into())
    }

    async fn update_password(&self, id: i32, password_hash: &str) -> DomainResult<()> {
        let result = user::Entity::update_many()
            .col_expr(user::Column::PasswordHash, Expr::value(password_hash))
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("User", "id", id));
        }
        info!(user_id = id, "Password updated");
        Ok(())
    }

    async fn approved_courses(&self, user_id: i32) -> DomainResult<Vec<ApprovedCourse>> {
        self.approved_rows(user_id, None).await
    }

    async fn approve_course(
        &self,
        user_id: i32,
        approval: NewApproval,
    ) -> DomainResult<ApprovedCourse> {
        if course::Entity::find_by_id(approval.course_id)
            .count(&self.db)
            .await?
            == 0
        {
            return Err(DomainError::not_found("Course", "id", approval.course_id));
        }

        approved_course::ActiveModel {
            user_id: Set(user_id),
            course_id: Set(approval.course_id),
            year: Set(approval.year),
            semester: Set(approval.semester),
            registered_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| conflict_or_db(e, "Course already approved"))?;

        info!(user_id, course_id = approval.course_id, "Course approved");
        self.approved_rows(user_id, Some(approval.course_id))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::not_found("Approved course", "course_id", approval.course_id))
    }

    async fn remove_approved_course(&self, user_id: i32, course_id: i32) -> DomainResult<()> {
        let result = approved_course::Entity::delete_many()
            .filter(approved_course::Column::UserId.eq(user_id))
            .filter(approved_course::Column::CourseId.eq(course_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Approved course", "course_id", course_id));
        }
        Ok(())
    }

    async fn stats(&self, user_id: i32) -> DomainResult<UserStats> {
        let by_area = format!(
            "SELECT c.area, COUNT(*) AS total_courses, COALESCE(SUM(c.credits), 0) AS credits \
             FROM approved_courses ac JOIN courses c ON c.id = ac.course_id \
             WHERE ac.user_id = {} GROUP BY c.area ORDER BY total_courses DESC, c.area",
            self.ph(1)
        );
        let by_kind = format!(
            "SELECT pub.kind, COUNT(*) AS total FROM publications pub \
             WHERE pub.user_id = {} GROUP BY pub.kind ORDER BY total DESC, pub.kind",
            self.ph(1)
        );
        let by_year = format!(
            "SELECT ac.year, COUNT(*) AS approved_courses, COALESCE(SUM(c.credits), 0) AS credits \
             FROM approved_courses ac JOIN courses c ON c.id = ac.course_id \
             WHERE ac.user_id = {} GROUP BY ac.year ORDER BY ac.year",
            self.ph(1)
        );

        Ok(UserStats {
            by_area: AreaProgress::find_by_statement(self.statement(by_area, vec![user_id.into()]))
                .all(&self.db)
                .await?,
            by_kind: KindCount::find_by_statement(self.statement(by_kind, vec![user_id.into()]))
                .all(&self.db)
                .await?,
            by_year: YearProgress::find_by_statement(self.statement(by_year, vec![user_id.into()]))
                .all(&self.db)
                .await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::fixtures;
    use crate::infrastructure::database::test_support::migrated_connection;

    fn new_user(student_id: &str, email: &str) -> NewUser {
        NewUser {
            student_id: student_id.to_string(),
            first_names: "Ana".to_string(),
            last_names: "Diaz".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    fn approval(course_id: i32, year: i32, semester: i32) -> NewApproval {
        NewApproval {
            course_id,
            year,
            semester,
        }
    }

    async fn seeded() -> SeaOrmUserRepository {
        let db = migrated_connection().await;
        fixtures::user(&db, 1, "202400001", "Ana", "Diaz").await;
        fixtures::user(&db, 2, "202400002", "Juan", "Mora").await;
        fixtures::course(&db, 1, "0101", "Math", "Sciences", 5).await;
        fixtures::course(&db, 2, "0102", "Physics", "Sciences", 4).await;
        fixtures::course(&db, 3, "0201", "History", "Humanities", 3).await;
        SeaOrmUserRepository::new(db)
    }

    #[tokio::test]
    async fn create_and_find() {
        let repo = seeded().await;
        let created = repo.create(new_user("202400003", "new@example.com")).await.unwrap();

        let by_student = repo.find_by_student_id("202400003").await.unwrap().unwrap();
        assert_eq!(by_student.id, created.id);
        assert_eq!(by_student.password_hash, "hash");
        assert!(repo.find_by_student_id("000").await.unwrap().is_none());
        assert!(repo.find_by_id(created.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn duplicate_student_id_or_email_conflicts() {
        let repo = seeded().await;

        let same_student = repo.create(new_user("202400001", "other@example.com")).await;
        assert!(matches!(same_student, Err(DomainError::Conflict(_))));

        let same_email = repo.create(new_user("202400009", "202400002@example.com")).await;
        assert!(matches!(same_email, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn profile_update_rejects_foreign_email() {
        let repo = seeded().await;
        let update = |email: &str| ProfileUpdate {
            first_names: "Ana Maria".to_string(),
            last_names: "Diaz".to_string(),
            email: email.to_string(),
        };

        let taken = repo.update_profile(1, update("202400002@example.com")).await;
        assert!(matches!(taken, Err(DomainError::Conflict(_))));

        // keeping one's own email is fine
        let same = repo.update_profile(1, update("202400001@example.com")).await.unwrap();
        assert_eq!(same.first_names, "Ana Maria");

        let missing = repo.update_profile(99, update("x@example.com")).await;
        assert!(matches!(missing, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn password_update() {
        let repo = seeded().await;
        repo.update_password(1, "new-hash").await.unwrap();
        assert_eq!(repo.find_by_id(1).await.unwrap().unwrap().password_hash, "new-hash");
        assert!(repo.update_password(99, "h").await.is_err());
    }

    #[tokio::test]
    async fn approvals_lifecycle() {
        let repo = seeded().await;

        let approved = repo.approve_course(1, approval(1, 2023, 2)).await.unwrap();
        assert_eq!(approved.code, "0101");
        assert_eq!(approved.credits, 5);
        repo.approve_course(1, approval(3, 2024, 1)).await.unwrap();

        let again = repo.approve_course(1, approval(1, 2024, 1)).await;
        assert!(matches!(again, Err(DomainError::Conflict(_))));
        let unknown = repo.approve_course(1, approval(99, 2024, 1)).await;
        assert!(matches!(unknown, Err(DomainError::NotFound { .. })));

        let courses = repo.approved_courses(1).await.unwrap();
        assert_eq!(
            courses.iter().map(|c| c.course_id).collect::<Vec<_>>(),
            vec![3, 1]
        );
        assert!(repo.approved_courses(2).await.unwrap().is_empty());

        repo.remove_approved_course(1, 3).await.unwrap();
        let absent = repo.remove_approved_course(1, 3).await;
        assert!(matches!(absent, Err(DomainError::NotFound { .. })));
        assert_eq!(repo.approved_courses(1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn stats_group_by_area_kind_and_year() {
        let repo = seeded().await;
        repo.approve_course(1, approval(1, 2023, 1)).await.unwrap();
        repo.approve_course(1, approval(2, 2024, 1)).await.unwrap();
        repo.approve_course(1, approval(3, 2024, 2)).await.unwrap();
        fixtures::publication(&repo.db, 1, 1, (Some(1), None), "question", 1).await;
        fixtures::publication(&repo.db, 2, 1, (None, None), "question", 2).await;
        fixtures::publication(&repo.db, 3, 1, (None, None), "general", 3).await;
        fixtures::publication(&repo.db, 4, 2, (None, None), "general", 4).await;

        let stats = repo.stats(1).await.unwrap();

        assert_eq!(stats.by_area[0].area, "Sciences");
        assert_eq!(stats.by_area[0].total_courses, 2);
        assert_eq!(stats.by_area[0].credits, 9);
        assert_eq!(stats.by_area[1].area, "Humanities");

        assert_eq!(stats.by_kind[0].kind, "question");
        assert_eq!(stats.by_kind[0].total, 2);
        assert_eq!(stats.by_kind[1].total, 1);

        assert_eq!(
            stats
                .by_year
                .iter()
                .map(|y| (y.year, y.approved_courses, y.credits))
                .collect::<Vec<_>>(),
            vec![(2023, 1, 5), (2024, 2, 7)]
        );

        let empty = repo.stats(2).await.unwrap();
        assert!(empty.by_area.is_empty());
        assert!(empty.by_year.is_empty());
        assert_eq!(empty.by_kind.len(), 1);
    }
}
