//! User entity for database

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

use crate::domain::UserAccount;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub student_id: String,
    pub first_names: String,
    pub last_names: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::publication::Entity")]
    Publications,
    #[sea_orm(has_many = "super::approved_course::Entity")]
    ApprovedCourses,
}

impl Related<super::publication::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Publications.def()
    }
}

impl Related<super::approved_course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ApprovedCourses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for UserAccount {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            student_id: model.student_id,
            first_names: model.first_names,
            last_names: model.last_names,
            email: model.email,
            password_hash: model.password_hash,
            created_at: model.created_at,
        }
    }
}
