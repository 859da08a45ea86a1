//! Professor rating entity for database

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

use crate::domain::ProfessorRating;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "professor_ratings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub professor_id: i32,
    pub user_id: i32,
    pub course_id: Option<i32>,
    pub score: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::professor::Entity",
        from = "Column::ProfessorId",
        to = "super::professor::Column::Id"
    )]
    Professor,
}

impl Related<super::professor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Professor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ProfessorRating {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            professor_id: model.professor_id,
            user_id: model.user_id,
            course_id: model.course_id,
            score: model.score,
            comment: model.comment,
            created_at: model.created_at,
        }
    }
}
