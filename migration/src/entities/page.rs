//! Page entity: one row per distinct (project, namespace, title key)

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "pages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub project_id: String,
    pub namespace_id: i32,
    /// Display title of the most recent write
    pub title: String,
    /// Normalized title used as part of the natural key
    pub title_key: String,
    pub last_seen_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::page_view::Entity")]
    PageView,
}

impl Related<super::page_view::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PageView.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
