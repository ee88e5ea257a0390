//! 制作者实体
//!
//! 业务上以 (name, creator_type) 作为查找键；没有数据库唯一约束，
//! 去重由导入时的 find-or-create 保证。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::CreatorType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "creators")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_type = "Text")]
    pub name: String,
    pub creator_type: CreatorType,
    #[sea_orm(column_type = "Text", nullable)]
    pub website: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::game_creators::Entity")]
    GameCreators,
}

impl Related<super::game_creators::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameCreators.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
