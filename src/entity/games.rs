//! 游戏实体
//!
//! games 表是核心表，只保存游戏本体的元数据；
//! 制作者、标签、商店链接等关联数据都在各自的从表里。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::GameType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_type = "Text")]
    pub original_name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub game_type: GameType,
    #[sea_orm(column_type = "Text", nullable)]
    pub release_date: Option<String>,

    // === 时间戳 ===
    pub created_at: Option<i32>,
    pub updated_at: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::game_creators::Entity")]
    GameCreators,
    #[sea_orm(has_many = "super::game_tags::Entity")]
    GameTags,
    #[sea_orm(has_many = "super::store_links::Entity")]
    StoreLinks,
    #[sea_orm(has_many = "super::covers::Entity")]
    Covers,
    #[sea_orm(has_many = "super::localizations::Entity")]
    Localizations,
    #[sea_orm(has_many = "super::save_locations::Entity")]
    SaveLocations,
    #[sea_orm(has_many = "super::game_versions::Entity")]
    GameVersions,
    #[sea_orm(has_many = "super::installations::Entity")]
    Installations,
}

impl Related<super::game_creators::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameCreators.def()
    }
}

impl Related<super::game_tags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameTags.def()
    }
}

impl Related<super::store_links::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StoreLinks.def()
    }
}

impl Related<super::covers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Covers.def()
    }
}

impl Related<super::localizations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Localizations.def()
    }
}

impl Related<super::save_locations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SaveLocations.def()
    }
}

impl Related<super::game_versions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameVersions.def()
    }
}

impl Related<super::installations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Installations.def()
    }
}

// 多对多：games <-> tags，经由 game_tags
impl Related<super::tags::Entity> for Entity {
    fn to() -> RelationDef {
        super::game_tags::Relation::Tags.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::game_tags::Relation::Games.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
