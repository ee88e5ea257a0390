//! 枚举类型
//!
//! 游戏类别和制作者类别的取值由前端表单固定，这里用 ActiveEnum 落为
//! 字符串列。商店、封面、存档位置的类别没有固定取值，按普通 TEXT 存储。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 游戏类别
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameType {
    #[sea_orm(string_value = "RPG")]
    Rpg,
    #[sea_orm(string_value = "VISUAL_NOVEL")]
    VisualNovel,
    #[sea_orm(string_value = "ACTION")]
    Action,
    #[sea_orm(string_value = "SIMULATION")]
    Simulation,
    #[sea_orm(string_value = "STRATEGY")]
    Strategy,
    #[sea_orm(string_value = "OTHER")]
    Other,
}

/// 制作者类别
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreatorType {
    #[sea_orm(string_value = "STUDIO")]
    Studio,
    #[sea_orm(string_value = "INDIVIDUAL")]
    Individual,
    #[sea_orm(string_value = "PUBLISHER")]
    Publisher,
    #[sea_orm(string_value = "CIRCLE")]
    Circle,
}
