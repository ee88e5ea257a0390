//! 数据传输对象 (DTO)
//!
//! 前后端数据交互的结构定义。导入载荷与前端表单字段一一对应。

use serde::{Deserialize, Deserializer, Serialize};

use crate::entity::enums::{CreatorType, GameType};

/// 辅助函数：支持 Option<Option<T>> 的反序列化
/// 用于区分"未提供字段"和"显式设为 null"
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

/// 创建游戏的载荷
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameCreateInput {
    pub original_name: String,
    pub description: String,
    pub game_type: GameType,
    pub release_date: Option<String>,
}

/// 更新游戏的载荷
///
/// 所有字段均为 Option，允许部分更新。
/// release_date 使用 Option<Option<T>> 区分"未提供"和"清空"。
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GameUpdateInput {
    pub original_name: Option<String>,
    pub description: Option<String>,
    pub game_type: Option<GameType>,
    #[serde(default, deserialize_with = "double_option")]
    pub release_date: Option<Option<String>>,
}

/// 列表查询参数
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GameListParams {
    pub skip: Option<u64>,
    pub take: Option<u64>,
    /// 对 original_name / description 做子串匹配
    pub search: Option<String>,
    pub game_type: Option<GameType>,
}

/// 导入载荷里的制作者
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreatorInput {
    pub name: String,
    pub creator_type: CreatorType,
    pub role: String,
    pub website: Option<String>,
}

/// 导入载荷里的商店链接
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreLinkInput {
    pub store: String,
    pub url: String,
    pub price: Option<f64>,
    pub currency: Option<String>,
}

/// 导入载荷里的封面
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CoverInput {
    pub url: String,
    pub cover_type: String,
    pub width: i32,
    pub height: i32,
    pub size: i32,
    pub primary: bool,
}

/// 导入载荷里的本地化
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocalizationInput {
    pub language: String,
    pub name: String,
    pub description: Option<String>,
}

/// 导入载荷里的存档位置
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SaveLocationInput {
    pub path: String,
    pub location_type: String,
    pub cloud_sync: bool,
}

/// 导入载荷里的版本
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VersionInput {
    pub version: String,
    pub release_date: Option<String>,
    pub changelog: Option<String>,
}

/// 导入游戏的完整载荷
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameImportInput {
    pub original_name: String,
    pub description: String,
    pub game_type: GameType,
    pub release_date: Option<String>,
    /// 安装目录，必须存在，导入时扫描其总大小
    pub install_path: String,

    #[serde(default)]
    pub creators: Vec<CreatorInput>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub store_links: Vec<StoreLinkInput>,
    #[serde(default)]
    pub covers: Vec<CoverInput>,
    #[serde(default)]
    pub localizations: Vec<LocalizationInput>,
    #[serde(default)]
    pub save_locations: Vec<SaveLocationInput>,
    #[serde(default)]
    pub versions: Vec<VersionInput>,
}
