//! 预导入模块
//!
//! 提供常用实体类型的快捷导入。

pub use super::covers::Entity as Covers;
pub use super::creators::Entity as Creators;
pub use super::game_creators::Entity as GameCreators;
pub use super::game_tags::Entity as GameTags;
pub use super::game_versions::Entity as GameVersions;
pub use super::games::Entity as Games;
pub use super::installations::Entity as Installations;
pub use super::localizations::Entity as Localizations;
pub use super::save_locations::Entity as SaveLocations;
pub use super::store_links::Entity as StoreLinks;
pub use super::tags::Entity as Tags;
