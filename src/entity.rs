//! 数据实体模块
//!
//! 包含所有 SeaORM 实体定义和共享的枚举类型。

pub mod prelude;

// === 枚举类型（以字符串形式落库）===
pub mod enums;

// === SeaORM 实体（对应数据库表）===
pub mod covers;
pub mod creators;
pub mod game_creators;
pub mod game_tags;
pub mod game_versions;
pub mod games;
pub mod installations;
pub mod localizations;
pub mod save_locations;
pub mod store_links;
pub mod tags;
