//! 游戏数据仓库
//!
//! games 表的 CRUD、带关联数据的查询，以及导入流程的编排。
//!
//! 导入顺序：校验安装路径 → 扫描目录大小 → 制作者 find-or-create →
//! 标签 upsert → 单个事务内创建游戏行和全部关联行。
//! 对账步骤不在最终事务内：最终创建失败时，已写入的制作者/标签不回滚。

use std::collections::HashMap;
use std::path::Path;

use crate::database::dto::{GameCreateInput, GameImportInput, GameListParams, GameUpdateInput};
use crate::database::repository::creators_repository::{CreatorLink, CreatorsRepository};
use crate::database::repository::tags_repository::TagsRepository;
use crate::entity::prelude::*;
use crate::entity::{
    covers, creators, game_creators, game_tags, game_versions, games, installations,
    localizations, save_locations, store_links, tags,
};
use crate::utils::fs::directory_size;
use sea_orm::*;
use serde::{Deserialize, Serialize};

/// 挂在游戏上的制作者（带角色）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameCreatorEntry {
    pub creator: creators::Model,
    pub role: String,
}

/// 游戏及其全部关联数据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameWithRelations {
    pub game: games::Model,
    pub creators: Vec<GameCreatorEntry>,
    pub tags: Vec<tags::Model>,
    pub store_links: Vec<store_links::Model>,
    pub covers: Vec<covers::Model>,
    pub localizations: Vec<localizations::Model>,
    pub save_locations: Vec<save_locations::Model>,
    pub versions: Vec<game_versions::Model>,
    pub installations: Vec<installations::Model>,
}

/// 分页列表结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameListPage {
    pub total: u64,
    pub games: Vec<GameWithRelations>,
}

/// 游戏数据仓库
pub struct GamesRepository;

impl GamesRepository {
    // ==================== 游戏 CRUD 操作 ====================

    /// 插入游戏（不带关联数据）
    pub async fn insert(
        db: &DatabaseConnection,
        game: GameCreateInput,
    ) -> Result<games::Model, DbErr> {
        let now = chrono::Utc::now().timestamp() as i32;

        let game_active = games::ActiveModel {
            id: NotSet,
            original_name: Set(game.original_name),
            description: Set(game.description),
            game_type: Set(game.game_type),
            release_date: Set(game.release_date),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
        };

        game_active.insert(db).await
    }

    /// 更新游戏
    ///
    /// 支持部分更新，未提供的字段保持不变；
    /// release_date 显式传 null 时清空。
    pub async fn update(
        db: &DatabaseConnection,
        game_id: i32,
        updates: GameUpdateInput,
    ) -> Result<games::Model, DbErr> {
        let existing = Games::find_by_id(game_id)
            .one(db)
            .await?
            .ok_or(DbErr::RecordNotFound("Game not found".to_string()))?;

        let mut active: games::ActiveModel = existing.into();

        if let Some(name) = updates.original_name {
            active.original_name = Set(name);
        }
        if let Some(description) = updates.description {
            active.description = Set(description);
        }
        if let Some(game_type) = updates.game_type {
            active.game_type = Set(game_type);
        }
        if let Some(release_date) = updates.release_date {
            active.release_date = Set(release_date);
        }

        active.updated_at = Set(Some(chrono::Utc::now().timestamp() as i32));

        active.update(db).await
    }

    /// 删除游戏（关联行由数据库级联删除）
    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<DeleteResult, DbErr> {
        Games::delete_by_id(id).exec(db).await
    }

    // ==================== 查询操作 ====================

    /// 根据 ID 查询游戏及其全部关联数据
    pub async fn find_with_relations(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<Option<GameWithRelations>, DbErr> {
        let game = match Games::find_by_id(id).one(db).await? {
            Some(game) => game,
            None => return Ok(None),
        };

        let mut loaded = Self::attach_relations(db, vec![game]).await?;
        Ok(loaded.pop())
    }

    /// 分页列出游戏，支持名称/描述子串搜索和类型筛选
    ///
    /// total 是应用同一筛选条件后的总数，按 updated_at 倒序返回。
    pub async fn list(
        db: &DatabaseConnection,
        params: GameListParams,
    ) -> Result<GameListPage, DbErr> {
        let skip = params.skip.unwrap_or(0);
        let take = params.take.unwrap_or(50);

        let total = Self::build_filter(&params).count(db).await?;

        let rows = Self::build_filter(&params)
            .order_by_desc(games::Column::UpdatedAt)
            .offset(skip)
            .limit(take)
            .all(db)
            .await?;

        let games = Self::attach_relations(db, rows).await?;

        Ok(GameListPage { total, games })
    }

    // ==================== 导入流程 ====================

    /// 导入游戏
    ///
    /// 任何数据库写入之前先校验安装路径并扫描目录大小；
    /// 之后对账制作者/标签，最后在单个事务里创建游戏行和全部关联行。
    pub async fn import(
        db: &DatabaseConnection,
        data: GameImportInput,
    ) -> Result<GameWithRelations, DbErr> {
        // 1. 校验安装路径
        let install_path = Path::new(&data.install_path);
        if !install_path.exists() {
            return Err(DbErr::Custom(format!(
                "安装路径不存在: {}",
                data.install_path
            )));
        }

        // 2. 扫描安装目录大小
        let total_size = directory_size(install_path).map_err(DbErr::Custom)?;
        let install_size = i64::try_from(total_size).map_err(|_| {
            DbErr::Custom(format!("安装目录大小超出可存储范围: {} 字节", total_size))
        })?;

        // 3. 制作者 find-or-create（会就地覆盖已有行的 website）
        let creator_links = CreatorsRepository::reconcile(db, &data.creators).await?;

        // 4. 标签 upsert
        let tag_ids = TagsRepository::upsert_many(db, &data.tags).await?;

        // 5. 事务内创建游戏及全部关联行
        let game_id =
            Self::create_with_relations(db, &data, install_size, &creator_links, &tag_ids).await?;

        Self::find_with_relations(db, game_id)
            .await?
            .ok_or(DbErr::RecordNotFound(
                "Game not found after import".to_string(),
            ))
    }

    // ==================== 私有方法 ====================

    /// 通用的查询构建器：应用搜索和类型筛选
    fn build_filter(params: &GameListParams) -> Select<Games> {
        let mut query = Games::find();

        if let Some(search) = params.search.as_deref() {
            if !search.is_empty() {
                query = query.filter(
                    Condition::any()
                        .add(games::Column::OriginalName.contains(search))
                        .add(games::Column::Description.contains(search)),
                );
            }
        }

        if let Some(game_type) = &params.game_type {
            query = query.filter(games::Column::GameType.eq(game_type.clone()));
        }

        query
    }

    /// 为一批游戏加载全部关联数据（按表批量加载，避免逐行查询）
    async fn attach_relations(
        db: &DatabaseConnection,
        games: Vec<games::Model>,
    ) -> Result<Vec<GameWithRelations>, DbErr> {
        let mut creator_links = games.load_many(game_creators::Entity, db).await?;
        let mut tag_rows = games
            .load_many_to_many(tags::Entity, game_tags::Entity, db)
            .await?;
        let mut store_link_rows = games.load_many(store_links::Entity, db).await?;
        let mut cover_rows = games.load_many(covers::Entity, db).await?;
        let mut localization_rows = games.load_many(localizations::Entity, db).await?;
        let mut save_location_rows = games.load_many(save_locations::Entity, db).await?;
        let mut version_rows = games.load_many(game_versions::Entity, db).await?;
        let mut installation_rows = games.load_many(installations::Entity, db).await?;

        // 关联表里引用到的制作者统一查一次
        let creator_ids: Vec<i32> = creator_links
            .iter()
            .flatten()
            .map(|link| link.creator_id)
            .collect();
        let creators_by_id: HashMap<i32, creators::Model> =
            CreatorsRepository::find_by_ids(db, creator_ids)
                .await?
                .into_iter()
                .map(|creator| (creator.id, creator))
                .collect();

        let mut result = Vec::with_capacity(games.len());

        for (idx, game) in games.into_iter().enumerate() {
            let creators = std::mem::take(&mut creator_links[idx])
                .into_iter()
                .filter_map(|link| {
                    creators_by_id.get(&link.creator_id).map(|creator| GameCreatorEntry {
                        creator: creator.clone(),
                        role: link.role,
                    })
                })
                .collect();

            result.push(GameWithRelations {
                game,
                creators,
                tags: std::mem::take(&mut tag_rows[idx]),
                store_links: std::mem::take(&mut store_link_rows[idx]),
                covers: std::mem::take(&mut cover_rows[idx]),
                localizations: std::mem::take(&mut localization_rows[idx]),
                save_locations: std::mem::take(&mut save_location_rows[idx]),
                versions: std::mem::take(&mut version_rows[idx]),
                installations: std::mem::take(&mut installation_rows[idx]),
            });
        }

        Ok(result)
    }

    /// 在单个事务内创建游戏行、安装记录和全部关联行，返回新游戏 ID
    async fn create_with_relations(
        db: &DatabaseConnection,
        data: &GameImportInput,
        install_size: i64,
        creator_links: &[CreatorLink],
        tag_ids: &[i32],
    ) -> Result<i32, DbErr> {
        let txn = db.begin().await?;
        let now = chrono::Utc::now().timestamp() as i32;

        let game = games::ActiveModel {
            id: NotSet,
            original_name: Set(data.original_name.clone()),
            description: Set(data.description.clone()),
            game_type: Set(data.game_type.clone()),
            release_date: Set(data.release_date.clone()),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
        }
        .insert(&txn)
        .await?;

        installations::ActiveModel {
            id: NotSet,
            game_id: Set(game.id),
            path: Set(data.install_path.clone()),
            size: Set(install_size),
            installed_at: Set(now),
            // 预留列，导入时写入空 JSON 对象
            content: Set(Some(serde_json::json!({}))),
        }
        .insert(&txn)
        .await?;

        for link in creator_links {
            game_creators::ActiveModel {
                id: NotSet,
                game_id: Set(game.id),
                creator_id: Set(link.creator_id),
                role: Set(link.role.clone()),
            }
            .insert(&txn)
            .await?;
        }

        for tag_id in tag_ids {
            game_tags::ActiveModel {
                id: NotSet,
                game_id: Set(game.id),
                tag_id: Set(*tag_id),
            }
            .insert(&txn)
            .await?;
        }

        for link in &data.store_links {
            store_links::ActiveModel {
                id: NotSet,
                game_id: Set(game.id),
                store: Set(link.store.clone()),
                url: Set(link.url.clone()),
                price: Set(link.price),
                currency: Set(link.currency.clone()),
            }
            .insert(&txn)
            .await?;
        }

        for cover in &data.covers {
            covers::ActiveModel {
                id: NotSet,
                game_id: Set(game.id),
                url: Set(cover.url.clone()),
                cover_type: Set(cover.cover_type.clone()),
                width: Set(cover.width),
                height: Set(cover.height),
                size: Set(cover.size),
                primary: Set(cover.primary),
            }
            .insert(&txn)
            .await?;
        }

        for localization in &data.localizations {
            localizations::ActiveModel {
                id: NotSet,
                game_id: Set(game.id),
                language: Set(localization.language.clone()),
                name: Set(localization.name.clone()),
                description: Set(localization.description.clone()),
            }
            .insert(&txn)
            .await?;
        }

        for location in &data.save_locations {
            save_locations::ActiveModel {
                id: NotSet,
                game_id: Set(game.id),
                path: Set(location.path.clone()),
                location_type: Set(location.location_type.clone()),
                cloud_sync: Set(location.cloud_sync),
            }
            .insert(&txn)
            .await?;
        }

        for version in &data.versions {
            game_versions::ActiveModel {
                id: NotSet,
                game_id: Set(game.id),
                version: Set(version.version.clone()),
                release_date: Set(version.release_date.clone()),
                changelog: Set(version.changelog.clone()),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        Ok(game.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::dto::CreatorInput;
    use migration::MigratorTrait;
    use crate::entity::enums::{CreatorType, GameType};

    async fn setup_db() -> DatabaseConnection {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1);
        let db = Database::connect(options).await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();
        db
    }

    fn import_input(install_path: &str) -> GameImportInput {
        GameImportInput {
            original_name: "Test Game".to_string(),
            description: "A test import".to_string(),
            game_type: GameType::Rpg,
            release_date: None,
            install_path: install_path.to_string(),
            creators: vec![CreatorInput {
                name: "Acme".to_string(),
                creator_type: CreatorType::Studio,
                role: "Developer".to_string(),
                website: None,
            }],
            tags: vec!["retro".to_string()],
            store_links: Vec::new(),
            covers: Vec::new(),
            localizations: Vec::new(),
            save_locations: Vec::new(),
            versions: Vec::new(),
        }
    }

    fn create_input(name: &str, description: &str, game_type: GameType) -> GameCreateInput {
        GameCreateInput {
            original_name: name.to_string(),
            description: description.to_string(),
            game_type,
            release_date: None,
        }
    }

    #[tokio::test]
    async fn import_against_empty_directory() {
        let db = setup_db().await;
        let dir = tempfile::tempdir().unwrap();

        let imported = GamesRepository::import(&db, import_input(dir.path().to_str().unwrap()))
            .await
            .unwrap();

        assert_eq!(imported.game.original_name, "Test Game");
        assert_eq!(imported.creators.len(), 1);
        assert_eq!(imported.creators[0].creator.name, "Acme");
        assert_eq!(imported.creators[0].role, "Developer");
        assert_eq!(imported.tags.len(), 1);
        assert_eq!(imported.tags[0].name, "retro");
        assert_eq!(imported.installations.len(), 1);
        assert_eq!(imported.installations[0].size, 0);
    }

    #[tokio::test]
    async fn import_records_scanned_directory_size() {
        let db = setup_db().await;
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("data.pak"), vec![0u8; 640]).unwrap();
        let sub = dir.path().join("assets");
        std::fs::create_dir(&sub).unwrap();
        std::fs::write(sub.join("bgm.ogg"), vec![0u8; 360]).unwrap();

        let imported = GamesRepository::import(&db, import_input(dir.path().to_str().unwrap()))
            .await
            .unwrap();

        assert_eq!(imported.installations[0].size, 1000);
        assert_eq!(
            imported.installations[0].path,
            dir.path().to_str().unwrap()
        );
    }

    #[tokio::test]
    async fn import_with_missing_path_writes_nothing() {
        let db = setup_db().await;

        let result =
            GamesRepository::import(&db, import_input("/nonexistent/install/dir")).await;

        assert!(result.is_err());
        assert_eq!(Games::find().count(&db).await.unwrap(), 0);
        assert_eq!(Creators::find().count(&db).await.unwrap(), 0);
        assert_eq!(Tags::find().count(&db).await.unwrap(), 0);
        assert_eq!(Installations::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn second_import_reuses_creator_and_tag_rows() {
        let db = setup_db().await;
        let dir = tempfile::tempdir().unwrap();

        let first = GamesRepository::import(&db, import_input(dir.path().to_str().unwrap()))
            .await
            .unwrap();

        let mut second_input = import_input(dir.path().to_str().unwrap());
        second_input.original_name = "Another Game".to_string();
        let second = GamesRepository::import(&db, second_input).await.unwrap();

        assert_ne!(first.game.id, second.game.id);
        assert_eq!(
            first.creators[0].creator.id,
            second.creators[0].creator.id
        );
        assert_eq!(first.tags[0].id, second.tags[0].id);
        assert_eq!(Creators::find().count(&db).await.unwrap(), 1);
        assert_eq!(Tags::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn import_attaches_optional_relation_rows() {
        let db = setup_db().await;
        let dir = tempfile::tempdir().unwrap();

        let mut input = import_input(dir.path().to_str().unwrap());
        input.store_links = vec![crate::database::dto::StoreLinkInput {
            store: "STEAM".to_string(),
            url: "https://store.example/app/1".to_string(),
            price: Some(19.99),
            currency: Some("USD".to_string()),
        }];
        input.localizations = vec![crate::database::dto::LocalizationInput {
            language: "ja".to_string(),
            name: "テストゲーム".to_string(),
            description: None,
        }];
        input.versions = vec![crate::database::dto::VersionInput {
            version: "1.0.2".to_string(),
            release_date: Some("2026-01-15".to_string()),
            changelog: Some("fix crash on load".to_string()),
        }];

        let imported = GamesRepository::import(&db, input).await.unwrap();

        assert_eq!(imported.store_links.len(), 1);
        assert_eq!(imported.store_links[0].store, "STEAM");
        assert_eq!(imported.localizations.len(), 1);
        assert_eq!(imported.localizations[0].language, "ja");
        assert_eq!(imported.versions.len(), 1);
        assert_eq!(imported.versions[0].version, "1.0.2");
    }

    #[tokio::test]
    async fn list_filters_by_search_and_type() {
        let db = setup_db().await;

        GamesRepository::insert(&db, create_input("Dragon Quest", "classic rpg", GameType::Rpg))
            .await
            .unwrap();
        GamesRepository::insert(
            &db,
            create_input("Star Trader", "a dragon appears in chapter two", GameType::Strategy),
        )
        .await
        .unwrap();
        GamesRepository::insert(&db, create_input("Puzzle Box", "casual puzzles", GameType::Other))
            .await
            .unwrap();

        // 只命中名称
        let page = GamesRepository::list(
            &db,
            GameListParams {
                search: Some("Trader".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.games[0].game.original_name, "Star Trader");

        // 只命中描述
        let page = GamesRepository::list(
            &db,
            GameListParams {
                search: Some("classic".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.games[0].game.original_name, "Dragon Quest");

        // 名称或描述的子串都算命中（SQLite 的 LIKE 对 ASCII 不区分大小写）
        let page = GamesRepository::list(
            &db,
            GameListParams {
                search: Some("Dragon".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(page.total, 2);

        // 类型筛选与搜索组合
        let page = GamesRepository::list(
            &db,
            GameListParams {
                search: Some("Dragon".to_string()),
                game_type: Some(GameType::Rpg),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.games[0].game.original_name, "Dragon Quest");
    }

    #[tokio::test]
    async fn list_pages_with_skip_and_take() {
        let db = setup_db().await;

        for i in 0..5 {
            GamesRepository::insert(
                &db,
                create_input(&format!("Game {}", i), "entry", GameType::Other),
            )
            .await
            .unwrap();
        }

        let page = GamesRepository::list(
            &db,
            GameListParams {
                skip: Some(2),
                take: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(page.total, 5);
        assert_eq!(page.games.len(), 2);
    }

    #[tokio::test]
    async fn update_applies_partial_changes() {
        let db = setup_db().await;

        let game = GamesRepository::insert(
            &db,
            GameCreateInput {
                original_name: "Original".to_string(),
                description: "before".to_string(),
                game_type: GameType::Action,
                release_date: Some("2025-03-01".to_string()),
            },
        )
        .await
        .unwrap();

        // 只改描述：其余字段保持不变
        let updated = GamesRepository::update(
            &db,
            game.id,
            GameUpdateInput {
                description: Some("after".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.original_name, "Original");
        assert_eq!(updated.description, "after");
        assert_eq!(updated.release_date.as_deref(), Some("2025-03-01"));

        // 显式置 null：清空发售日期
        let cleared = GamesRepository::update(
            &db,
            game.id,
            GameUpdateInput {
                release_date: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(cleared.release_date, None);
    }

    #[tokio::test]
    async fn update_missing_game_is_record_not_found() {
        let db = setup_db().await;

        let result = GamesRepository::update(&db, 404, GameUpdateInput::default()).await;

        assert!(matches!(result, Err(DbErr::RecordNotFound(_))));
    }

    #[tokio::test]
    async fn delete_cascades_owned_rows_but_keeps_shared_ones() {
        let db = setup_db().await;
        let dir = tempfile::tempdir().unwrap();

        let imported = GamesRepository::import(&db, import_input(dir.path().to_str().unwrap()))
            .await
            .unwrap();

        let result = GamesRepository::delete(&db, imported.game.id).await.unwrap();
        assert_eq!(result.rows_affected, 1);

        assert_eq!(Installations::find().count(&db).await.unwrap(), 0);
        assert_eq!(GameCreators::find().count(&db).await.unwrap(), 0);
        assert_eq!(GameTags::find().count(&db).await.unwrap(), 0);

        // 共享的制作者/标签行不受级联影响
        assert_eq!(Creators::find().count(&db).await.unwrap(), 1);
        assert_eq!(Tags::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn find_with_relations_returns_none_for_missing_id() {
        let db = setup_db().await;

        let found = GamesRepository::find_with_relations(&db, 404).await.unwrap();

        assert!(found.is_none());
    }
}
