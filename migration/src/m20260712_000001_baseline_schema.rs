//! v1 基线迁移：创建游戏库的完整关系型表结构
//!
//! games 是核心表；制作者、标签通过关联表挂接（关联表上带 role 等附加列），
//! 商店链接、封面、本地化、存档位置、版本、安装记录都是 games 的从表，
//! 外键统一 ON DELETE CASCADE，引用完整性完全由数据库负责。

use log::info;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseBackend, Statement, TransactionTrait};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        // 开启事务，保证建表操作的原子性
        let txn = conn.begin().await?;
        create_baseline_schema(&txn).await?;
        txn.commit().await?;

        info!("[MIGRATION] v1 baseline schema created successfully");
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        // 先删从表再删主表，避免外键约束冲突
        for table in [
            "installations",
            "game_versions",
            "save_locations",
            "localizations",
            "covers",
            "store_links",
            "game_tags",
            "game_creators",
            "tags",
            "creators",
            "games",
        ] {
            conn.execute(Statement::from_string(
                DatabaseBackend::Sqlite,
                format!(r#"DROP TABLE IF EXISTS "{}""#, table),
            ))
            .await?;
        }

        Ok(())
    }
}

/// 创建基线表结构
async fn create_baseline_schema<C>(conn: &C) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    // 1. 核心 games 表
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        r#"CREATE TABLE "games" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "original_name" TEXT NOT NULL,
            "description" TEXT NOT NULL,
            "game_type" TEXT NOT NULL,
            "release_date" TEXT,
            "created_at" INTEGER DEFAULT (strftime('%s', 'now')),
            "updated_at" INTEGER DEFAULT (strftime('%s', 'now'))
        )"#,
    ))
    .await?;

    // 2. 制作者表
    // (name, creator_type) 作为业务上的查找键，这里不加唯一约束，
    // 去重由导入时的 find-or-create 负责
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        r#"CREATE TABLE "creators" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "name" TEXT NOT NULL,
            "creator_type" TEXT NOT NULL,
            "website" TEXT
        )"#,
    ))
    .await?;

    // 3. 游戏-制作者关联表（带角色）
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        r#"CREATE TABLE "game_creators" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "game_id" INTEGER NOT NULL,
            "creator_id" INTEGER NOT NULL,
            "role" TEXT NOT NULL,
            FOREIGN KEY("game_id") REFERENCES "games"("id") ON DELETE CASCADE,
            FOREIGN KEY("creator_id") REFERENCES "creators"("id") ON DELETE CASCADE
        )"#,
    ))
    .await?;

    // 4. 标签表（按名称唯一，upsert 的依据）
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        r#"CREATE TABLE "tags" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "name" TEXT NOT NULL UNIQUE
        )"#,
    ))
    .await?;

    // 5. 游戏-标签关联表
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        r#"CREATE TABLE "game_tags" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "game_id" INTEGER NOT NULL,
            "tag_id" INTEGER NOT NULL,
            FOREIGN KEY("game_id") REFERENCES "games"("id") ON DELETE CASCADE,
            FOREIGN KEY("tag_id") REFERENCES "tags"("id") ON DELETE CASCADE
        )"#,
    ))
    .await?;

    // 6. 商店链接表
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        r#"CREATE TABLE "store_links" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "game_id" INTEGER NOT NULL,
            "store" TEXT NOT NULL,
            "url" TEXT NOT NULL,
            "price" REAL,
            "currency" TEXT,
            FOREIGN KEY("game_id") REFERENCES "games"("id") ON DELETE CASCADE
        )"#,
    ))
    .await?;

    // 7. 封面表
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        r#"CREATE TABLE "covers" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "game_id" INTEGER NOT NULL,
            "url" TEXT NOT NULL,
            "cover_type" TEXT NOT NULL,
            "width" INTEGER NOT NULL,
            "height" INTEGER NOT NULL,
            "size" INTEGER NOT NULL,
            "primary" INTEGER NOT NULL DEFAULT 0,
            FOREIGN KEY("game_id") REFERENCES "games"("id") ON DELETE CASCADE
        )"#,
    ))
    .await?;

    // 8. 本地化表
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        r#"CREATE TABLE "localizations" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "game_id" INTEGER NOT NULL,
            "language" TEXT NOT NULL,
            "name" TEXT NOT NULL,
            "description" TEXT,
            FOREIGN KEY("game_id") REFERENCES "games"("id") ON DELETE CASCADE
        )"#,
    ))
    .await?;

    // 9. 存档位置表
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        r#"CREATE TABLE "save_locations" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "game_id" INTEGER NOT NULL,
            "path" TEXT NOT NULL,
            "location_type" TEXT NOT NULL,
            "cloud_sync" INTEGER NOT NULL DEFAULT 0,
            FOREIGN KEY("game_id") REFERENCES "games"("id") ON DELETE CASCADE
        )"#,
    ))
    .await?;

    // 10. 版本表
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        r#"CREATE TABLE "game_versions" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "game_id" INTEGER NOT NULL,
            "version" TEXT NOT NULL,
            "release_date" TEXT,
            "changelog" TEXT,
            FOREIGN KEY("game_id") REFERENCES "games"("id") ON DELETE CASCADE
        )"#,
    ))
    .await?;

    // 11. 安装记录表
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        r#"CREATE TABLE "installations" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "game_id" INTEGER NOT NULL,
            "path" TEXT NOT NULL,
            "size" INTEGER NOT NULL,
            "installed_at" INTEGER NOT NULL,
            "content" TEXT,
            FOREIGN KEY("game_id") REFERENCES "games"("id") ON DELETE CASCADE
        )"#,
    ))
    .await?;

    // 12. 常用查询路径的索引
    create_indexes(conn).await?;

    Ok(())
}

/// 为关联表的外键列和列表排序列建立索引
async fn create_indexes<C>(conn: &C) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    let statements = [
        r#"CREATE INDEX "idx_game_creators_game_id" ON "game_creators" ("game_id")"#,
        r#"CREATE INDEX "idx_game_creators_creator_id" ON "game_creators" ("creator_id")"#,
        r#"CREATE INDEX "idx_game_tags_game_id" ON "game_tags" ("game_id")"#,
        r#"CREATE INDEX "idx_game_tags_tag_id" ON "game_tags" ("tag_id")"#,
        r#"CREATE INDEX "idx_store_links_game_id" ON "store_links" ("game_id")"#,
        r#"CREATE INDEX "idx_covers_game_id" ON "covers" ("game_id")"#,
        r#"CREATE INDEX "idx_localizations_game_id" ON "localizations" ("game_id")"#,
        r#"CREATE INDEX "idx_save_locations_game_id" ON "save_locations" ("game_id")"#,
        r#"CREATE INDEX "idx_game_versions_game_id" ON "game_versions" ("game_id")"#,
        r#"CREATE INDEX "idx_installations_game_id" ON "installations" ("game_id")"#,
        r#"CREATE INDEX "idx_creators_name_type" ON "creators" ("name", "creator_type")"#,
        r#"CREATE INDEX "idx_games_updated_at" ON "games" ("updated_at")"#,
    ];

    for sql in statements {
        conn.execute(Statement::from_string(DatabaseBackend::Sqlite, sql))
            .await?;
    }

    Ok(())
}
