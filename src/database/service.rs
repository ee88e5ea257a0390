use sea_orm::DatabaseConnection;
use tauri::State;

use crate::database::dto::{GameCreateInput, GameImportInput, GameListParams, GameUpdateInput};
use crate::database::repository::{
    games_repository::{GameListPage, GameWithRelations, GamesRepository},
    tags_repository::TagsRepository,
};
use crate::entity::tags;

/// 在命令边界统一记录并格式化错误
fn command_error(context: &str, error: impl std::fmt::Display) -> String {
    let message = format!("{}: {}", context, error);
    log::error!("{}", message);
    message
}

// ==================== 游戏数据相关 ====================

/// 创建游戏
#[tauri::command]
pub async fn create_game(
    db: State<'_, DatabaseConnection>,
    data: GameCreateInput,
) -> Result<GameWithRelations, String> {
    let game = GamesRepository::insert(&db, data)
        .await
        .map_err(|e| command_error("创建游戏失败", e))?;

    GamesRepository::find_with_relations(&db, game.id)
        .await
        .map_err(|e| command_error("创建游戏失败", e))?
        .ok_or_else(|| command_error("创建游戏失败", "创建后查询不到游戏"))
}

/// 更新游戏（部分更新）
#[tauri::command]
pub async fn update_game(
    db: State<'_, DatabaseConnection>,
    id: i32,
    data: GameUpdateInput,
) -> Result<GameWithRelations, String> {
    let game = GamesRepository::update(&db, id, data)
        .await
        .map_err(|e| command_error("更新游戏失败", e))?;

    GamesRepository::find_with_relations(&db, game.id)
        .await
        .map_err(|e| command_error("更新游戏失败", e))?
        .ok_or_else(|| command_error("更新游戏失败", "更新后查询不到游戏"))
}

/// 删除游戏
#[tauri::command]
pub async fn delete_game(db: State<'_, DatabaseConnection>, id: i32) -> Result<u64, String> {
    GamesRepository::delete(&db, id)
        .await
        .map(|result| result.rows_affected)
        .map_err(|e| command_error("删除游戏失败", e))
}

/// 根据 ID 查询游戏及其全部关联数据
#[tauri::command]
pub async fn get_game(
    db: State<'_, DatabaseConnection>,
    id: i32,
) -> Result<Option<GameWithRelations>, String> {
    GamesRepository::find_with_relations(&db, id)
        .await
        .map_err(|e| command_error("查询游戏失败", e))
}

/// 分页列出游戏，支持搜索和类型筛选
#[tauri::command]
pub async fn list_games(
    db: State<'_, DatabaseConnection>,
    params: GameListParams,
) -> Result<GameListPage, String> {
    GamesRepository::list(&db, params)
        .await
        .map_err(|e| command_error("获取游戏列表失败", e))
}

/// 导入游戏（扫描安装目录并创建全部关联数据）
#[tauri::command]
pub async fn import_game(
    db: State<'_, DatabaseConnection>,
    data: GameImportInput,
) -> Result<GameWithRelations, String> {
    log::info!("开始导入游戏: {}", data.original_name);

    GamesRepository::import(&db, data)
        .await
        .map_err(|e| command_error("导入游戏失败", e))
}

// ==================== 标签相关 ====================

/// 查询标签，支持按名称子串过滤
#[tauri::command]
pub async fn list_tags(
    db: State<'_, DatabaseConnection>,
    search: Option<String>,
) -> Result<Vec<tags::Model>, String> {
    TagsRepository::search(&db, search)
        .await
        .map_err(|e| command_error("获取标签列表失败", e))
}
