use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, RuntimeErr};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tauri::{AppHandle, Manager};
use url::Url;

/// 数据库相关路径常量
const DB_DATA_DIR: &str = "data";
const DB_FILE_NAME: &str = "ludere_manager.db";

/// 获取应用数据目录
pub fn get_app_data_dir(app: &AppHandle) -> Result<PathBuf, String> {
    app.path()
        .app_data_dir()
        .map_err(|e| format!("无法获取应用数据目录: {}", e))
}

/// 获取数据库文件路径
pub fn get_db_path(app: &AppHandle) -> Result<PathBuf, String> {
    Ok(get_app_data_dir(app)?.join(DB_DATA_DIR).join(DB_FILE_NAME))
}

/// 确保数据库目录存在
pub fn ensure_db_dir_exists(app: &AppHandle) -> Result<(), String> {
    let db_path = get_db_path(app)?;
    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent).map_err(|e| format!("无法创建数据库目录: {}", e))?;
    }
    Ok(())
}

/// Establish a SeaORM database connection.
pub async fn establish_connection(app: &AppHandle) -> Result<DatabaseConnection, DbErr> {
    // 1. 解析数据库文件路径
    let db_path = get_db_path(app).map_err(|e| DbErr::Conn(RuntimeErr::Internal(e)))?;

    // 2. 确保数据库所在的目录存在
    ensure_db_dir_exists(app).map_err(|e| DbErr::Conn(RuntimeErr::Internal(e)))?;

    if db_path.exists() {
        log::info!("使用数据库: {}", db_path.display());
    } else {
        log::info!("首次启动，创建数据库: {}", db_path.display());
    }

    // 3. 使用 `url` crate 安全地构建连接字符串
    let db_url = Url::from_file_path(&db_path).map_err(|_| {
        DbErr::Conn(RuntimeErr::Internal(format!(
            "Invalid database path: {}",
            db_path.display()
        )))
    })?;

    let connection_string = format!("sqlite:{}?mode=rwc", db_url.path());

    // 4. 设置连接选项（本地 SQLite 连接池为 1 即可）
    let mut options = ConnectOptions::new(connection_string);
    options
        .max_connections(1)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8));
    options.sqlx_logging(false);

    // 5. 连接数据库
    Database::connect(options).await
}

/// 关闭数据库连接
pub async fn close_connection(conn: DatabaseConnection) -> Result<(), DbErr> {
    conn.close().await?;
    Ok(())
}
