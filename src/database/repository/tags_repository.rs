//! 标签数据仓库
//!
//! 标签按名称唯一，导入时逐个 upsert（存在即复用，不存在即创建）。

use crate::entity::prelude::*;
use crate::entity::tags;
use sea_orm::*;

/// 标签数据仓库
pub struct TagsRepository;

impl TagsRepository {
    /// 按名称 upsert 单个标签，返回标签 ID
    pub async fn upsert(db: &DatabaseConnection, name: &str) -> Result<i32, DbErr> {
        let existing = Tags::find()
            .filter(tags::Column::Name.eq(name))
            .one(db)
            .await?;

        if let Some(tag) = existing {
            return Ok(tag.id);
        }

        let created = tags::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
        }
        .insert(db)
        .await?;

        Ok(created.id)
    }

    /// 按名称 upsert 一组标签，返回与输入顺序一致的标签 ID 列表
    ///
    /// 幂等：同一名称重复调用不会产生第二行。
    pub async fn upsert_many(db: &DatabaseConnection, names: &[String]) -> Result<Vec<i32>, DbErr> {
        let mut ids = Vec::with_capacity(names.len());

        for name in names {
            ids.push(Self::upsert(db, name).await?);
        }

        Ok(ids)
    }

    /// 查询标签，支持按名称子串过滤
    pub async fn search(
        db: &DatabaseConnection,
        search: Option<String>,
    ) -> Result<Vec<tags::Model>, DbErr> {
        let mut query = Tags::find();

        if let Some(text) = search.as_deref() {
            if !text.is_empty() {
                query = query.filter(tags::Column::Name.contains(text));
            }
        }

        query.order_by_asc(tags::Column::Name).all(db).await
    }
}
