//! 制作者数据仓库
//!
//! 导入时的 find-or-create 逻辑：以 (name, creator_type) 为查找键，
//! 命中则按需覆盖 website，未命中则新建。

use crate::database::dto::CreatorInput;
use crate::entity::creators;
use crate::entity::prelude::*;
use sea_orm::*;
use serde::{Deserialize, Serialize};

/// reconcile 的输出：挂接到游戏时需要的 (制作者 ID, 角色) 对
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatorLink {
    pub creator_id: i32,
    pub role: String,
}

/// 制作者数据仓库
pub struct CreatorsRepository;

impl CreatorsRepository {
    /// 对账导入载荷里的制作者列表
    ///
    /// 逐条按 (name, creator_type) 精确查找：
    /// - 命中且载荷带有不同的 website 时，就地覆盖（last-import-wins）；
    /// - 未命中则插入新行。
    ///
    /// 注意：覆盖 website 会影响所有引用该制作者的游戏，
    /// 这一行为与既有数据格式保持一致。
    pub async fn reconcile(
        db: &DatabaseConnection,
        inputs: &[CreatorInput],
    ) -> Result<Vec<CreatorLink>, DbErr> {
        let mut links = Vec::with_capacity(inputs.len());

        for input in inputs {
            let existing = Creators::find()
                .filter(creators::Column::Name.eq(&input.name))
                .filter(creators::Column::CreatorType.eq(input.creator_type.clone()))
                .one(db)
                .await?;

            let creator_id = match existing {
                Some(found) => {
                    if let Some(website) = &input.website {
                        if found.website.as_deref() != Some(website.as_str()) {
                            let mut active: creators::ActiveModel = found.clone().into();
                            active.website = Set(Some(website.clone()));
                            active.update(db).await?;
                        }
                    }
                    found.id
                }
                None => {
                    let created = creators::ActiveModel {
                        id: NotSet,
                        name: Set(input.name.clone()),
                        creator_type: Set(input.creator_type.clone()),
                        website: Set(input.website.clone()),
                    }
                    .insert(db)
                    .await?;
                    created.id
                }
            };

            links.push(CreatorLink {
                creator_id,
                role: input.role.clone(),
            });
        }

        Ok(links)
    }

    /// 根据 ID 批量查询制作者
    pub async fn find_by_ids(
        db: &DatabaseConnection,
        ids: Vec<i32>,
    ) -> Result<Vec<creators::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        Creators::find()
            .filter(creators::Column::Id.is_in(ids))
            .all(db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::enums::CreatorType;
    use migration::MigratorTrait;

    async fn setup_db() -> DatabaseConnection {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1);
        let db = Database::connect(options).await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();
        db
    }

    fn acme(website: Option<&str>) -> CreatorInput {
        CreatorInput {
            name: "Acme".to_string(),
            creator_type: CreatorType::Studio,
            role: "Developer".to_string(),
            website: website.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn reconcile_creates_missing_creator() {
        let db = setup_db().await;

        let links = CreatorsRepository::reconcile(&db, &[acme(None)]).await.unwrap();

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].role, "Developer");
        assert_eq!(Creators::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn reconcile_reuses_existing_name_type_pair() {
        let db = setup_db().await;

        let first = CreatorsRepository::reconcile(&db, &[acme(None)]).await.unwrap();
        let second = CreatorsRepository::reconcile(&db, &[acme(None)]).await.unwrap();

        assert_eq!(first[0].creator_id, second[0].creator_id);
        assert_eq!(Creators::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn reconcile_distinguishes_creator_types() {
        let db = setup_db().await;

        let mut publisher = acme(None);
        publisher.creator_type = CreatorType::Publisher;

        let first = CreatorsRepository::reconcile(&db, &[acme(None)]).await.unwrap();
        let second = CreatorsRepository::reconcile(&db, &[publisher]).await.unwrap();

        assert_ne!(first[0].creator_id, second[0].creator_id);
        assert_eq!(Creators::find().count(&db).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn reconcile_overwrites_website_in_place() {
        let db = setup_db().await;

        let links = CreatorsRepository::reconcile(&db, &[acme(Some("https://old.example"))])
            .await
            .unwrap();
        CreatorsRepository::reconcile(&db, &[acme(Some("https://new.example"))])
            .await
            .unwrap();

        let stored = Creators::find_by_id(links[0].creator_id)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.website.as_deref(), Some("https://new.example"));
        assert_eq!(stored.name, "Acme");
        assert_eq!(stored.creator_type, CreatorType::Studio);
        assert_eq!(Creators::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn reconcile_keeps_website_when_none_supplied() {
        let db = setup_db().await;

        let links = CreatorsRepository::reconcile(&db, &[acme(Some("https://keep.example"))])
            .await
            .unwrap();
        CreatorsRepository::reconcile(&db, &[acme(None)]).await.unwrap();

        let stored = Creators::find_by_id(links[0].creator_id)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.website.as_deref(), Some("https://keep.example"));
    }
}
