use super::{SeaOrmStorage, map_read_err, map_write_err};
use crate::entity::news_items::{ActiveModel, Column, Entity as NewsItems};
use crate::errors::Result;
use crate::models::news::{
    entities::NewsItem,
    requests::{NewsItemInput, NewsListQuery},
};
use crate::utils::{lower_contains, normalize_search};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 按发布日期倒序列出新闻
    pub async fn list_news_impl(&self, query: NewsListQuery) -> Result<Vec<NewsItem>> {
        let mut select = NewsItems::find();

        if query.published_only {
            select = select.filter(Column::IsPublished.eq(true));
        }

        if let Some(category) = query.category {
            select = select.filter(Column::Category.eq(category.to_string()));
        }

        if let Some(term) = normalize_search(query.search.as_deref()) {
            select = select.filter(
                Condition::any()
                    .add(lower_contains(Column::TitleAr, &term))
                    .add(lower_contains(Column::TitleEn, &term))
                    .add(lower_contains(Column::BodyAr, &term))
                    .add(lower_contains(Column::BodyEn, &term)),
            );
        }

        let items = select
            .order_by_desc(Column::PublishDate)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| map_read_err("查询新闻列表", e))?;

        Ok(items.into_iter().map(|m| m.into_news_item()).collect())
    }

    pub async fn get_news_item_impl(&self, id: i64) -> Result<Option<NewsItem>> {
        let result = NewsItems::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_read_err("查询新闻", e))?;

        Ok(result.map(|m| m.into_news_item()))
    }

    pub async fn create_news_item_impl(&self, input: NewsItemInput) -> Result<NewsItem> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title_ar: Set(input.title_ar),
            title_en: Set(input.title_en),
            body_ar: Set(input.body_ar),
            body_en: Set(input.body_en),
            category: Set(input.category.to_string()),
            publish_date: Set(input.publish_date.timestamp()),
            image_path: Set(None),
            is_published: Set(input.is_published),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_write_err("创建新闻", e))?;

        Ok(result.into_news_item())
    }

    pub async fn update_news_item_impl(
        &self,
        id: i64,
        input: NewsItemInput,
    ) -> Result<Option<NewsItem>> {
        let existing = NewsItems::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_read_err("查询新闻", e))?;

        let Some(model) = existing else {
            return Ok(None);
        };

        let mut active: ActiveModel = model.into();
        active.title_ar = Set(input.title_ar);
        active.title_en = Set(input.title_en);
        active.body_ar = Set(input.body_ar);
        active.body_en = Set(input.body_en);
        active.category = Set(input.category.to_string());
        active.publish_date = Set(input.publish_date.timestamp());
        active.is_published = Set(input.is_published);
        active.updated_at = Set(chrono::Utc::now().timestamp());

        let result = active
            .update(&self.db)
            .await
            .map_err(|e| map_write_err("更新新闻", e))?;

        Ok(Some(result.into_news_item()))
    }

    /// 替换新闻图片，返回旧路径
    pub async fn update_news_image_impl(
        &self,
        id: i64,
        image_path: &str,
    ) -> Result<Option<(NewsItem, Option<String>)>> {
        let existing = NewsItems::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_read_err("查询新闻", e))?;

        let Some(model) = existing else {
            return Ok(None);
        };

        let old_path = model.image_path.clone();
        let mut active: ActiveModel = model.into();
        active.image_path = Set(Some(image_path.to_string()));
        active.updated_at = Set(chrono::Utc::now().timestamp());

        let result = active
            .update(&self.db)
            .await
            .map_err(|e| map_write_err("更新新闻图片", e))?;

        Ok(Some((result.into_news_item(), old_path)))
    }

    pub async fn delete_news_item_impl(&self, id: i64) -> Result<Option<NewsItem>> {
        let existing = NewsItems::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_read_err("查询新闻", e))?;

        let Some(model) = existing else {
            return Ok(None);
        };

        NewsItems::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| map_write_err("删除新闻", e))?;

        Ok(Some(model.into_news_item()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::news::entities::NewsCategory;
    use chrono::{TimeZone, Utc};

    pub(crate) fn news(title: &str, day: u32, category: NewsCategory, published: bool) -> NewsItemInput {
        NewsItemInput {
            title_ar: title.to_string(),
            title_en: title.to_string(),
            body_ar: None,
            body_en: Some(format!("Details about {title}")),
            category,
            publish_date: Utc.with_ymd_and_hms(2025, 3, day, 8, 0, 0).unwrap(),
            is_published: published,
        }
    }

    #[tokio::test]
    async fn test_list_filters() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage
            .create_news_item_impl(news("Robotics Workshop", 3, NewsCategory::Workshop, true))
            .await
            .unwrap();
        storage
            .create_news_item_impl(news("Energy Conference", 9, NewsCategory::Conference, true))
            .await
            .unwrap();
        storage
            .create_news_item_impl(news("Draft note", 12, NewsCategory::Announcement, false))
            .await
            .unwrap();

        let published = storage
            .list_news_impl(NewsListQuery {
                published_only: true,
                ..Default::default()
            })
            .await
            .unwrap();
        let titles: Vec<_> = published.iter().map(|n| n.title_en.as_str()).collect();
        assert_eq!(titles, vec!["Energy Conference", "Robotics Workshop"]);

        let everything = storage
            .list_news_impl(NewsListQuery::default())
            .await
            .unwrap();
        assert_eq!(everything[0].title_en, "Draft note");

        let workshops = storage
            .list_news_impl(NewsListQuery {
                category: Some(NewsCategory::Workshop),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(workshops.len(), 1);

        let by_body = storage
            .list_news_impl(NewsListQuery {
                search: Some("ABOUT energy".to_string()),
                published_only: true,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_body.len(), 1);
        assert_eq!(by_body[0].category, NewsCategory::Conference);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let item = storage
            .create_news_item_impl(news("Open Day", 1, NewsCategory::Other, true))
            .await
            .unwrap();

        let updated = storage
            .update_news_item_impl(item.id, news("Open Day 2025", 2, NewsCategory::Other, false))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title_en, "Open Day 2025");
        assert!(!updated.is_published);

        assert!(storage.delete_news_item_impl(item.id).await.unwrap().is_some());
        assert!(storage.delete_news_item_impl(item.id).await.unwrap().is_none());
        assert!(
            storage
                .update_news_item_impl(item.id, news("Gone", 2, NewsCategory::Other, true))
                .await
                .unwrap()
                .is_none()
        );
    }
}
