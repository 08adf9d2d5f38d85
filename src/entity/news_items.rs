//! 新闻实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "news_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title_ar: String,
    pub title_en: String,
    pub body_ar: Option<String>,
    pub body_en: Option<String>,
    pub category: String,
    pub publish_date: i64,
    pub image_path: Option<String>,
    pub is_published: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_news_item(self) -> crate::models::news::entities::NewsItem {
        use crate::models::news::entities::{NewsCategory, NewsItem};

        NewsItem {
            id: self.id,
            title_ar: self.title_ar,
            title_en: self.title_en,
            body_ar: self.body_ar,
            body_en: self.body_en,
            category: self.category.parse::<NewsCategory>().unwrap_or_default(),
            publish_date: super::to_datetime(self.publish_date),
            image_path: self.image_path,
            is_published: self.is_published,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
