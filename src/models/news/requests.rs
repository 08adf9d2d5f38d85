use serde::Deserialize;
use ts_rs::TS;

use super::entities::NewsCategory;
use crate::models::FieldError;
use crate::models::common::validation::{
    FieldErrors, fallback_if_blank, fallback_if_blank_opt, normalize_optional, normalize_required,
};

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/news.ts")]
pub struct NewsListParams {
    pub category: Option<NewsCategory>,
    pub q: Option<String>,
    /// 缺省为 true；管理端传 false 查看草稿
    pub published_only: Option<bool>,
}

// 存储层查询
#[derive(Debug, Clone, Default)]
pub struct NewsListQuery {
    pub category: Option<NewsCategory>,
    pub search: Option<String>,
    pub published_only: bool,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/news.ts")]
pub struct NewsItemRequest {
    pub title_ar: Option<String>,
    pub title_en: String,
    pub body_ar: Option<String>,
    pub body_en: Option<String>,
    #[serde(default)]
    pub category: NewsCategory,
    /// 缺省为当前时间
    pub publish_date: Option<chrono::DateTime<chrono::Utc>>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct NewsItemInput {
    pub title_ar: String,
    pub title_en: String,
    pub body_ar: Option<String>,
    pub body_en: Option<String>,
    pub category: NewsCategory,
    pub publish_date: chrono::DateTime<chrono::Utc>,
    pub is_published: bool,
}

impl NewsItemRequest {
    pub fn normalize(self) -> NewsItemInput {
        let title_en = normalize_required(self.title_en);
        let body_en = normalize_optional(self.body_en);
        NewsItemInput {
            title_ar: fallback_if_blank(self.title_ar, &title_en),
            title_en,
            body_ar: fallback_if_blank_opt(self.body_ar, body_en.as_deref()),
            body_en,
            category: self.category,
            publish_date: self.publish_date.unwrap_or_else(chrono::Utc::now),
            is_published: self.is_published.unwrap_or(true),
        }
    }
}

impl NewsItemInput {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        errors
            .required_max("title_en", &self.title_en, 250)
            .max_len("title_ar", &self.title_ar, 250);
        errors.into_result()
    }
}
