use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 新闻分类
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/news.ts")]
pub enum NewsCategory {
    #[default]
    Announcement,
    Workshop,
    Conference,
    Other,
}

impl NewsCategory {
    pub const ANNOUNCEMENT: &'static str = "announcement";
    pub const WORKSHOP: &'static str = "workshop";
    pub const CONFERENCE: &'static str = "conference";
    pub const OTHER: &'static str = "other";
}

impl<'de> Deserialize<'de> for NewsCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的新闻分类: '{s}'. 支持: announcement, workshop, conference, other"
            ))
        })
    }
}

impl std::fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NewsCategory::Announcement => NewsCategory::ANNOUNCEMENT,
            NewsCategory::Workshop => NewsCategory::WORKSHOP,
            NewsCategory::Conference => NewsCategory::CONFERENCE,
            NewsCategory::Other => NewsCategory::OTHER,
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for NewsCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            NewsCategory::ANNOUNCEMENT => Ok(NewsCategory::Announcement),
            NewsCategory::WORKSHOP => Ok(NewsCategory::Workshop),
            NewsCategory::CONFERENCE => Ok(NewsCategory::Conference),
            NewsCategory::OTHER => Ok(NewsCategory::Other),
            _ => Err(format!("Invalid news category: {s}")),
        }
    }
}

// 新闻
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/news.ts")]
pub struct NewsItem {
    pub id: i64,
    pub title_ar: String,
    pub title_en: String,
    pub body_ar: Option<String>,
    pub body_en: Option<String>,
    pub category: NewsCategory,
    pub publish_date: chrono::DateTime<chrono::Utc>,
    pub image_path: Option<String>,
    pub is_published: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/news.ts")]
pub struct NewsListResponse {
    pub items: Vec<NewsItem>,
    pub category: Option<NewsCategory>,
    pub query: Option<String>,
}
