use serde::Serialize;
use ts_rs::TS;

// 活动类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub enum ActivityType {
    News,
    Exam,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct RecentActivity {
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub title: String,
    pub date: chrono::DateTime<chrono::Utc>,
}

/// 各表计数
#[derive(Debug, Clone, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct DashboardCounts {
    pub departments: u64,
    pub faculty: u64,
    pub exams: u64,
    pub alerts: u64,
    pub news: u64,
    pub open_tickets: u64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct DashboardResponse {
    pub counts: DashboardCounts,
    pub recent_activities: Vec<RecentActivity>,
}

pub const RECENT_ACTIVITY_LIMIT: usize = 5;

/// 英文标题为空时使用阿语标题
pub fn activity_title(title_en: &str, title_ar: &str) -> String {
    if title_en.trim().is_empty() {
        title_ar.to_string()
    } else {
        title_en.to_string()
    }
}

/// 合并新闻与考试动态，按日期降序取前 5 条
pub fn merge_recent_activities(
    news: Vec<RecentActivity>,
    exams: Vec<RecentActivity>,
) -> Vec<RecentActivity> {
    let mut all: Vec<RecentActivity> = news.into_iter().chain(exams).collect();
    all.sort_by(|a, b| b.date.cmp(&a.date));
    all.truncate(RECENT_ACTIVITY_LIMIT);
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn activity(kind: ActivityType, title: &str, days_ago: i64) -> RecentActivity {
        RecentActivity {
            activity_type: kind,
            title: title.to_string(),
            date: Utc::now() - Duration::days(days_ago),
        }
    }

    #[test]
    fn test_merge_sorts_by_date_desc_and_keeps_five() {
        let news = vec![
            activity(ActivityType::News, "n1", 1),
            activity(ActivityType::News, "n2", 4),
            activity(ActivityType::News, "n3", 6),
        ];
        let exams = vec![
            activity(ActivityType::Exam, "e1", 0),
            activity(ActivityType::Exam, "e2", 3),
            activity(ActivityType::Exam, "e3", 10),
        ];

        let merged = merge_recent_activities(news, exams);
        let titles: Vec<_> = merged.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["e1", "n1", "e2", "n2", "n3"]);
    }

    #[test]
    fn test_activity_title_fallback() {
        assert_eq!(activity_title("", "ورشة"), "ورشة");
        assert_eq!(activity_title("Workshop", "ورشة"), "Workshop");
    }

    #[test]
    fn test_activity_serializes_type_field() {
        let json = serde_json::to_value(activity(ActivityType::Exam, "x", 0)).unwrap();
        assert_eq!(json["type"], "exam");
    }
}
