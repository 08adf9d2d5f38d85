use super::{SeaOrmStorage, map_read_err};
use crate::entity::prelude::{
    AcademicAlerts, Departments, ExamArchiveItems, Exams, FacultyMembers, NewsItems,
    SupportTickets,
};
use crate::entity::{exams, news_items, support_tickets};
use crate::errors::Result;
use crate::models::dashboard::{ActivityType, DashboardCounts, RecentActivity, activity_title};
use crate::storage::ContentTable;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};

impl SeaOrmStorage {
    pub async fn dashboard_counts_impl(&self) -> Result<DashboardCounts> {
        let count_err = |e| map_read_err("统计数量", e);

        Ok(DashboardCounts {
            departments: Departments::find().count(&self.db).await.map_err(count_err)?,
            faculty: FacultyMembers::find().count(&self.db).await.map_err(count_err)?,
            exams: Exams::find().count(&self.db).await.map_err(count_err)?,
            alerts: AcademicAlerts::find().count(&self.db).await.map_err(count_err)?,
            news: NewsItems::find().count(&self.db).await.map_err(count_err)?,
            open_tickets: SupportTickets::find()
                .filter(support_tickets::Column::IsResolved.eq(false))
                .count(&self.db)
                .await
                .map_err(count_err)?,
        })
    }

    /// 最新新闻（按发布日期）
    pub async fn recent_news_activities_impl(&self, limit: u64) -> Result<Vec<RecentActivity>> {
        let items = NewsItems::find()
            .order_by_desc(news_items::Column::PublishDate)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| map_read_err("查询最新新闻", e))?;

        Ok(items
            .into_iter()
            .map(|m| RecentActivity {
                activity_type: ActivityType::News,
                title: activity_title(&m.title_en, &m.title_ar),
                date: crate::entity::to_datetime(m.publish_date),
            })
            .collect())
    }

    /// 最新考试（按考试时间）
    pub async fn recent_exam_activities_impl(&self, limit: u64) -> Result<Vec<RecentActivity>> {
        let items = Exams::find()
            .order_by_desc(exams::Column::DateTime)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| map_read_err("查询最新考试", e))?;

        Ok(items
            .into_iter()
            .map(|m| RecentActivity {
                activity_type: ActivityType::Exam,
                title: activity_title(&m.course_name_en, &m.course_name_ar),
                date: crate::entity::to_datetime(m.date_time),
            })
            .collect())
    }

    pub async fn is_table_empty_impl(&self, table: ContentTable) -> Result<bool> {
        let count = match table {
            ContentTable::Departments => Departments::find().count(&self.db).await,
            ContentTable::FacultyMembers => FacultyMembers::find().count(&self.db).await,
            ContentTable::Exams => Exams::find().count(&self.db).await,
            ContentTable::ExamArchiveItems => ExamArchiveItems::find().count(&self.db).await,
            ContentTable::AcademicAlerts => AcademicAlerts::find().count(&self.db).await,
            ContentTable::NewsItems => NewsItems::find().count(&self.db).await,
        }
        .map_err(|e| map_read_err("统计数量", e))?;

        Ok(count == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::news::entities::NewsCategory;
    use crate::storage::sea_orm_storage::news::tests::news;
    use crate::storage::sea_orm_storage::support_tickets::tests::form;

    #[tokio::test]
    async fn test_counts_and_recent_news() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        assert!(
            storage
                .is_table_empty_impl(ContentTable::NewsItems)
                .await
                .unwrap()
        );

        for day in [1, 5, 3, 9] {
            storage
                .create_news_item_impl(news(&format!("News {day}"), day, NewsCategory::Other, true))
                .await
                .unwrap();
        }
        let open = storage
            .create_support_ticket_impl(form("Lina Haddad", "Blank page"), None)
            .await
            .unwrap();
        storage
            .create_support_ticket_impl(form("Sara Ali", "Typo"), None)
            .await
            .unwrap();
        storage
            .reply_support_ticket_impl(open.id, "Done", true)
            .await
            .unwrap();

        let counts = storage.dashboard_counts_impl().await.unwrap();
        assert_eq!(counts.news, 4);
        assert_eq!(counts.open_tickets, 1);
        assert_eq!(counts.departments, 0);

        let recent = storage.recent_news_activities_impl(3).await.unwrap();
        let titles: Vec<_> = recent.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["News 9", "News 5", "News 3"]);
        assert!(
            !storage
                .is_table_empty_impl(ContentTable::NewsItems)
                .await
                .unwrap()
        );
    }
}
