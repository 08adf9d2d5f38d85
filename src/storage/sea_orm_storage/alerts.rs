use super::{SeaOrmStorage, map_read_err, map_write_err};
use crate::entity::academic_alerts::{ActiveModel, Column, Entity as AcademicAlerts};
use crate::entity::departments;
use crate::entity::prelude::{AlertModel, DepartmentModel, Departments};
use crate::errors::Result;
use crate::models::alerts::{
    entities::{AcademicAlert, AlertDetail},
    requests::{AlertInput, AlertListQuery},
};
use crate::utils::{lower_contains, normalize_search};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set,
};

fn into_detail(alert: AlertModel, dep: Option<DepartmentModel>) -> AlertDetail {
    AlertDetail {
        alert: alert.into_alert(),
        department: dep.map(|d| d.into_summary()),
    }
}

impl SeaOrmStorage {
    /// 重要通知优先，其次按日期升序
    pub async fn list_alerts_impl(&self, query: AlertListQuery) -> Result<Vec<AlertDetail>> {
        let mut select = AcademicAlerts::find().find_also_related(Departments);

        if let Some(department_id) = query.department_id {
            select = select.filter(Column::DepartmentId.eq(department_id));
        }

        if let Some(term) = normalize_search(query.search.as_deref()) {
            select = select.filter(
                Condition::any()
                    .add(lower_contains(Column::TitleAr, &term))
                    .add(lower_contains(Column::TitleEn, &term))
                    .add(lower_contains(Column::Location, &term))
                    .add(lower_contains(departments::Column::NameAr, &term))
                    .add(lower_contains(departments::Column::NameEn, &term))
                    .add(lower_contains(departments::Column::Code, &term)),
            );
        }

        // 无日期的通知始终保留
        if let Some(not_before) = query.not_before {
            select = select.filter(
                Condition::any()
                    .add(Column::Date.is_null())
                    .add(Column::Date.gte(not_before.timestamp())),
            );
        }

        let rows = select
            .order_by_desc(Column::IsImportant)
            .order_by_asc(Column::Date)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| map_read_err("查询通知列表", e))?;

        Ok(rows
            .into_iter()
            .map(|(alert, dep)| into_detail(alert, dep))
            .collect())
    }

    /// 首页最新通知
    pub async fn latest_alerts_impl(&self, limit: u64) -> Result<Vec<AlertDetail>> {
        let rows = AcademicAlerts::find()
            .find_also_related(Departments)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| map_read_err("查询最新通知", e))?;

        Ok(rows
            .into_iter()
            .map(|(alert, dep)| into_detail(alert, dep))
            .collect())
    }

    pub async fn get_alert_impl(&self, id: i64) -> Result<Option<AlertDetail>> {
        let result = AcademicAlerts::find_by_id(id)
            .find_also_related(Departments)
            .one(&self.db)
            .await
            .map_err(|e| map_read_err("查询通知", e))?;

        Ok(result.map(|(alert, dep)| into_detail(alert, dep)))
    }

    pub async fn create_alert_impl(&self, input: AlertInput) -> Result<AcademicAlert> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title_ar: Set(input.title_ar),
            title_en: Set(input.title_en),
            location: Set(input.location),
            date: Set(input.date.map(|d| d.timestamp())),
            is_important: Set(input.is_important),
            department_id: Set(input.department_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_write_err("创建通知", e))?;

        Ok(result.into_alert())
    }

    pub async fn update_alert_impl(
        &self,
        id: i64,
        input: AlertInput,
    ) -> Result<Option<AcademicAlert>> {
        let existing = AcademicAlerts::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_read_err("查询通知", e))?;

        let Some(model) = existing else {
            return Ok(None);
        };

        let mut active: ActiveModel = model.into();
        active.title_ar = Set(input.title_ar);
        active.title_en = Set(input.title_en);
        active.location = Set(input.location);
        active.date = Set(input.date.map(|d| d.timestamp()));
        active.is_important = Set(input.is_important);
        active.department_id = Set(input.department_id);
        active.updated_at = Set(chrono::Utc::now().timestamp());

        let result = active
            .update(&self.db)
            .await
            .map_err(|e| map_write_err("更新通知", e))?;

        Ok(Some(result.into_alert()))
    }

    pub async fn delete_alert_impl(&self, id: i64) -> Result<bool> {
        let result = AcademicAlerts::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| map_write_err("删除通知", e))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::departments::tests::department;
    use chrono::{Duration, Utc};

    fn alert(
        title: &str,
        days_from_now: Option<i64>,
        important: bool,
        department_id: Option<i64>,
    ) -> AlertInput {
        AlertInput {
            title_ar: title.to_string(),
            title_en: title.to_string(),
            location: Some("Hall A".to_string()),
            date: days_from_now.map(|d| Utc::now() + Duration::days(d)),
            is_important: important,
            department_id,
        }
    }

    #[tokio::test]
    async fn test_list_order_and_upcoming_filter() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage
            .create_alert_impl(alert("Later", Some(10), false, None))
            .await
            .unwrap();
        storage
            .create_alert_impl(alert("Soon", Some(2), false, None))
            .await
            .unwrap();
        storage
            .create_alert_impl(alert("Urgent", Some(30), true, None))
            .await
            .unwrap();
        storage
            .create_alert_impl(alert("Past", Some(-5), false, None))
            .await
            .unwrap();
        storage
            .create_alert_impl(alert("Undated", None, false, None))
            .await
            .unwrap();

        let upcoming = storage
            .list_alerts_impl(AlertListQuery {
                not_before: Some(Utc::now() - Duration::days(1)),
                ..Default::default()
            })
            .await
            .unwrap();
        let titles: Vec<_> = upcoming
            .iter()
            .map(|a| a.alert.title_en.as_str())
            .collect();
        assert_eq!(titles, vec!["Urgent", "Undated", "Soon", "Later"]);

        let all = storage
            .list_alerts_impl(AlertListQuery::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 5);

        let latest = storage.latest_alerts_impl(2).await.unwrap();
        assert_eq!(latest[0].alert.title_en, "Undated");
        assert_eq!(latest.len(), 2);
    }

    #[tokio::test]
    async fn test_search_matches_department_names() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let chem = storage
            .create_department_impl(department("CHEM", "Chemical Engineering"))
            .await
            .unwrap();
        storage
            .create_alert_impl(alert("Lab safety briefing", Some(1), false, Some(chem.id)))
            .await
            .unwrap();
        storage
            .create_alert_impl(alert("Registration deadline", Some(1), false, None))
            .await
            .unwrap();

        let hits = storage
            .list_alerts_impl(AlertListQuery {
                search: Some("chemical".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].department.as_ref().map(|d| d.id), Some(chem.id));

        let by_dep = storage
            .list_alerts_impl(AlertListQuery {
                department_id: Some(chem.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_dep.len(), 1);
    }

    #[tokio::test]
    async fn test_department_delete_detaches_alerts() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let dep = storage
            .create_department_impl(department("IND", "Industrial Engineering"))
            .await
            .unwrap();
        let created = storage
            .create_alert_impl(alert("Field trip", Some(3), false, Some(dep.id)))
            .await
            .unwrap();

        storage.delete_department_impl(dep.id).await.unwrap();

        let fetched = storage.get_alert_impl(created.id).await.unwrap().unwrap();
        assert!(fetched.alert.department_id.is_none());
        assert!(fetched.department.is_none());
    }
}
