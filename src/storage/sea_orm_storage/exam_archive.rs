use super::{SeaOrmStorage, map_read_err, map_write_err};
use crate::entity::exam_archive_items::{ActiveModel, Column, Entity as ExamArchiveItems};
use crate::errors::Result;
use crate::models::exam_archive::{
    entities::ExamArchiveItem,
    requests::{ArchiveFileKind, ExamArchiveRequest},
};
use crate::utils::{lower_contains, normalize_search};
use sea_orm::{ActiveModelTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 按学期倒序列出往年试题
    pub async fn list_archive_items_impl(
        &self,
        search: Option<String>,
    ) -> Result<Vec<ExamArchiveItem>> {
        let mut select = ExamArchiveItems::find();

        if let Some(term) = normalize_search(search.as_deref()) {
            select = select.filter(
                Condition::any()
                    .add(lower_contains(Column::CourseCode, &term))
                    .add(lower_contains(Column::CourseNameAr, &term))
                    .add(lower_contains(Column::CourseNameEn, &term)),
            );
        }

        let items = select
            .order_by_desc(Column::Term)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| map_read_err("查询往年试题列表", e))?;

        Ok(items.into_iter().map(|m| m.into_archive_item()).collect())
    }

    pub async fn get_archive_item_impl(&self, id: i64) -> Result<Option<ExamArchiveItem>> {
        let result = ExamArchiveItems::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_read_err("查询往年试题", e))?;

        Ok(result.map(|m| m.into_archive_item()))
    }

    pub async fn create_archive_item_impl(
        &self,
        req: ExamArchiveRequest,
    ) -> Result<ExamArchiveItem> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_code: Set(req.course_code),
            course_name_ar: Set(req.course_name_ar),
            course_name_en: Set(req.course_name_en),
            term: Set(req.term),
            pdf_url: Set(None),
            solution_url: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_write_err("创建往年试题", e))?;

        Ok(result.into_archive_item())
    }

    /// 更新；clear_solution 时移除答案并返回其原路径
    pub async fn update_archive_item_impl(
        &self,
        id: i64,
        req: ExamArchiveRequest,
    ) -> Result<Option<(ExamArchiveItem, Option<String>)>> {
        let existing = ExamArchiveItems::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_read_err("查询往年试题", e))?;

        let Some(model) = existing else {
            return Ok(None);
        };

        let removed_solution = if req.clear_solution {
            model.solution_url.clone()
        } else {
            None
        };

        let mut active: ActiveModel = model.into();
        active.course_code = Set(req.course_code);
        active.course_name_ar = Set(req.course_name_ar);
        active.course_name_en = Set(req.course_name_en);
        active.term = Set(req.term);
        if req.clear_solution {
            active.solution_url = Set(None);
        }
        active.updated_at = Set(chrono::Utc::now().timestamp());

        let result = active
            .update(&self.db)
            .await
            .map_err(|e| map_write_err("更新往年试题", e))?;

        Ok(Some((result.into_archive_item(), removed_solution)))
    }

    /// 设置试题或答案文件，返回被替换的旧路径
    pub async fn set_archive_file_impl(
        &self,
        id: i64,
        kind: ArchiveFileKind,
        url: &str,
    ) -> Result<Option<(ExamArchiveItem, Option<String>)>> {
        let existing = ExamArchiveItems::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_read_err("查询往年试题", e))?;

        let Some(model) = existing else {
            return Ok(None);
        };

        let old = match kind {
            ArchiveFileKind::Exam => model.pdf_url.clone(),
            ArchiveFileKind::Solution => model.solution_url.clone(),
        };

        let mut active: ActiveModel = model.into();
        match kind {
            ArchiveFileKind::Exam => active.pdf_url = Set(Some(url.to_string())),
            ArchiveFileKind::Solution => active.solution_url = Set(Some(url.to_string())),
        }
        active.updated_at = Set(chrono::Utc::now().timestamp());

        let result = active
            .update(&self.db)
            .await
            .map_err(|e| map_write_err("更新往年试题文件", e))?;

        Ok(Some((result.into_archive_item(), old)))
    }

    pub async fn delete_archive_item_impl(&self, id: i64) -> Result<Option<ExamArchiveItem>> {
        let existing = ExamArchiveItems::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_read_err("查询往年试题", e))?;

        let Some(model) = existing else {
            return Ok(None);
        };

        ExamArchiveItems::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| map_write_err("删除往年试题", e))?;

        Ok(Some(model.into_archive_item()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn archive(code: &str, name_en: &str, term: Option<&str>) -> ExamArchiveRequest {
        ExamArchiveRequest {
            course_code: code.to_string(),
            course_name_ar: format!("{name_en} (ar)"),
            course_name_en: name_en.to_string(),
            term: term.map(str::to_string),
            clear_solution: false,
        }
    }

    #[tokio::test]
    async fn test_list_orders_by_term_desc() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        for req in [
            archive("CE101", "Programming", Some("2023-2024 Fall")),
            archive("CE201", "Data Structures", Some("2024-2025 Fall")),
            archive("CV101", "Statics", Some("2023-2024 Fall")),
        ] {
            storage.create_archive_item_impl(req).await.unwrap();
        }

        let items = storage.list_archive_items_impl(None).await.unwrap();
        let codes: Vec<_> = items.iter().map(|i| i.course_code.as_str()).collect();
        assert_eq!(codes, vec!["CE201", "CV101", "CE101"]);

        let hits = storage
            .list_archive_items_impl(Some("statics".to_string()))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn test_files_and_clear_solution() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let item = storage
            .create_archive_item_impl(archive("ME301", "Thermodynamics", None))
            .await
            .unwrap();

        storage
            .set_archive_file_impl(item.id, ArchiveFileKind::Exam, "/docs/archive/a.pdf")
            .await
            .unwrap();
        let (with_solution, old) = storage
            .set_archive_file_impl(item.id, ArchiveFileKind::Solution, "/docs/archive/s.pdf")
            .await
            .unwrap()
            .unwrap();
        assert!(old.is_none());
        assert_eq!(with_solution.pdf_url.as_deref(), Some("/docs/archive/a.pdf"));

        let mut edit = archive("ME301", "Thermodynamics I", None);
        edit.clear_solution = true;
        let (updated, removed) = storage
            .update_archive_item_impl(item.id, edit)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(removed.as_deref(), Some("/docs/archive/s.pdf"));
        assert!(updated.solution_url.is_none());
        assert_eq!(updated.pdf_url.as_deref(), Some("/docs/archive/a.pdf"));
    }
}
