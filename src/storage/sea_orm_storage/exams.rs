use super::{SeaOrmStorage, map_read_err, map_write_err};
use crate::entity::departments;
use crate::entity::exams::{ActiveModel, Column, Entity as Exams};
use crate::entity::prelude::{DepartmentModel, Departments, ExamModel};
use crate::errors::Result;
use crate::models::exams::{
    entities::{Exam, ExamDetail},
    requests::{ExamInput, ExamListQuery, SortOrder},
};
use crate::utils::{lower_contains, lower_eq, normalize_search};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set,
};

fn into_detail(exam: ExamModel, dep: Option<DepartmentModel>) -> ExamDetail {
    ExamDetail {
        exam: exam.into_exam(),
        department: dep.map(|d| d.into_summary()),
    }
}

impl SeaOrmStorage {
    /// 列出考试，默认按考试时间升序
    pub async fn list_exams_impl(&self, query: ExamListQuery) -> Result<Vec<ExamDetail>> {
        let mut select = Exams::find().find_also_related(Departments);

        if let Some(dep) = normalize_search(query.department.as_deref()) {
            select = select.filter(
                Condition::any()
                    .add(lower_eq(departments::Column::Code, &dep))
                    .add(lower_eq(departments::Column::NameAr, &dep))
                    .add(lower_eq(departments::Column::NameEn, &dep)),
            );
        }

        if let Some(year) = query.year {
            select = select.filter(Column::Year.eq(year));
        }

        if let Some(term) = normalize_search(query.search.as_deref()) {
            select = select.filter(
                Condition::any()
                    .add(lower_contains(Column::CourseCode, &term))
                    .add(lower_contains(Column::CourseNameAr, &term))
                    .add(lower_contains(Column::CourseNameEn, &term)),
            );
        }

        let select = match query.order {
            SortOrder::Asc => select.order_by_asc(Column::DateTime),
            SortOrder::Desc => select.order_by_desc(Column::DateTime),
        };

        let rows = select
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| map_read_err("查询考试列表", e))?;

        Ok(rows
            .into_iter()
            .map(|(exam, dep)| into_detail(exam, dep))
            .collect())
    }

    /// 已有考试的学年，降序去重
    pub async fn list_exam_years_impl(&self) -> Result<Vec<i32>> {
        Exams::find()
            .select_only()
            .column(Column::Year)
            .distinct()
            .order_by_desc(Column::Year)
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .map_err(|e| map_read_err("查询考试学年", e))
    }

    pub async fn get_exam_by_id_impl(&self, id: i64) -> Result<Option<ExamDetail>> {
        let result = Exams::find_by_id(id)
            .find_also_related(Departments)
            .one(&self.db)
            .await
            .map_err(|e| map_read_err("查询考试", e))?;

        Ok(result.map(|(exam, dep)| into_detail(exam, dep)))
    }

    pub async fn get_exam_by_business_id_impl(
        &self,
        business_id: &str,
    ) -> Result<Option<ExamDetail>> {
        let result = Exams::find()
            .filter(Column::BusinessId.eq(business_id.trim()))
            .find_also_related(Departments)
            .one(&self.db)
            .await
            .map_err(|e| map_read_err("查询考试", e))?;

        Ok(result.map(|(exam, dep)| into_detail(exam, dep)))
    }

    pub async fn create_exam_impl(&self, input: ExamInput) -> Result<Exam> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            business_id: Set(input.business_id),
            course_code: Set(input.course_code),
            course_name_ar: Set(input.course_name_ar),
            course_name_en: Set(input.course_name_en),
            year: Set(input.year),
            date_time: Set(input.date_time.timestamp()),
            mode: Set(input.mode.to_string()),
            location: Set(input.location),
            lms_url: Set(input.lms_url),
            lms_how_to: Set(input.lms_how_to),
            instructions: Set(input.instructions),
            has_stego_protection: Set(input.has_stego_protection),
            department_id: Set(input.department_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_write_err("创建考试", e))?;

        Ok(result.into_exam())
    }

    pub async fn update_exam_impl(&self, id: i64, input: ExamInput) -> Result<Option<Exam>> {
        let existing = Exams::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_read_err("查询考试", e))?;

        let Some(model) = existing else {
            return Ok(None);
        };

        let mut active: ActiveModel = model.into();
        active.business_id = Set(input.business_id);
        active.course_code = Set(input.course_code);
        active.course_name_ar = Set(input.course_name_ar);
        active.course_name_en = Set(input.course_name_en);
        active.year = Set(input.year);
        active.date_time = Set(input.date_time.timestamp());
        active.mode = Set(input.mode.to_string());
        active.location = Set(input.location);
        active.lms_url = Set(input.lms_url);
        active.lms_how_to = Set(input.lms_how_to);
        active.instructions = Set(input.instructions);
        active.has_stego_protection = Set(input.has_stego_protection);
        active.department_id = Set(input.department_id);
        active.updated_at = Set(chrono::Utc::now().timestamp());

        let result = active
            .update(&self.db)
            .await
            .map_err(|e| map_write_err("更新考试", e))?;

        Ok(Some(result.into_exam()))
    }

    pub async fn delete_exam_impl(&self, id: i64) -> Result<bool> {
        let result = Exams::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| map_write_err("删除考试", e))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::exams::entities::ExamMode;
    use crate::models::exams::requests::ExamRequest;
    use crate::storage::sea_orm_storage::departments::tests::department;
    use chrono::{TimeZone, Utc};

    pub(crate) fn exam_request(
        course_code: &str,
        name_en: &str,
        year: i32,
        day: u32,
        department_id: i64,
    ) -> ExamRequest {
        ExamRequest {
            business_id: None,
            course_code: course_code.to_string(),
            course_name_ar: None,
            course_name_en: name_en.to_string(),
            year,
            date_time: Utc.with_ymd_and_hms(2025, 1, day, 9, 0, 0).unwrap(),
            mode: ExamMode::Online,
            location: None,
            lms_url: Some("https://lms.mutah.edu.jo".to_string()),
            lms_how_to: None,
            instructions: None,
            has_stego_protection: false,
            department_id,
        }
    }

    #[tokio::test]
    async fn test_edit_keeps_business_id_when_blank() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let dep = storage
            .create_department_impl(department("COMP", "Computer Engineering"))
            .await
            .unwrap();

        let created = storage
            .create_exam_impl(
                exam_request("CE101", "Programming", 1, 10, dep.id).normalize_for_create(),
            )
            .await
            .unwrap();
        assert_eq!(created.business_id.len(), 32);
        assert_eq!(created.mode, ExamMode::Online);

        let mut edit = exam_request("CE101", "Programming I", 1, 11, dep.id);
        edit.business_id = Some("   ".to_string());
        let updated = storage
            .update_exam_impl(created.id, edit.normalize_for_update(&created.business_id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.business_id, created.business_id);
        assert_eq!(updated.course_name_ar, "Programming I");

        let found = storage
            .get_exam_by_business_id_impl(&created.business_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.exam.id, created.id);
        assert_eq!(found.department.map(|d| d.id), Some(dep.id));
    }

    #[tokio::test]
    async fn test_duplicate_business_id_is_conflict() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let dep = storage
            .create_department_impl(department("COMP", "Computer Engineering"))
            .await
            .unwrap();

        let mut req = exam_request("CE101", "Programming", 1, 10, dep.id);
        req.business_id = Some("EXAM-1".to_string());
        storage
            .create_exam_impl(req.clone().normalize_for_create())
            .await
            .unwrap();

        let err = storage
            .create_exam_impl(req.normalize_for_create())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E010");
    }

    #[tokio::test]
    async fn test_list_filters_order_and_years() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let comp = storage
            .create_department_impl(department("COMP", "Computer Engineering"))
            .await
            .unwrap();
        let civ = storage
            .create_department_impl(department("CIV", "Civil Engineering"))
            .await
            .unwrap();

        for req in [
            exam_request("CE201", "Data Structures", 2, 20, comp.id),
            exam_request("CE101", "Programming", 1, 5, comp.id),
            exam_request("CV101", "Statics", 1, 12, civ.id),
        ] {
            storage
                .create_exam_impl(req.normalize_for_create())
                .await
                .unwrap();
        }

        let all = storage
            .list_exams_impl(ExamListQuery::default())
            .await
            .unwrap();
        let codes: Vec<_> = all.iter().map(|e| e.exam.course_code.as_str()).collect();
        assert_eq!(codes, vec!["CE101", "CV101", "CE201"]);

        let desc = storage
            .list_exams_impl(ExamListQuery {
                order: SortOrder::Desc,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(desc[0].exam.course_code, "CE201");

        let filtered = storage
            .list_exams_impl(ExamListQuery {
                department: Some("comp".to_string()),
                year: Some(1),
                search: Some("PROG".to_string()),
                order: SortOrder::Asc,
            })
            .await
            .unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].exam.course_code, "CE101");

        assert_eq!(storage.list_exam_years_impl().await.unwrap(), vec![2, 1]);
    }
}
