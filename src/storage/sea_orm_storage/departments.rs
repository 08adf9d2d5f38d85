use super::{SeaOrmStorage, map_read_err, map_write_err};
use crate::entity::departments::{ActiveModel, Column, Entity as Departments};
use crate::entity::prelude::{Exams, FacultyMembers};
use crate::entity::{exams, faculty_members};
use crate::errors::Result;
use crate::models::departments::{
    entities::{Department, DepartmentSummary},
    requests::DepartmentRequest,
    responses::{DepartmentDeleteOutcome, DepartmentListItem},
};
use crate::utils::{lower_contains, lower_eq, normalize_search};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 列出系，附带教师与考试数量
    pub async fn list_departments_impl(
        &self,
        search: Option<String>,
    ) -> Result<Vec<DepartmentListItem>> {
        let mut select = Departments::find();

        if let Some(term) = normalize_search(search.as_deref()) {
            select = select.filter(
                Condition::any()
                    .add(lower_contains(Column::Code, &term))
                    .add(lower_contains(Column::NameAr, &term))
                    .add(lower_contains(Column::NameEn, &term))
                    .add(lower_contains(Column::DescriptionAr, &term))
                    .add(lower_contains(Column::DescriptionEn, &term)),
            );
        }

        let departments = select
            .order_by_asc(Column::NameEn)
            .all(&self.db)
            .await
            .map_err(|e| map_read_err("查询系列表", e))?;

        let mut items = Vec::with_capacity(departments.len());
        for model in departments {
            let (faculty_count, exam_count) = self.count_department_dependants(model.id).await?;
            items.push(DepartmentListItem {
                department: model.into_department(),
                faculty_count,
                exam_count,
            });
        }

        Ok(items)
    }

    /// 下拉选项
    pub async fn list_department_summaries_impl(&self) -> Result<Vec<DepartmentSummary>> {
        let departments = Departments::find()
            .order_by_asc(Column::NameEn)
            .all(&self.db)
            .await
            .map_err(|e| map_read_err("查询系列表", e))?;

        Ok(departments.into_iter().map(|m| m.into_summary()).collect())
    }

    pub async fn get_department_by_id_impl(&self, id: i64) -> Result<Option<Department>> {
        let result = Departments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_read_err("查询系", e))?;

        Ok(result.map(|m| m.into_department()))
    }

    /// 按代码查找（忽略大小写），用于重复检查
    pub async fn find_department_by_code_impl(
        &self,
        code: &str,
        exclude_id: Option<i64>,
    ) -> Result<Option<Department>> {
        let mut select = Departments::find().filter(lower_eq(Column::Code, code));
        if let Some(id) = exclude_id {
            select = select.filter(Column::Id.ne(id));
        }

        let result = select
            .one(&self.db)
            .await
            .map_err(|e| map_read_err("查询系", e))?;

        Ok(result.map(|m| m.into_department()))
    }

    pub async fn create_department_impl(&self, req: DepartmentRequest) -> Result<Department> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            code: Set(req.code),
            name_ar: Set(req.name_ar),
            name_en: Set(req.name_en),
            description_ar: Set(req.description_ar),
            description_en: Set(req.description_en),
            image_path: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_write_err("创建系", e))?;

        Ok(result.into_department())
    }

    pub async fn update_department_impl(
        &self,
        id: i64,
        req: DepartmentRequest,
    ) -> Result<Option<Department>> {
        let existing = Departments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_read_err("查询系", e))?;

        let Some(model) = existing else {
            return Ok(None);
        };

        let mut active: ActiveModel = model.into();
        active.code = Set(req.code);
        active.name_ar = Set(req.name_ar);
        active.name_en = Set(req.name_en);
        active.description_ar = Set(req.description_ar);
        active.description_en = Set(req.description_en);
        active.updated_at = Set(chrono::Utc::now().timestamp());

        let result = active
            .update(&self.db)
            .await
            .map_err(|e| map_write_err("更新系", e))?;

        Ok(Some(result.into_department()))
    }

    /// 替换系图片，返回更新后的系与旧图片路径
    pub async fn update_department_image_impl(
        &self,
        id: i64,
        image_path: &str,
    ) -> Result<Option<(Department, Option<String>)>> {
        let existing = Departments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_read_err("查询系", e))?;

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
            .map_err(|e| map_write_err("更新系图片", e))?;

        Ok(Some((result.into_department(), old_path)))
    }

    /// 删除系；仍有教师或考试关联时拒绝
    pub async fn delete_department_impl(&self, id: i64) -> Result<DepartmentDeleteOutcome> {
        let existing = Departments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_read_err("查询系", e))?;

        let Some(model) = existing else {
            return Ok(DepartmentDeleteOutcome::NotFound);
        };

        let (faculty, exams) = self.count_department_dependants(id).await?;
        if faculty > 0 || exams > 0 {
            return Ok(DepartmentDeleteOutcome::InUse { faculty, exams });
        }

        Departments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| map_write_err("删除系", e))?;

        Ok(DepartmentDeleteOutcome::Deleted(model.into_department()))
    }

    async fn count_department_dependants(&self, id: i64) -> Result<(u64, u64)> {
        let faculty = FacultyMembers::find()
            .filter(faculty_members::Column::DepartmentId.eq(id))
            .count(&self.db)
            .await
            .map_err(|e| map_read_err("统计教师数量", e))?;

        let exams = Exams::find()
            .filter(exams::Column::DepartmentId.eq(id))
            .count(&self.db)
            .await
            .map_err(|e| map_read_err("统计考试数量", e))?;

        Ok((faculty, exams))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::faculty::requests::FacultyMemberInput;

    pub(crate) fn department(code: &str, name_en: &str) -> DepartmentRequest {
        DepartmentRequest {
            code: Some(code.to_string()),
            name_ar: format!("{name_en} (ar)"),
            name_en: name_en.to_string(),
            description_ar: None,
            description_en: Some(format!("The {name_en} department")),
        }
    }

    #[tokio::test]
    async fn test_find_by_code_is_case_insensitive() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let civil = storage
            .create_department_impl(department("CIV", "Civil Engineering"))
            .await
            .unwrap();

        let found = storage.find_department_by_code_impl("civ", None).await.unwrap();
        assert_eq!(found.map(|d| d.id), Some(civil.id));

        // 编辑自身时不算重复
        let found = storage
            .find_department_by_code_impl(" Civ ", Some(civil.id))
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_non_ascii_search_and_code_lookup() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let elec = storage
            .create_department_impl(department("ÉLEC", "Électronique"))
            .await
            .unwrap();

        for term in ["Électronique", "ÉLECTRONIQUE", "lectroni"] {
            let hits = storage
                .list_departments_impl(Some(term.to_string()))
                .await
                .unwrap();
            assert_eq!(hits.len(), 1, "search term {term}");
        }

        for code in ["ÉLEC", "Élec"] {
            let found = storage.find_department_by_code_impl(code, None).await.unwrap();
            assert_eq!(found.map(|d| d.id), Some(elec.id), "code {code}");
        }
    }

    #[tokio::test]
    async fn test_list_search_and_order() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage
            .create_department_impl(department("MECH", "Mechanical Engineering"))
            .await
            .unwrap();
        storage
            .create_department_impl(department("CIV", "Civil Engineering"))
            .await
            .unwrap();
        storage
            .create_department_impl(department("ELEC", "Electrical Engineering"))
            .await
            .unwrap();

        let all = storage.list_departments_impl(None).await.unwrap();
        let names: Vec<_> = all.iter().map(|d| d.department.name_en.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Civil Engineering",
                "Electrical Engineering",
                "Mechanical Engineering"
            ]
        );

        let hits = storage
            .list_departments_impl(Some("  mECHanical ".to_string()))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].department.code.as_deref(), Some("MECH"));

        // 通配符按字面匹配
        let none = storage
            .list_departments_impl(Some("%".to_string()))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_delete_refused_while_in_use() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let dep = storage
            .create_department_impl(department("COMP", "Computer Engineering"))
            .await
            .unwrap();
        let member = storage
            .create_faculty_member_impl(FacultyMemberInput {
                full_name_ar: "Ahmad".to_string(),
                full_name_en: "Ahmad".to_string(),
                title_ar: None,
                title_en: None,
                email: None,
                office: None,
                department_id: dep.id,
            })
            .await
            .unwrap();

        let outcome = storage.delete_department_impl(dep.id).await.unwrap();
        assert!(matches!(
            outcome,
            DepartmentDeleteOutcome::InUse {
                faculty: 1,
                exams: 0
            }
        ));
        assert!(storage.get_department_by_id_impl(dep.id).await.unwrap().is_some());

        let listed = storage.list_departments_impl(None).await.unwrap();
        assert_eq!(listed[0].faculty_count, 1);

        storage.delete_faculty_member_impl(member.id).await.unwrap();
        let outcome = storage.delete_department_impl(dep.id).await.unwrap();
        assert!(matches!(outcome, DepartmentDeleteOutcome::Deleted(_)));
        assert!(matches!(
            storage.delete_department_impl(dep.id).await.unwrap(),
            DepartmentDeleteOutcome::NotFound
        ));
    }

    #[tokio::test]
    async fn test_update_image_returns_old_path() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let dep = storage
            .create_department_impl(department("IND", "Industrial Engineering"))
            .await
            .unwrap();

        let (_, old) = storage
            .update_department_image_impl(dep.id, "/img/departments/a.png")
            .await
            .unwrap()
            .unwrap();
        assert!(old.is_none());

        let (updated, old) = storage
            .update_department_image_impl(dep.id, "/img/departments/b.png")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(old.as_deref(), Some("/img/departments/a.png"));
        assert_eq!(updated.image_path.as_deref(), Some("/img/departments/b.png"));
    }
}
