use super::{SeaOrmStorage, map_read_err, map_write_err};
use crate::entity::departments;
use crate::entity::faculty_members::{ActiveModel, Column, Entity as FacultyMembers};
use crate::entity::prelude::{DepartmentModel, Departments, FacultyMemberModel};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse, PaginationInfo,
    faculty::{
        entities::{FacultyMember, FacultyMemberDetail},
        requests::{FacultyListQuery, FacultyMemberInput},
    },
};
use crate::utils::{lower_contains, lower_eq, normalize_search};
use sea_orm::{
    ActiveModelTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

fn into_detail(member: FacultyMemberModel, dep: Option<DepartmentModel>) -> FacultyMemberDetail {
    FacultyMemberDetail {
        member: member.into_faculty_member(),
        department: dep.map(|d| d.into_summary()),
    }
}

impl SeaOrmStorage {
    /// 分页列出教师，按系代码与英文名排序
    pub async fn list_faculty_impl(
        &self,
        query: FacultyListQuery,
    ) -> Result<PaginatedResponse<FacultyMemberDetail>> {
        let page = query.page.max(1);
        let size = query.size.max(1);

        let mut select = FacultyMembers::find().find_also_related(Departments);

        // 系：代码、阿语名或英语名完全匹配
        if let Some(dep) = normalize_search(query.department.as_deref()) {
            select = select.filter(
                Condition::any()
                    .add(lower_eq(departments::Column::Code, &dep))
                    .add(lower_eq(departments::Column::NameAr, &dep))
                    .add(lower_eq(departments::Column::NameEn, &dep)),
            );
        }

        if let Some(term) = normalize_search(query.search.as_deref()) {
            select = select.filter(
                Condition::any()
                    .add(lower_contains(Column::FullNameAr, &term))
                    .add(lower_contains(Column::FullNameEn, &term))
                    .add(lower_contains(Column::TitleAr, &term))
                    .add(lower_contains(Column::TitleEn, &term))
                    .add(lower_contains(Column::Email, &term)),
            );
        }

        let select = select
            .order_by_asc(departments::Column::Code)
            .order_by_asc(Column::FullNameEn)
            .order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| map_read_err("查询教师总数", e))?;

        // 超出末页时直接返回空页
        let rows = if (page - 1).saturating_mul(size) >= total {
            Vec::new()
        } else {
            paginator
                .fetch_page(page - 1)
                .await
                .map_err(|e| map_read_err("查询教师列表", e))?
        };

        Ok(PaginatedResponse {
            items: rows
                .into_iter()
                .map(|(member, dep)| into_detail(member, dep))
                .collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub async fn get_faculty_member_impl(&self, id: i64) -> Result<Option<FacultyMemberDetail>> {
        let result = FacultyMembers::find_by_id(id)
            .find_also_related(Departments)
            .one(&self.db)
            .await
            .map_err(|e| map_read_err("查询教师", e))?;

        Ok(result.map(|(member, dep)| into_detail(member, dep)))
    }

    pub async fn create_faculty_member_impl(
        &self,
        input: FacultyMemberInput,
    ) -> Result<FacultyMember> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            full_name_ar: Set(input.full_name_ar),
            full_name_en: Set(input.full_name_en),
            title_ar: Set(input.title_ar),
            title_en: Set(input.title_en),
            email: Set(input.email),
            office: Set(input.office),
            photo_path: Set(None),
            department_id: Set(input.department_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_write_err("创建教师", e))?;

        Ok(result.into_faculty_member())
    }

    pub async fn update_faculty_member_impl(
        &self,
        id: i64,
        input: FacultyMemberInput,
    ) -> Result<Option<FacultyMember>> {
        let existing = FacultyMembers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_read_err("查询教师", e))?;

        let Some(model) = existing else {
            return Ok(None);
        };

        let mut active: ActiveModel = model.into();
        active.full_name_ar = Set(input.full_name_ar);
        active.full_name_en = Set(input.full_name_en);
        active.title_ar = Set(input.title_ar);
        active.title_en = Set(input.title_en);
        active.email = Set(input.email);
        active.office = Set(input.office);
        active.department_id = Set(input.department_id);
        active.updated_at = Set(chrono::Utc::now().timestamp());

        let result = active
            .update(&self.db)
            .await
            .map_err(|e| map_write_err("更新教师", e))?;

        Ok(Some(result.into_faculty_member()))
    }

    /// 替换照片，返回旧路径
    pub async fn update_faculty_photo_impl(
        &self,
        id: i64,
        photo_path: &str,
    ) -> Result<Option<(FacultyMember, Option<String>)>> {
        let existing = FacultyMembers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_read_err("查询教师", e))?;

        let Some(model) = existing else {
            return Ok(None);
        };

        let old_path = model.photo_path.clone();
        let mut active: ActiveModel = model.into();
        active.photo_path = Set(Some(photo_path.to_string()));
        active.updated_at = Set(chrono::Utc::now().timestamp());

        let result = active
            .update(&self.db)
            .await
            .map_err(|e| map_write_err("更新教师照片", e))?;

        Ok(Some((result.into_faculty_member(), old_path)))
    }

    pub async fn delete_faculty_member_impl(&self, id: i64) -> Result<Option<FacultyMember>> {
        let existing = FacultyMembers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_read_err("查询教师", e))?;

        let Some(model) = existing else {
            return Ok(None);
        };

        FacultyMembers::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| map_write_err("删除教师", e))?;

        Ok(Some(model.into_faculty_member()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::departments::tests::department;

    fn member(name: &str, title: Option<&str>, department_id: i64) -> FacultyMemberInput {
        FacultyMemberInput {
            full_name_ar: name.to_string(),
            full_name_en: name.to_string(),
            title_ar: None,
            title_en: title.map(str::to_string),
            email: Some(format!("{}@mutah.edu.jo", name.to_lowercase().replace(' ', "."))),
            office: None,
            department_id,
        }
    }

    fn query(department: Option<&str>, search: Option<&str>) -> FacultyListQuery {
        FacultyListQuery {
            department: department.map(str::to_string),
            search: search.map(str::to_string),
            page: 1,
            size: 50,
        }
    }

    #[tokio::test]
    async fn test_huge_page_returns_empty_items() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let civ = storage
            .create_department_impl(department("CIV", "Civil Engineering"))
            .await
            .unwrap();
        storage
            .create_faculty_member_impl(member("Omar Saleh", None, civ.id))
            .await
            .unwrap();

        let pagination = crate::models::common::pagination::PaginationQuery {
            page: i64::MAX,
            size: 100,
        };
        let (page, size) = pagination.normalized();
        let result = storage
            .list_faculty_impl(FacultyListQuery {
                page,
                size,
                ..query(None, None)
            })
            .await
            .unwrap();
        assert!(result.items.is_empty());
        assert_eq!(result.pagination.total, 1);
    }

    #[tokio::test]
    async fn test_list_filters_and_orders() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let mech = storage
            .create_department_impl(department("MECH", "Mechanical Engineering"))
            .await
            .unwrap();
        let civ = storage
            .create_department_impl(department("CIV", "Civil Engineering"))
            .await
            .unwrap();

        storage
            .create_faculty_member_impl(member("Zaid Odeh", Some("Professor"), mech.id))
            .await
            .unwrap();
        storage
            .create_faculty_member_impl(member("Omar Saleh", Some("Lecturer"), civ.id))
            .await
            .unwrap();
        storage
            .create_faculty_member_impl(member("Ali Nasser", Some("Associate Professor"), mech.id))
            .await
            .unwrap();

        let all = storage.list_faculty_impl(query(None, None)).await.unwrap();
        let names: Vec<_> = all
            .items
            .iter()
            .map(|m| m.member.full_name_en.as_str())
            .collect();
        assert_eq!(names, vec!["Omar Saleh", "Ali Nasser", "Zaid Odeh"]);
        assert_eq!(all.pagination.total, 3);
        assert_eq!(
            all.items[0].department.as_ref().map(|d| d.id),
            Some(civ.id)
        );

        let by_dep = storage
            .list_faculty_impl(query(Some("mechanical engineering"), None))
            .await
            .unwrap();
        assert_eq!(by_dep.items.len(), 2);

        let by_term = storage
            .list_faculty_impl(query(Some("MECH"), Some("PROFESSOR")))
            .await
            .unwrap();
        assert_eq!(by_term.items.len(), 2);

        let by_title = storage
            .list_faculty_impl(query(None, Some("lecturer")))
            .await
            .unwrap();
        assert_eq!(by_title.items.len(), 1);
        assert_eq!(by_title.items[0].member.full_name_en, "Omar Saleh");
    }

    #[tokio::test]
    async fn test_list_paginates() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let dep = storage
            .create_department_impl(department("ELEC", "Electrical Engineering"))
            .await
            .unwrap();
        for name in ["A One", "B Two", "C Three"] {
            storage
                .create_faculty_member_impl(member(name, None, dep.id))
                .await
                .unwrap();
        }

        let page = storage
            .list_faculty_impl(FacultyListQuery {
                page: 2,
                size: 2,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].member.full_name_en, "C Three");
        assert_eq!(page.pagination.total_pages, 2);
    }

    #[tokio::test]
    async fn test_unknown_department_is_rejected_by_foreign_key() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let err = storage
            .create_faculty_member_impl(member("Nobody", None, 999))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E010");
    }
}
