//! 教师实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "faculty_members")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub full_name_ar: String,
    pub full_name_en: String,
    pub title_ar: Option<String>,
    pub title_en: Option<String>,
    pub email: Option<String>,
    pub office: Option<String>,
    pub photo_path: Option<String>,
    pub department_id: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::departments::Entity",
        from = "Column::DepartmentId",
        to = "super::departments::Column::Id"
    )]
    Department,
}

impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_faculty_member(self) -> crate::models::faculty::entities::FacultyMember {
        use crate::models::faculty::entities::FacultyMember;

        FacultyMember {
            id: self.id,
            full_name_ar: self.full_name_ar,
            full_name_en: self.full_name_en,
            title_ar: self.title_ar,
            title_en: self.title_en,
            email: self.email,
            office: self.office,
            photo_path: self.photo_path,
            department_id: self.department_id,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
