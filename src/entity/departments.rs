//! 系实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "departments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub code: Option<String>,
    pub name_ar: String,
    pub name_en: String,
    pub description_ar: Option<String>,
    pub description_en: Option<String>,
    pub image_path: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::faculty_members::Entity")]
    FacultyMembers,
    #[sea_orm(has_many = "super::exams::Entity")]
    Exams,
    #[sea_orm(has_many = "super::academic_alerts::Entity")]
    AcademicAlerts,
}

impl Related<super::faculty_members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FacultyMembers.def()
    }
}

impl Related<super::exams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exams.def()
    }
}

impl Related<super::academic_alerts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AcademicAlerts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_department(self) -> crate::models::departments::entities::Department {
        use crate::models::departments::entities::Department;

        Department {
            id: self.id,
            code: self.code,
            name_ar: self.name_ar,
            name_en: self.name_en,
            description_ar: self.description_ar,
            description_en: self.description_en,
            image_path: self.image_path,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }

    pub fn into_summary(self) -> crate::models::departments::entities::DepartmentSummary {
        crate::models::departments::entities::DepartmentSummary {
            id: self.id,
            code: self.code,
            name_ar: self.name_ar,
            name_en: self.name_en,
        }
    }
}
