//! 考试实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub business_id: String,
    pub course_code: String,
    pub course_name_ar: String,
    pub course_name_en: String,
    pub year: i32,
    pub date_time: i64,
    pub mode: String,
    pub location: Option<String>,
    pub lms_url: Option<String>,
    pub lms_how_to: Option<String>,
    pub instructions: Option<String>,
    pub has_stego_protection: bool,
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
    pub fn into_exam(self) -> crate::models::exams::entities::Exam {
        use crate::models::exams::entities::{Exam, ExamMode};

        Exam {
            id: self.id,
            business_id: self.business_id,
            course_code: self.course_code,
            course_name_ar: self.course_name_ar,
            course_name_en: self.course_name_en,
            year: self.year,
            date_time: super::to_datetime(self.date_time),
            mode: self.mode.parse::<ExamMode>().unwrap_or_default(),
            location: self.location,
            lms_url: self.lms_url,
            lms_how_to: self.lms_how_to,
            instructions: self.instructions,
            has_stego_protection: self.has_stego_protection,
            department_id: self.department_id,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
