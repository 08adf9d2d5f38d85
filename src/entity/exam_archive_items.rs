//! 往年试题实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exam_archive_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_code: String,
    pub course_name_ar: String,
    pub course_name_en: String,
    pub term: Option<String>,
    pub pdf_url: Option<String>,
    pub solution_url: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_archive_item(self) -> crate::models::exam_archive::entities::ExamArchiveItem {
        crate::models::exam_archive::entities::ExamArchiveItem {
            id: self.id,
            course_code: self.course_code,
            course_name_ar: self.course_name_ar,
            course_name_en: self.course_name_en,
            term: self.term,
            pdf_url: self.pdf_url,
            solution_url: self.solution_url,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
