//! 学术通知实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "academic_alerts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title_ar: String,
    pub title_en: String,
    pub location: Option<String>,
    pub date: Option<i64>,
    pub is_important: bool,
    pub department_id: Option<i64>,
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
    pub fn into_alert(self) -> crate::models::alerts::entities::AcademicAlert {
        crate::models::alerts::entities::AcademicAlert {
            id: self.id,
            title_ar: self.title_ar,
            title_en: self.title_en,
            location: self.location,
            date: self.date.map(super::to_datetime),
            is_important: self.is_important,
            department_id: self.department_id,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
