//! 用户实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    pub full_name: Option<String>,
    pub password_hash: Option<String>,
    pub role: String,
    pub provider: Option<String>,
    pub provider_key: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_user(self) -> crate::models::users::entities::User {
        use crate::models::users::entities::{ExternalProvider, User, UserRole};

        User {
            id: self.id,
            username: self.username,
            full_name: self.full_name,
            password_hash: self.password_hash,
            role: self.role.parse::<UserRole>().unwrap_or(UserRole::User),
            provider: self
                .provider
                .and_then(|p| p.parse::<ExternalProvider>().ok()),
            provider_key: self.provider_key,
            created_at: super::to_datetime(self.created_at),
        }
    }
}
