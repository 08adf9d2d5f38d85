use super::{SeaOrmStorage, map_read_err, map_write_err};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::Result;
use crate::models::users::{
    entities::{ExternalProvider, User},
    requests::CreateUserRequest,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            username: Set(req.username),
            full_name: Set(req.full_name),
            password_hash: Set(req.password_hash),
            role: Set(req.role.to_string()),
            provider: Set(req.provider.map(|p| p.as_str().to_string())),
            provider_key: Set(req.provider_key),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_write_err("创建用户", e))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_read_err("查询用户", e))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名获取用户
    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Username.eq(username.trim()))
            .one(&self.db)
            .await
            .map_err(|e| map_read_err("查询用户", e))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过第三方登录标识获取用户
    pub async fn get_user_by_external_login_impl(
        &self,
        provider: ExternalProvider,
        provider_key: &str,
    ) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Provider.eq(provider.as_str()))
            .filter(Column::ProviderKey.eq(provider_key))
            .one(&self.db)
            .await
            .map_err(|e| map_read_err("查询用户", e))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 绑定第三方登录
    pub async fn link_external_login_impl(
        &self,
        user_id: i64,
        provider: ExternalProvider,
        provider_key: &str,
    ) -> Result<Option<User>> {
        let existing = Users::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| map_read_err("查询用户", e))?;

        let Some(model) = existing else {
            return Ok(None);
        };

        let mut active: ActiveModel = model.into();
        active.provider = Set(Some(provider.as_str().to_string()));
        active.provider_key = Set(Some(provider_key.to_string()));
        active.updated_at = Set(chrono::Utc::now().timestamp());

        let result = active
            .update(&self.db)
            .await
            .map_err(|e| map_write_err("绑定第三方登录", e))?;

        Ok(Some(result.into_user()))
    }

    /// 删除用户
    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| map_write_err("删除用户", e))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;

    fn local_user(username: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            full_name: Some("Test User".to_string()),
            password_hash: Some("hash".to_string()),
            role: UserRole::User,
            provider: None,
            provider_key: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_find_user() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let user = storage.create_user_impl(local_user("0791234567")).await.unwrap();

        let found = storage
            .get_user_by_username_impl("0791234567")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(found.role, UserRole::User);
        assert!(found.has_local_password());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage.create_user_impl(local_user("0791234567")).await.unwrap();

        let err = storage
            .create_user_impl(local_user("0791234567"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E010");
    }

    #[tokio::test]
    async fn test_link_external_login() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let user = storage
            .create_user_impl(local_user("someone@example.com"))
            .await
            .unwrap();

        assert!(
            storage
                .get_user_by_external_login_impl(ExternalProvider::Github, "42")
                .await
                .unwrap()
                .is_none()
        );

        let linked = storage
            .link_external_login_impl(user.id, ExternalProvider::Github, "42")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(linked.provider, Some(ExternalProvider::Github));

        let found = storage
            .get_user_by_external_login_impl(ExternalProvider::Github, "42")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, user.id);
    }

    #[tokio::test]
    async fn test_delete_user() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let user = storage.create_user_impl(local_user("0790000000")).await.unwrap();

        assert!(storage.delete_user_impl(user.id).await.unwrap());
        assert!(!storage.delete_user_impl(user.id).await.unwrap());
        assert!(storage.get_user_by_id_impl(user.id).await.unwrap().is_none());
    }
}
