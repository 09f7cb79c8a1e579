use tracing::info;

use crate::auth::{hash_password, verify_password};
use crate::db::{DbUser, UserStorage};
use crate::error::VaultError;
use crate::types::{Page, PageRequest, UserView};

#[derive(Clone)]
pub struct UserService {
    storage: UserStorage,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(storage: UserStorage, bcrypt_cost: u32) -> Self {
        Self {
            storage,
            bcrypt_cost,
        }
    }

    /// Hash the raw password and store the user.
    pub async fn create_user(&self, username: &str, password: &str) -> Result<UserView, VaultError> {
        if self.user_exists(username).await? {
            return Err(VaultError::UserAlreadyExists(username.to_string()));
        }
        let hashed = hash_password(password, self.bcrypt_cost).await?;
        let user = self.storage.insert(username, &hashed).await?;
        info!(id = user.id, username = %user.username, "user registered");
        Ok(user.into())
    }

    pub async fn get_user(&self, username: &str) -> Result<UserView, VaultError> {
        self.get_user_entity(username).await.map(Into::into)
    }

    pub async fn get_user_entity(&self, username: &str) -> Result<DbUser, VaultError> {
        self.storage
            .find_by_username(username)
            .await?
            .ok_or_else(|| VaultError::NotFound("User not found".to_string()))
    }

    pub async fn user_exists(&self, username: &str) -> Result<bool, VaultError> {
        Ok(self.storage.find_by_username(username).await?.is_some())
    }

    /// 404 for an unknown user, `InvalidCredentials` for a wrong password.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<DbUser, VaultError> {
        let user = self.get_user_entity(username).await?;
        if verify_password(password, &user.password).await? {
            Ok(user)
        } else {
            Err(VaultError::InvalidCredentials)
        }
    }

    pub async fn get_all_users(&self, page: PageRequest) -> Result<Page<UserView>, VaultError> {
        let users = self.storage.list(page).await?;
        let total = self.storage.count().await?;
        Ok(Page::new(users, page, total).map(Into::into))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{connect, migrate};

    async fn service() -> UserService {
        let pool = connect("sqlite::memory:", 1).await.unwrap();
        migrate(&pool).await.unwrap();
        UserService::new(UserStorage::new(pool), 4)
    }

    #[tokio::test]
    async fn create_user_stores_hash_not_password() {
        let svc = service().await;
        let view = svc.create_user("testuser", "password123").await.unwrap();
        assert_eq!(view.username, "testuser");

        let entity = svc.get_user_entity("testuser").await.unwrap();
        assert_ne!(entity.password, "password123");
        assert!(entity.password.starts_with("$2"));
    }

    #[tokio::test]
    async fn existing_username_is_rejected() {
        let svc = service().await;
        svc.create_user("testuser", "password123").await.unwrap();
        let err = svc.create_user("testuser", "other").await.unwrap_err();
        assert!(matches!(err, VaultError::UserAlreadyExists(_)));
        assert_eq!(err.to_string(), "User [ testuser ] already exists");
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let svc = service().await;
        let err = svc.get_user("nonexistent").await.unwrap_err();
        assert!(err.to_string().contains("User not found"));
        assert!(!svc.user_exists("nonexistent").await.unwrap());
    }

    #[tokio::test]
    async fn authenticate_checks_password() {
        let svc = service().await;
        svc.create_user("testuser", "password123").await.unwrap();
        assert!(svc.authenticate("testuser", "password123").await.is_ok());
        assert!(matches!(
            svc.authenticate("testuser", "wrong").await,
            Err(VaultError::InvalidCredentials)
        ));
        assert!(matches!(
            svc.authenticate("ghost", "password123").await,
            Err(VaultError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn lists_users_with_pagination() {
        let svc = service().await;
        svc.create_user("testuser", "pass1").await.unwrap();
        svc.create_user("user2", "pass2").await.unwrap();

        let page = svc.get_all_users(PageRequest { page: 0, size: 20 }).await.unwrap();
        assert_eq!(page.content.len(), 2);
        assert_eq!(page.content[0].username, "testuser");
        assert_eq!(page.total_elements, 2);
    }
}
