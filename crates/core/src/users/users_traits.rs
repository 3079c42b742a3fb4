use async_trait::async_trait;

use super::users_model::{NewUser, User, UserProfileUpdate, UserRole};
use crate::errors::Result;

/// Trait for user repository operations
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn get_by_id(&self, user_id: &str) -> Result<User>;
    fn get_by_email(&self, email: &str) -> Result<Option<User>>;
    fn list(&self) -> Result<Vec<User>>;
    async fn insert(&self, new_user: NewUser) -> Result<User>;
    async fn update(&self, user: User) -> Result<User>;
    async fn delete(&self, user_id: &str) -> Result<usize>;
    fn count(&self) -> Result<i64>;
}

/// Trait for user service operations
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn create_user(&self, new_user: NewUser) -> Result<User>;
    fn get_profile(&self, user_id: &str) -> Result<User>;
    async fn update_profile(&self, user_id: &str, update: UserProfileUpdate) -> Result<User>;
    fn list_users(&self) -> Result<Vec<User>>;
    async fn set_role(&self, user_id: &str, role: UserRole) -> Result<User>;
    async fn delete_user(&self, user_id: &str) -> Result<usize>;
    fn count_users(&self) -> Result<i64>;
}
