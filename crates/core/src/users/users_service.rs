//! Service for managing user accounts and profiles.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::users_model::{NewUser, User, UserProfileUpdate, UserRole};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::errors::{DatabaseError, Error, Result};

/// Service for managing users
pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        let email = new_user.email.trim().to_lowercase();
        if email.is_empty() {
            return Err(Error::Validation(
                crate::errors::ValidationError::MissingField("email".to_string()),
            ));
        }
        if self.repository.get_by_email(&email)?.is_some() {
            return Err(Error::Database(DatabaseError::UniqueViolation(format!(
                "Email '{}' already in use",
                email
            ))));
        }
        debug!("Creating user account for {}", email);
        self.repository
            .insert(NewUser {
                email,
                name: new_user.name,
            })
            .await
    }

    fn get_profile(&self, user_id: &str) -> Result<User> {
        self.repository.get_by_id(user_id)
    }

    async fn update_profile(&self, user_id: &str, update: UserProfileUpdate) -> Result<User> {
        let mut user = self.repository.get_by_id(user_id)?;

        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(phone) = update.phone {
            user.phone = phone;
        }
        if let Some(goals) = update.goals {
            user.goals = goals;
        }
        if let Some(risk_tolerance) = update.risk_tolerance {
            user.risk_tolerance = risk_tolerance;
        }

        self.repository.update(user).await
    }

    fn list_users(&self) -> Result<Vec<User>> {
        self.repository.list()
    }

    async fn set_role(&self, user_id: &str, role: UserRole) -> Result<User> {
        let mut user = self.repository.get_by_id(user_id)?;
        user.role = role;
        self.repository.update(user).await
    }

    async fn delete_user(&self, user_id: &str) -> Result<usize> {
        self.repository.delete(user_id).await
    }

    fn count_users(&self) -> Result<i64> {
        self.repository.count()
    }
}
