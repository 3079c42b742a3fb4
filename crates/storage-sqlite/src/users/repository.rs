use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use roboadvisor_core::users::{NewUser, User, UserRepositoryTrait};
use roboadvisor_core::Result;

use super::model::UserDB;
use crate::db::{get_connection, DbPool};
use crate::errors::IntoCore;
use crate::schema::users::dsl::*;

pub struct UserRepository {
    pool: Arc<DbPool>,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        UserRepository { pool }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn get_by_id(&self, user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        let user_db = users.find(user_id).first::<UserDB>(&mut conn).into_core()?;
        Ok(user_db.into())
    }

    fn get_by_email(&self, email_param: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let user_db = users
            .filter(email.eq(email_param))
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(user_db.map(User::from))
    }

    fn list(&self) -> Result<Vec<User>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = users
            .order(created_at.asc())
            .load::<UserDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn insert(&self, new_user: NewUser) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        let now = Utc::now().naive_utc();
        let user_db = UserDB {
            id: Uuid::new_v4().to_string(),
            email: new_user.email,
            name: new_user.name.unwrap_or_default(),
            phone: String::new(),
            goals: String::new(),
            risk_tolerance: "Moderate".to_string(),
            role: "user".to_string(),
            created_at: now,
            updated_at: now,
        };
        diesel::insert_into(users)
            .values(&user_db)
            .execute(&mut conn)
            .into_core()?;
        Ok(user_db.into())
    }

    async fn update(&self, user: User) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        let mut user_db: UserDB = user.into();
        user_db.updated_at = Utc::now().naive_utc();
        diesel::update(users.find(user_db.id.clone()))
            .set(&user_db)
            .execute(&mut conn)
            .into_core()?;
        Ok(user_db.into())
    }

    async fn delete(&self, user_id: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        diesel::delete(users.find(user_id))
            .execute(&mut conn)
            .into_core()
    }

    fn count(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        users.count().get_result::<i64>(&mut conn).into_core()
    }
}
