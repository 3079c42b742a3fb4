//! Database models for users.

use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;

use roboadvisor_core::users::{RiskTolerance, User, UserRole};

/// Database model for user accounts
#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub email: String,
    pub name: String,
    pub phone: String,
    pub goals: String,
    pub risk_tolerance: String,
    pub role: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        Self {
            id: db.id,
            email: db.email,
            name: db.name,
            phone: db.phone,
            goals: db.goals,
            risk_tolerance: RiskTolerance::from_label(&db.risk_tolerance),
            role: UserRole::from_label(&db.role),
            created_at: DateTime::<Utc>::from_naive_utc_and_offset(db.created_at, Utc),
            updated_at: DateTime::<Utc>::from_naive_utc_and_offset(db.updated_at, Utc),
        }
    }
}

impl From<User> for UserDB {
    fn from(domain: User) -> Self {
        Self {
            id: domain.id,
            email: domain.email,
            name: domain.name,
            phone: domain.phone,
            goals: domain.goals,
            risk_tolerance: domain.risk_tolerance.as_str().to_string(),
            role: domain.role.as_str().to_string(),
            created_at: domain.created_at.naive_utc(),
            updated_at: domain.updated_at.naive_utc(),
        }
    }
}
