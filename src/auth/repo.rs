use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::models::{ActivityLevel, Gender, Goal};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub age: Option<i32>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub gender: Gender,
    pub goal: Goal,
    pub activity_level: ActivityLevel,
    pub created_at: OffsetDateTime,
}

/// Insert payload for signup; email is already trimmed and lowercased.
pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub age: Option<i32>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub gender: Gender,
    pub goal: Goal,
    pub activity_level: ActivityLevel,
}

const USER_COLUMNS: &str =
    "id, name, email, password_hash, age, weight, height, gender, goal, activity_level, created_at";

impl User {
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn create(db: &PgPool, new: NewUser<'_>) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (name, email, password_hash, age, weight, height, gender, goal, activity_level)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(new.name)
        .bind(new.email)
        .bind(new.password_hash)
        .bind(new.age)
        .bind(new.weight)
        .bind(new.height)
        .bind(new.gender)
        .bind(new.goal)
        .bind(new.activity_level)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    /// Write back the whole mutable profile, read-modify-write style.
    /// Email is deliberately not part of the update.
    pub async fn update_profile(db: &PgPool, user: &User) -> anyhow::Result<User> {
        let updated = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET name = $2, age = $3, weight = $4, height = $5,
                gender = $6, goal = $7, activity_level = $8
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id)
        .bind(&user.name)
        .bind(user.age)
        .bind(user.weight)
        .bind(user.height)
        .bind(user.gender)
        .bind(user.goal)
        .bind(user.activity_level)
        .fetch_one(db)
        .await?;
        Ok(updated)
    }

    pub async fn update_password(db: &PgPool, id: Uuid, password_hash: &str) -> anyhow::Result<()> {
        sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(db)
            .await?;
        Ok(())
    }

    /// Deletes the user row only. Plan rows owned by the user are left behind.
    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
