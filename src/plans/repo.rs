use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::plans::dto::{PlanParameters, UserInfo};

/// Newest-first listing cap.
pub const PLAN_HISTORY_LIMIT: i64 = 20;

/// A persisted plan. Immutable after creation: create, read, delete only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan: String,
    pub parameters: serde_json::Value,
    pub user_info: serde_json::Value,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

const PLAN_COLUMNS: &str = "id, user_id, plan, parameters, user_info, created_at";

impl Plan {
    pub async fn insert(
        db: &PgPool,
        user_id: Uuid,
        plan_text: &str,
        parameters: &PlanParameters,
        user_info: &UserInfo,
    ) -> anyhow::Result<Plan> {
        let plan = sqlx::query_as::<_, Plan>(&format!(
            r#"
            INSERT INTO plans (user_id, plan, parameters, user_info)
            VALUES ($1, $2, $3, $4)
            RETURNING {PLAN_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(plan_text)
        .bind(serde_json::to_value(parameters)?)
        .bind(serde_json::to_value(user_info)?)
        .fetch_one(db)
        .await?;
        Ok(plan)
    }

    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Plan>> {
        let rows = sqlx::query_as::<_, Plan>(&format!(
            r#"
            SELECT {PLAN_COLUMNS}
            FROM plans
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#
        ))
        .bind(user_id)
        .bind(PLAN_HISTORY_LIMIT)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Ownership is part of the query: a plan belonging to someone else is
    /// indistinguishable from a missing one.
    pub async fn find_for_user(
        db: &PgPool,
        user_id: Uuid,
        plan_id: Uuid,
    ) -> anyhow::Result<Option<Plan>> {
        let plan = sqlx::query_as::<_, Plan>(&format!(
            "SELECT {PLAN_COLUMNS} FROM plans WHERE id = $1 AND user_id = $2"
        ))
        .bind(plan_id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(plan)
    }

    pub async fn delete_for_user(
        db: &PgPool,
        user_id: Uuid,
        plan_id: Uuid,
    ) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM plans WHERE id = $1 AND user_id = $2")
            .bind(plan_id)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
