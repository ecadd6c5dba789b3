use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::logging::log_database_operation;

/// A chat user the bot has seen, and whether they may use it.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub authorized: bool,
}

impl User {
    /// Records a user as unauthorized unless they are already known.
    ///
    /// Returns `true` if the user was added.
    pub async fn register(pool: &sqlx::SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        log_database_operation("INSERT", "user", Some(&format!("id={id}")));
        let result = sqlx::query("INSERT OR IGNORE INTO user (id, authorized) VALUES (?, 0)")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    pub async fn is_authorized(pool: &sqlx::SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let authorized: Option<bool> =
            sqlx::query_scalar("SELECT authorized FROM user WHERE id = ?")
                .bind(id)
                .fetch_optional(pool)
                .await?;
        Ok(authorized.unwrap_or(false))
    }

    pub async fn find_by_id(
        pool: &sqlx::SqlitePool,
        id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT id, authorized FROM user WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Grants or revokes access, creating the user record if needed.
    pub async fn set_authorized(
        pool: &sqlx::SqlitePool,
        id: i64,
        authorized: bool,
    ) -> Result<(), sqlx::Error> {
        log_database_operation("UPSERT", "user", Some(&format!("id={id} authorized={authorized}")));
        sqlx::query(
            r#"
            INSERT INTO user (id, authorized) VALUES (?, ?)
            ON CONFLICT(id) DO UPDATE SET authorized = excluded.authorized
            "#,
        )
        .bind(id)
        .bind(authorized)
        .execute(pool)
        .await?;
        Ok(())
    }
}
