//! The ownership ledger: which user caught which creature, and when.
//!
//! Every query here is scoped by `user_id`, so one user can never list or release
//! another user's records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::creature::Creature;

/// One catch: a link between a user and a creature.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct CaughtCreature {
    pub id: Uuid,
    pub user_id: Uuid,
    pub creature_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A catch with its creature joined in, as returned by `GET /protected/caught`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaughtCreatureDetails {
    pub id: Uuid,
    pub user_id: Uuid,
    pub creature_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub creature: Creature,
}

#[derive(FromRow)]
struct CaughtCreatureRow {
    id: Uuid,
    user_id: Uuid,
    creature_id: Uuid,
    created_at: DateTime<Utc>,
    creature_name: String,
    creature_created_at: DateTime<Utc>,
}

impl From<CaughtCreatureRow> for CaughtCreatureDetails {
    fn from(row: CaughtCreatureRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            creature_id: row.creature_id,
            created_at: row.created_at,
            creature: Creature {
                id: row.creature_id,
                name: row.creature_name,
                created_at: row.creature_created_at,
            },
        }
    }
}

impl CaughtCreature {
    /// Records that `user_id` caught the creature called `name`, creating the creature
    /// row on first sight. Both writes commit together or not at all.
    pub async fn catch(
        pool: &PgPool,
        user_id: Uuid,
        name: &str,
    ) -> Result<CaughtCreature, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let creature = Creature::find_or_create(&mut tx, name).await?;

        let caught = sqlx::query_as::<_, CaughtCreature>(
            "INSERT INTO caught_creatures (id, user_id, creature_id)
             VALUES ($1, $2, $3)
             RETURNING id, user_id, creature_id, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(creature.id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(caught)
    }

    /// Deletes the record only if it belongs to `user_id`. Returns whether a row went away.
    pub async fn release(
        pool: &PgPool,
        user_id: Uuid,
        record_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM caught_creatures WHERE id = $1 AND user_id = $2")
            .bind(record_id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// All of `user_id`'s catches, newest first, with creature data joined in.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<CaughtCreatureDetails>, sqlx::Error> {
        let rows = sqlx::query_as::<_, CaughtCreatureRow>(
            "SELECT cc.id, cc.user_id, cc.creature_id, cc.created_at,
                    c.name AS creature_name, c.created_at AS creature_created_at
             FROM caught_creatures cc
             JOIN creatures c ON c.id = cc.creature_id
             WHERE cc.user_id = $1
             ORDER BY cc.created_at DESC, cc.id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(CaughtCreatureDetails::from).collect())
    }
}
