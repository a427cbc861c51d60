use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Postgres, Transaction};
use uuid::Uuid;
use validator::Validate;

lazy_static! {
    // Catalog identifiers: lowercase letters, digits, hyphens (e.g. "mr-mime", "porygon2").
    static ref CREATURE_NAME_REGEX: regex::Regex =
        regex::Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap();
}

/// Trims and lowercases a creature name so lookups and storage agree on one spelling.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A creature known to the ledger. Rows are created lazily on the first catch of a name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Creature {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Payload of `POST /protected/catch`.
///
/// `name` is optional at the serde level so a missing name is reported as a 400
/// by the handler rather than as a generic deserialization failure.
#[derive(Debug, Deserialize, Validate)]
pub struct CatchRequest {
    #[validate(
        length(min = 1, max = 100),
        regex(
            path = "CREATURE_NAME_REGEX",
            message = "Creature name may contain only letters, digits, and hyphens"
        )
    )]
    pub name: Option<String>,
}

impl CatchRequest {
    /// Returns a copy with the name normalized, dropping names that are blank.
    pub fn normalized(self) -> Self {
        Self {
            name: self
                .name
                .map(|name| normalize_name(&name))
                .filter(|name| !name.is_empty()),
        }
    }
}

impl Creature {
    /// Returns the creature called `name`, inserting it first if it does not exist.
    ///
    /// A single upsert statement, so two concurrent first catches of the same name
    /// still leave exactly one row.
    pub async fn find_or_create(
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
    ) -> Result<Creature, sqlx::Error> {
        sqlx::query_as::<_, Creature>(
            "INSERT INTO creatures (id, name)
             VALUES ($1, $2)
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
             RETURNING id, name, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .fetch_one(&mut **tx)
        .await
    }
}
