//! Schema bootstrap for the Postgres backend.

use sqlx::PgPool;

use rollcall_core::{DomainError, DomainResult};

const CREATE_MEMBERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS members (
    id            BIGSERIAL PRIMARY KEY,
    name          VARCHAR(25) NOT NULL,
    email         VARCHAR(50) NOT NULL,
    phone_number  VARCHAR(13) NOT NULL,
    CONSTRAINT members_email_key UNIQUE (email)
)
"#;

/// Create the members table if it does not exist yet. Idempotent; run at
/// startup before the pool is handed to the repository.
pub async fn ensure_schema(pool: &PgPool) -> DomainResult<()> {
    sqlx::query(CREATE_MEMBERS_TABLE)
        .execute(pool)
        .await
        .map_err(|e| DomainError::storage(e.to_string()))?;

    tracing::debug!("members schema ensured");
    Ok(())
}
