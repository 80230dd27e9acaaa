//! Postgres-backed member repository.
//!
//! The `members` table carries a unique index on `email`; that index, not the
//! application-level pre-check, is the source of truth for the duplicate
//! email invariant. A unique violation raised on insert or update is
//! classified into `DomainError::DuplicateEmail` here so callers never see a
//! raw constraint error.

use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

use rollcall_core::{DomainError, DomainResult, MemberId};
use rollcall_members::Member;

use crate::repository::{ListOrder, MemberRepository};

pub struct PostgresMemberRepository {
    pool: PgPool,
}

impl PostgresMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_member(row: &PgRow) -> DomainResult<Member> {
    let id: i64 = row.try_get("id").map_err(storage)?;
    let name: String = row.try_get("name").map_err(storage)?;
    let email: String = row.try_get("email").map_err(storage)?;
    let phone_number: String = row.try_get("phone_number").map_err(storage)?;
    Ok(Member::hydrated(MemberId::from_i64(id), name, email, phone_number))
}

fn storage(err: sqlx::Error) -> DomainError {
    DomainError::storage(err.to_string())
}

/// Classify a write failure: unique violations become `DuplicateEmail`
/// (email is the only unique column), anything else is a storage error.
fn classify_write_error(err: sqlx::Error, email: &str) -> DomainError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return DomainError::duplicate_email(email);
        }
    }
    storage(err)
}

#[async_trait]
impl MemberRepository for PostgresMemberRepository {
    async fn save(&self, member: Member) -> DomainResult<Member> {
        match member.id() {
            None => {
                let row = sqlx::query(
                    r#"
                    INSERT INTO members (name, email, phone_number)
                    VALUES ($1, $2, $3)
                    RETURNING id
                    "#,
                )
                .bind(member.name())
                .bind(member.email())
                .bind(member.phone_number())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| classify_write_error(e, member.email()))?;

                let id: i64 = row.try_get("id").map_err(storage)?;
                Ok(member.with_id(MemberId::from_i64(id)))
            }
            Some(id) => {
                let result = sqlx::query(
                    r#"
                    UPDATE members
                    SET name = $1, email = $2, phone_number = $3
                    WHERE id = $4
                    "#,
                )
                .bind(member.name())
                .bind(member.email())
                .bind(member.phone_number())
                .bind(id.as_i64())
                .execute(&self.pool)
                .await
                .map_err(|e| classify_write_error(e, member.email()))?;

                if result.rows_affected() == 0 {
                    return Err(DomainError::not_found());
                }
                Ok(member)
            }
        }
    }

    async fn find_by_id(&self, id: MemberId) -> DomainResult<Option<Member>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, phone_number
            FROM members
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;

        row.as_ref().map(row_to_member).transpose()
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Member>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, phone_number
            FROM members
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;

        row.as_ref().map(row_to_member).transpose()
    }

    async fn exists_by_id(&self, id: MemberId) -> DomainResult<bool> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM members WHERE id = $1) AS present")
            .bind(id.as_i64())
            .fetch_one(&self.pool)
            .await
            .map_err(storage)?;
        row.try_get("present").map_err(storage)
    }

    async fn exists_by_email(&self, email: &str) -> DomainResult<bool> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM members WHERE email = $1) AS present")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(storage)?;
        row.try_get("present").map_err(storage)
    }

    async fn delete_by_id(&self, id: MemberId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(storage)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found());
        }
        Ok(())
    }

    async fn find_all(&self, order: ListOrder) -> DomainResult<Vec<Member>> {
        // Name collation is the database's; byte-wise for the C locale.
        let sql = match order {
            ListOrder::Unordered => {
                "SELECT id, name, email, phone_number FROM members ORDER BY id"
            }
            ListOrder::ByName => {
                "SELECT id, name, email, phone_number FROM members ORDER BY name ASC, id"
            }
        };

        let rows = sqlx::query(sql).fetch_all(&self.pool).await.map_err(storage)?;
        rows.iter().map(row_to_member).collect()
    }

    async fn count(&self) -> DomainResult<u64> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM members")
            .fetch_one(&self.pool)
            .await
            .map_err(storage)?;
        let total: i64 = row.try_get("total").map_err(storage)?;
        Ok(total as u64)
    }
}
