//! The persistence gateway contract for members.

use async_trait::async_trait;

use rollcall_core::{DomainResult, MemberId};
use rollcall_members::Member;

/// Ordering for `find_all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListOrder {
    /// Backend-default order (insertion/id order for both backends here).
    #[default]
    Unordered,
    /// Ascending by name, case-sensitive byte-wise collation.
    ByName,
}

/// Durable storage and lookup of member records.
///
/// The email uniqueness invariant lives behind this trait: `save` is the
/// authoritative rejection point for duplicates, regardless of any pre-check
/// a caller performs. Implementations map a uniqueness conflict to
/// `DomainError::DuplicateEmail` and everything else unexpected to
/// `DomainError::Storage`.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Insert when `id` is unset (returns the member with `id` populated),
    /// otherwise update the row matching `id` (`NotFound` when absent).
    async fn save(&self, member: Member) -> DomainResult<Member>;

    /// Lookup by id; a missing id is `Ok(None)`, never an error.
    async fn find_by_id(&self, id: MemberId) -> DomainResult<Option<Member>>;

    /// Lookup by exact email; same contract as `find_by_id`.
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Member>>;

    async fn exists_by_id(&self, id: MemberId) -> DomainResult<bool>;

    async fn exists_by_email(&self, email: &str) -> DomainResult<bool>;

    /// Delete by id; `NotFound` when no such row exists.
    async fn delete_by_id(&self, id: MemberId) -> DomainResult<()>;

    async fn find_all(&self, order: ListOrder) -> DomainResult<Vec<Member>>;

    async fn count(&self) -> DomainResult<u64>;
}
