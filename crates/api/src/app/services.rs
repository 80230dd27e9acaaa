//! Service layer: registration workflow and read-only query façade.

use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;

use rollcall_core::{DomainError, DomainResult, MemberId};
use rollcall_events::{EventBus, InMemoryEventBus, Subscription};
use rollcall_infra::{
    InMemoryMemberRepository, ListOrder, MemberRepository, PostgresMemberRepository, ensure_schema,
};
use rollcall_members::{Member, MemberEvent, MemberRegistered, validate};

/// Application services shared by every handler.
///
/// Holds the repository behind the gateway trait and the notification bus.
/// One instance per process; handlers receive it via `Extension<Arc<_>>`.
pub struct AppServices {
    members: Arc<dyn MemberRepository>,
    bus: Arc<InMemoryEventBus<MemberEvent>>,
}

impl AppServices {
    pub fn new(members: Arc<dyn MemberRepository>) -> Self {
        Self {
            members,
            bus: Arc::new(InMemoryEventBus::new()),
        }
    }

    /// In-memory wiring (dev/test).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryMemberRepository::new()))
    }

    /// Postgres wiring; the caller has already run `ensure_schema`.
    pub fn postgres(pool: PgPool) -> Self {
        Self::new(Arc::new(PostgresMemberRepository::new(pool)))
    }

    /// Observe registration notifications (side-channel only).
    pub fn subscribe(&self) -> Subscription<MemberEvent> {
        self.bus.subscribe()
    }

    /// Register a new member: validate, reject duplicate emails, persist,
    /// then notify observers.
    ///
    /// The `exists_by_email` pre-check narrows the race window but the
    /// store's uniqueness constraint is authoritative: a conflicting insert
    /// that slips past the pre-check still comes back as `DuplicateEmail`
    /// from `save`. Duplicate conflicts are permanent for the given input and
    /// are never retried.
    pub async fn register(&self, candidate: Member) -> DomainResult<Member> {
        validate(&candidate)?;

        if self.members.exists_by_email(candidate.email()).await? {
            return Err(DomainError::duplicate_email(candidate.email()));
        }

        let saved = self.members.save(candidate).await?;
        tracing::info!(member = %saved.name(), "registered member");

        // Published only after the row is durable. Best-effort: a failed
        // publish is logged, never surfaced.
        let event = MemberEvent::Registered(MemberRegistered {
            member: saved.clone(),
            occurred_at: Utc::now(),
        });
        if let Err(e) = self.bus.publish(event) {
            tracing::warn!(error = ?e, "failed to publish registration notification");
        }

        Ok(saved)
    }

    /// Replace the fields of an existing member. The path id wins over any id
    /// in the payload; a `DuplicateEmail` can surface when the new email
    /// belongs to another member.
    pub async fn update(&self, id: MemberId, candidate: Member) -> DomainResult<Member> {
        validate(&candidate)?;

        if !self.members.exists_by_id(id).await? {
            return Err(DomainError::not_found());
        }

        let updated = Member::hydrated(
            id,
            candidate.name(),
            candidate.email(),
            candidate.phone_number(),
        );
        self.members.save(updated).await
    }

    pub async fn delete(&self, id: MemberId) -> DomainResult<()> {
        self.members.delete_by_id(id).await
    }

    /// Lookup by id; absent ids are `NotFound` at this layer.
    pub async fn member_by_id(&self, id: MemberId) -> DomainResult<Member> {
        self.members
            .find_by_id(id)
            .await?
            .ok_or_else(DomainError::not_found)
    }

    pub async fn member_by_email(&self, email: &str) -> DomainResult<Member> {
        self.members
            .find_by_email(email)
            .await?
            .ok_or_else(DomainError::not_found)
    }

    pub async fn list(&self, order: ListOrder) -> DomainResult<Vec<Member>> {
        self.members.find_all(order).await
    }

    pub async fn count(&self) -> DomainResult<u64> {
        self.members.count().await
    }
}

/// Pick the repository backend from the environment: `DATABASE_URL` selects
/// Postgres, otherwise the in-memory store is used.
pub async fn build_services() -> anyhow::Result<AppServices> {
    match std::env::var("DATABASE_URL") {
        Ok(url) => {
            let pool = PgPool::connect(&url).await?;
            ensure_schema(&pool).await?;
            tracing::info!("using postgres member repository");
            Ok(AppServices::postgres(pool))
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set; using in-memory member repository");
            Ok(AppServices::in_memory())
        }
    }
}
