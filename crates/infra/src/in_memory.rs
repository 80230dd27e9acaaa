//! In-memory member repository for tests/dev.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use rollcall_core::{DomainError, DomainResult, MemberId};
use rollcall_members::Member;

use crate::repository::{ListOrder, MemberRepository};

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    rows: BTreeMap<MemberId, Member>,
}

/// Mutex-guarded map keyed by id.
///
/// Uniqueness and id assignment both happen under the single lock, so the
/// check-then-insert race the Postgres backend has to classify cannot occur
/// here in the first place.
#[derive(Debug, Default)]
pub struct InMemoryMemberRepository {
    state: Mutex<State>,
}

impl InMemoryMemberRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> DomainResult<std::sync::MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| DomainError::storage("member repository lock poisoned"))
    }
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn save(&self, member: Member) -> DomainResult<Member> {
        let mut state = self.lock()?;

        let email_taken_by_other = state
            .rows
            .values()
            .any(|m| m.email() == member.email() && m.id() != member.id());
        if email_taken_by_other {
            return Err(DomainError::duplicate_email(member.email()));
        }

        match member.id() {
            None => {
                state.next_id += 1;
                let id = MemberId::from_i64(state.next_id);
                let persisted = member.with_id(id);
                state.rows.insert(id, persisted.clone());
                Ok(persisted)
            }
            Some(id) => {
                if !state.rows.contains_key(&id) {
                    return Err(DomainError::not_found());
                }
                state.rows.insert(id, member.clone());
                Ok(member)
            }
        }
    }

    async fn find_by_id(&self, id: MemberId) -> DomainResult<Option<Member>> {
        Ok(self.lock()?.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Member>> {
        Ok(self.lock()?.rows.values().find(|m| m.email() == email).cloned())
    }

    async fn exists_by_id(&self, id: MemberId) -> DomainResult<bool> {
        Ok(self.lock()?.rows.contains_key(&id))
    }

    async fn exists_by_email(&self, email: &str) -> DomainResult<bool> {
        Ok(self.lock()?.rows.values().any(|m| m.email() == email))
    }

    async fn delete_by_id(&self, id: MemberId) -> DomainResult<()> {
        match self.lock()?.rows.remove(&id) {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found()),
        }
    }

    async fn find_all(&self, order: ListOrder) -> DomainResult<Vec<Member>> {
        // BTreeMap iteration gives id (insertion) order for the unordered case.
        let mut members: Vec<Member> = self.lock()?.rows.values().cloned().collect();
        if order == ListOrder::ByName {
            members.sort_by(|a, b| a.name().cmp(b.name()));
        }
        Ok(members)
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.lock()?.rows.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> Member {
        Member::new("Jane Doe", "jane@example.com", "1234567890")
    }

    #[tokio::test]
    async fn insert_assigns_an_id_and_round_trips() {
        let repo = InMemoryMemberRepository::new();

        let saved = repo.save(jane()).await.unwrap();
        let id = saved.id().expect("insert must assign an id");

        let found = repo.find_by_id(id).await.unwrap().expect("member must exist");
        assert_eq!(found, saved);
        assert_eq!(found.name(), "Jane Doe");
        assert_eq!(found.email(), "jane@example.com");
        assert_eq!(found.phone_number(), "1234567890");
    }

    #[tokio::test]
    async fn ids_are_never_reused() {
        let repo = InMemoryMemberRepository::new();

        let first = repo.save(jane()).await.unwrap();
        let first_id = first.id().unwrap();
        repo.delete_by_id(first_id).await.unwrap();

        let second = repo
            .save(Member::new("John Doe", "john@example.com", "1234567890"))
            .await
            .unwrap();
        assert_ne!(second.id().unwrap(), first_id);
    }

    #[tokio::test]
    async fn duplicate_email_insert_is_rejected() {
        let repo = InMemoryMemberRepository::new();
        repo.save(jane()).await.unwrap();

        let err = repo
            .save(Member::new("Other Jane", "jane@example.com", "0987654321"))
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::duplicate_email("jane@example.com"));
    }

    #[tokio::test]
    async fn update_keeps_id_and_may_keep_own_email() {
        let repo = InMemoryMemberRepository::new();
        let saved = repo.save(jane()).await.unwrap();
        let id = saved.id().unwrap();

        let updated = repo
            .save(Member::hydrated(id, "Jane D. Doe", "jane@example.com", "1112223334"))
            .await
            .unwrap();

        assert_eq!(updated.id(), Some(id));
        let found = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found.name(), "Jane D. Doe");
        assert_eq!(found.phone_number(), "1112223334");
    }

    #[tokio::test]
    async fn update_to_anothers_email_is_rejected() {
        let repo = InMemoryMemberRepository::new();
        repo.save(jane()).await.unwrap();
        let john = repo
            .save(Member::new("John Doe", "john@example.com", "1234567890"))
            .await
            .unwrap();

        let err = repo
            .save(Member::hydrated(
                john.id().unwrap(),
                "John Doe",
                "jane@example.com",
                "1234567890",
            ))
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::duplicate_email("jane@example.com"));
    }

    #[tokio::test]
    async fn update_of_missing_id_is_not_found() {
        let repo = InMemoryMemberRepository::new();
        let err = repo
            .save(Member::hydrated(
                MemberId::from_i64(999),
                "Ghost",
                "ghost@example.com",
                "1234567890",
            ))
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::not_found());
    }

    #[tokio::test]
    async fn delete_then_find_yields_absent() {
        let repo = InMemoryMemberRepository::new();
        let id = repo.save(jane()).await.unwrap().id().unwrap();

        repo.delete_by_id(id).await.unwrap();

        assert_eq!(repo.find_by_id(id).await.unwrap(), None);
        assert!(!repo.exists_by_id(id).await.unwrap());
    }

    #[tokio::test]
    async fn delete_of_missing_id_is_not_found() {
        let repo = InMemoryMemberRepository::new();
        let err = repo.delete_by_id(MemberId::from_i64(999)).await.unwrap_err();
        assert_eq!(err, DomainError::not_found());
    }

    #[tokio::test]
    async fn find_by_email_and_exists_by_email_agree() {
        let repo = InMemoryMemberRepository::new();
        repo.save(jane()).await.unwrap();

        assert!(repo.exists_by_email("jane@example.com").await.unwrap());
        assert!(repo.find_by_email("jane@example.com").await.unwrap().is_some());
        assert!(!repo.exists_by_email("nobody@example.com").await.unwrap());
        assert!(repo.find_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_all_by_name_sorts_ascending() {
        let repo = InMemoryMemberRepository::new();
        for (name, email) in [
            ("Charlie", "charlie@example.com"),
            ("Alice", "alice@example.com"),
            ("Bob", "bob@example.com"),
        ] {
            repo.save(Member::new(name, email, "1234567890")).await.unwrap();
        }

        let ordered = repo.find_all(ListOrder::ByName).await.unwrap();
        let names: Vec<&str> = ordered.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Charlie"]);

        // Unordered keeps insertion (id) order.
        let unordered = repo.find_all(ListOrder::Unordered).await.unwrap();
        let names: Vec<&str> = unordered.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["Charlie", "Alice", "Bob"]);
    }

    #[tokio::test]
    async fn count_tracks_inserts_and_deletes() {
        let repo = InMemoryMemberRepository::new();
        assert_eq!(repo.count().await.unwrap(), 0);

        let id = repo.save(jane()).await.unwrap().id().unwrap();
        repo.save(Member::new("John Doe", "john@example.com", "1234567890"))
            .await
            .unwrap();
        assert_eq!(repo.count().await.unwrap(), 2);

        repo.delete_by_id(id).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
