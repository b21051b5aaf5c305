use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{MemberError, MemberResult};
use crate::models::{Member, MemberId};

/// Repository trait for Member persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Get a member by id
    async fn find_by_id(&self, id: MemberId) -> MemberResult<Option<Member>>;

    /// List every member
    async fn find_all(&self) -> MemberResult<Vec<Member>>;

    /// Fetch the members matching the given ids, in any order
    async fn find_all_by_id(&self, ids: &[MemberId]) -> MemberResult<Vec<Member>>;

    /// Persist a member: insert when `id` is None, update otherwise
    async fn save(&self, member: Member) -> MemberResult<Member>;

    /// Check whether a member with the given id exists
    async fn exists_by_id(&self, id: MemberId) -> MemberResult<bool>;

    /// Delete a member by id
    async fn delete_by_id(&self, id: MemberId) -> MemberResult<()>;

    /// Delete every member
    async fn delete_all(&self) -> MemberResult<()>;
}

/// In-memory implementation of MemberRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryMemberRepository {
    members: Arc<RwLock<HashMap<i64, Member>>>,
    sequence: Arc<AtomicI64>,
}

impl InMemoryMemberRepository {
    pub fn new() -> Self {
        Self {
            members: Arc::new(RwLock::new(HashMap::new())),
            sequence: Arc::new(AtomicI64::new(0)),
        }
    }
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn find_by_id(&self, id: MemberId) -> MemberResult<Option<Member>> {
        let members = self.members.read().await;
        Ok(members.get(&id.0).cloned())
    }

    async fn find_all(&self) -> MemberResult<Vec<Member>> {
        let members = self.members.read().await;

        let mut result: Vec<Member> = members.values().cloned().collect();
        result.sort_by_key(|m| m.id);
        Ok(result)
    }

    async fn find_all_by_id(&self, ids: &[MemberId]) -> MemberResult<Vec<Member>> {
        let members = self.members.read().await;

        Ok(ids
            .iter()
            .filter_map(|id| members.get(&id.0).cloned())
            .collect())
    }

    async fn save(&self, mut member: Member) -> MemberResult<Member> {
        let mut members = self.members.write().await;

        // Mimic the storage-level unique constraint on email
        let email_taken = members
            .values()
            .any(|m| m.email == member.email && m.id != member.id);
        if email_taken {
            return Err(MemberError::Internal(format!(
                "duplicate key value violates unique constraint: email '{}'",
                member.email
            )));
        }

        let id = match member.id {
            Some(id) => id,
            None => {
                let id = MemberId(self.sequence.fetch_add(1, Ordering::SeqCst) + 1);
                member.id = Some(id);
                id
            }
        };

        members.insert(id.0, member.clone());
        tracing::info!(member_id = %id, "Saved member");
        Ok(member)
    }

    async fn exists_by_id(&self, id: MemberId) -> MemberResult<bool> {
        let members = self.members.read().await;
        Ok(members.contains_key(&id.0))
    }

    async fn delete_by_id(&self, id: MemberId) -> MemberResult<()> {
        let mut members = self.members.write().await;

        if members.remove(&id.0).is_some() {
            tracing::info!(member_id = %id, "Deleted member");
        }
        Ok(())
    }

    async fn delete_all(&self) -> MemberResult<()> {
        let mut members = self.members.write().await;
        members.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateMember;

    fn member(name: &str, email: &str) -> Member {
        Member::new(CreateMember {
            name: name.to_string(),
            email: email.to_string(),
        })
    }

    #[tokio::test]
    async fn save_assigns_sequential_ids() {
        let repo = InMemoryMemberRepository::new();

        let first = repo.save(member("a", "a@pacer.com")).await.unwrap();
        let second = repo.save(member("b", "b@pacer.com")).await.unwrap();

        assert_eq!(first.id, Some(MemberId(1)));
        assert_eq!(second.id, Some(MemberId(2)));
    }

    #[tokio::test]
    async fn save_rejects_duplicate_email() {
        let repo = InMemoryMemberRepository::new();

        repo.save(member("a", "same@pacer.com")).await.unwrap();
        let result = repo.save(member("b", "same@pacer.com")).await;

        assert!(matches!(result, Err(MemberError::Internal(_))));
    }

    #[tokio::test]
    async fn save_with_id_updates_in_place() {
        let repo = InMemoryMemberRepository::new();

        let mut saved = repo.save(member("before", "u@pacer.com")).await.unwrap();
        saved.rename("after".to_string());
        repo.save(saved.clone()).await.unwrap();

        let fetched = repo.find_by_id(saved.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(fetched.name, "after");
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn find_all_by_id_skips_unknown_ids() {
        let repo = InMemoryMemberRepository::new();

        let a = repo.save(member("a", "a@pacer.com")).await.unwrap();
        let b = repo.save(member("b", "b@pacer.com")).await.unwrap();

        let found = repo
            .find_all_by_id(&[a.id.unwrap(), MemberId(999), b.id.unwrap()])
            .await
            .unwrap();

        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn delete_all_clears_the_store() {
        let repo = InMemoryMemberRepository::new();

        repo.save(member("a", "a@pacer.com")).await.unwrap();
        repo.save(member("b", "b@pacer.com")).await.unwrap();
        repo.delete_all().await.unwrap();

        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn exists_by_id_reflects_deletes() {
        let repo = InMemoryMemberRepository::new();

        let saved = repo.save(member("a", "a@pacer.com")).await.unwrap();
        let id = saved.id.unwrap();

        assert!(repo.exists_by_id(id).await.unwrap());
        repo.delete_by_id(id).await.unwrap();
        assert!(!repo.exists_by_id(id).await.unwrap());
    }
}
