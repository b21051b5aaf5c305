use std::collections::HashMap;
use std::sync::Arc;
use validator::Validate;

use crate::error::{MemberError, MemberResult};
use crate::models::{
    Cash, CreateMember, Member, MemberId, MemberResponse, MemberResponses, UpdateCash, UpdateName,
};
use crate::repository::MemberRepository;

/// Service layer for Member business logic.
///
/// Every operation follows the same shape: validate the input, fetch the
/// aggregate, mutate it, persist, and return a projection.
#[derive(Clone)]
pub struct MemberService<R: MemberRepository> {
    repository: Arc<R>,
}

impl<R: MemberRepository> MemberService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Register a new member with zero starting cash
    pub async fn create_member(&self, input: CreateMember) -> MemberResult<MemberResponse> {
        input
            .validate()
            .map_err(|e| MemberError::Validation(e.to_string()))?;

        let member = Member::new(input);
        let saved = self.repository.save(member).await?;

        saved.try_into()
    }

    /// Get a member by id
    pub async fn find_member(&self, id: MemberId) -> MemberResult<MemberResponse> {
        let member = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(MemberError::NotFound(id))?;

        member.try_into()
    }

    /// List every member
    pub async fn find_all(&self) -> MemberResult<MemberResponses> {
        let members = self.repository.find_all().await?;

        let responses = members
            .into_iter()
            .map(MemberResponse::try_from)
            .collect::<MemberResult<Vec<_>>>()?;

        Ok(MemberResponses { responses })
    }

    /// Fetch members by id, preserving the input id order.
    ///
    /// The repository may return matches in any order; the result is
    /// re-projected so its id sequence equals the input sequence. Ids with no
    /// matching member are skipped.
    pub async fn find_all_by_id(&self, ids: &[MemberId]) -> MemberResult<MemberResponses> {
        let members = self.repository.find_all_by_id(ids).await?;

        let mut by_id: HashMap<MemberId, Member> = members
            .into_iter()
            .filter_map(|m| m.id.map(|id| (id, m)))
            .collect();

        let responses = ids
            .iter()
            .filter_map(|id| by_id.remove(id))
            .map(MemberResponse::try_from)
            .collect::<MemberResult<Vec<_>>>()?;

        Ok(MemberResponses { responses })
    }

    /// Replace a member's name
    pub async fn update_name(&self, id: MemberId, input: UpdateName) -> MemberResult<MemberResponse> {
        input
            .validate()
            .map_err(|e| MemberError::Validation(e.to_string()))?;

        let mut member = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(MemberError::NotFound(id))?;

        member.rename(input.name);
        let saved = self.repository.save(member).await?;

        saved.try_into()
    }

    /// Replace a member's cash balance
    pub async fn update_cash(&self, id: MemberId, input: UpdateCash) -> MemberResult<MemberResponse> {
        input
            .validate()
            .map_err(|e| MemberError::Validation(e.to_string()))?;
        let cash = Cash::new(input.cash)?;

        let mut member = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(MemberError::NotFound(id))?;

        member.replace_cash(cash);
        let saved = self.repository.save(member).await?;

        saved.try_into()
    }

    /// Delete a member by id.
    ///
    /// A missing id argument is `InvalidId` and is raised before any storage
    /// access; a well-formed id with no matching record is `NotFound`.
    pub async fn delete_by_id(&self, id: Option<MemberId>) -> MemberResult<()> {
        let id = id.ok_or(MemberError::InvalidId)?;

        if !self.repository.exists_by_id(id).await? {
            return Err(MemberError::NotFound(id));
        }

        self.repository.delete_by_id(id).await
    }

    /// Delete every member
    pub async fn delete_all(&self) -> MemberResult<()> {
        self.repository.delete_all().await
    }
}
