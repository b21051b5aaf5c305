use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::MemberError;

/// Custom validator rejecting blank (whitespace-only) strings
fn validate_not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("not_blank"));
    }
    Ok(())
}

/// Custom validator rejecting negative cash amounts
fn validate_non_negative(amount: &Decimal) -> Result<(), validator::ValidationError> {
    if *amount < Decimal::ZERO {
        return Err(validator::ValidationError::new("negative_cash"));
    }
    Ok(())
}

/// Storage-assigned member identifier
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
#[schema(value_type = i64)]
pub struct MemberId(pub i64);

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for MemberId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Non-negative cash balance.
///
/// The invariant is enforced at every construction site: [`Cash::new`],
/// `TryFrom<Decimal>`, and deserialization all reject negative amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "Decimal", into = "Decimal")]
#[schema(value_type = Decimal)]
pub struct Cash(Decimal);

impl Cash {
    /// Construct a cash balance, rejecting negative amounts
    pub fn new(amount: Decimal) -> Result<Self, MemberError> {
        if amount < Decimal::ZERO {
            return Err(MemberError::NegativeCash(amount));
        }
        Ok(Self(amount))
    }

    /// Zero balance, the starting cash of every new member
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Cash {
    type Error = MemberError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Cash> for Decimal {
    fn from(cash: Cash) -> Self {
        cash.0
    }
}

/// Member aggregate root.
///
/// `id` is `None` only before the first persist; storage assigns it and it
/// never changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Member {
    /// Storage-assigned identifier
    pub id: Option<MemberId>,
    /// Display name (non-blank)
    pub name: String,
    /// Email address (non-blank, unique)
    pub email: String,
    /// Current cash balance
    pub cash: Cash,
    /// Creation timestamp, set once
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// Create a not-yet-persisted member with zero cash
    pub fn new(input: CreateMember) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            name: input.name,
            email: input.email,
            cash: Cash::zero(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the name, resetting `updated_at`
    pub fn rename(&mut self, name: String) {
        self.name = name;
        self.updated_at = Utc::now();
    }

    /// Replace the cash balance, resetting `updated_at`
    pub fn replace_cash(&mut self, cash: Cash) {
        self.cash = cash;
        self.updated_at = Utc::now();
    }
}

/// DTO for registering a new member
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateMember {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(email, length(max = 255))]
    pub email: String,
}

/// DTO for a name-only update
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateName {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: String,
}

/// DTO for a cash-only update
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCash {
    #[validate(custom(function = "validate_non_negative"))]
    pub cash: Decimal,
}

/// Query parameters for listing members
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct ListMembersParams {
    /// Comma-separated member ids; when present, results follow this order
    pub ids: Option<String>,
}

/// Projection of a persisted member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MemberResponse {
    pub id: MemberId,
    pub name: String,
    pub email: String,
    pub cash: Cash,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Collection wrapper for member projections
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MemberResponses {
    pub responses: Vec<MemberResponse>,
}

impl TryFrom<Member> for MemberResponse {
    type Error = MemberError;

    fn try_from(member: Member) -> Result<Self, Self::Error> {
        let id = member
            .id
            .ok_or_else(|| MemberError::Internal("member has no id after persist".to_string()))?;

        Ok(Self {
            id,
            name: member.name,
            email: member.email,
            cash: member.cash,
            created_at: member.created_at,
            updated_at: member.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn cash_rejects_negative_amounts() {
        let result = Cash::new(Decimal::from(-1));
        assert!(matches!(result, Err(MemberError::NegativeCash(_))));
    }

    #[test]
    fn cash_accepts_zero_and_positive() {
        assert_eq!(Cash::zero().amount(), Decimal::ZERO);
        assert!(Cash::new(Decimal::from(100)).is_ok());
    }

    #[test]
    fn cash_deserialization_enforces_invariant() {
        let result: Result<Cash, _> = serde_json::from_str("\"-5\"");
        assert!(result.is_err());

        let cash: Cash = serde_json::from_str("\"42.50\"").unwrap();
        assert_eq!(cash.amount(), Decimal::new(4250, 2));
    }

    #[test]
    fn new_member_starts_with_zero_cash_and_no_id() {
        let member = Member::new(CreateMember {
            name: "kokodak".to_string(),
            email: "kokodak@pacer.com".to_string(),
        });

        assert!(member.id.is_none());
        assert_eq!(member.cash, Cash::zero());
        assert_eq!(member.created_at, member.updated_at);
    }

    #[test]
    fn rename_resets_updated_at() {
        let mut member = Member::new(CreateMember {
            name: "before".to_string(),
            email: "rename@pacer.com".to_string(),
        });
        let created_at = member.created_at;

        member.rename("after".to_string());

        assert_eq!(member.name, "after");
        assert_eq!(member.created_at, created_at);
        assert!(member.updated_at >= created_at);
    }

    #[test]
    fn create_member_rejects_blank_name() {
        let input = CreateMember {
            name: "   ".to_string(),
            email: "blank@pacer.com".to_string(),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn create_member_rejects_malformed_email() {
        let input = CreateMember {
            name: "kokodak".to_string(),
            email: "not-an-email".to_string(),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn update_cash_rejects_negative() {
        let input = UpdateCash {
            cash: Decimal::from(-10),
        };
        assert!(input.validate().is_err());

        let input = UpdateCash {
            cash: Decimal::ZERO,
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn response_projection_carries_timestamps() {
        let mut member = Member::new(CreateMember {
            name: "kokodak".to_string(),
            email: "kokodak@pacer.com".to_string(),
        });
        member.id = Some(MemberId(1));
        let created_at = member.created_at;

        let response = MemberResponse::try_from(member).unwrap();
        assert_eq!(response.created_at, created_at);
        assert_eq!(response.updated_at, created_at);

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("created_at").is_some());
        assert!(json.get("updated_at").is_some());
    }

    #[test]
    fn response_projection_requires_id() {
        let member = Member::new(CreateMember {
            name: "no-id".to_string(),
            email: "noid@pacer.com".to_string(),
        });
        assert!(MemberResponse::try_from(member).is_err());
    }
}
