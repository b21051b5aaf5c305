use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::error::MemberError;
use crate::models::{Cash, Member, MemberId};

/// Sea-ORM Entity for the members table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "members")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub cash: Decimal,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// Conversion from Sea-ORM Model to domain Member.
// Fallible: a stored negative balance would break the Cash invariant and is
// surfaced as an internal error rather than silently clamped.
impl TryFrom<Model> for Member {
    type Error = MemberError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let cash = Cash::new(model.cash).map_err(|_| {
            MemberError::Internal(format!(
                "member {} has negative stored cash: {}",
                model.id, model.cash
            ))
        })?;

        Ok(Self {
            id: Some(MemberId(model.id)),
            name: model.name,
            email: model.email,
            cash,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        })
    }
}

// Conversion from domain Member to Sea-ORM ActiveModel.
// The id stays NotSet for unpersisted members so storage assigns it.
impl From<Member> for ActiveModel {
    fn from(member: Member) -> Self {
        ActiveModel {
            id: match member.id {
                Some(id) => Set(id.0),
                None => NotSet,
            },
            name: Set(member.name),
            email: Set(member.email),
            cash: Set(member.cash.amount()),
            created_at: Set(member.created_at.into()),
            updated_at: Set(member.updated_at.into()),
        }
    }
}
