use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::{
    entity,
    error::{MemberError, MemberResult},
    models::{Member, MemberId},
    repository::MemberRepository,
};

pub struct PgMemberRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgMemberRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

fn db_error(e: sea_orm::DbErr) -> MemberError {
    MemberError::Internal(format!("Database error: {}", e))
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    async fn find_by_id(&self, id: MemberId) -> MemberResult<Option<Member>> {
        let model = self.base.find_by_id(id.0).await.map_err(db_error)?;

        model.map(Member::try_from).transpose()
    }

    async fn find_all(&self) -> MemberResult<Vec<Member>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(self.base.db())
            .await
            .map_err(db_error)?;

        models.into_iter().map(Member::try_from).collect()
    }

    async fn find_all_by_id(&self, ids: &[MemberId]) -> MemberResult<Vec<Member>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = entity::Entity::find()
            .filter(entity::Column::Id.is_in(ids.iter().map(|id| id.0)))
            .all(self.base.db())
            .await
            .map_err(db_error)?;

        models.into_iter().map(Member::try_from).collect()
    }

    async fn save(&self, member: Member) -> MemberResult<Member> {
        let is_insert = member.id.is_none();
        let active_model: entity::ActiveModel = member.into();

        let model = if is_insert {
            self.base.insert(active_model).await.map_err(db_error)?
        } else {
            self.base.update(active_model).await.map_err(db_error)?
        };

        tracing::info!(member_id = model.id, "Saved member");
        model.try_into()
    }

    async fn exists_by_id(&self, id: MemberId) -> MemberResult<bool> {
        let exists = self.base.find_by_id(id.0).await.map_err(db_error)?.is_some();

        Ok(exists)
    }

    async fn delete_by_id(&self, id: MemberId) -> MemberResult<()> {
        let rows_affected = self.base.delete_by_id(id.0).await.map_err(db_error)?;

        if rows_affected > 0 {
            tracing::info!(member_id = %id, "Deleted member");
        }
        Ok(())
    }

    async fn delete_all(&self) -> MemberResult<()> {
        let rows_affected = self.base.delete_all().await.map_err(db_error)?;

        tracing::info!(rows_affected, "Deleted all members");
        Ok(())
    }
}
