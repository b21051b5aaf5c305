//! Generic SeaORM repository base
//!
//! Domain repositories wrap a [`BaseRepository`] for the common
//! insert/update/find/delete plumbing and add their own queries on top of
//! [`BaseRepository::db`].

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PrimaryKeyTrait,
};
use std::marker::PhantomData;

/// Shared CRUD plumbing over a SeaORM entity
pub struct BaseRepository<E: EntityTrait> {
    db: DatabaseConnection,
    _entity: PhantomData<E>,
}

impl<E: EntityTrait> BaseRepository<E> {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    /// Access the underlying connection for entity-specific queries
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Insert a new row and return the persisted model
    pub async fn insert<A>(&self, model: A) -> Result<E::Model, DbErr>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        model.insert(&self.db).await
    }

    /// Update an existing row and return the persisted model
    pub async fn update<A>(&self, model: A) -> Result<E::Model, DbErr>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        model.update(&self.db).await
    }

    /// Find a row by primary key
    pub async fn find_by_id<T>(&self, id: T) -> Result<Option<E::Model>, DbErr>
    where
        T: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType> + Send,
    {
        E::find_by_id(id).one(&self.db).await
    }

    /// Delete a row by primary key, returning the affected row count
    pub async fn delete_by_id<T>(&self, id: T) -> Result<u64, DbErr>
    where
        T: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType> + Send,
    {
        let result = E::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }

    /// Delete every row of the entity, returning the affected row count
    pub async fn delete_all(&self) -> Result<u64, DbErr> {
        let result = E::delete_many().exec(&self.db).await?;
        Ok(result.rows_affected)
    }
}
