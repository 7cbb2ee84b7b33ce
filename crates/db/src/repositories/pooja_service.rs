//! Pooja service catalog repository.

use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::entities::pooja_services;

/// Pooja service catalog repository.
#[derive(Debug, Clone)]
pub struct PoojaServiceRepository {
    db: DatabaseConnection,
}

impl PoojaServiceRepository {
    /// Creates a new catalog repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists active services in display order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_active(&self) -> Result<Vec<pooja_services::Model>, DbErr> {
        pooja_services::Entity::find()
            .filter(pooja_services::Column::IsActive.eq(true))
            .order_by_asc(pooja_services::Column::DisplayOrder)
            .all(&self.db)
            .await
    }

    /// Finds a service by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<pooja_services::Model>, DbErr> {
        pooja_services::Entity::find_by_id(id).one(&self.db).await
    }
}
