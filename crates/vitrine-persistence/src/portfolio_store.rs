//! Portfolio store operations

use sea_orm::*;

use vitrine_common::VitrineError;

use crate::directory::map_db_err;
use crate::entity::portfolio;
use crate::model::PortfolioPatch;

/// Find a portfolio by id
pub async fn find_by_id(
    db: &DatabaseConnection,
    id: i64,
) -> Result<Option<portfolio::Model>, VitrineError> {
    portfolio::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(map_db_err)
}

/// All portfolio rows for a tenant, oldest first
pub async fn find_by_tenant(
    db: &DatabaseConnection,
    tenant_id: i64,
) -> Result<Vec<portfolio::Model>, VitrineError> {
    portfolio::Entity::find()
        .filter(portfolio::Column::TenantId.eq(tenant_id))
        .order_by_asc(portfolio::Column::CreatedAt)
        .all(db)
        .await
        .map_err(map_db_err)
}

/// The tenant's published portfolio, if any
pub async fn find_published_by_tenant(
    db: &DatabaseConnection,
    tenant_id: i64,
) -> Result<Option<portfolio::Model>, VitrineError> {
    portfolio::Entity::find()
        .filter(portfolio::Column::TenantId.eq(tenant_id))
        .filter(portfolio::Column::Published.eq(true))
        .order_by_asc(portfolio::Column::CreatedAt)
        .one(db)
        .await
        .map_err(map_db_err)
}

/// Apply a partial update to a portfolio and return the updated row.
///
/// `updated_at` is only touched when some field actually changed.
pub async fn apply_patch(
    db: &DatabaseConnection,
    entity: portfolio::Model,
    patch: PortfolioPatch,
) -> Result<portfolio::Model, VitrineError> {
    let mut active: portfolio::ActiveModel = entity.into();

    if let Some(content) = patch.content {
        active.content = Set(Some(content));
    }
    if let Some(published) = patch.published {
        active.published = Set(published);
    }
    if let Some(media_files) = patch.media_files {
        let serialized = serde_json::to_string(&media_files)
            .map_err(|e| VitrineError::Internal(format!("media list encoding: {e}")))?;
        active.media_files = Set(Some(serialized));
    }

    if active.is_changed() {
        active.updated_at = Set(chrono::Utc::now().naive_utc());
        active.update(db).await.map_err(map_db_err)
    } else {
        Ok(active.try_into_model().map_err(map_db_err)?)
    }
}

/// Delete a portfolio row; returns whether a row was removed
pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<bool, VitrineError> {
    let res = portfolio::Entity::delete_many()
        .filter(portfolio::Column::Id.eq(id))
        .exec(db)
        .await
        .map_err(map_db_err)?;

    Ok(res.rows_affected > 0)
}
