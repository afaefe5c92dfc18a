//! Tenant Directory operations
//!
//! The directory is the source of truth for tenant records. The unique
//! index on `tenant.slug` is the only real uniqueness guarantee; callers
//! treat a unique-violation on insert as the authoritative "subdomain
//! taken" signal and any earlier existence check as a latency optimization.

use sea_orm::*;

use vitrine_common::VitrineError;

use crate::entity::{account, portfolio, tenant};
use crate::model::NewTenant;

/// Map a database error to the application error type
pub(crate) fn map_db_err(err: DbErr) -> VitrineError {
    VitrineError::Database(err.to_string())
}

/// The conflict for a unique violation on the slug index, if that is what
/// the error is
fn slug_conflict(sql_err: Option<SqlErr>, slug: &str) -> Option<VitrineError> {
    match sql_err {
        Some(SqlErr::UniqueConstraintViolation(_)) => Some(VitrineError::SlugTaken(slug.to_string())),
        _ => None,
    }
}

/// Map an insert error, translating a unique violation on the slug index
/// into a conflict
fn map_insert_err(err: DbErr, slug: &str) -> VitrineError {
    slug_conflict(err.sql_err(), slug).unwrap_or_else(|| map_db_err(err))
}

/// Find a tenant by slug
pub async fn find_tenant_by_slug(
    db: &DatabaseConnection,
    slug: &str,
) -> Result<Option<tenant::Model>, VitrineError> {
    tenant::Entity::find()
        .filter(tenant::Column::Slug.eq(slug))
        .one(db)
        .await
        .map_err(map_db_err)
}

/// Find a tenant by id
pub async fn find_tenant_by_id(
    db: &DatabaseConnection,
    id: i64,
) -> Result<Option<tenant::Model>, VitrineError> {
    tenant::Entity::find_by_id(id).one(db).await.map_err(map_db_err)
}

/// Find the account row for an identity-provider subject
pub async fn find_account_by_subject(
    db: &DatabaseConnection,
    subject: &str,
) -> Result<Option<account::Model>, VitrineError> {
    account::Entity::find()
        .filter(account::Column::Subject.eq(subject))
        .one(db)
        .await
        .map_err(map_db_err)
}

/// All tenants, newest first
pub async fn list_tenants(db: &DatabaseConnection) -> Result<Vec<tenant::Model>, VitrineError> {
    tenant::Entity::find()
        .order_by_desc(tenant::Column::CreatedAt)
        .all(db)
        .await
        .map_err(map_db_err)
}

/// Tenants owned by one account, newest first
pub async fn list_tenants_by_owner(
    db: &DatabaseConnection,
    owner_id: i64,
) -> Result<Vec<tenant::Model>, VitrineError> {
    tenant::Entity::find()
        .filter(tenant::Column::OwnerId.eq(owner_id))
        .order_by_desc(tenant::Column::CreatedAt)
        .all(db)
        .await
        .map_err(map_db_err)
}

/// Create a tenant together with its default portfolio in one transaction.
///
/// Returns the new tenant id. A unique violation on the slug index maps to
/// `VitrineError::SlugTaken`; partial state (tenant without portfolio)
/// cannot be observed because both inserts commit or roll back together.
pub async fn create_tenant_with_portfolio(
    db: &DatabaseConnection,
    new: NewTenant,
) -> Result<i64, VitrineError> {
    let now = chrono::Utc::now().naive_utc();
    let tx = db.begin().await.map_err(map_db_err)?;

    let entity = tenant::ActiveModel {
        slug: Set(new.slug.clone()),
        display_name: Set(new.display_name.clone()),
        icon: Set(Some(new.icon)),
        owner_id: Set(new.owner_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let insert = tenant::Entity::insert(entity)
        .exec(&tx)
        .await
        .map_err(|e| map_insert_err(e, &new.slug))?;
    let tenant_id = insert.last_insert_id;

    let default_portfolio = portfolio::ActiveModel {
        tenant_id: Set(tenant_id),
        title: Set(new.display_name.clone()),
        description: Set(Some(format!(
            "Welcome to {}'s portfolio",
            new.display_name
        ))),
        published: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    portfolio::Entity::insert(default_portfolio)
        .exec(&tx)
        .await
        .map_err(map_db_err)?;

    tx.commit().await.map_err(map_db_err)?;

    Ok(tenant_id)
}

/// Delete a tenant and its dependent portfolio rows in one transaction.
///
/// Portfolio rows go first so the delete order satisfies the foreign key
/// without relying on cascading deletes. Returns whether a tenant row was
/// actually removed.
pub async fn delete_tenant_cascade(
    db: &DatabaseConnection,
    tenant_id: i64,
) -> Result<bool, VitrineError> {
    let tx = db.begin().await.map_err(map_db_err)?;

    portfolio::Entity::delete_many()
        .filter(portfolio::Column::TenantId.eq(tenant_id))
        .exec(&tx)
        .await
        .map_err(map_db_err)?;

    let res = tenant::Entity::delete_many()
        .filter(tenant::Column::Id.eq(tenant_id))
        .exec(&tx)
        .await
        .map_err(map_db_err)?;

    tx.commit().await.map_err(map_db_err)?;

    Ok(res.rows_affected > 0)
}
