//! `SeaORM` Entity for the tenant table
//!
//! The unique index on `slug` is the authoritative uniqueness guarantee for
//! subdomain claims; pre-checks against the cache or a prior SELECT are
//! optimizations only.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "tenant")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Claimed subdomain label, immutable once created
    #[sea_orm(unique)]
    pub slug: String,
    pub display_name: String,
    pub icon: Option<String>,
    pub owner_id: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub settings: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::OwnerId",
        to = "super::account::Column::Id"
    )]
    Account,
    #[sea_orm(has_many = "super::portfolio::Entity")]
    Portfolio,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl Related<super::portfolio::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Portfolio.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
