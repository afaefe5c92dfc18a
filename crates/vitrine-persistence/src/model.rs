//! Domain model types for persistence operations

use serde::{Deserialize, Serialize};

/// Input for creating a tenant (with its default portfolio)
#[derive(Clone, Debug)]
pub struct NewTenant {
    pub slug: String,
    pub display_name: String,
    pub icon: String,
    pub owner_id: i64,
}

/// One media attachment on a portfolio
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MediaFile {
    pub id: String,
    pub url: String,
    pub path: String,
    pub category: String,
    pub name: String,
    pub size: i64,
}

/// Partial update for a portfolio; `None` fields are left unchanged
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PortfolioPatch {
    pub content: Option<String>,
    pub published: Option<bool>,
    pub media_files: Option<Vec<MediaFile>>,
}

impl PortfolioPatch {
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.published.is_none() && self.media_files.is_none()
    }
}
