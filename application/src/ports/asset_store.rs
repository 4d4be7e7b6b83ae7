//! Asset store port.
//!
//! The persistence engine is an external collaborator; the application layer
//! only speaks this interface. Implementations (adapters) live in the
//! infrastructure layer, and tests substitute an in-memory fake. Each call is
//! atomic on its own; no transaction is ever held across a suspension point.

use async_trait::async_trait;
use thiserror::Error;
use waypost_domain::{AssetId, AssetRecord, AssetType, FieldMap};

/// Errors surfaced by store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("store backend error: {0}")]
    Backend(String),
}

/// Port for asset persistence.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Insert a new record and return its generated identifier.
    async fn create(&self, asset_type: AssetType, fields: FieldMap)
    -> Result<AssetId, StoreError>;

    async fn find_by_id(
        &self,
        asset_type: AssetType,
        id: &AssetId,
    ) -> Result<Option<AssetRecord>, StoreError>;

    /// Exact string equality on one field.
    async fn find_by_exact(
        &self,
        asset_type: AssetType,
        field: &str,
        value: &str,
    ) -> Result<Vec<AssetRecord>, StoreError>;

    async fn find_all(&self, asset_type: AssetType) -> Result<Vec<AssetRecord>, StoreError>;

    /// Merge-overwrite the given fields onto an existing record.
    async fn update_by_id(
        &self,
        asset_type: AssetType,
        id: &AssetId,
        fields: FieldMap,
    ) -> Result<(), StoreError>;

    async fn delete_by_id(&self, asset_type: AssetType, id: &AssetId) -> Result<(), StoreError>;
}
