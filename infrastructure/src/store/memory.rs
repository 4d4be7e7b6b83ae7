//! In-memory asset store adapter.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;
use waypost_application::ports::asset_store::{AssetStore, StoreError};
use waypost_domain::{AssetId, AssetRecord, AssetType, FieldMap};

#[derive(Default)]
struct Shelves {
    roads: BTreeMap<AssetId, AssetRecord>,
    vehicles: BTreeMap<AssetId, AssetRecord>,
    next_seq: u64,
}

impl Shelves {
    fn shelf(&self, asset_type: AssetType) -> &BTreeMap<AssetId, AssetRecord> {
        match asset_type {
            AssetType::Road => &self.roads,
            AssetType::Vehicle => &self.vehicles,
        }
    }

    fn shelf_mut(&mut self, asset_type: AssetType) -> &mut BTreeMap<AssetId, AssetRecord> {
        match asset_type {
            AssetType::Road => &mut self.roads,
            AssetType::Vehicle => &mut self.vehicles,
        }
    }

    /// Timestamp-prefixed monotonic identifier: iteration order of the
    /// id-keyed map is insertion order.
    fn next_id(&mut self) -> AssetId {
        self.next_seq += 1;
        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&(Utc::now().timestamp() as u32).to_be_bytes());
        bytes[4..].copy_from_slice(&self.next_seq.to_be_bytes());
        AssetId::from_bytes(bytes)
    }
}

/// Process-local [`AssetStore`] backed by per-type record maps.
#[derive(Default)]
pub struct MemoryAssetStore {
    shelves: RwLock<Shelves>,
}

impl MemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate a small fixed inventory for demos and exploratory use.
    pub async fn seed_demo_data(&self) -> Result<(), StoreError> {
        let roads: [FieldMap; 3] = [
            json_fields(json!({
                "name": "Main Street East",
                "condition": "good",
                "surfaceType": "asphalt",
                "trafficVolume": "high",
                "lanes": 4,
                "speedLimit": 50,
                "qrTagId": "ROA-101"
            })),
            json_fields(json!({
                "name": "Main Street West",
                "condition": "fair",
                "surfaceType": "asphalt",
                "trafficVolume": "medium",
                "lanes": 2,
                "qrTagId": "ROA-102"
            })),
            json_fields(json!({
                "name": "Cedar Lane",
                "condition": "poor",
                "surfaceType": "gravel",
                "trafficVolume": "low",
                "notes": "washboarding near the creek crossing"
            })),
        ];
        let vehicles: [FieldMap; 2] = [
            json_fields(json!({
                "name": "Grader 7",
                "identifier": "G-07",
                "condition": "good",
                "mileage": 48210,
                "qrTagId": "VEH-201"
            })),
            json_fields(json!({
                "name": "Plow Truck 2",
                "identifier": "PT-02",
                "condition": "fair",
                "hours": 1320
            })),
        ];

        for fields in roads {
            self.create(AssetType::Road, fields).await?;
        }
        for fields in vehicles {
            self.create(AssetType::Vehicle, fields).await?;
        }
        Ok(())
    }
}

fn json_fields(value: serde_json::Value) -> FieldMap {
    value.as_object().cloned().unwrap_or_default()
}

#[async_trait]
impl AssetStore for MemoryAssetStore {
    async fn create(
        &self,
        asset_type: AssetType,
        fields: FieldMap,
    ) -> Result<AssetId, StoreError> {
        let mut shelves = self.shelves.write().await;
        let id = shelves.next_id();
        let now = Utc::now();
        let record = AssetRecord {
            id: id.clone(),
            asset_type,
            fields,
            created_at: now,
            updated_at: now,
        };
        shelves.shelf_mut(asset_type).insert(id.clone(), record);
        debug!(%id, %asset_type, "record created");
        Ok(id)
    }

    async fn find_by_id(
        &self,
        asset_type: AssetType,
        id: &AssetId,
    ) -> Result<Option<AssetRecord>, StoreError> {
        let shelves = self.shelves.read().await;
        Ok(shelves.shelf(asset_type).get(id).cloned())
    }

    async fn find_by_exact(
        &self,
        asset_type: AssetType,
        field: &str,
        value: &str,
    ) -> Result<Vec<AssetRecord>, StoreError> {
        let shelves = self.shelves.read().await;
        Ok(shelves
            .shelf(asset_type)
            .values()
            .filter(|r| r.get_str(field) == Some(value))
            .cloned()
            .collect())
    }

    async fn find_all(&self, asset_type: AssetType) -> Result<Vec<AssetRecord>, StoreError> {
        let shelves = self.shelves.read().await;
        Ok(shelves.shelf(asset_type).values().cloned().collect())
    }

    async fn update_by_id(
        &self,
        asset_type: AssetType,
        id: &AssetId,
        fields: FieldMap,
    ) -> Result<(), StoreError> {
        let mut shelves = self.shelves.write().await;
        let record = shelves
            .shelf_mut(asset_type)
            .get_mut(id)
            .ok_or(StoreError::NotFound)?;
        for (k, v) in fields {
            record.fields.insert(k, v);
        }
        record.updated_at = Utc::now();
        debug!(%id, %asset_type, "record updated");
        Ok(())
    }

    async fn delete_by_id(&self, asset_type: AssetType, id: &AssetId) -> Result<(), StoreError> {
        let mut shelves = self.shelves.write().await;
        shelves
            .shelf_mut(asset_type)
            .remove(id)
            .ok_or(StoreError::NotFound)?;
        debug!(%id, %asset_type, "record deleted");
        Ok(())
    }
}
