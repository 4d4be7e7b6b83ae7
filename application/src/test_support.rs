//! Shared in-memory fakes for use case tests.

use crate::ports::asset_store::{AssetStore, StoreError};
use crate::ports::llm_gateway::{AssistantGateway, GatewayError, GatewayReply};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex as StdMutex;
use tokio::sync::Mutex;
use waypost_domain::{AssetId, AssetRecord, AssetType, FieldMap, Message};

#[derive(Default)]
struct FakeStoreInner {
    records: Vec<AssetRecord>,
    next_seq: u64,
    fail_next: Option<String>,
}

/// In-memory [`AssetStore`] with fault injection.
#[derive(Default)]
pub struct FakeStore {
    inner: Mutex<FakeStoreInner>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record directly, bypassing fault injection.
    pub async fn seed(&self, asset_type: AssetType, fields: FieldMap) -> AssetId {
        let mut inner = self.inner.lock().await;
        let id = next_id(&mut inner);
        let now = Utc::now();
        inner.records.push(AssetRecord {
            id: id.clone(),
            asset_type,
            fields,
            created_at: now,
            updated_at: now,
        });
        id
    }

    /// Make the next store operation fail with a backend error.
    pub async fn fail_next(&self, message: &str) {
        self.inner.lock().await.fail_next = Some(message.to_string());
    }

    pub async fn all(&self, asset_type: AssetType) -> Vec<AssetRecord> {
        self.inner
            .lock()
            .await
            .records
            .iter()
            .filter(|r| r.asset_type == asset_type)
            .cloned()
            .collect()
    }
}

fn next_id(inner: &mut FakeStoreInner) -> AssetId {
    inner.next_seq += 1;
    let mut bytes = [0u8; 12];
    bytes[4..].copy_from_slice(&inner.next_seq.to_be_bytes());
    AssetId::from_bytes(bytes)
}

fn check_fault(inner: &mut FakeStoreInner) -> Result<(), StoreError> {
    match inner.fail_next.take() {
        Some(msg) => Err(StoreError::Backend(msg)),
        None => Ok(()),
    }
}

#[async_trait]
impl AssetStore for FakeStore {
    async fn create(
        &self,
        asset_type: AssetType,
        fields: FieldMap,
    ) -> Result<AssetId, StoreError> {
        let mut inner = self.inner.lock().await;
        check_fault(&mut inner)?;
        let id = next_id(&mut inner);
        let now = Utc::now();
        inner.records.push(AssetRecord {
            id: id.clone(),
            asset_type,
            fields,
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn find_by_id(
        &self,
        asset_type: AssetType,
        id: &AssetId,
    ) -> Result<Option<AssetRecord>, StoreError> {
        let mut inner = self.inner.lock().await;
        check_fault(&mut inner)?;
        Ok(inner
            .records
            .iter()
            .find(|r| r.asset_type == asset_type && &r.id == id)
            .cloned())
    }

    async fn find_by_exact(
        &self,
        asset_type: AssetType,
        field: &str,
        value: &str,
    ) -> Result<Vec<AssetRecord>, StoreError> {
        let mut inner = self.inner.lock().await;
        check_fault(&mut inner)?;
        Ok(inner
            .records
            .iter()
            .filter(|r| r.asset_type == asset_type && r.get_str(field) == Some(value))
            .cloned()
            .collect())
    }

    async fn find_all(&self, asset_type: AssetType) -> Result<Vec<AssetRecord>, StoreError> {
        let mut inner = self.inner.lock().await;
        check_fault(&mut inner)?;
        Ok(inner
            .records
            .iter()
            .filter(|r| r.asset_type == asset_type)
            .cloned()
            .collect())
    }

    async fn update_by_id(
        &self,
        asset_type: AssetType,
        id: &AssetId,
        fields: FieldMap,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        check_fault(&mut inner)?;
        let record = inner
            .records
            .iter_mut()
            .find(|r| r.asset_type == asset_type && &r.id == id)
            .ok_or(StoreError::NotFound)?;
        for (k, v) in fields {
            record.fields.insert(k, v);
        }
        record.updated_at = Utc::now();
        Ok(())
    }

    async fn delete_by_id(&self, asset_type: AssetType, id: &AssetId) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        check_fault(&mut inner)?;
        let before = inner.records.len();
        inner
            .records
            .retain(|r| !(r.asset_type == asset_type && &r.id == id));
        if inner.records.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

/// Gateway fake that replays a scripted queue of replies and errors, and
/// records the transcript length of every call it receives.
#[derive(Default)]
pub struct ScriptedFakeGateway {
    script: StdMutex<VecDeque<Result<GatewayReply, GatewayError>>>,
    history_lens: StdMutex<Vec<usize>>,
}

impl ScriptedFakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_reply(&self, reply: GatewayReply) {
        self.script.lock().unwrap().push_back(Ok(reply));
    }

    pub fn push_error(&self, error: GatewayError) {
        self.script.lock().unwrap().push_back(Err(error));
    }

    /// Transcript length seen on each call, in call order.
    pub fn history_lens(&self) -> Vec<usize> {
        self.history_lens.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssistantGateway for ScriptedFakeGateway {
    async fn send_conversation(
        &self,
        _prompt: &str,
        history: &[Message],
        _tool_schemas: &[Value],
    ) -> Result<GatewayReply, GatewayError> {
        self.history_lens.lock().unwrap().push(history.len());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::RequestFailed("script exhausted".into())))
    }
}
