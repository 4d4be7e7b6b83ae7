//! Tool execution use case.
//!
//! Maps a validated tool call to its concrete store mutation — one handler
//! per catalogue tool. Every failure mode is converted to an
//! [`ExecutionOutcome`] value at this boundary; nothing propagates as a panic.
//!
//! The disambiguation invariant lives here: a mutating selector operation
//! applies only when exactly one record matches. More than one match returns
//! the full candidate set and leaves the store untouched.

use crate::ports::asset_store::{AssetStore, StoreError};
use crate::use_cases::resolve_selector::SelectorResolver;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info};
use waypost_domain::{
    AssetId, AssetRecord, AssetType, CreateRoadArgs, ExecError, ExecutionOutcome, FieldMap,
    SelectorSpec, ToolCall, ToolCatalogue, ToolInvocation, default_catalogue,
};

const NO_RESULTS: &str = "No results found";

/// Executes catalogue tools against the asset store.
#[derive(Clone)]
pub struct ToolExecutor {
    store: Arc<dyn AssetStore>,
    resolver: SelectorResolver,
    catalogue: ToolCatalogue,
}

impl ToolExecutor {
    pub fn new(store: Arc<dyn AssetStore>) -> Self {
        Self {
            resolver: SelectorResolver::new(store.clone()),
            store,
            catalogue: default_catalogue(),
        }
    }

    pub fn catalogue(&self) -> &ToolCatalogue {
        &self.catalogue
    }

    /// Execute one tool call. Always returns an outcome value.
    pub async fn execute(&self, call: &ToolCall) -> ExecutionOutcome {
        let invocation = match ToolInvocation::from_call(call) {
            Ok(invocation) => invocation,
            Err(e) => {
                debug!(tool = %call.name, error = %e, "rejected tool call");
                return ExecutionOutcome::from_error(&call.name, e);
            }
        };
        let tool = invocation.tool_name();
        match self.dispatch(invocation).await {
            Ok(outcome) => outcome,
            Err(e) => ExecutionOutcome::from_error(tool, e),
        }
    }

    async fn dispatch(&self, invocation: ToolInvocation) -> Result<ExecutionOutcome, ExecError> {
        let tool = invocation.tool_name();
        match invocation {
            ToolInvocation::CreateRoad(args) => self.create_road(tool, args).await,
            ToolInvocation::UpdateRoad { id, fields } => {
                self.update_road(tool, &id, fields).await
            }
            ToolInvocation::UpdateRoadBy { selector, fields } => {
                self.update_road_by(tool, &selector, fields).await
            }
            ToolInvocation::DeleteRoadBy { selector } => {
                self.delete_road_by(tool, &selector).await
            }
            ToolInvocation::DeleteAsset { id, asset_type } => {
                self.delete_asset(tool, &id, asset_type).await
            }
            ToolInvocation::FindAsset { selector } => self.find_asset(tool, &selector).await,
        }
    }

    async fn create_road(
        &self,
        tool: &str,
        args: CreateRoadArgs,
    ) -> Result<ExecutionOutcome, ExecError> {
        let name = args.name.clone();
        let id = self
            .store
            .create(AssetType::Road, args.into_fields())
            .await
            .map_err(store_fault)?;
        info!(%id, %name, "road created");
        Ok(ExecutionOutcome::ok_with_data(
            tool,
            format!("Road \"{name}\" created"),
            json!({"id": id.to_string()}),
        ))
    }

    async fn update_road(
        &self,
        tool: &str,
        id: &str,
        fields: FieldMap,
    ) -> Result<ExecutionOutcome, ExecError> {
        let id = parse_id(id, AssetType::Road)?;
        match self.store.update_by_id(AssetType::Road, &id, fields).await {
            Ok(()) => Ok(ExecutionOutcome::ok_with_data(
                tool,
                "Road updated",
                json!({"id": id.to_string()}),
            )),
            Err(StoreError::NotFound) => Err(ExecError::NotFound(format!("Road not found: {id}"))),
            Err(e) => Err(store_fault(e)),
        }
    }

    async fn update_road_by(
        &self,
        tool: &str,
        selector: &SelectorSpec,
        fields: FieldMap,
    ) -> Result<ExecutionOutcome, ExecError> {
        let target = self.resolve_single(selector).await?;
        let Some(target) = target else {
            return Ok(ExecutionOutcome::failed(tool, NO_RESULTS));
        };
        match self
            .store
            .update_by_id(AssetType::Road, &target.id, fields)
            .await
        {
            Ok(()) => Ok(ExecutionOutcome::ok_with_data(
                tool,
                format!("Road \"{}\" updated", target.name().unwrap_or("(unnamed)")),
                json!({"id": target.id.to_string()}),
            )),
            Err(StoreError::NotFound) => {
                Err(ExecError::NotFound(format!("Road not found: {}", target.id)))
            }
            Err(e) => Err(store_fault(e)),
        }
    }

    async fn delete_road_by(
        &self,
        tool: &str,
        selector: &SelectorSpec,
    ) -> Result<ExecutionOutcome, ExecError> {
        let target = self.resolve_single(selector).await?;
        let Some(target) = target else {
            return Ok(ExecutionOutcome::failed(tool, NO_RESULTS));
        };
        match self.store.delete_by_id(AssetType::Road, &target.id).await {
            Ok(()) => Ok(ExecutionOutcome::ok_with_data(
                tool,
                format!("Road \"{}\" deleted", target.name().unwrap_or("(unnamed)")),
                json!({"id": target.id.to_string()}),
            )),
            Err(StoreError::NotFound) => {
                Err(ExecError::NotFound(format!("Road not found: {}", target.id)))
            }
            Err(e) => Err(store_fault(e)),
        }
    }

    async fn delete_asset(
        &self,
        tool: &str,
        id: &str,
        asset_type: AssetType,
    ) -> Result<ExecutionOutcome, ExecError> {
        let id = parse_id(id, asset_type)?;
        match self.store.delete_by_id(asset_type, &id).await {
            Ok(()) => Ok(ExecutionOutcome::ok_with_data(
                tool,
                format!("{asset_type} deleted"),
                json!({"id": id.to_string()}),
            )),
            Err(StoreError::NotFound) => {
                Err(ExecError::NotFound(format!("{asset_type} not found: {id}")))
            }
            Err(e) => Err(store_fault(e)),
        }
    }

    async fn find_asset(
        &self,
        tool: &str,
        selector: &SelectorSpec,
    ) -> Result<ExecutionOutcome, ExecError> {
        let matches = self.resolver.resolve(selector).await.map_err(store_fault)?;
        let message = if matches.is_empty() {
            NO_RESULTS.to_string()
        } else {
            format!("Found {} results", matches.len())
        };
        // Zero matches is still a structural success for a find.
        Ok(ExecutionOutcome::ok_with_data(
            tool,
            message,
            Value::Array(to_wire(&matches)),
        ))
    }

    /// Resolve a mutating selector down to its unique target.
    ///
    /// `Ok(None)` means zero matches; more than one match is the ambiguity
    /// error carrying every candidate, and the mutation is never applied.
    async fn resolve_single(
        &self,
        selector: &SelectorSpec,
    ) -> Result<Option<AssetRecord>, ExecError> {
        let mut matches = self.resolver.resolve(selector).await.map_err(store_fault)?;
        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop()),
            n => {
                debug!(count = n, by = selector.by.as_str(), "ambiguous mutating selector");
                Err(ExecError::Ambiguous {
                    candidates: to_wire(&matches),
                })
            }
        }
    }
}

fn to_wire(records: &[AssetRecord]) -> Vec<Value> {
    records.iter().map(AssetRecord::to_wire).collect()
}

fn parse_id(id: &str, asset_type: AssetType) -> Result<AssetId, ExecError> {
    AssetId::parse(id).ok_or_else(|| ExecError::NotFound(format!("{asset_type} not found: {id}")))
}

fn store_fault(e: StoreError) -> ExecError {
    ExecError::Store(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeStore;
    use serde_json::json;

    fn call(name: &str, args: Value) -> ToolCall {
        ToolCall {
            name: name.into(),
            arguments: args.as_object().cloned().unwrap_or_default(),
        }
    }

    fn create_call(name: &str) -> ToolCall {
        call(
            "create_road",
            json!({
                "name": name,
                "condition": "good",
                "surfaceType": "asphalt",
                "trafficVolume": "high"
            }),
        )
    }

    async fn executor() -> (Arc<FakeStore>, ToolExecutor) {
        let store = Arc::new(FakeStore::new());
        (store.clone(), ToolExecutor::new(store))
    }

    #[tokio::test]
    async fn create_then_find_by_id_round_trip() {
        let (_, executor) = executor().await;
        let created = executor.execute(&create_call("Main Street")).await;
        assert!(created.success, "{}", created.message);
        let id = created.data.unwrap()["id"].as_str().unwrap().to_string();

        let found = executor
            .execute(&call("find_asset", json!({"by": "id", "value": id, "type": "Road"})))
            .await;
        assert!(found.success);
        let records = found.data.unwrap();
        let records = records.as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["name"], "Main Street");
        assert_eq!(records[0]["condition"], "good");
        assert_eq!(records[0]["surfaceType"], "asphalt");
        assert_eq!(records[0]["trafficVolume"], "high");
    }

    #[tokio::test]
    async fn update_by_name_then_find() {
        let (_, executor) = executor().await;
        executor.execute(&create_call("Main Street")).await;

        let updated = executor
            .execute(&call(
                "update_road_by",
                json!({"by": "name", "value": "Main Street", "fields": {"condition": "poor"}}),
            ))
            .await;
        assert!(updated.success, "{}", updated.message);

        let found = executor
            .execute(&call(
                "find_asset",
                json!({"by": "name", "value": "Main Street", "type": "Road"}),
            ))
            .await;
        let records = found.data.unwrap();
        let records = records.as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["condition"], "poor");
    }

    #[tokio::test]
    async fn ambiguous_update_returns_candidates_and_mutates_nothing() {
        let (store, executor) = executor().await;
        executor.execute(&create_call("Main Street East")).await;
        executor.execute(&create_call("Main Street West")).await;

        let outcome = executor
            .execute(&call(
                "update_road_by",
                json!({"by": "nameContains", "value": "Main Street", "fields": {"condition": "poor"}}),
            ))
            .await;

        assert!(!outcome.success);
        let candidates = outcome.data.unwrap();
        assert_eq!(candidates.as_array().unwrap().len(), 2);

        // Store untouched: both roads still report their original condition.
        for record in store.all(AssetType::Road).await {
            assert_eq!(record.get_str("condition"), Some("good"));
        }
    }

    #[tokio::test]
    async fn delete_then_find_is_empty() {
        let (_, executor) = executor().await;
        executor.execute(&create_call("Cedar Lane")).await;

        let deleted = executor
            .execute(&call(
                "delete_road_by",
                json!({"by": "name", "value": "Cedar Lane"}),
            ))
            .await;
        assert!(deleted.success, "{}", deleted.message);

        let found = executor
            .execute(&call(
                "find_asset",
                json!({"by": "name", "value": "Cedar Lane", "type": "Road"}),
            ))
            .await;
        assert!(found.success);
        assert_eq!(found.message, "No results found");
        assert!(found.data.unwrap().as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn selector_miss_on_mutation_is_failure() {
        let (_, executor) = executor().await;
        let outcome = executor
            .execute(&call(
                "delete_road_by",
                json!({"by": "name", "value": "Ghost Road"}),
            ))
            .await;
        assert!(!outcome.success);
        assert_eq!(outcome.message, "No results found");
        assert_eq!(outcome.data, None);
    }

    #[tokio::test]
    async fn update_road_unknown_id_is_not_found() {
        let (_, executor) = executor().await;
        let outcome = executor
            .execute(&call(
                "update_road",
                json!({"id": "64f1a2b3c4d5e6f708192a3b", "fields": {"condition": "fair"}}),
            ))
            .await;
        assert!(!outcome.success);
        assert!(outcome.message.contains("not found"));
    }

    #[tokio::test]
    async fn invalid_arguments_surface_as_failure_value() {
        let (_, executor) = executor().await;
        let outcome = executor
            .execute(&call("create_road", json!({"name": "Main Street"})))
            .await;
        assert!(!outcome.success);
        assert!(outcome.message.contains("condition"));
    }

    #[tokio::test]
    async fn unknown_tool_is_failure_value() {
        let (_, executor) = executor().await;
        let outcome = executor.execute(&call("paint_road", json!({}))).await;
        assert!(!outcome.success);
        assert!(outcome.message.contains("Unknown tool"));
    }

    #[tokio::test]
    async fn store_fault_becomes_failure_outcome() {
        let (store, executor) = executor().await;
        store.fail_next("disk full").await;
        let outcome = executor.execute(&create_call("Main Street")).await;
        assert!(!outcome.success);
        assert!(outcome.message.contains("disk full"));
    }

    #[tokio::test]
    async fn delete_asset_by_id_and_type() {
        let (store, executor) = executor().await;
        let mut fields = waypost_domain::FieldMap::new();
        fields.insert("name".into(), json!("Grader 7"));
        let id = store.seed(AssetType::Vehicle, fields).await;

        let outcome = executor
            .execute(&call(
                "delete_asset",
                json!({"id": id.as_str(), "type": "Vehicle"}),
            ))
            .await;
        assert!(outcome.success);
        assert!(store.all(AssetType::Vehicle).await.is_empty());

        let again = executor
            .execute(&call(
                "delete_asset",
                json!({"id": id.as_str(), "type": "Vehicle"}),
            ))
            .await;
        assert!(!again.success);
        assert!(again.message.contains("not found"));
    }
}
