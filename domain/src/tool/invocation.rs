//! Typed tool invocations.
//!
//! [`ToolInvocation::from_call`] is the single untyped-to-typed boundary:
//! each catalogue tool has exactly one conversion arm that checks required
//! fields, normalizes enum values through the synonym tables, and drops
//! unknown fields. Downstream code only ever sees the typed union.

use super::catalog;
use super::entities::ToolCall;
use super::value_objects::ExecError;
use crate::asset::{AssetType, Condition, FieldMap, SurfaceType, TrafficVolume, fields};
use crate::draft::{RoadDraft, normalize_integer, normalize_string};
use crate::selector::{SelectBy, SelectorSpec};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Complete, validated arguments for `create_road`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoadArgs {
    pub name: String,
    pub condition: Condition,
    pub surface_type: SurfaceType,
    pub traffic_volume: TrafficVolume,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_tag_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lanes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_limit: Option<i64>,
}

impl CreateRoadArgs {
    /// Flatten into a camelCase field map for the store.
    pub fn into_fields(self) -> FieldMap {
        let mut map = FieldMap::new();
        map.insert(fields::NAME.into(), Value::String(self.name));
        map.insert(
            fields::CONDITION.into(),
            Value::String(self.condition.as_str().into()),
        );
        map.insert(
            fields::SURFACE_TYPE.into(),
            Value::String(self.surface_type.as_str().into()),
        );
        map.insert(
            fields::TRAFFIC_VOLUME.into(),
            Value::String(self.traffic_volume.as_str().into()),
        );
        if let Some(v) = self.location {
            map.insert(fields::LOCATION.into(), Value::String(v));
        }
        if let Some(v) = self.notes {
            map.insert(fields::NOTES.into(), Value::String(v));
        }
        if let Some(v) = self.qr_tag_id {
            map.insert(fields::QR_TAG_ID.into(), Value::String(v));
        }
        if let Some(v) = self.length.and_then(serde_json::Number::from_f64) {
            map.insert(fields::LENGTH.into(), Value::Number(v));
        }
        if let Some(v) = self.width.and_then(serde_json::Number::from_f64) {
            map.insert(fields::WIDTH.into(), Value::Number(v));
        }
        if let Some(v) = self.lanes {
            map.insert(fields::LANES.into(), Value::Number(v.into()));
        }
        if let Some(v) = self.speed_limit {
            map.insert(fields::SPEED_LIMIT.into(), Value::Number(v.into()));
        }
        map
    }
}

/// A validated, executable intent — tagged union over the catalogue.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolInvocation {
    CreateRoad(CreateRoadArgs),
    UpdateRoad { id: String, fields: FieldMap },
    UpdateRoadBy { selector: SelectorSpec, fields: FieldMap },
    DeleteRoadBy { selector: SelectorSpec },
    DeleteAsset { id: String, asset_type: AssetType },
    FindAsset { selector: SelectorSpec },
}

impl ToolInvocation {
    /// Canonical tool name of this invocation.
    pub fn tool_name(&self) -> &'static str {
        match self {
            ToolInvocation::CreateRoad(_) => catalog::CREATE_ROAD,
            ToolInvocation::UpdateRoad { .. } => catalog::UPDATE_ROAD,
            ToolInvocation::UpdateRoadBy { .. } => catalog::UPDATE_ROAD_BY,
            ToolInvocation::DeleteRoadBy { .. } => catalog::DELETE_ROAD_BY,
            ToolInvocation::DeleteAsset { .. } => catalog::DELETE_ASSET,
            ToolInvocation::FindAsset { .. } => catalog::FIND_ASSET,
        }
    }

    /// Convert an untyped call into a typed invocation.
    pub fn from_call(call: &ToolCall) -> Result<Self, ExecError> {
        match call.name.as_str() {
            catalog::CREATE_ROAD => parse_create_road(call),
            catalog::UPDATE_ROAD => parse_update_road(call),
            catalog::UPDATE_ROAD_BY => {
                let selector = parse_selector(call, Some(AssetType::Road))?;
                let fields = parse_update_fields(call)?;
                Ok(ToolInvocation::UpdateRoadBy { selector, fields })
            }
            catalog::DELETE_ROAD_BY => {
                let selector = parse_selector(call, Some(AssetType::Road))?;
                Ok(ToolInvocation::DeleteRoadBy { selector })
            }
            catalog::DELETE_ASSET => parse_delete_asset(call),
            catalog::FIND_ASSET => {
                let selector = parse_selector(call, None)?;
                Ok(ToolInvocation::FindAsset { selector })
            }
            other => Err(ExecError::UnknownTool(other.to_string())),
        }
    }
}

fn parse_create_road(call: &ToolCall) -> Result<ToolInvocation, ExecError> {
    let draft = RoadDraft::from_fields(&call.arguments);
    let validation = draft.validate_for_create();
    match draft.build_create_args() {
        Some(args) => Ok(ToolInvocation::CreateRoad(args)),
        None => {
            let joined = validation
                .errors
                .iter()
                .map(|(field, msg)| format!("{field}: {msg}"))
                .collect::<Vec<_>>()
                .join("; ");
            Err(ExecError::InvalidArguments(joined))
        }
    }
}

fn parse_update_road(call: &ToolCall) -> Result<ToolInvocation, ExecError> {
    let id = require_string(call, "id")?;
    let fields = parse_update_fields(call)?;
    Ok(ToolInvocation::UpdateRoad { id, fields })
}

fn parse_delete_asset(call: &ToolCall) -> Result<ToolInvocation, ExecError> {
    let id = require_string(call, "id")?;
    let type_text = require_string(call, "type")?;
    let asset_type = AssetType::from_text(&type_text).ok_or_else(|| {
        ExecError::InvalidArguments(format!(
            "\"{type_text}\" is not a known asset type (Road, Vehicle)"
        ))
    })?;
    Ok(ToolInvocation::DeleteAsset { id, asset_type })
}

/// Normalize the `fields` argument of an update through the draft logic.
/// `name` is honored when explicitly present — explicit arguments are not
/// an ambiguous flow.
fn parse_update_fields(call: &ToolCall) -> Result<FieldMap, ExecError> {
    let raw = call
        .get_object("fields")
        .ok_or_else(|| ExecError::InvalidArguments("missing required argument: fields".into()))?;
    let normalized = RoadDraft::from_fields(raw).build_update_fields(true);
    if normalized.is_empty() {
        return Err(ExecError::InvalidArguments(
            "fields must contain at least one recognizable value".into(),
        ));
    }
    Ok(normalized)
}

fn parse_selector(
    call: &ToolCall,
    forced_type: Option<AssetType>,
) -> Result<SelectorSpec, ExecError> {
    let by_text = require_string(call, "by")?;
    let by = SelectBy::from_text(&by_text).ok_or_else(|| {
        ExecError::InvalidArguments(format!(
            "\"{by_text}\" is not a selector strategy (id, name, nameContains, qrTagId, search)"
        ))
    })?;

    // The empty string is meaningful for `search`, so the value is taken
    // verbatim; only its presence is required.
    let value = match call.arguments.get("value") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(_) | None => {
            return Err(ExecError::InvalidArguments(
                "missing required argument: value".into(),
            ));
        }
    };

    let asset_type = match forced_type {
        Some(t) => Some(t),
        None => match call.arguments.get("type") {
            None | Some(Value::Null) => None,
            Some(v) => {
                let text = normalize_string(v).unwrap_or_default();
                Some(AssetType::from_text(&text).ok_or_else(|| {
                    ExecError::InvalidArguments(format!(
                        "\"{text}\" is not a known asset type (Road, Vehicle)"
                    ))
                })?)
            }
        },
    };

    // Non-positive or unparseable limits are ignored rather than rejected.
    let limit = call
        .arguments
        .get("limit")
        .and_then(normalize_integer)
        .filter(|n| *n > 0)
        .map(|n| n as usize);

    Ok(SelectorSpec {
        by,
        value,
        asset_type,
        limit,
    })
}

fn require_string(call: &ToolCall, key: &str) -> Result<String, ExecError> {
    call.arguments
        .get(key)
        .and_then(normalize_string)
        .ok_or_else(|| ExecError::InvalidArguments(format!("missing required argument: {key}")))
}
