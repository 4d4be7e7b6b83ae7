//! Draft accumulator for in-progress road creation.
//!
//! A [`RoadDraft`] collects fragmentary field values across conversational
//! turns — from model tool calls and from the user's own form edits — and
//! computes create-readiness. Merges apply in strict arrival order; empty
//! incoming values never clear previously set ones. The draft lives only for
//! one assistant session and is never persisted.

use crate::asset::{Condition, FieldMap, SurfaceType, TrafficVolume, fields};
use crate::tool::invocation::CreateRoadArgs;
use serde_json::Value;
use std::collections::BTreeMap;

/// What the conversation is currently working toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftIntent {
    Create,
    Find,
    Update,
    Delete,
}

/// Fields that must normalize successfully before a create can be proposed.
pub const REQUIRED_CREATE_FIELDS: [&str; 4] = [
    fields::NAME,
    fields::CONDITION,
    fields::SURFACE_TYPE,
    fields::TRAFFIC_VOLUME,
];

/// Per-field validation outcome for [`RoadDraft::validate_for_create`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftValidation {
    /// One human-readable message per failing field, keyed by field name.
    pub errors: BTreeMap<String, String>,
}

impl DraftValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse a numeric value from a number or numeric string.
/// Non-finite, empty, or non-numeric input yields `None`.
pub fn normalize_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Like [`normalize_number`] but only accepts whole values.
pub fn normalize_integer(value: &Value) -> Option<i64> {
    let n = normalize_number(value)?;
    if n.fract() == 0.0 && (i64::MIN as f64..=i64::MAX as f64).contains(&n) {
        Some(n as i64)
    } else {
        None
    }
}

/// Trimmed non-empty string, or `None`.
pub fn normalize_string(value: &Value) -> Option<String> {
    let s = value.as_str()?.trim();
    if s.is_empty() { None } else { Some(s.to_string()) }
}

fn normalize_enum_text(value: &Value) -> Option<String> {
    normalize_string(value)
}

/// Conversation-scoped accumulator of partially-specified road fields.
#[derive(Debug, Clone, Default)]
pub struct RoadDraft {
    fields: FieldMap,
    intent: Option<DraftIntent>,
}

impl RoadDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a draft from an existing field map (one merge).
    pub fn from_fields(fields: &FieldMap) -> Self {
        let mut draft = Self::new();
        draft.merge_fields(fields);
        draft
    }

    pub fn intent(&self) -> Option<DraftIntent> {
        self.intent
    }

    pub fn set_intent(&mut self, intent: DraftIntent) {
        self.intent = Some(intent);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Merge incoming fields, later values overwriting earlier ones.
    /// `null` and empty-string values are dropped so emptiness never
    /// clobbers a previously confirmed value.
    pub fn merge_fields(&mut self, incoming: &FieldMap) {
        for (key, value) in incoming {
            match value {
                Value::Null => {}
                Value::String(s) if s.trim().is_empty() => {}
                _ => {
                    self.fields.insert(key.clone(), value.clone());
                }
            }
        }
    }

    /// Drop all accumulated state.
    pub fn clear(&mut self) {
        self.fields.clear();
        self.intent = None;
    }

    fn condition(&self) -> Option<Condition> {
        self.get(fields::CONDITION)
            .and_then(normalize_enum_text)
            .as_deref()
            .and_then(Condition::from_text)
    }

    fn surface_type(&self) -> Option<SurfaceType> {
        self.get(fields::SURFACE_TYPE)
            .and_then(normalize_enum_text)
            .as_deref()
            .and_then(SurfaceType::from_text)
    }

    fn traffic_volume(&self) -> Option<TrafficVolume> {
        self.get(fields::TRAFFIC_VOLUME)
            .and_then(normalize_enum_text)
            .as_deref()
            .and_then(TrafficVolume::from_text)
    }

    /// Check that every required create field normalizes successfully.
    pub fn validate_for_create(&self) -> DraftValidation {
        let mut validation = DraftValidation::default();

        match self.get(fields::NAME).and_then(normalize_string) {
            Some(_) => {}
            None => {
                validation
                    .errors
                    .insert(fields::NAME.into(), "a road name is required".into());
            }
        }
        Self::require_enum(
            &mut validation,
            fields::CONDITION,
            self.get(fields::CONDITION),
            self.condition().is_some(),
            "condition (good, fair, or poor)",
        );
        Self::require_enum(
            &mut validation,
            fields::SURFACE_TYPE,
            self.get(fields::SURFACE_TYPE),
            self.surface_type().is_some(),
            "surface type (asphalt, concrete, gravel, dirt, paver, or other)",
        );
        Self::require_enum(
            &mut validation,
            fields::TRAFFIC_VOLUME,
            self.get(fields::TRAFFIC_VOLUME),
            self.traffic_volume().is_some(),
            "traffic volume (low, medium, high, or very high)",
        );

        validation
    }

    fn require_enum(
        validation: &mut DraftValidation,
        field: &str,
        raw: Option<&Value>,
        recognized: bool,
        expected: &str,
    ) {
        if recognized {
            return;
        }
        let message = match raw.and_then(normalize_string) {
            Some(text) => format!("\"{text}\" is not a recognized {expected}"),
            None => format!("a {expected} is required"),
        };
        validation.errors.insert(field.into(), message);
    }

    /// Build complete create arguments, or `None` if validation fails.
    /// Optional fields are individually normalized and dropped when empty
    /// or unparseable.
    pub fn build_create_args(&self) -> Option<CreateRoadArgs> {
        if !self.validate_for_create().is_valid() {
            return None;
        }
        Some(CreateRoadArgs {
            name: self.get(fields::NAME).and_then(normalize_string)?,
            condition: self.condition()?,
            surface_type: self.surface_type()?,
            traffic_volume: self.traffic_volume()?,
            location: self.get(fields::LOCATION).and_then(normalize_string),
            notes: self.get(fields::NOTES).and_then(normalize_string),
            qr_tag_id: self.get(fields::QR_TAG_ID).and_then(normalize_string),
            length: self.get(fields::LENGTH).and_then(normalize_number),
            width: self.get(fields::WIDTH).and_then(normalize_number),
            lanes: self.get(fields::LANES).and_then(normalize_integer),
            speed_limit: self.get(fields::SPEED_LIMIT).and_then(normalize_integer),
        })
    }

    /// Build a normalized partial-field map for an update. Only fields
    /// actually present (and parseable) are included — no required-field
    /// gating. `name` is excluded unless explicitly requested so an
    /// ambiguous flow cannot rename its target by accident.
    pub fn build_update_fields(&self, include_name: bool) -> FieldMap {
        let mut out = FieldMap::new();

        if include_name
            && let Some(name) = self.get(fields::NAME).and_then(normalize_string)
        {
            out.insert(fields::NAME.into(), Value::String(name));
        }
        if let Some(c) = self.condition() {
            out.insert(fields::CONDITION.into(), Value::String(c.as_str().into()));
        }
        if let Some(s) = self.surface_type() {
            out.insert(fields::SURFACE_TYPE.into(), Value::String(s.as_str().into()));
        }
        if let Some(t) = self.traffic_volume() {
            out.insert(
                fields::TRAFFIC_VOLUME.into(),
                Value::String(t.as_str().into()),
            );
        }
        for key in [fields::LOCATION, fields::NOTES, fields::QR_TAG_ID] {
            if let Some(s) = self.get(key).and_then(normalize_string) {
                out.insert(key.into(), Value::String(s));
            }
        }
        for key in [fields::LENGTH, fields::WIDTH] {
            if let Some(n) = self.get(key).and_then(normalize_number)
                && let Some(num) = serde_json::Number::from_f64(n)
            {
                out.insert(key.into(), Value::Number(num));
            }
        }
        for key in [fields::LANES, fields::SPEED_LIMIT] {
            if let Some(n) = self.get(key).and_then(normalize_integer) {
                out.insert(key.into(), Value::Number(n.into()));
            }
        }

        out
    }
}
