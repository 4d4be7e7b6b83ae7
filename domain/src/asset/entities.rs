//! Asset record entities.
//!
//! Records carry their domain data as a camelCase field map matching the tool
//! wire format (`surfaceType`, `qrTagId`, ...). The store owns the internal
//! representation; everything here only reads and writes through field keys.

use super::value_objects::AssetType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Map of camelCase field name to value, shared currency between drafts,
/// tool arguments, and stored records.
pub type FieldMap = serde_json::Map<String, Value>;

/// Well-known field keys.
pub mod fields {
    pub const NAME: &str = "name";
    pub const IDENTIFIER: &str = "identifier";
    pub const CONDITION: &str = "condition";
    pub const SURFACE_TYPE: &str = "surfaceType";
    pub const TRAFFIC_VOLUME: &str = "trafficVolume";
    pub const LOCATION: &str = "location";
    pub const NOTES: &str = "notes";
    pub const QR_TAG_ID: &str = "qrTagId";
    pub const PRIORITY: &str = "priority";
    pub const LENGTH: &str = "length";
    pub const WIDTH: &str = "width";
    pub const LANES: &str = "lanes";
    pub const SPEED_LIMIT: &str = "speedLimit";
    pub const MILEAGE: &str = "mileage";
    pub const HOURS: &str = "hours";
}

/// Fields searched by the free-text `search` selector strategy, per type.
/// Numeric fields participate through their stringified values.
pub fn searchable_fields(asset_type: AssetType) -> &'static [&'static str] {
    match asset_type {
        AssetType::Road => &[
            fields::NAME,
            fields::LOCATION,
            fields::CONDITION,
            fields::NOTES,
            fields::QR_TAG_ID,
            fields::SURFACE_TYPE,
            fields::TRAFFIC_VOLUME,
            fields::LENGTH,
            fields::WIDTH,
            fields::LANES,
            fields::SPEED_LIMIT,
        ],
        AssetType::Vehicle => &[
            fields::NAME,
            fields::IDENTIFIER,
            fields::LOCATION,
            fields::CONDITION,
            fields::NOTES,
            fields::QR_TAG_ID,
            fields::PRIORITY,
            fields::MILEAGE,
            fields::HOURS,
        ],
    }
}

/// Opaque store identifier — 24 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    pub const LEN: usize = 24;

    /// Parse an identifier from its wire form. Invalid shape yields `None`;
    /// selector resolution treats that as zero matches, not an error.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.len() == Self::LEN && s.chars().all(|c| c.is_ascii_hexdigit()) {
            Some(AssetId(s.to_lowercase()))
        } else {
            None
        }
    }

    /// Build an identifier from 12 raw bytes (store-side generation).
    pub fn from_bytes(bytes: [u8; 12]) -> Self {
        let mut s = String::with_capacity(Self::LEN);
        for b in bytes {
            s.push_str(&format!("{b:02x}"));
        }
        AssetId(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored asset record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetRecord {
    pub id: AssetId,
    pub asset_type: AssetType,
    pub fields: FieldMap,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AssetRecord {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(|v| v.as_str())
    }

    pub fn name(&self) -> Option<&str> {
        self.get_str(fields::NAME)
    }

    /// Text a field contributes to free-text search: strings verbatim,
    /// numbers stringified, everything else excluded.
    pub fn search_text(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Deterministic plain serialization: id as hex string, type name,
    /// timestamps as ISO-8601, domain fields flattened alongside.
    pub fn to_wire(&self) -> Value {
        let mut out = FieldMap::new();
        out.insert("id".into(), Value::String(self.id.to_string()));
        out.insert("type".into(), Value::String(self.asset_type.as_str().into()));
        for (k, v) in &self.fields {
            out.insert(k.clone(), v.clone());
        }
        out.insert(
            "createdAt".into(),
            Value::String(self.created_at.to_rfc3339()),
        );
        out.insert(
            "updatedAt".into(),
            Value::String(self.updated_at.to_rfc3339()),
        );
        Value::Object(out)
    }
}
