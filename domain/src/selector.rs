//! Selector specifications.
//!
//! A selector locates target records for update/delete/find operations that
//! do not carry a direct identifier: by exact name, fuzzy substring, QR tag,
//! or free-text search across a type's searchable fields.

use crate::asset::AssetType;
use serde::{Deserialize, Serialize};

/// Strategy for locating records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectBy {
    /// Exact store-identifier lookup. An unparseable id yields zero matches.
    Id,
    /// Exact string equality on `name`.
    Name,
    /// Case-insensitive substring match on `name`.
    NameContains,
    /// Exact string equality on `qrTagId`.
    QrTagId,
    /// Case-insensitive substring match across the type's searchable fields.
    /// The empty string matches every record of the target type(s).
    Search,
}

impl SelectBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectBy::Id => "id",
            SelectBy::Name => "name",
            SelectBy::NameContains => "nameContains",
            SelectBy::QrTagId => "qrTagId",
            SelectBy::Search => "search",
        }
    }

    pub fn from_text(s: &str) -> Option<Self> {
        match s.trim() {
            "id" => Some(SelectBy::Id),
            "name" => Some(SelectBy::Name),
            "nameContains" => Some(SelectBy::NameContains),
            "qrTagId" => Some(SelectBy::QrTagId),
            "search" => Some(SelectBy::Search),
            _ => None,
        }
    }
}

impl std::fmt::Display for SelectBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How to find target record(s) without a direct identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorSpec {
    pub by: SelectBy,
    pub value: String,
    /// Restrict to one asset type; `None` searches all types and
    /// concatenates the results.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<AssetType>,
    /// Truncates the combined result list when present and positive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl SelectorSpec {
    pub fn new(by: SelectBy, value: impl Into<String>) -> Self {
        Self {
            by,
            value: value.into(),
            asset_type: None,
            limit: None,
        }
    }

    pub fn with_type(mut self, asset_type: AssetType) -> Self {
        self.asset_type = Some(asset_type);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Types this selector targets, in resolution order.
    pub fn target_types(&self) -> Vec<AssetType> {
        match self.asset_type {
            Some(t) => vec![t],
            None => AssetType::ALL.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_by_round_trip() {
        for by in [
            SelectBy::Id,
            SelectBy::Name,
            SelectBy::NameContains,
            SelectBy::QrTagId,
            SelectBy::Search,
        ] {
            assert_eq!(SelectBy::from_text(by.as_str()), Some(by));
        }
        assert_eq!(SelectBy::from_text("fuzzy"), None);
    }

    #[test]
    fn target_types_default_to_all() {
        let spec = SelectorSpec::new(SelectBy::Search, "");
        assert_eq!(spec.target_types(), vec![AssetType::Road, AssetType::Vehicle]);

        let spec = spec.with_type(AssetType::Vehicle);
        assert_eq!(spec.target_types(), vec![AssetType::Vehicle]);
    }

    #[test]
    fn serde_uses_wire_keys() {
        let spec = SelectorSpec::new(SelectBy::NameContains, "Main")
            .with_type(AssetType::Road)
            .with_limit(5);
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["by"], "nameContains");
        assert_eq!(json["type"], "Road");
        assert_eq!(json["limit"], 5);
    }
}
