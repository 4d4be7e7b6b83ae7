//! Asset value objects — typed enums with colocated free-text synonym tables.
//!
//! Users and language models describe assets in loose prose ("the road is in
//! terrible shape", "blacktop", "heavy traffic"). Each enum keeps its synonym
//! table next to its definition so the mapping from free text to canonical
//! value has a single source of truth. `from_text` is lenient and total:
//! unrecognized input yields `None`, never an error.

use serde::{Deserialize, Serialize};

/// Kind of asset tracked in the inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetType {
    Road,
    Vehicle,
}

impl AssetType {
    pub const ALL: [AssetType; 2] = [AssetType::Road, AssetType::Vehicle];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Road => "Road",
            AssetType::Vehicle => "Vehicle",
        }
    }

    /// Case-insensitive parse of a type name.
    pub fn from_text(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "road" | "roads" => Some(AssetType::Road),
            "vehicle" | "vehicles" => Some(AssetType::Vehicle),
            _ => None,
        }
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Overall condition of an asset. Ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Good,
    Fair,
    Poor,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Good => "good",
            Condition::Fair => "fair",
            Condition::Poor => "poor",
        }
    }

    /// Map free text to a canonical condition.
    pub fn from_text(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "good" | "great" | "excellent" | "new" | "fine" => Some(Condition::Good),
            "fair" | "ok" | "okay" | "average" | "moderate" | "decent" => Some(Condition::Fair),
            "poor" | "bad" | "terrible" | "awful" | "damaged" | "rough" => Some(Condition::Poor),
            _ => None,
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Road surface material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceType {
    Asphalt,
    Concrete,
    Gravel,
    Dirt,
    Paver,
    Other,
}

impl SurfaceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SurfaceType::Asphalt => "asphalt",
            SurfaceType::Concrete => "concrete",
            SurfaceType::Gravel => "gravel",
            SurfaceType::Dirt => "dirt",
            SurfaceType::Paver => "paver",
            SurfaceType::Other => "other",
        }
    }

    pub fn from_text(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "asphalt" | "blacktop" | "tarmac" => Some(SurfaceType::Asphalt),
            "concrete" | "cement" => Some(SurfaceType::Concrete),
            "gravel" => Some(SurfaceType::Gravel),
            "dirt" | "unpaved" | "earth" => Some(SurfaceType::Dirt),
            "paver" | "pavers" | "brick" | "cobblestone" => Some(SurfaceType::Paver),
            "other" => Some(SurfaceType::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for SurfaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Typical traffic load on a road.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficVolume {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl TrafficVolume {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrafficVolume::Low => "low",
            TrafficVolume::Medium => "medium",
            TrafficVolume::High => "high",
            TrafficVolume::VeryHigh => "very_high",
        }
    }

    pub fn from_text(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" | "light" | "quiet" => Some(TrafficVolume::Low),
            "medium" | "moderate" | "average" => Some(TrafficVolume::Medium),
            "high" | "heavy" | "busy" => Some(TrafficVolume::High),
            "very high" | "very_high" | "very-high" | "extreme" => Some(TrafficVolume::VeryHigh),
            _ => None,
        }
    }
}

impl std::fmt::Display for TrafficVolume {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
