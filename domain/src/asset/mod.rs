//! Asset domain module — record model and typed field vocabulary.

pub mod entities;
pub mod value_objects;

pub use entities::{AssetId, AssetRecord, FieldMap, fields, searchable_fields};
pub use value_objects::{AssetType, Condition, SurfaceType, TrafficVolume};
