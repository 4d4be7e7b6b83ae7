//! Domain layer for waypost.
//!
//! Core business types for the asset-inventory assistant: the asset record
//! model, free-text normalization into typed enums, the multi-turn draft
//! accumulator, selector specifications, and the tool catalogue the language
//! model calls against. No I/O and no dependencies on infrastructure.

pub mod asset;
pub mod conversation;
pub mod draft;
pub mod selector;
pub mod tool;

// Re-export commonly used types
pub use asset::{
    AssetId, AssetRecord, AssetType, Condition, FieldMap, SurfaceType, TrafficVolume, fields,
    searchable_fields,
};
pub use conversation::{Message, Role};
pub use draft::{
    DraftIntent, DraftValidation, REQUIRED_CREATE_FIELDS, RoadDraft, normalize_integer,
    normalize_number, normalize_string,
};
pub use selector::{SelectBy, SelectorSpec};
pub use tool::{
    ArgumentParseError, CreateRoadArgs, ExecError, ExecutionOutcome, ParamType, ToolCall,
    ToolCatalogue, ToolDefinition, ToolInvocation, ToolParameter, default_catalogue,
    parse_arguments,
};
