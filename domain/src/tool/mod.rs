//! Tool domain module — the fixed catalogue of operations the assistant may
//! request against the asset store.
//!
//! # Pipeline
//!
//! ```text
//! model output ──▶ ToolCall ──▶ ToolInvocation ──▶ ExecutionOutcome
//!                 (untyped)     (typed union)      ({success, message, data})
//! ```
//!
//! - [`entities`] — `ToolDefinition`/`ToolCatalogue` (the schema shown to the
//!   model every turn) and `ToolCall` with boundary-safe argument parsing.
//! - [`catalog`] — the six concrete tools and their name constants.
//! - [`invocation`] — the single untyped→typed conversion per tool.
//! - [`value_objects`] — outcome and error values; failures are values, not
//!   panics.

pub mod catalog;
pub mod entities;
pub mod invocation;
pub mod value_objects;

pub use catalog::default_catalogue;
pub use entities::{
    ArgumentParseError, ParamType, ToolCall, ToolCatalogue, ToolDefinition, ToolParameter,
    parse_arguments,
};
pub use invocation::{CreateRoadArgs, ToolInvocation};
pub use value_objects::{ExecError, ExecutionOutcome};
