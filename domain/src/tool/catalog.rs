//! The default tool catalogue.
//!
//! Built once at process start and handed to the language model verbatim on
//! every turn. Descriptions are written for the model, not for humans reading
//! logs — they steer which tool gets proposed.

use super::entities::{ParamType, ToolCatalogue, ToolDefinition, ToolParameter};

pub const CREATE_ROAD: &str = "create_road";
pub const UPDATE_ROAD: &str = "update_road";
pub const UPDATE_ROAD_BY: &str = "update_road_by";
pub const DELETE_ROAD_BY: &str = "delete_road_by";
pub const DELETE_ASSET: &str = "delete_asset";
pub const FIND_ASSET: &str = "find_asset";

const CONDITIONS: [&str; 3] = ["good", "fair", "poor"];
const SURFACES: [&str; 6] = ["asphalt", "concrete", "gravel", "dirt", "paver", "other"];
const TRAFFIC: [&str; 4] = ["low", "medium", "high", "very_high"];
const STRATEGIES: [&str; 5] = ["id", "name", "nameContains", "qrTagId", "search"];
const ASSET_TYPES: [&str; 2] = ["Road", "Vehicle"];

fn road_field_params() -> Vec<ToolParameter> {
    vec![
        ToolParameter::new("name", "Road name", true),
        ToolParameter::new("condition", "Overall condition", true).with_values(CONDITIONS),
        ToolParameter::new("surfaceType", "Surface material", true).with_values(SURFACES),
        ToolParameter::new("trafficVolume", "Typical traffic volume", true).with_values(TRAFFIC),
        ToolParameter::new("location", "Location or district", false),
        ToolParameter::new("notes", "Free-form notes", false),
        ToolParameter::new("qrTagId", "Printed QR tag identifier", false),
        ToolParameter::new("length", "Length in kilometers", false).with_type(ParamType::Number),
        ToolParameter::new("width", "Width in meters", false).with_type(ParamType::Number),
        ToolParameter::new("lanes", "Number of lanes", false).with_type(ParamType::Integer),
        ToolParameter::new("speedLimit", "Speed limit in km/h", false)
            .with_type(ParamType::Integer),
    ]
}

fn selector_params() -> Vec<ToolParameter> {
    vec![
        ToolParameter::new("by", "Selection strategy", true).with_values(STRATEGIES),
        ToolParameter::new(
            "value",
            "Selector value; an empty search value matches everything",
            true,
        ),
        ToolParameter::new("limit", "Maximum number of results to accept", false)
            .with_type(ParamType::Integer),
    ]
}

/// The fixed catalogue of tools exposed to the assistant.
pub fn default_catalogue() -> ToolCatalogue {
    let mut create = ToolDefinition::new(
        CREATE_ROAD,
        "Create a new road record. Requires name, condition, surfaceType and trafficVolume.",
    );
    for param in road_field_params() {
        create = create.with_parameter(param);
    }

    let update = ToolDefinition::new(
        UPDATE_ROAD,
        "Update a road by its exact id with a partial set of fields.",
    )
    .with_parameter(ToolParameter::new("id", "Road identifier", true))
    .with_parameter(
        ToolParameter::new("fields", "Partial road fields to change", true)
            .with_type(ParamType::Object),
    );

    let mut update_by = ToolDefinition::new(
        UPDATE_ROAD_BY,
        "Update a road located by a selector. Applies only when exactly one road matches.",
    );
    for param in selector_params() {
        update_by = update_by.with_parameter(param);
    }
    update_by = update_by.with_parameter(
        ToolParameter::new("fields", "Partial road fields to change", true)
            .with_type(ParamType::Object),
    );

    let mut delete_by = ToolDefinition::new(
        DELETE_ROAD_BY,
        "Delete a road located by a selector. Applies only when exactly one road matches.",
    );
    for param in selector_params() {
        delete_by = delete_by.with_parameter(param);
    }

    let delete_asset = ToolDefinition::new(
        DELETE_ASSET,
        "Delete any asset by its exact id and type.",
    )
    .with_parameter(ToolParameter::new("id", "Asset identifier", true))
    .with_parameter(ToolParameter::new("type", "Asset type", true).with_values(ASSET_TYPES));

    let mut find = ToolDefinition::new(
        FIND_ASSET,
        "Find assets by selector. Zero matches is still a successful result.",
    );
    for param in selector_params() {
        find = find.with_parameter(param);
    }
    find = find.with_parameter(
        ToolParameter::new("type", "Restrict to one asset type", false).with_values(ASSET_TYPES),
    );

    // Registration order below is the order the model sees.
    ToolCatalogue::new()
        .register(create)
        .register(update)
        .register(update_by)
        .register(delete_by)
        .register(delete_asset)
        .register(find)
}
