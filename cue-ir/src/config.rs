//! The runtime configuration schema.
//!
//! This is the JSON contract with the playback engine. Field names are
//! camelCase on the wire; absent optionals are omitted, never null.

use serde::Serialize;
use serde_json::Value;

/// Root configuration object consumed by the runtime.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub container_selector: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<String>,
    pub init_actions: Vec<ConfigAction>,
    pub actions: Vec<ConfigAction>,
    pub timelines: Vec<ConfigTimeline>,
}

impl Config {
    /// Render as a JSON string, compact when `minify` is set.
    pub fn to_json_string(&self, minify: bool) -> serde_json::Result<String> {
        if minify {
            serde_json::to_string(self)
        } else {
            serde_json::to_string_pretty(self)
        }
    }
}

/// A named action available to the runtime.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigAction {
    pub name: String,
    pub start_operations: Vec<ConfigOperation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_operations: Option<Vec<ConfigOperation>>,
}

/// A timeline with concrete, emitter-computed action times.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigTimeline {
    #[serde(rename = "type")]
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    pub timeline_actions: Vec<ConfigTimelineAction>,
}

/// One timed entry on a timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigTimelineAction {
    pub start_time: f64,
    pub end_time: f64,
    pub start_operations: Vec<ConfigOperation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_operations: Option<Vec<ConfigOperation>>,
}

/// One operation invocation on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOperation {
    pub system_name: String,
    pub operation_data: Value,
}
