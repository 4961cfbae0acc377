//! JSON tool boundary.
//!
//! Each function wraps one [`TabularCleaner`] operation and always returns a
//! JSON value: the serialized report on success, or `{error, code}` on
//! failure. Nothing here panics or propagates an `Err`, so callers driving
//! the cleaner from an agent loop can forward the value as-is.

use crate::error::{CleanerError, Result};
use crate::operations::TabularCleaner;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

/// Code returned when [`invoke`] is asked for a tool that does not exist.
pub const UNKNOWN_TOOL: &str = "UNKNOWN_TOOL";
/// Code returned when [`invoke`] arguments are missing or not strings.
pub const INVALID_ARGUMENTS: &str = "INVALID_ARGUMENTS";

/// Name, description and string parameters of a tool.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: &'static [&'static str],
}

/// Every tool [`invoke`] can dispatch to.
pub const TOOLS: [ToolDefinition; 4] = [
    ToolDefinition {
        name: "profile_data",
        description: "Read a CSV file and summarise its shape, column types, \
                      missing values and numeric statistics.",
        parameters: &["file_path"],
    },
    ToolDefinition {
        name: "check_missing",
        description: "Report missing value counts and percentages for each column of a CSV file.",
        parameters: &["file_path"],
    },
    ToolDefinition {
        name: "clean_data",
        description: "Fill numeric gaps with the column median, remove duplicate rows, \
                      cap outliers at the 1st/99th percentile and save to output_path.",
        parameters: &["file_path", "output_path"],
    },
    ToolDefinition {
        name: "list_datasets",
        description: "List the CSV files available in a data directory.",
        parameters: &["directory"],
    },
];

fn to_payload<T: Serialize>(result: Result<T>) -> Value {
    match result {
        Ok(report) => serde_json::to_value(report).unwrap_or_else(|e| {
            json!({ "error": format!("Failed to serialize report: {}", e), "code": "IO_ERROR" })
        }),
        Err(err) => {
            warn!("Tool call failed ({}): {}", err.error_code(), err);
            error_payload(&err)
        }
    }
}

fn error_payload(err: &CleanerError) -> Value {
    json!({ "error": err.to_string(), "code": err.error_code() })
}

pub fn profile_data(cleaner: &TabularCleaner, file_path: &str) -> Value {
    to_payload(cleaner.profile(file_path))
}

pub fn check_missing(cleaner: &TabularCleaner, file_path: &str) -> Value {
    to_payload(cleaner.check_missing(file_path))
}

pub fn clean_data(cleaner: &TabularCleaner, file_path: &str, output_path: &str) -> Value {
    to_payload(cleaner.clean(file_path, output_path))
}

pub fn list_datasets(cleaner: &TabularCleaner, directory: &str) -> Value {
    to_payload(cleaner.list_datasets(directory))
}

/// True when the value is an error payload.
pub fn is_error(payload: &Value) -> bool {
    payload.get("error").is_some()
}

fn string_arg<'a>(args: &'a Value, tool: &str, key: &str) -> std::result::Result<&'a str, Value> {
    args.get(key).and_then(Value::as_str).ok_or_else(|| {
        json!({
            "error": format!("Missing or non-string argument '{}' for tool '{}'", key, tool),
            "code": INVALID_ARGUMENTS,
        })
    })
}

/// Dispatch a tool call by name with a JSON object of string arguments.
///
/// `list_datasets` falls back to the configured data directory when no
/// `directory` is given.
pub fn invoke(cleaner: &TabularCleaner, tool: &str, args: &Value) -> Value {
    debug!("Invoking tool '{}'", tool);

    let arg = |key: &str| string_arg(args, tool, key);

    let outcome = match tool {
        "profile_data" => arg("file_path").map(|path| profile_data(cleaner, path)),
        "check_missing" => arg("file_path").map(|path| check_missing(cleaner, path)),
        "clean_data" => arg("file_path").and_then(|input| {
            arg("output_path").map(|output| clean_data(cleaner, input, output))
        }),
        "list_datasets" => {
            let directory = match args.get("directory").and_then(Value::as_str) {
                Some(dir) => dir.to_string(),
                None => cleaner.config().data_dir.display().to_string(),
            };
            Ok(list_datasets(cleaner, &directory))
        }
        _ => Err(json!({
            "error": format!("Unknown tool '{}'", tool),
            "code": UNKNOWN_TOOL,
        })),
    };

    outcome.unwrap_or_else(|payload| payload)
}
