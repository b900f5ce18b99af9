//! Record loading and schema validation for result files

use std::path::{Path, PathBuf};

use serde_json::Value;

use super::{render_id, Gold, Record};

/// Error type for record loading
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Schema error in {}, record {index}{}: {violation}", .path.display(), format_id(.id))]
    Schema {
        path: PathBuf,
        index: usize,
        id: Option<String>,
        violation: SchemaViolation,
    },
}

impl LoadError {
    /// File the error refers to
    pub fn path(&self) -> &Path {
        match self {
            LoadError::Io { path, .. } | LoadError::Parse { path, .. } | LoadError::Schema { path, .. } => path,
        }
    }
}

fn format_id(id: &Option<String>) -> String {
    id.as_ref().map(|id| format!(" (id {})", id)).unwrap_or_default()
}

/// Why a single record was rejected
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaViolation {
    #[error("expected an object, got {0}")]
    NotAnObject(&'static str),

    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    #[error("`answers` must contain at least one generation")]
    EmptyAnswers,

    #[error("`latency` must be non-negative, got {0}")]
    NegativeLatency(f64),
}

/// Load records from a JSON result file
pub fn load_records_from_file(path: impl AsRef<Path>) -> Result<Vec<Record>, LoadError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_records_from_str(&content, path)
}

/// Load records from a JSON string.
///
/// `origin` only labels errors. The first invalid record aborts the load.
pub fn load_records_from_str(content: &str, origin: &Path) -> Result<Vec<Record>, LoadError> {
    let document: Value = serde_json::from_str(content).map_err(|e| LoadError::Parse {
        path: origin.to_path_buf(),
        message: format!("JSON parse error: {}", e),
    })?;

    let items = match document {
        Value::Array(items) => items,
        other => {
            return Err(LoadError::Parse {
                path: origin.to_path_buf(),
                message: format!("expected a JSON array of records, got {}", json_kind(&other)),
            })
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            parse_record(item).map_err(|violation| LoadError::Schema {
                path: origin.to_path_buf(),
                index,
                id: item.get("id").filter(|id| !id.is_null()).map(render_id),
                violation,
            })
        })
        .collect()
}

/// Parse and validate a single record
fn parse_record(value: &Value) -> Result<Record, SchemaViolation> {
    let obj = value
        .as_object()
        .ok_or_else(|| SchemaViolation::NotAnObject(json_kind(value)))?;

    let answers = match obj.get("answers") {
        None | Some(Value::Null) => return Err(SchemaViolation::MissingField("answers")),
        Some(Value::Array(arr)) => arr
            .iter()
            .map(|a| a.as_str().map(String::from))
            .collect::<Option<Vec<String>>>()
            .ok_or(SchemaViolation::InvalidField {
                field: "answers",
                expected: "an array of strings",
            })?,
        Some(_) => {
            return Err(SchemaViolation::InvalidField {
                field: "answers",
                expected: "an array of strings",
            })
        }
    };
    if answers.is_empty() {
        return Err(SchemaViolation::EmptyAnswers);
    }

    let gold = match obj.get("gold") {
        None | Some(Value::Null) => return Err(SchemaViolation::MissingField("gold")),
        Some(v) => Gold::from_json(v).ok_or(SchemaViolation::InvalidField {
            field: "gold",
            expected: "a string, boolean or number",
        })?,
    };

    let latency = match obj.get("latency") {
        None | Some(Value::Null) => return Err(SchemaViolation::MissingField("latency")),
        Some(v) => v.as_f64().ok_or(SchemaViolation::InvalidField {
            field: "latency",
            expected: "a number",
        })?,
    };
    if latency < 0.0 {
        return Err(SchemaViolation::NegativeLatency(latency));
    }

    Ok(Record {
        id: obj.get("id").filter(|id| !id.is_null()).cloned(),
        answers,
        gold,
        latency,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
