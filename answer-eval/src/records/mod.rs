//! Generation records and their gold labels

pub mod loader;

pub use loader::{load_records_from_file, load_records_from_str, LoadError, SchemaViolation};

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Gold label attached to a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Gold {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Gold {
    /// Convert a JSON value into a gold label.
    ///
    /// Returns `None` for null, arrays and objects.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Bool(b) => Some(Gold::Bool(*b)),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Some(Gold::Integer(i)),
                None => n.as_f64().map(Gold::Float),
            },
            serde_json::Value::String(s) => Some(Gold::Text(s.clone())),
            _ => None,
        }
    }

    /// Textual form used for extraction and prefix matching
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Gold::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            Gold::Integer(i) => Cow::Owned(i.to_string()),
            Gold::Float(f) => Cow::Owned(f.to_string()),
            Gold::Text(s) => Cow::Borrowed(s),
        }
    }
}

impl fmt::Display for Gold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for Gold {
    fn from(value: &str) -> Self {
        Gold::Text(value.to_string())
    }
}

impl From<bool> for Gold {
    fn from(value: bool) -> Self {
        Gold::Bool(value)
    }
}

impl From<i64> for Gold {
    fn from(value: i64) -> Self {
        Gold::Integer(value)
    }
}

/// One question's sampled generations together with its gold label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    pub answers: Vec<String>,
    pub gold: Gold,
    /// Generation latency in seconds
    pub latency: f64,
}

impl Record {
    pub fn new<I, S>(answers: I, gold: impl Into<Gold>, latency: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: None,
            answers: answers.into_iter().map(Into::into).collect(),
            gold: gold.into(),
            latency,
        }
    }

    pub fn with_id(mut self, id: impl Into<serde_json::Value>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Identifier rendered for messages; strings are shown without quotes
    pub fn display_id(&self) -> Option<String> {
        self.id.as_ref().map(render_id)
    }
}

pub(crate) fn render_id(id: &serde_json::Value) -> String {
    match id {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
