//! Template data: the values placeholders resolve to.
//!
//! Data is a JSON object mapping placeholder names to values. Each JSON value
//! is classified once, on load, into the shapes the template engine cares
//! about:
//!
//! | JSON                         | [`Value`]            | used for                    |
//! |------------------------------|----------------------|-----------------------------|
//! | string, number, bool, null   | `Text`               | scalar `{{NAME}}`           |
//! | array of non-objects, `[]`   | `List`               | list `{{NAME}}`             |
//! | array of objects             | `Records`            | `{{#NAME}}`…`{{/NAME}}`     |
//! | object                       | `Map`                | nothing (inert)             |

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// A data record driving one repetition of a block.
pub type Record = BTreeMap<String, Value>;

/// A classified data value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum Value {
    /// Scalar rendered as text
    Text(String),

    /// List of scalars, one paragraph per item
    List(Vec<String>),

    /// List of records for a repeating block
    Records(Vec<Record>),

    /// Nested object; never substituted
    Map(Record),
}

impl Value {
    /// Get the scalar text, if this is a scalar.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the list items, if this is a list of scalars.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Get the records, if this value can drive a repeating block.
    ///
    /// An empty list counts as zero records.
    pub fn as_records(&self) -> Option<&[Record]> {
        match self {
            Value::Records(records) => Some(records),
            Value::List(items) if items.is_empty() => Some(&[]),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Array(items) => {
                if !items.is_empty() && items.iter().all(serde_json::Value::is_object) {
                    Value::Records(items.into_iter().filter_map(into_record).collect())
                } else {
                    Value::List(items.iter().map(scalar_text).collect())
                }
            }
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
            scalar => Value::Text(scalar_text(&scalar)),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}

impl From<Vec<Record>> for Value {
    fn from(records: Vec<Record>) -> Self {
        Value::Records(records)
    }
}

fn into_record(value: serde_json::Value) -> Option<Record> {
    match value {
        serde_json::Value::Object(map) => {
            Some(map.into_iter().map(|(k, v)| (k, v.into())).collect())
        }
        _ => None,
    }
}

/// Display text of a JSON value: strings verbatim, `null` as empty text,
/// everything else as compact JSON.
fn scalar_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// The full data set for one fill.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct TemplateData {
    entries: BTreeMap<String, Value>,
}

impl TemplateData {
    /// Create an empty data set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load data from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::DataNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Parse data from JSON text. The top level must be an object.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_json_value(value)
    }

    /// Build data from an already parsed JSON value.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Object(map) => Ok(Self {
                entries: map.into_iter().map(|(k, v)| (k, v.into())).collect(),
            }),
            other => Err(Error::InvalidData(format!(
                "top level must be a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Insert or replace an entry.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Get an entry by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Iterate over all entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over scalar entries.
    pub fn texts(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter()
            .filter_map(|(k, v)| v.as_text().map(|text| (k, text)))
    }

    /// Iterate over list-of-scalar entries.
    pub fn lists(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.iter()
            .filter_map(|(k, v)| v.as_list().map(|items| (k, items)))
    }

    /// Get the records for a block name, if the entry can drive a block.
    pub fn records(&self, name: &str) -> Option<&[Record]> {
        self.get(name).and_then(Value::as_records)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Build the `{{NAME}}` token for a placeholder name.
pub fn placeholder(name: &str) -> String {
    format!("{{{{{}}}}}", name)
}

/// Build the `{{#NAME}}` opening block marker.
pub fn block_open(name: &str) -> String {
    format!("{{{{#{}}}}}", name)
}

/// Build the `{{/NAME}}` closing block marker.
pub fn block_close(name: &str) -> String {
    format!("{{{{/{}}}}}", name)
}
