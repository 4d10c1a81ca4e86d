//! Raw records read from an LDoc JSON dump
//!
//! The dump is a JSON array of module records, each owning a list of item
//! records. Only the attributes the converter uses are modelled here; any
//! other attribute in the dump is ignored. Presentation attributes
//! (`summary`, `description`, `params`, `ret`) are read leniently: a `null`
//! or an unexpected shape reads as empty instead of failing the dump.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while reading a dump.
#[derive(Error, Debug)]
pub enum DumpError {
    #[error("failed to read dump file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed dump: {0}")]
    Json(#[from] serde_json::Error),
}

/// A module record as it appears in the dump.
#[derive(Debug, Clone, Deserialize)]
pub struct RawModule {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ModuleKind,
    #[serde(default, deserialize_with = "lenient_string")]
    pub summary: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    pub items: Vec<RawItem>,
}

/// An item record (function, field, ...) owned by a module record.
#[derive(Debug, Clone, Deserialize)]
pub struct RawItem {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default, deserialize_with = "lenient_string")]
    pub summary: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    /// Parameter names, in declaration order
    #[serde(default, deserialize_with = "lenient_strings")]
    pub params: Vec<String>,
    /// Return value descriptions
    #[serde(default, deserialize_with = "lenient_strings")]
    pub ret: Vec<String>,
}

/// Kind of module
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ModuleKind {
    /// `classmod`: items are instance members unless marked static
    ClassModule,
    /// `module`
    Module,
    /// Any other kind (`script`, `topic`, ...), kept verbatim
    Other(String),
}

impl From<String> for ModuleKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "classmod" => ModuleKind::ClassModule,
            "module" => ModuleKind::Module,
            _ => ModuleKind::Other(s),
        }
    }
}

impl ModuleKind {
    /// The kind as written in the dump
    pub fn as_str(&self) -> &str {
        match self {
            ModuleKind::ClassModule => "classmod",
            ModuleKind::Module => "module",
            ModuleKind::Other(s) => s,
        }
    }

    /// Get the display name for the module kind
    pub fn display_name(&self) -> &str {
        match self {
            ModuleKind::ClassModule => "Class",
            ModuleKind::Module => "Module",
            ModuleKind::Other(s) => s,
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of item
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ItemKind {
    Function,
    StaticFunction,
    Field,
    Table,
    Other(String),
}

impl From<String> for ItemKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "function" => ItemKind::Function,
            "staticfunction" => ItemKind::StaticFunction,
            "field" => ItemKind::Field,
            "table" => ItemKind::Table,
            _ => ItemKind::Other(s),
        }
    }
}

impl ItemKind {
    /// The kind as written in the dump
    pub fn as_str(&self) -> &str {
        match self {
            ItemKind::Function => "function",
            ItemKind::StaticFunction => "staticfunction",
            ItemKind::Field => "field",
            ItemKind::Table => "table",
            ItemKind::Other(s) => s,
        }
    }

    /// Whether the item is called with a parameter list
    pub fn is_callable(&self) -> bool {
        matches!(self, ItemKind::Function | ItemKind::StaticFunction)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string, or empty for anything else
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

/// A list of strings.
///
/// LDoc writes some lists as tables with a positional part and named side
/// tables (`{"1": "a", "2": "b", "map": {...}}`); for those only the
/// numeric keys are taken, in numeric order. Non-string values are dropped.
fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(values) => values.into_iter().filter_map(into_string).collect(),
        Value::Object(map) => {
            let mut positional: Vec<(u64, String)> = map
                .into_iter()
                .filter_map(|(k, v)| Some((k.parse::<u64>().ok()?, into_string(v)?)))
                .collect();
            positional.sort_by_key(|(i, _)| *i);
            positional.into_iter().map(|(_, v)| v).collect()
        }
        Value::String(s) => vec![s],
        _ => Vec::new(),
    })
}

fn into_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        _ => None,
    }
}

/// Parse a dump from JSON text
pub fn load_dump(text: &str) -> Result<Vec<RawModule>, DumpError> {
    Ok(serde_json::from_str(text)?)
}

/// Read a dump file as untyped JSON
pub fn read_dump_value(path: &Path) -> Result<Value, DumpError> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Convert untyped dump JSON into module records
pub fn modules_from_value(value: Value) -> Result<Vec<RawModule>, DumpError> {
    Ok(serde_json::from_value(value)?)
}

/// Read and parse a dump file
pub fn read_dump(path: &Path) -> Result<Vec<RawModule>, DumpError> {
    modules_from_value(read_dump_value(path)?)
}
