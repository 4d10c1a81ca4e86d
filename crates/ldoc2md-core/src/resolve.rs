//! Reference resolution
//!
//! Turns a reference string into display text and a link target. A
//! reference is classified, first match wins, as:
//!
//! 1. an external Roblox API reference (`rbx:class/Part`),
//! 2. a Lua built-in type name (`nil`, `string`, ...),
//! 3. a symbol in the [`SymbolIndex`].

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

use super::entry::page_file;
use super::index::SymbolIndex;

/// Prefix marking a reference into the Roblox API reference
pub const EXTERNAL_PREFIX: &str = "rbx:";

/// Base URL of the Roblox API reference
pub const EXTERNAL_BASE_URL: &str = "https://developer.roblox.com/api-reference/";

/// Sub-category prefixes hidden from the display text of external references
pub const EXTERNAL_SUBCATEGORIES: [&str; 3] = ["datatype/", "enum/", "class/"];

/// Type names that link to the Lua manual instead of the index
pub const BUILTIN_TYPES: [&str; 14] = [
    "nil",
    "boolean",
    "number",
    "string",
    "function",
    "userdata",
    "table",
    "...",
    "float",
    "double",
    "integer",
    "bool",
    "array",
    "dictionary",
];

/// Lua reference manual
pub const BUILTIN_MANUAL_URL: &str = "https://www.lua.org/manual/5.1/manual.html";

/// Prefix of every in-page anchor id
pub const ANCHOR_MARKER: char = '-';

/// The pattern older converters passed to a plain substring replace
const LITERAL_ANCHOR_PATTERN: &str = "[^a-zA-Z_-/?]";

/// Errors produced while resolving a reference
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum XrefError {
    #[error("unknown xref: {0}")]
    Unknown(String),
}

/// How anchor strings are turned into URL fragments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnchorStyle {
    /// Keep only ASCII letters, digits, `_`, `-`, `/` and `?`
    #[default]
    AllowList,
    /// Remove only the literal text `[^a-zA-Z_-/?]`, leaving everything
    /// else untouched. Matches pages produced by earlier converters.
    ///
    /// Anchors keep spaces and other URL-unsafe characters, so a target
    /// such as `Util.md#-Shared:item one` is not a valid Markdown link
    /// destination. Only use this when matching existing pages matters more
    /// than the links working.
    Literal,
}

impl AnchorStyle {
    /// Turn an anchor string into a URL fragment token
    pub fn sanitize(self, anchor: &str) -> String {
        match self {
            AnchorStyle::AllowList => anchor
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '/' | '?'))
                .collect(),
            AnchorStyle::Literal => anchor.replace(LITERAL_ANCHOR_PATTERN, ""),
        }
    }
}

/// Where a resolved reference points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A URL outside the generated pages
    External(String),
    /// A generated page, optionally at an anchor (already sanitized, no marker)
    Page { file: String, anchor: Option<String> },
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::External(url) => f.write_str(url),
            Target::Page { file, anchor: None } => f.write_str(file),
            Target::Page {
                file,
                anchor: Some(anchor),
            } => write!(f, "{}#{}{}", file, ANCHOR_MARKER, anchor),
        }
    }
}

/// A successfully resolved reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub text: String,
    pub target: Target,
}

impl Resolved {
    /// Render as a Markdown link
    pub fn to_markdown(&self) -> String {
        format!("[{}]({})", self.text, self.target)
    }
}

/// Resolves references against a built symbol index
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'i, 'a> {
    index: &'i SymbolIndex<'a>,
    anchor_style: AnchorStyle,
}

impl<'i, 'a> Resolver<'i, 'a> {
    pub fn new(index: &'i SymbolIndex<'a>, anchor_style: AnchorStyle) -> Self {
        Self {
            index,
            anchor_style,
        }
    }

    pub fn anchor_style(&self) -> AnchorStyle {
        self.anchor_style
    }

    /// Resolve a reference to its display text and target
    pub fn resolve(&self, reference: &str) -> Result<Resolved, XrefError> {
        if let Some(path) = reference.strip_prefix(EXTERNAL_PREFIX) {
            let text = EXTERNAL_SUBCATEGORIES
                .iter()
                .find_map(|sub| path.strip_prefix(sub))
                .unwrap_or(path);
            return Ok(Resolved {
                text: text.to_string(),
                target: Target::External(format!("{}{}", EXTERNAL_BASE_URL, path)),
            });
        }

        if BUILTIN_TYPES.contains(&reference) {
            return Ok(Resolved {
                text: reference.to_string(),
                target: Target::External(BUILTIN_MANUAL_URL.to_string()),
            });
        }

        let entry = self
            .index
            .get(reference)
            .ok_or_else(|| XrefError::Unknown(reference.to_string()))?;

        Ok(Resolved {
            text: reference.to_string(),
            target: Target::Page {
                file: page_file(entry.page_module()),
                anchor: entry.anchor().map(|a| self.anchor_style.sanitize(a)),
            },
        })
    }

    /// Resolve a reference but display `text` instead
    pub fn resolve_with_text(&self, reference: &str, text: &str) -> Result<Resolved, XrefError> {
        let mut resolved = self.resolve(reference)?;
        resolved.text = text.to_string();
        Ok(resolved)
    }

    /// Markdown link for a reference, using the resolved display text
    pub fn link(&self, reference: &str) -> Result<String, XrefError> {
        Ok(self.resolve(reference)?.to_markdown())
    }

    /// Markdown link for a reference with explicit display text
    pub fn link_to(&self, text: &str, reference: &str) -> Result<String, XrefError> {
        Ok(self.resolve_with_text(reference, text)?.to_markdown())
    }

    /// The in-page anchor element an item heading emits
    pub fn anchor_here(&self, anchor: &str) -> String {
        format!(
            "<div id=\"{}{}\"></div>",
            ANCHOR_MARKER,
            self.anchor_style.sanitize(anchor)
        )
    }
}
