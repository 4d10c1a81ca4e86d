//! ldoc2md Core - cross-referenced Markdown pages from LDoc dumps
//!
//! This crate provides:
//! - Dump: the raw module/item records read from an LDoc JSON dump
//! - Entry: immutable documented entries with their owning-module links
//! - Index: the run-scoped symbol table of names and qualified aliases
//! - Resolve: turning a reference string into display text and a target
//! - Xref: expanding `@{Name}` / `@{Name|Text}` references inside text
//! - Markdown: rendering one page per module
//! - Convert: the end-to-end conversion driver

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Converter configuration (optional TOML file)
pub mod config;

/// Conversion driver - dump in, pages out
pub mod convert;

/// Raw records deserialized from the LDoc JSON dump
pub mod dump;

/// Immutable documented entries built from the raw dump
pub mod entry;

/// Symbol index - every known name and alias to its entry
pub mod index;

/// Markdown page generation
pub mod markdown;

/// Reference resolution
pub mod resolve;

/// Embedded reference scanning and substitution
pub mod xref;

pub use config::{Config, ConfigError};
pub use convert::{ConvertError, ConvertReport, Converter};
pub use dump::{
    load_dump, modules_from_value, read_dump, read_dump_value, DumpError, ItemKind, ModuleKind,
    RawItem, RawModule,
};
pub use entry::{DocSet, ItemEntry, ModuleEntry};
pub use index::{EntryRef, SymbolIndex};
pub use markdown::MarkdownGenerator;
pub use resolve::{AnchorStyle, Resolved, Resolver, Target, XrefError};
pub use xref::{expand, expand_tracked, scan, XrefSpan};
