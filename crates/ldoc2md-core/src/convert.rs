//! Conversion driver
//!
//! Reads a dump, builds the entries and the symbol index, and writes one
//! Markdown page per module into `<out>/<api_dir>/`.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::config::{is_single_component, Config};
use super::dump::{modules_from_value, read_dump_value, DumpError};
use super::entry::DocSet;
use super::index::SymbolIndex;
use super::markdown::MarkdownGenerator;
use super::resolve::Resolver;

/// Errors that stop a conversion run
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error(transparent)]
    Dump(#[from] DumpError),

    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize pretty dump: {0}")]
    Pretty(#[source] serde_json::Error),
}

/// What a conversion run produced
#[derive(Debug, Clone, Default)]
pub struct ConvertReport {
    /// Pages written, in dump order
    pub pages: Vec<PathBuf>,
    /// Indented dump copy, when requested
    pub pretty_copy: Option<PathBuf>,
    /// Every reference that could not be resolved, in encounter order
    pub unresolved: Vec<String>,
    /// Modules whose name cannot be used as a page file name
    pub skipped: Vec<String>,
}

/// Converts one dump file into Markdown pages
#[derive(Debug, Clone)]
pub struct Converter {
    doc_json_path: PathBuf,
    out_path: PathBuf,
    config: Config,
    pretty: bool,
}

impl Converter {
    pub fn new(doc_json_path: impl Into<PathBuf>, out_path: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            doc_json_path: doc_json_path.into(),
            out_path: out_path.into(),
            config,
            pretty: false,
        }
    }

    /// Also write a tab-indented copy of the dump for debugging
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Directory the pages are written to
    pub fn api_path(&self) -> PathBuf {
        self.out_path.join(&self.config.api_dir)
    }

    /// Run the conversion
    pub fn convert(&self) -> Result<ConvertReport, ConvertError> {
        let mut report = ConvertReport::default();

        let value = read_dump_value(&self.doc_json_path)?;

        if self.pretty {
            let path = self.out_path.join(&self.config.pretty_file);
            write_file(&path, &pretty_json(&value)?)?;
            info!(path = %path.display(), "wrote indented json");
            report.pretty_copy = Some(path);
        }

        let docs = DocSet::from_raw(modules_from_value(value)?);
        let index = SymbolIndex::build(&docs);
        let resolver = Resolver::new(&index, self.config.anchor_style);
        debug!(
            modules = docs.len(),
            items = docs.item_count(),
            keys = index.len(),
            "indexed dump"
        );

        let api_path = self.api_path();
        std::fs::create_dir_all(&api_path).map_err(|source| ConvertError::Write {
            path: api_path.clone(),
            source,
        })?;

        for module in docs.modules() {
            let file = module.page_file();
            if !is_single_component(&file) {
                warn!(module = module.name(), "module name is not a file name, skipping page");
                report.skipped.push(module.name().to_string());
                continue;
            }

            let page = MarkdownGenerator::generate(module, &resolver, &mut report.unresolved);
            let path = api_path.join(file);
            write_file(&path, &page)?;
            debug!(path = %path.display(), "generated page");
            report.pages.push(path);
        }

        if !report.unresolved.is_empty() {
            warn!(
                count = report.unresolved.len(),
                "some cross-references could not be resolved"
            );
        }
        info!(
            pages = report.pages.len(),
            dir = %api_path.display(),
            "documentation generated"
        );

        Ok(report)
    }
}

fn pretty_json(value: &serde_json::Value) -> Result<String, ConvertError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser).map_err(ConvertError::Pretty)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn write_file(path: &Path, content: &str) -> Result<(), ConvertError> {
    std::fs::write(path, content).map_err(|source| ConvertError::Write {
        path: path.to_path_buf(),
        source,
    })
}
