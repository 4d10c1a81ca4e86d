//! Documented entries built from the raw dump
//!
//! Raw records are converted once into immutable entries. Every item entry
//! carries the name of its owning module (`refmod`) and its in-page anchor
//! (`refanchor`) from the moment it is built.

use super::dump::{ItemKind, ModuleKind, RawItem, RawModule};

/// A documented module and the items it owns
#[derive(Debug, Clone)]
pub struct ModuleEntry {
    name: String,
    kind: ModuleKind,
    summary: String,
    description: String,
    items: Vec<ItemEntry>,
}

impl ModuleEntry {
    /// Build a module entry, annotating each item with its owner
    pub fn from_raw(raw: RawModule) -> Self {
        let name = raw.name;
        let items = raw
            .items
            .into_iter()
            .map(|item| ItemEntry::from_raw(item, &name))
            .collect();

        Self {
            name,
            kind: raw.kind,
            summary: raw.summary,
            description: raw.description,
            items,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ModuleKind {
        &self.kind
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Items in dump order
    pub fn items(&self) -> &[ItemEntry] {
        &self.items
    }

    /// File name of the page generated for this module
    pub fn page_file(&self) -> String {
        page_file(&self.name)
    }
}

/// A documented member of a module
#[derive(Debug, Clone)]
pub struct ItemEntry {
    name: String,
    kind: ItemKind,
    summary: String,
    description: String,
    params: Vec<String>,
    ret: Vec<String>,
    refmod: String,
    refanchor: String,
}

impl ItemEntry {
    fn from_raw(raw: RawItem, module_name: &str) -> Self {
        Self {
            refmod: module_name.to_string(),
            refanchor: raw.name.clone(),
            name: raw.name,
            kind: raw.kind,
            summary: raw.summary,
            description: raw.description,
            params: raw.params,
            ret: raw.ret,
        }
    }

    /// Bare name as written in the dump (may already be qualified)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn ret(&self) -> &[String] {
        &self.ret
    }

    /// Name of the owning module
    pub fn refmod(&self) -> &str {
        &self.refmod
    }

    /// Unsanitized in-page anchor
    pub fn refanchor(&self) -> &str {
        &self.refanchor
    }

    /// Whether the dump already qualified this name (`Mod.f`, `Class:m`)
    pub fn is_prequalified(&self) -> bool {
        self.name.contains(['.', ':'])
    }

    /// The synthesized `module<sep>item` alias, or `None` for prequalified names.
    ///
    /// The separator is `:` for instance members of a class module and `.`
    /// for everything else, mirroring Lua method-call syntax.
    pub fn qualified_alias(&self, module: &ModuleEntry) -> Option<String> {
        if self.is_prequalified() {
            return None;
        }
        let sep = if module.kind == ModuleKind::ClassModule && self.kind != ItemKind::StaticFunction
        {
            ':'
        } else {
            '.'
        };
        Some(format!("{}{}{}", module.name, sep, self.name))
    }
}

/// All entries of one conversion run, in dump order
#[derive(Debug, Clone, Default)]
pub struct DocSet {
    modules: Vec<ModuleEntry>,
}

impl DocSet {
    /// Convert every raw module into its entry
    pub fn from_raw(raw: Vec<RawModule>) -> Self {
        Self {
            modules: raw.into_iter().map(ModuleEntry::from_raw).collect(),
        }
    }

    pub fn modules(&self) -> &[ModuleEntry] {
        &self.modules
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Total number of items across all modules
    pub fn item_count(&self) -> usize {
        self.modules.iter().map(|m| m.items.len()).sum()
    }
}

/// Page file name for a module name
pub(crate) fn page_file(module_name: &str) -> String {
    format!("{}.md", module_name)
}
