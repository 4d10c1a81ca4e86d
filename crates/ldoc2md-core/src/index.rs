//! Symbol index for cross-referencing
//!
//! Maps every module name, every item bare name and every synthesized
//! qualified alias to the entry it names. Bare names are expected to collide
//! across modules and the last module in dump order wins. Qualified aliases
//! are expected to be unique and are never allowed to replace an existing key.

use std::collections::HashMap;

use tracing::debug;

use super::entry::{DocSet, ItemEntry, ModuleEntry};

/// A borrowed module or item entry
#[derive(Debug, Clone, Copy)]
pub enum EntryRef<'a> {
    Module(&'a ModuleEntry),
    Item(&'a ItemEntry),
}

impl<'a> EntryRef<'a> {
    /// Name of the module whose page documents this entry
    pub fn page_module(&self) -> &'a str {
        match self {
            EntryRef::Module(m) => m.name(),
            EntryRef::Item(i) => i.refmod(),
        }
    }

    /// In-page anchor, items only
    pub fn anchor(&self) -> Option<&'a str> {
        match self {
            EntryRef::Module(_) => None,
            EntryRef::Item(i) => Some(i.refanchor()),
        }
    }

    /// Whether two refs point at the same entry
    pub fn same_entry(&self, other: &EntryRef<'_>) -> bool {
        match (self, other) {
            (EntryRef::Module(a), EntryRef::Module(b)) => std::ptr::eq(*a, *b),
            (EntryRef::Item(a), EntryRef::Item(b)) => std::ptr::eq(*a, *b),
            _ => false,
        }
    }
}

/// Run-scoped lookup from name or alias to entry
#[derive(Debug, Clone)]
pub struct SymbolIndex<'a> {
    entries: HashMap<String, EntryRef<'a>>,
    modules: HashMap<&'a str, &'a ModuleEntry>,
}

impl<'a> SymbolIndex<'a> {
    /// Index every module and item of a doc set
    pub fn build(docs: &'a DocSet) -> Self {
        let mut index = Self {
            entries: HashMap::new(),
            modules: HashMap::new(),
        };

        for module in docs.modules() {
            index.insert(module.name(), EntryRef::Module(module));
            index.modules.insert(module.name(), module);

            for item in module.items() {
                index.insert(item.name(), EntryRef::Item(item));

                if let Some(alias) = item.qualified_alias(module) {
                    index.entries.entry(alias).or_insert(EntryRef::Item(item));
                }
            }
        }

        debug!(
            keys = index.entries.len(),
            modules = index.modules.len(),
            "built symbol index"
        );
        index
    }

    /// Unconditional insert, last write wins
    fn insert(&mut self, key: &str, entry: EntryRef<'a>) {
        if let Some(previous) = self.entries.insert(key.to_string(), entry) {
            debug!(
                key,
                previous = previous.page_module(),
                current = entry.page_module(),
                "bare name collision, keeping latest"
            );
        }
    }

    /// Look up a name or alias
    pub fn get(&self, key: &str) -> Option<EntryRef<'a>> {
        self.entries.get(key).copied()
    }

    /// Look up a module entry by its name
    pub fn module(&self, name: &str) -> Option<&'a ModuleEntry> {
        self.modules.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All keys, sorted
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<_> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dump::load_dump;

    fn docset(json: &str) -> DocSet {
        DocSet::from_raw(load_dump(json).unwrap())
    }

    #[test]
    fn test_indexes_modules_items_and_aliases() {
        let docs = docset(
            r#"[{"name": "Signal", "type": "classmod", "items": [
                {"name": "Fire", "type": "function"},
                {"name": "new", "type": "staticfunction"}
            ]}]"#,
        );
        let index = SymbolIndex::build(&docs);

        assert_eq!(
            index.keys(),
            vec!["Fire", "Signal", "Signal.new", "Signal:Fire", "new"]
        );
        assert!(matches!(index.get("Signal"), Some(EntryRef::Module(_))));
        assert!(matches!(index.get("Signal:Fire"), Some(EntryRef::Item(_))));
        assert!(index.get("Signal.Fire").is_none());
        assert!(index.module("Signal").is_some());
    }

    #[test]
    fn test_bare_name_last_write_wins() {
        let docs = docset(
            r#"[
                {"name": "First", "type": "module", "items": [{"name": "util", "type": "function"}]},
                {"name": "Second", "type": "module", "items": [{"name": "util", "type": "function"}]}
            ]"#,
        );
        let index = SymbolIndex::build(&docs);

        assert_eq!(index.get("util").unwrap().page_module(), "Second");
        assert_eq!(index.get("First.util").unwrap().page_module(), "First");
        assert_eq!(index.get("Second.util").unwrap().page_module(), "Second");
    }

    #[test]
    fn test_qualified_alias_first_write_wins() {
        // The prequalified item "A.x" in module P claims the key first; the
        // alias synthesized for A's own item "x" must not replace it.
        let docs = docset(
            r#"[
                {"name": "P", "type": "module", "items": [{"name": "A.x", "type": "function"}]},
                {"name": "A", "type": "module", "items": [{"name": "x", "type": "function"}]}
            ]"#,
        );
        let index = SymbolIndex::build(&docs);

        let entry = index.get("A.x").unwrap();
        assert_eq!(entry.page_module(), "P");
        assert_eq!(entry.anchor(), Some("A.x"));
        assert_eq!(index.get("x").unwrap().page_module(), "A");
    }

    #[test]
    fn test_alias_does_not_replace_module_name() {
        let docs = docset(
            r#"[
                {"name": "M.f", "type": "module", "items": []},
                {"name": "M", "type": "module", "items": [{"name": "f", "type": "function"}]}
            ]"#,
        );
        let index = SymbolIndex::build(&docs);

        assert!(matches!(index.get("M.f"), Some(EntryRef::Module(_))));
    }

    #[test]
    fn test_bare_item_name_replaces_module_name() {
        let docs = docset(
            r#"[
                {"name": "Thing", "type": "module", "items": []},
                {"name": "Other", "type": "module", "items": [{"name": "Thing", "type": "field"}]}
            ]"#,
        );
        let index = SymbolIndex::build(&docs);

        assert!(matches!(index.get("Thing"), Some(EntryRef::Item(_))));
        // The module itself is still reachable by name for page lookups
        assert!(index.module("Thing").is_some());
    }

    #[test]
    fn test_bare_and_alias_share_entry() {
        let docs = docset(
            r#"[{"name": "M", "type": "module", "items": [{"name": "f", "type": "function"}]}]"#,
        );
        let index = SymbolIndex::build(&docs);

        let bare = index.get("f").unwrap();
        let alias = index.get("M.f").unwrap();
        assert!(bare.same_entry(&alias));
    }

    #[test]
    fn test_empty_docset() {
        let docs = DocSet::default();
        let index = SymbolIndex::build(&docs);
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
    }
}
