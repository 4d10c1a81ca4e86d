//! Markdown page generator
//!
//! Renders one mkdocs-ready page per module. Free text from the dump is run
//! through [`expand_tracked`] so embedded references become links, and every
//! item gets the anchor element resolved references point at.

use std::fmt::Write;

use super::dump::ItemKind;
use super::entry::{ItemEntry, ModuleEntry};
use super::resolve::{Resolver, ANCHOR_MARKER};
use super::xref::expand_tracked;

/// Generates Markdown pages from documented modules
pub struct MarkdownGenerator;

/// Page sections, in output order
const SECTIONS: [(&str, fn(&ItemKind) -> bool); 4] = [
    ("Functions", ItemKind::is_callable),
    ("Fields", is_field),
    ("Tables", is_table),
    ("Other", is_other),
];

fn is_field(kind: &ItemKind) -> bool {
    *kind == ItemKind::Field
}

fn is_table(kind: &ItemKind) -> bool {
    *kind == ItemKind::Table
}

fn is_other(kind: &ItemKind) -> bool {
    matches!(kind, ItemKind::Other(_))
}

impl MarkdownGenerator {
    /// Generate the page for a module, recording unresolved references
    pub fn generate(
        module: &ModuleEntry,
        resolver: &Resolver<'_, '_>,
        unresolved: &mut Vec<String>,
    ) -> String {
        let mut output = String::new();

        writeln!(output, "# {}", module.name()).unwrap();
        writeln!(output).unwrap();
        writeln!(output, "*{}*", module.kind().display_name()).unwrap();
        writeln!(output).unwrap();

        for text in [module.summary(), module.description()] {
            if !text.trim().is_empty() {
                writeln!(output, "{}", expand_tracked(resolver, text.trim(), unresolved)).unwrap();
                writeln!(output).unwrap();
            }
        }

        if !module.items().is_empty() {
            writeln!(output, "## Contents").unwrap();
            writeln!(output).unwrap();
            Self::write_toc(&mut output, module, resolver);
        }

        for (title, matches_kind) in SECTIONS {
            let items: Vec<_> = module
                .items()
                .iter()
                .filter(|i| matches_kind(i.kind()))
                .collect();
            if items.is_empty() {
                continue;
            }

            writeln!(output, "## {}", title).unwrap();
            writeln!(output).unwrap();
            for item in items {
                Self::write_item(&mut output, module, item, resolver, unresolved);
            }
        }

        output
    }

    fn write_toc(output: &mut String, module: &ModuleEntry, resolver: &Resolver<'_, '_>) {
        for (title, matches_kind) in SECTIONS {
            let items: Vec<_> = module
                .items()
                .iter()
                .filter(|i| matches_kind(i.kind()))
                .collect();
            if items.is_empty() {
                continue;
            }

            writeln!(output, "### {}", title).unwrap();
            for item in items {
                let anchor = resolver.anchor_style().sanitize(item.refanchor());
                writeln!(
                    output,
                    "- [`{}`](#{}{})",
                    Self::display_name(module, item),
                    ANCHOR_MARKER,
                    anchor
                )
                .unwrap();
            }
            writeln!(output).unwrap();
        }
    }

    fn write_item(
        output: &mut String,
        module: &ModuleEntry,
        item: &ItemEntry,
        resolver: &Resolver<'_, '_>,
        unresolved: &mut Vec<String>,
    ) {
        writeln!(output, "{}", resolver.anchor_here(item.refanchor())).unwrap();
        writeln!(output, "### `{}`", Self::signature(module, item)).unwrap();
        writeln!(output).unwrap();

        for text in [item.summary(), item.description()] {
            if !text.trim().is_empty() {
                writeln!(output, "{}", expand_tracked(resolver, text.trim(), unresolved)).unwrap();
                writeln!(output).unwrap();
            }
        }

        if !item.params().is_empty() {
            writeln!(output, "**Parameters:**").unwrap();
            writeln!(output).unwrap();
            for param in item.params() {
                writeln!(output, "- `{}`", param).unwrap();
            }
            writeln!(output).unwrap();
        }

        if !item.ret().is_empty() {
            writeln!(output, "**Returns:**").unwrap();
            writeln!(output).unwrap();
            for ret in item.ret() {
                writeln!(output, "- {}", expand_tracked(resolver, ret.trim(), unresolved)).unwrap();
            }
            writeln!(output).unwrap();
        }

        writeln!(output, "---").unwrap();
        writeln!(output).unwrap();
    }

    /// Name shown for an item: its qualified alias when it has one
    fn display_name(module: &ModuleEntry, item: &ItemEntry) -> String {
        item.qualified_alias(module)
            .unwrap_or_else(|| item.name().to_string())
    }

    fn signature(module: &ModuleEntry, item: &ItemEntry) -> String {
        let name = Self::display_name(module, item);
        if item.kind().is_callable() {
            format!("{}({})", name, item.params().join(", "))
        } else {
            name
        }
    }
}
