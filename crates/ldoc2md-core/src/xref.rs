//! Embedded cross-references in documentation text
//!
//! LDoc comments reference other entries with `@{Name}` or, to override the
//! link text, `@{Name|Text}`. [`scan`] yields each occurrence lazily and
//! [`expand`] replaces every occurrence with a Markdown link.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

use super::resolve::Resolver;

/// One `@{...}` occurrence in a piece of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XrefSpan<'t> {
    /// Byte range of the whole `@{...}` occurrence
    pub range: Range<usize>,
    /// Reference to resolve
    pub name: &'t str,
    /// Explicit display text, if given
    pub text: Option<&'t str>,
}

impl<'t> XrefSpan<'t> {
    /// Text to show for this reference
    pub fn display_text(&self) -> &'t str {
        self.text.unwrap_or(self.name)
    }
}

fn xref_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"@\{([^}]+)\}").expect("xref regex must compile"))
}

/// Split the inside of `@{...}`. The `Name|Text` form is tried first; the
/// whole body is a bare name only when it does not fit that form.
fn split_body(body: &str) -> (&str, Option<&str>) {
    match body.split_once('|') {
        Some((name, text)) if !name.is_empty() && !text.is_empty() => (name, Some(text)),
        _ => (body, None),
    }
}

/// Lazily find every cross-reference in `text`
pub fn scan(text: &str) -> impl Iterator<Item = XrefSpan<'_>> {
    xref_regex().captures_iter(text).filter_map(|caps| {
        let whole = caps.get(0)?;
        let body = caps.get(1)?.as_str();
        let (name, explicit) = split_body(body);
        Some(XrefSpan {
            range: whole.range(),
            name,
            text: explicit,
        })
    })
}

/// Replace every cross-reference in `text` with a Markdown link.
///
/// An unresolved reference becomes `Text (xref: "Name")` instead of failing.
pub fn expand(resolver: &Resolver<'_, '_>, text: &str) -> String {
    let mut unresolved = Vec::new();
    expand_tracked(resolver, text, &mut unresolved)
}

/// Like [`expand`], additionally recording the names that did not resolve
pub fn expand_tracked(
    resolver: &Resolver<'_, '_>,
    text: &str,
    unresolved: &mut Vec<String>,
) -> String {
    let mut output = String::with_capacity(text.len());
    let mut last = 0;

    for span in scan(text) {
        output.push_str(&text[last..span.range.start]);
        output.push_str(&render_span(resolver, &span, unresolved));
        last = span.range.end;
    }
    output.push_str(&text[last..]);

    output
}

fn render_span(
    resolver: &Resolver<'_, '_>,
    span: &XrefSpan<'_>,
    unresolved: &mut Vec<String>,
) -> String {
    let text = span.display_text();
    match resolver.resolve(span.name) {
        Ok(resolved) => format!("[{}]({})", text, resolved.target),
        Err(err) => {
            warn!(reference = span.name, "{}", err);
            unresolved.push(span.name.to_string());
            format!("{} (xref: \"{}\")", text, span.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dump::load_dump;
    use crate::entry::DocSet;
    use crate::index::SymbolIndex;
    use crate::resolve::AnchorStyle;

    fn create_test_docs() -> DocSet {
        DocSet::from_raw(
            load_dump(
                r#"[{"name": "Mod", "type": "module", "items": [
                    {"name": "item", "type": "function"}
                ]}]"#,
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_scan_both_forms() {
        let spans: Vec<_> = scan("See @{Mod.item|See this} and @{Mod}.").collect();
        assert_eq!(spans.len(), 2);

        assert_eq!(spans[0].name, "Mod.item");
        assert_eq!(spans[0].text, Some("See this"));
        assert_eq!(spans[0].range, 4..24);

        assert_eq!(spans[1].name, "Mod");
        assert_eq!(spans[1].text, None);
        assert_eq!(spans[1].display_text(), "Mod");
    }

    #[test]
    fn test_scan_degenerate_bodies() {
        let spans: Vec<_> = scan("@{|x} @{a|} @{a|b|c} @{} @{open").collect();
        let parts: Vec<_> = spans.iter().map(|s| (s.name, s.text)).collect();
        assert_eq!(
            parts,
            vec![("|x", None), ("a|", None), ("a", Some("b|c"))]
        );
    }

    #[test]
    fn test_expand_links() {
        let docs = create_test_docs();
        let index = SymbolIndex::build(&docs);
        let resolver = Resolver::new(&index, AnchorStyle::default());

        assert_eq!(
            expand(&resolver, "Call @{Mod.item|See this} first."),
            "Call [See this](Mod.md#-item) first."
        );
        assert_eq!(
            expand(&resolver, "@{Mod.item}"),
            "[Mod.item](Mod.md#-item)"
        );
        assert_eq!(expand(&resolver, "@{Mod}"), "[Mod](Mod.md)");
    }

    #[test]
    fn test_expand_keeps_reference_text_for_external() {
        let docs = create_test_docs();
        let index = SymbolIndex::build(&docs);
        let resolver = Resolver::new(&index, AnchorStyle::default());

        assert_eq!(
            expand(&resolver, "A @{rbx:class/Part}"),
            "A [rbx:class/Part](https://developer.roblox.com/api-reference/class/Part)"
        );
        assert_eq!(
            expand(&resolver, "Returns @{string|a string}"),
            "Returns [a string](https://www.lua.org/manual/5.1/manual.html)"
        );
    }

    #[test]
    fn test_expand_unknown_reference() {
        let docs = create_test_docs();
        let index = SymbolIndex::build(&docs);
        let resolver = Resolver::new(&index, AnchorStyle::default());

        let mut unresolved = Vec::new();
        let out = expand_tracked(
            &resolver,
            "@{UnknownSymbolXYZ} and @{Nope|the nope} but @{Mod}",
            &mut unresolved,
        );
        assert_eq!(
            out,
            "UnknownSymbolXYZ (xref: \"UnknownSymbolXYZ\") and the nope (xref: \"Nope\") but [Mod](Mod.md)"
        );
        assert_eq!(unresolved, vec!["UnknownSymbolXYZ", "Nope"]);
    }

    #[test]
    fn test_expand_without_references() {
        let docs = create_test_docs();
        let index = SymbolIndex::build(&docs);
        let resolver = Resolver::new(&index, AnchorStyle::default());

        assert_eq!(expand(&resolver, "plain text {with braces}"), "plain text {with braces}");
        assert_eq!(expand(&resolver, ""), "");
    }
}
