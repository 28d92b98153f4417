//! XML rendering of selector documents.

use std::fmt::Write;

use crate::document::{MoveMapFactory, SelectorDeclaration, SelectorDocument};

/// Renders a [`SelectorDocument`] as indented XML.
///
/// The output holds a `RESIDUE_SELECTORS` block followed by a
/// `MOVE_MAP_FACTORIES` block, ready to be spliced into a protocol script.
#[derive(Debug, Clone)]
pub struct XmlFormatter {
    indent: usize,
}

impl Default for XmlFormatter {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

impl XmlFormatter {
    /// Create a formatter with `indent` spaces per level.
    pub fn new(indent: usize) -> Self {
        Self { indent }
    }

    /// Format a whole document.
    pub fn format(&self, document: &SelectorDocument) -> String {
        let mut out = String::new();

        out.push_str("<RESIDUE_SELECTORS>\n");
        for declaration in document.declarations() {
            self.format_declaration(&mut out, declaration);
        }
        out.push_str("</RESIDUE_SELECTORS>\n");

        out.push_str("<MOVE_MAP_FACTORIES>\n");
        self.format_factory(&mut out, document.factory());
        out.push_str("</MOVE_MAP_FACTORIES>\n");

        out
    }

    // =========================================================================
    // Residue selectors
    // =========================================================================

    fn format_declaration(&self, out: &mut String, decl: &SelectorDeclaration) {
        if decl.negated {
            self.open(out, 1, "Not", &[("name", &decl.name)]);
            self.empty(out, 2, &decl.kind.to_string(), &[(decl.attribute, &decl.value)]);
            self.close(out, 1, "Not");
        } else {
            self.empty(
                out,
                1,
                &decl.kind.to_string(),
                &[("name", &decl.name), (decl.attribute, &decl.value)],
            );
        }
    }

    // =========================================================================
    // Move map factory
    // =========================================================================

    fn format_factory(&self, out: &mut String, factory: &MoveMapFactory) {
        let attributes = [
            ("name", factory.name.as_str()),
            ("bb", "0"),
            ("chi", "0"),
            ("jumps", "0"),
        ];

        let mut entries = Vec::new();
        for region in &factory.regions {
            if factory.backbone {
                entries.push(("Backbone", region.as_str()));
            }
            if factory.chi {
                entries.push(("Chi", region.as_str()));
            }
        }

        if entries.is_empty() {
            self.empty(out, 1, "MoveMapFactory", &attributes);
            return;
        }
        self.open(out, 1, "MoveMapFactory", &attributes);
        for (element, region) in entries {
            self.empty(out, 2, element, &[("residue_selector", region)]);
        }
        self.close(out, 1, "MoveMapFactory");
    }

    // =========================================================================
    // Elements
    // =========================================================================

    fn open(&self, out: &mut String, level: usize, element: &str, attributes: &[(&str, &str)]) {
        self.start_tag(out, level, element, attributes);
        out.push_str(">\n");
    }

    fn empty(&self, out: &mut String, level: usize, element: &str, attributes: &[(&str, &str)]) {
        self.start_tag(out, level, element, attributes);
        out.push_str("/>\n");
    }

    fn close(&self, out: &mut String, level: usize, element: &str) {
        self.pad(out, level);
        let _ = writeln!(out, "</{}>", element);
    }

    fn start_tag(&self, out: &mut String, level: usize, element: &str, attributes: &[(&str, &str)]) {
        self.pad(out, level);
        out.push('<');
        out.push_str(element);
        for (key, value) in attributes {
            let _ = write!(out, " {}=\"{}\"", key, escape(value));
        }
    }

    fn pad(&self, out: &mut String, level: usize) {
        out.extend(std::iter::repeat(' ').take(level * self.indent));
    }
}

/// Escapes a string for use in an XML attribute value.
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
