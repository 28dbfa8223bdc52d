//! Composition sheets: named compositions loaded from configuration.
//!
//! A sheet is a TOML or JSON document whose top-level keys name composed
//! elements:
//!
//! ```toml
//! [focusable]
//! class = "outline-none focus:ring-2"
//!
//! [button]
//! base = "button"
//! class = ["px-4", "py-2"]
//! compose = ["@focusable"]
//!
//! [button.variants.color]
//! blue = "bg-blue-100"
//! red = "bg-red-100"
//!
//! [button.defaultVariants]
//! color = "blue"
//!
//! [link]
//! base = "@button"
//! class = "underline"
//! ```
//!
//! `base` is a tag or `@name` of another entry (defaults to `div`). Each
//! `compose` item is `@name` or a literal class string. Within an entry the
//! chain is `class`, then `compose` items in order, then the entry's own
//! variant table.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use serde::de::IgnoredAny;

use crate::class_list::ClassList;
use crate::classed::{Base, Classed, ClassedBuilder};
use crate::logging::targets;
use crate::variant::VariantTable;
use crate::variant::table::deserialize_classes;
use crate::{Error, Result};

/// Tag used for entries without a `base`.
pub const DEFAULT_TAG: &str = "div";

/// Prefix marking a reference to another sheet entry.
pub const REFERENCE_PREFIX: char = '@';

/// One named composition in a sheet.
///
/// Keys other than `base`, `class`, `compose`, `variants`,
/// `defaultVariants` and `compoundVariants` are rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "RawEntry")]
pub struct SheetEntry {
    /// Base tag, or `@name` of another entry.
    pub base: Option<String>,
    /// Literal classes.
    pub class: ClassList,
    /// Further composers: `@name` references or literal classes.
    pub compose: Vec<String>,
    /// The entry's own variants, defaults and compound variants.
    pub table: VariantTable,
}

#[derive(Deserialize)]
struct RawEntry {
    #[serde(default)]
    base: Option<String>,
    #[serde(default, deserialize_with = "deserialize_classes")]
    class: ClassList,
    #[serde(default)]
    compose: Vec<String>,
    #[serde(flatten)]
    table: VariantTable,
    // Whatever the table did not claim.
    #[serde(flatten)]
    unknown: IndexMap<String, IgnoredAny>,
}

impl TryFrom<RawEntry> for SheetEntry {
    type Error = String;

    fn try_from(raw: RawEntry) -> std::result::Result<Self, String> {
        if !raw.unknown.is_empty() {
            let keys: Vec<&str> = raw.unknown.keys().map(String::as_str).collect();
            return Err(format!("unknown key(s) in sheet entry: {}", keys.join(", ")));
        }
        Ok(SheetEntry {
            base: raw.base,
            class: raw.class,
            compose: raw.compose,
            table: raw.table,
        })
    }
}

/// A collection of named composition definitions.
#[derive(Debug, Clone, Default)]
pub struct ClassedSheet {
    entries: IndexMap<String, SheetEntry>,
    /// Source file path, when loaded from a file.
    pub source_path: Option<PathBuf>,
}

impl ClassedSheet {
    /// Create an empty sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a sheet from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let entries = toml::from_str::<IndexMap<String, SheetEntry>>(text)
            .map_err(|e| Error::parse("TOML", e.to_string()))?;
        Ok(Self::from_entries(entries))
    }

    /// Parse a sheet from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let entries = serde_json::from_str::<IndexMap<String, SheetEntry>>(text)
            .map_err(|e| Error::parse("JSON", e.to_string()))?;
        Ok(Self::from_entries(entries))
    }

    /// Load a sheet from a file.
    ///
    /// Files ending in `.json` are parsed as JSON, everything else as TOML.
    /// The source path is kept for diagnostics.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let mut sheet = if is_json {
            Self::from_json(&content)?
        } else {
            Self::from_toml(&content)?
        };
        sheet.source_path = Some(path.to_path_buf());

        tracing::debug!(
            target: targets::SHEET,
            path = %path.display(),
            entries = sheet.len(),
            "loaded composition sheet"
        );
        Ok(sheet)
    }

    fn from_entries(entries: IndexMap<String, SheetEntry>) -> Self {
        Self {
            entries,
            source_path: None,
        }
    }

    /// Add or replace an entry. A replaced entry keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, entry: SheetEntry) {
        self.entries.insert(name.into(), entry);
    }

    /// Get an entry.
    pub fn get(&self, name: &str) -> Option<&SheetEntry> {
        self.entries.get(name)
    }

    /// Entry names in document order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the sheet is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build one named entry into a composed element.
    pub fn build(&self, name: &str) -> Result<Classed> {
        let mut built = HashMap::new();
        self.build_entry(name, &mut vec![], &mut built)
    }

    /// Build every entry, in document order.
    pub fn build_all(&self) -> Result<Vec<(String, Classed)>> {
        let mut built = HashMap::new();
        let mut out = Vec::with_capacity(self.entries.len());
        for name in self.entries.keys() {
            let classed = self.build_entry(name, &mut vec![], &mut built)?;
            out.push((name.clone(), classed));
        }
        Ok(out)
    }

    fn build_entry(
        &self,
        name: &str,
        stack: &mut Vec<String>,
        built: &mut HashMap<String, Classed>,
    ) -> Result<Classed> {
        if let Some(classed) = built.get(name) {
            return Ok(classed.clone());
        }
        if let Some(pos) = stack.iter().position(|n| n == name) {
            let mut path = stack[pos..].to_vec();
            path.push(name.to_string());
            return Err(Error::BaseCycle { path });
        }
        let entry = self.get(name).ok_or_else(|| Error::unknown_entry(name))?;

        stack.push(name.to_string());

        let base = match entry.base.as_deref() {
            Some(base) => match reference(base) {
                Some(other) => Base::Classed(self.build_entry(other, stack, built)?),
                None => Base::from(base),
            },
            None => Base::from(DEFAULT_TAG),
        };

        let mut builder = ClassedBuilder::new(base).name(name).class(entry.class.clone());
        for item in &entry.compose {
            builder = match reference(item) {
                Some(other) => builder.compose(self.build_entry(other, stack, built)?),
                None => builder.class(item.as_str()),
            };
        }
        let classed = builder.variants(entry.table.clone()).build();

        stack.pop();
        built.insert(name.to_string(), classed.clone());
        Ok(classed)
    }
}

fn reference(value: &str) -> Option<&str> {
    value.strip_prefix(REFERENCE_PREFIX).map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::Props;

    const SHEET: &str = r#"
[focusable]
class = "outline-none"

[button]
base = "button"
class = ["px-4", "py-2"]
compose = ["@focusable", "select-none"]

[button.variants.color]
blue = "bg-blue-100"
red = "bg-red-100"

[button.variants.size]
1 = "text-xs"
2 = "text-sm"

[button.defaultVariants]
color = "blue"
size = 2

[[button.compoundVariants]]
color = "red"
size = [1, 2]
class = "font-bold"

[link]
base = "@button"
class = "underline"
"#;

    #[test]
    fn parse_toml_in_document_order() {
        let sheet = ClassedSheet::from_toml(SHEET).unwrap();
        assert_eq!(sheet.names().collect::<Vec<_>>(), vec!["focusable", "button", "link"]);

        let button = sheet.get("button").unwrap();
        assert_eq!(button.table.names().collect::<Vec<_>>(), vec!["color", "size"]);
        assert_eq!(button.table.default_for("size").unwrap(), "2");
        assert_eq!(button.table.compound_variants().len(), 1);
    }

    #[test]
    fn build_resolves_references() {
        let sheet = ClassedSheet::from_toml(SHEET).unwrap();
        let button = sheet.build("button").unwrap();

        assert_eq!(button.display_name(), Some("button"));
        assert_eq!(
            button.class_name(&Props::new()),
            "px-4 py-2 outline-none select-none bg-blue-100 text-sm"
        );
        assert_eq!(
            button.class_name(&Props::new().with("color", "red").with("size", 1)),
            "px-4 py-2 outline-none select-none bg-red-100 text-xs font-bold"
        );
    }

    #[test]
    fn referenced_base_is_flattened() {
        let sheet = ClassedSheet::from_toml(SHEET).unwrap();
        let link = sheet.build("link").unwrap();
        let element = link.render(Props::new().with("color", "red"), None);

        assert_eq!(element.tag, "button");
        assert!(element.has_classes("bg-red-100 underline outline-none"));
        assert!(element.props.is_empty());
    }

    #[test]
    fn missing_base_defaults_to_div() {
        let sheet = ClassedSheet::from_toml(SHEET).unwrap();
        assert_eq!(sheet.build("focusable").unwrap().target().tag(), Some(DEFAULT_TAG));
    }

    #[test]
    fn unknown_reference_is_an_error() {
        let sheet = ClassedSheet::from_toml("[a]\nbase = \"@nope\"\n").unwrap();
        assert!(matches!(sheet.build("a"), Err(Error::UnknownEntry { ref name }) if name == "nope"));
        assert!(matches!(sheet.build("zzz"), Err(Error::UnknownEntry { .. })));
    }

    #[test]
    fn cycles_are_reported() {
        let sheet = ClassedSheet::from_toml(
            "[a]\nbase = \"@b\"\n\n[b]\ncompose = [\"@c\"]\n\n[c]\nbase = \"@a\"\n",
        )
        .unwrap();
        match sheet.build("a") {
            Err(Error::BaseCycle { path }) => assert_eq!(path, vec!["a", "b", "c", "a"]),
            other => panic!("expected cycle, got {other:?}"),
        }
    }

    #[test]
    fn parse_json() {
        let sheet = ClassedSheet::from_json(
            r#"{ "badge": { "base": "span", "variants": { "tone": { "ok": "bg-green-100" } } } }"#,
        )
        .unwrap();
        let badge = sheet.build("badge").unwrap();
        assert_eq!(badge.class_name(&Props::new().with("tone", "ok")), "bg-green-100");
    }

    #[test]
    fn malformed_text_is_a_parse_error() {
        assert!(matches!(
            ClassedSheet::from_toml("[a\nbase ="),
            Err(Error::Parse { format: "TOML", .. })
        ));
        assert!(matches!(
            ClassedSheet::from_json("{ nope"),
            Err(Error::Parse { format: "JSON", .. })
        ));
    }

    #[test]
    fn misspelled_key_is_rejected() {
        let err = ClassedSheet::from_toml("[a]\nbase = \"button\"\n\n[a.variant.color]\nblue = \"bg-blue-100\"\n")
            .unwrap_err();
        match err {
            Error::Parse { format: "TOML", message } => assert!(message.contains("variant"), "{message}"),
            other => panic!("expected parse error, got {other:?}"),
        }

        let err = ClassedSheet::from_json(r#"{ "a": { "clas": "p-4" } }"#).unwrap_err();
        assert!(matches!(err, Error::Parse { format: "JSON", ref message } if message.contains("clas")));
    }

    #[test]
    fn every_known_key_is_accepted() {
        let sheet = ClassedSheet::from_json(
            r#"{ "a": {
                "base": "span",
                "class": "p-1",
                "compose": ["m-1"],
                "variants": { "tone": { "ok": "x" } },
                "defaultVariants": { "tone": "ok" },
                "compoundVariants": [{ "tone": "ok", "class": "y" }]
            } }"#,
        )
        .unwrap();
        assert_eq!(sheet.build("a").unwrap().class_name(&Props::new()), "p-1 m-1 x y");
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut sheet = ClassedSheet::from_toml(SHEET).unwrap();
        sheet.insert("focusable", SheetEntry::default());
        sheet.insert("extra", SheetEntry::default());
        assert_eq!(
            sheet.names().collect::<Vec<_>>(),
            vec!["focusable", "button", "link", "extra"]
        );
    }

    #[test]
    fn build_all_shares_built_entries() {
        let sheet = ClassedSheet::from_toml(SHEET).unwrap();
        let all = sheet.build_all().unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[2].0, "link");
    }
}
