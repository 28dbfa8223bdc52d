//! Flattened composition state.

use super::composer::{Composer, Transform};
use crate::class_list::ClassList;
use crate::variant::VariantTable;

/// A chain-level class contribution, kept in chain order.
#[derive(Debug, Clone)]
pub enum ClassSource {
    /// Literal classes.
    Static(ClassList),
    /// Classes computed per render.
    Transform(Transform),
}

/// The merged result of walking a composition chain once.
///
/// Nested composed elements are inlined: their class sources are appended
/// and their variant tables merged, so resolving is always a single flat
/// pass regardless of how deep the chain was.
#[derive(Debug, Clone, Default)]
pub struct ResolvedComposition {
    sources: Vec<ClassSource>,
    variants: VariantTable,
}

impl ResolvedComposition {
    /// Create an empty composition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one composer into the composition.
    pub fn push(&mut self, composer: Composer) {
        match composer {
            Composer::Class(classes) => self.push_classes(&classes),
            Composer::Transform(transform) => self.sources.push(ClassSource::Transform(transform)),
            Composer::Variants(table) => self.push_variants(&table),
            Composer::Classed(classed) => self.inline(classed.composition()),
        }
    }

    /// Append literal classes.
    pub fn push_classes(&mut self, classes: &ClassList) {
        if classes.is_empty() {
            return;
        }
        // Adjacent literals collapse into one list.
        if let Some(ClassSource::Static(last)) = self.sources.last_mut() {
            last.extend_from(classes);
        } else {
            self.sources.push(ClassSource::Static(classes.clone()));
        }
    }

    /// Merge a variant table. Later names shadow earlier ones.
    pub fn push_variants(&mut self, table: &VariantTable) {
        self.variants.merge(table);
    }

    /// Inline another resolved composition after the current state.
    pub fn inline(&mut self, other: &ResolvedComposition) {
        for source in &other.sources {
            match source {
                ClassSource::Static(classes) => self.push_classes(classes),
                ClassSource::Transform(transform) => {
                    self.sources.push(ClassSource::Transform(transform.clone()))
                }
            }
        }
        self.variants.merge(&other.variants);
    }

    /// Class sources in chain order.
    pub fn sources(&self) -> &[ClassSource] {
        &self.sources
    }

    /// The merged variant table.
    pub fn variants(&self) -> &VariantTable {
        &self.variants
    }

    /// Every variant name declared anywhere in the chain.
    ///
    /// Merging never removes a name, so the merged table is the reserved set.
    pub fn reserved(&self) -> impl Iterator<Item = &str> {
        self.variants.names()
    }

    /// Check whether a property is consumed by the composition.
    pub fn is_reserved(&self, key: &str) -> bool {
        self.variants.contains(key)
    }

    /// All literal classes, ignoring transforms.
    pub fn static_classes(&self) -> ClassList {
        let mut list = ClassList::new();
        for source in &self.sources {
            if let ClassSource::Static(classes) = source {
                list.extend_from(classes);
            }
        }
        list
    }
}

impl FromIterator<Composer> for ResolvedComposition {
    fn from_iter<I: IntoIterator<Item = Composer>>(iter: I) -> Self {
        let mut composition = Self::new();
        for composer in iter {
            composition.push(composer);
        }
        composition
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_classes_keep_chain_order() {
        let composition: ResolvedComposition =
            ["px-4 py-2", "py-2 bg-white", "shadow"].into_iter().map(Composer::from).collect();
        assert_eq!(composition.static_classes().to_string(), "px-4 py-2 bg-white shadow");
        assert_eq!(composition.sources().len(), 1);
    }

    #[test]
    fn transforms_split_literal_runs() {
        let composition: ResolvedComposition = vec![
            Composer::from("a"),
            Composer::transform(|_| "b".to_string()),
            Composer::from("c"),
        ]
        .into_iter()
        .collect();
        assert_eq!(composition.sources().len(), 3);
    }

    #[test]
    fn reserved_keys_accumulate_across_tables() {
        let mut composition = ResolvedComposition::new();
        composition.push_variants(&VariantTable::new().variant("color", [("blue", "a")]));
        composition.push_variants(&VariantTable::new().variant("size", [("sm", "b")]));
        composition.push_variants(&VariantTable::new().variant("color", [("red", "c")]));

        assert!(composition.is_reserved("color"));
        assert!(composition.is_reserved("size"));
        assert_eq!(composition.reserved().collect::<Vec<_>>(), vec!["color", "size"]);
        assert!(composition.variants().get("color").unwrap().get("blue").is_none());
    }

    #[test]
    fn inlined_composition_reserves_its_names() {
        let mut inner = ResolvedComposition::new();
        inner.push_variants(&VariantTable::new().variant("tone", [("ok", "a")]));
        let mut outer = ResolvedComposition::new();
        outer.push_variants(&VariantTable::new().variant("size", [("sm", "b")]));
        outer.inline(&inner);

        assert_eq!(outer.reserved().collect::<Vec<_>>(), vec!["size", "tone"]);
    }

    #[test]
    fn defaults_do_not_reserve_keys() {
        let mut composition = ResolvedComposition::new();
        composition.push_variants(&VariantTable::new().default_variant("ghost", "x"));
        assert!(!composition.is_reserved("ghost"));
    }
}
