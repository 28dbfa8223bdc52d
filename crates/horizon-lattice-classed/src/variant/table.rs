//! Variant tables.

use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer};

use super::compound::CompoundVariant;
use super::key::VariantKey;
use crate::class_list::ClassList;
use crate::{Error, Result};

/// The value-set of a single variant: value key to class tokens.
///
/// Entries keep their declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariantValues {
    entries: IndexMap<VariantKey, ClassList>,
}

impl VariantValues {
    /// Create an empty value-set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, value: impl Into<VariantKey>, classes: impl Into<ClassList>) -> Self {
        self.insert(value, classes);
        self
    }

    /// Insert a value, replacing the classes of an existing equal key in place.
    pub fn insert(&mut self, value: impl Into<VariantKey>, classes: impl Into<ClassList>) {
        self.entries.insert(value.into(), classes.into());
    }

    /// Look up the classes for a normalized value.
    pub fn get(&self, value: &str) -> Option<&ClassList> {
        self.entries.get(value)
    }

    /// Check whether a value is declared.
    pub fn contains(&self, value: &str) -> bool {
        self.entries.contains_key(value)
    }

    /// Iterate over declared values in order.
    pub fn keys(&self) -> impl Iterator<Item = &VariantKey> {
        self.entries.keys()
    }

    /// Iterate over `(value, classes)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&VariantKey, &ClassList)> {
        self.entries.iter()
    }

    /// Number of declared values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no values are declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, C> FromIterator<(K, C)> for VariantValues
where
    K: Into<VariantKey>,
    C: Into<ClassList>,
{
    fn from_iter<I: IntoIterator<Item = (K, C)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (k, c) in iter {
            values.insert(k, c);
        }
        values
    }
}

impl IntoIterator for VariantValues {
    type Item = (VariantKey, ClassList);
    type IntoIter = indexmap::map::IntoIter<VariantKey, ClassList>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// A table of named variants, their defaults and compound variants.
///
/// # Example
///
/// ```
/// use horizon_lattice_classed::VariantTable;
///
/// let table = VariantTable::new()
///     .variant("color", [("blue", "bg-blue-100"), ("red", "bg-red-100")])
///     .variant("size", [(1, "text-xs"), (2, "text-sm")])
///     .default_variant("color", "blue");
///
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.default_for("color").map(|k| k.as_str()), Some("blue"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariantTable {
    variants: IndexMap<String, VariantValues>,
    default_variants: IndexMap<String, VariantKey>,
    compound_variants: Vec<CompoundVariant>,
}

impl VariantTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant declaration.
    pub fn variant<I, K, C>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = (K, C)>,
        K: Into<VariantKey>,
        C: Into<ClassList>,
    {
        self.insert_variant(name, values.into_iter().collect());
        self
    }

    /// Builder-style default declaration.
    pub fn default_variant(mut self, name: impl Into<String>, value: impl Into<VariantKey>) -> Self {
        self.set_default(name, value);
        self
    }

    /// Builder-style compound variant declaration.
    pub fn compound(mut self, compound: CompoundVariant) -> Self {
        self.compound_variants.push(compound);
        self
    }

    /// Declare a variant.
    ///
    /// Redeclaring an existing name replaces its whole value-set but keeps
    /// the first declaration position.
    pub fn insert_variant(&mut self, name: impl Into<String>, values: VariantValues) {
        self.variants.insert(name.into(), values);
    }

    /// Set the default value of a variant.
    pub fn set_default(&mut self, name: impl Into<String>, value: impl Into<VariantKey>) {
        self.default_variants.insert(name.into(), value.into());
    }

    /// Add a compound variant.
    pub fn add_compound(&mut self, compound: CompoundVariant) {
        self.compound_variants.push(compound);
    }

    /// Get the value-set of a variant.
    pub fn get(&self, name: &str) -> Option<&VariantValues> {
        self.variants.get(name)
    }

    /// Check whether a variant is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.variants.contains_key(name)
    }

    /// The default value for a declared variant.
    ///
    /// Defaults that name an undeclared variant are ignored.
    pub fn default_for(&self, name: &str) -> Option<&VariantKey> {
        if !self.contains(name) {
            return None;
        }
        self.default_variants.get(name)
    }

    /// Iterate over variant names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variants.keys().map(String::as_str)
    }

    /// Iterate over `(name, values)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VariantValues)> {
        self.variants.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// All declared defaults in declaration order, including dangling ones.
    pub fn default_variants(&self) -> &IndexMap<String, VariantKey> {
        &self.default_variants
    }

    /// Compound variants in declaration order.
    pub fn compound_variants(&self) -> &[CompoundVariant] {
        &self.compound_variants
    }

    /// Number of declared variants.
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Check if no variants are declared.
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty() && self.compound_variants.is_empty()
    }

    /// Merge a later table into this one.
    ///
    /// Same-named variants from `other` replace the value-set wholesale,
    /// defaults are overwritten key by key and compound variants appended.
    pub fn merge(&mut self, other: &VariantTable) {
        for (name, values) in &other.variants {
            self.insert_variant(name.clone(), values.clone());
        }
        for (name, value) in &other.default_variants {
            self.default_variants.insert(name.clone(), value.clone());
        }
        self.compound_variants
            .extend(other.compound_variants.iter().cloned());
    }

    /// Check that every default names a declared variant value.
    ///
    /// Defaults are checked in declaration order. Resolution never calls
    /// this; dangling defaults just select nothing.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in &self.default_variants {
            let declared = self
                .get(name)
                .is_some_and(|values| values.contains(value.as_str()));
            if !declared {
                return Err(Error::unknown_default(name.as_str(), value.as_str()));
            }
        }
        Ok(())
    }
}

/// Classes given either as one string or as a list of strings.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum ClassesField {
    One(String),
    Many(Vec<String>),
}

impl From<ClassesField> for ClassList {
    fn from(field: ClassesField) -> Self {
        match field {
            ClassesField::One(s) => ClassList::parse(&s),
            ClassesField::Many(items) => items.into_iter().collect(),
        }
    }
}

pub(crate) fn deserialize_classes<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<ClassList, D::Error> {
    ClassesField::deserialize(deserializer).map(ClassList::from)
}

struct ClassEntry(ClassList);

impl<'de> Deserialize<'de> for ClassEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserialize_classes(deserializer).map(ClassEntry)
    }
}

impl<'de> Deserialize<'de> for VariantValues {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let entries = IndexMap::<VariantKey, ClassEntry>::deserialize(deserializer)?;
        Ok(entries
            .into_iter()
            .map(|(key, ClassEntry(classes))| (key, classes))
            .collect())
    }
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTable {
    #[serde(default)]
    variants: IndexMap<String, VariantValues>,
    #[serde(default)]
    default_variants: IndexMap<String, VariantKey>,
    #[serde(default)]
    compound_variants: Vec<CompoundVariant>,
}

impl From<RawTable> for VariantTable {
    fn from(raw: RawTable) -> Self {
        VariantTable {
            variants: raw.variants,
            default_variants: raw.default_variants,
            compound_variants: raw.compound_variants,
        }
    }
}

impl<'de> Deserialize<'de> for VariantTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        RawTable::deserialize(deserializer).map(VariantTable::from)
    }
}
