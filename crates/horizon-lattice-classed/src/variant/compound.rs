//! Compound variants: classes applied when several variants line up.

use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};

use super::key::VariantKey;
use crate::class_list::ClassList;

/// Classes applied when every condition matches the selected variant values.
///
/// A condition lists one or more accepted values for a variant; the selected
/// value (explicit prop or default) must be one of them.
///
/// # Example
///
/// ```
/// use horizon_lattice_classed::CompoundVariant;
///
/// let compound = CompoundVariant::new("font-bold uppercase")
///     .when("color", "blue")
///     .when_any("size", ["lg", "xl"]);
/// assert_eq!(compound.conditions().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompoundVariant {
    conditions: Vec<(String, Vec<VariantKey>)>,
    classes: ClassList,
}

impl CompoundVariant {
    /// Create a compound variant with no conditions yet.
    pub fn new(classes: impl Into<ClassList>) -> Self {
        Self {
            conditions: vec![],
            classes: classes.into(),
        }
    }

    /// Require `variant` to be selected as `value`.
    pub fn when(self, variant: impl Into<String>, value: impl Into<VariantKey>) -> Self {
        self.when_any(variant, [value])
    }

    /// Require `variant` to be selected as any of `values`.
    pub fn when_any<I, K>(mut self, variant: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<VariantKey>,
    {
        self.conditions
            .push((variant.into(), values.into_iter().map(Into::into).collect()));
        self
    }

    /// The conditions, in declaration order.
    pub fn conditions(&self) -> &[(String, Vec<VariantKey>)] {
        &self.conditions
    }

    /// Classes contributed on a match.
    pub fn classes(&self) -> &ClassList {
        &self.classes
    }

    /// Check the conditions against a selection function.
    ///
    /// `selected` returns the active value of a variant, if any. A compound
    /// variant without conditions never matches.
    pub fn matches(&self, mut selected: impl FnMut(&str) -> Option<VariantKey>) -> bool {
        !self.conditions.is_empty()
            && self.conditions.iter().all(|(variant, accepted)| {
                selected(variant).is_some_and(|value| accepted.contains(&value))
            })
    }
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(VariantKey),
    Many(Vec<VariantKey>),
}

impl<'de> Deserialize<'de> for CompoundVariant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CompoundVisitor;

        impl<'de> Visitor<'de> for CompoundVisitor {
            type Value = CompoundVariant;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of variant conditions with a `class` entry")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut compound = CompoundVariant::default();
                while let Some(key) = map.next_key::<String>()? {
                    if key == "class" || key == "className" {
                        let classes = map.next_value::<Classes>()?;
                        compound.classes.extend_from(&classes.0);
                    } else {
                        let accepted = match map.next_value::<OneOrMany>()? {
                            OneOrMany::One(value) => vec![value],
                            OneOrMany::Many(values) => values,
                        };
                        compound.conditions.push((key, accepted));
                    }
                }
                Ok(compound)
            }
        }

        deserializer.deserialize_map(CompoundVisitor)
    }
}

struct Classes(ClassList);

impl<'de> Deserialize<'de> for Classes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        super::table::deserialize_classes(deserializer).map(Classes)
    }
}
