//! Render-time resolution of a composition.

use super::resolved::{ClassSource, ResolvedComposition};
use crate::class_list::ClassList;
use crate::props::{CLASS_NAME, Props};
use crate::variant::resolve_variants;

/// The outcome of resolving a composition against live properties.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Final merged class string.
    pub class_name: String,
    /// Properties to forward, without variant keys or `className`.
    pub props: Props,
}

impl ResolvedComposition {
    /// Resolve against a live property bag.
    ///
    /// This performs the full resolution:
    /// 1. Chain-level classes, in chain order (transforms see the full bag)
    /// 2. Variant classes, in merged declaration order
    /// 3. Compound variant classes
    /// 4. The caller's `className`, last
    /// 5. Deduplicate, keeping first occurrences
    ///
    /// Forwarded properties are the bag minus every reserved variant name
    /// and `className`. Resolution never fails.
    pub fn resolve(&self, mut props: Props) -> Resolution {
        let class_name = self.class_name(&props).to_string();
        props.retain(|key, _| key != CLASS_NAME && !self.is_reserved(key));
        Resolution { class_name, props }
    }

    /// Compute only the class list for a property bag.
    pub fn class_name(&self, props: &Props) -> ClassList {
        let mut classes = ClassList::new();

        for source in self.sources() {
            match source {
                ClassSource::Static(list) => classes.extend_from(list),
                ClassSource::Transform(transform) => classes.push_str(&transform.apply(props)),
            }
        }

        resolve_variants(self.variants(), props, &mut classes);

        if let Some(extra) = props.class_name() {
            classes.push_str(extra);
        }

        classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::Composer;
    use crate::props::PropValue;
    use crate::variant::VariantTable;

    fn button() -> ResolvedComposition {
        [
            Composer::from("px-4"),
            Composer::from(
                VariantTable::new()
                    .variant("color", [("blue", "bg-blue-100"), ("red", "bg-red-100")])
                    .default_variant("color", "blue"),
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn class_name_appended_last() {
        let resolution = button().resolve(Props::new().with_class_name("mt-2 px-4"));
        assert_eq!(resolution.class_name, "px-4 bg-blue-100 mt-2");
    }

    #[test]
    fn variant_and_class_name_keys_are_stripped() {
        let props = Props::new()
            .with("color", "red")
            .with("href", "#")
            .with_class_name("x");
        let resolution = button().resolve(props);

        assert_eq!(resolution.class_name, "px-4 bg-red-100 x");
        assert_eq!(resolution.props.len(), 1);
        assert_eq!(resolution.props.get("href"), Some(&PropValue::from("#")));
    }

    #[test]
    fn unrelated_props_pass_through_untouched() {
        let handle = PropValue::handle(String::from("onclick"));
        let props = Props::new().with("onClick", handle.clone()).with("disabled", true);
        let resolution = button().resolve(props);
        assert_eq!(resolution.props.get("onClick"), Some(&handle));
        assert_eq!(resolution.props.get("disabled"), Some(&PropValue::Bool(true)));
    }

    #[test]
    fn transforms_see_variant_props() {
        let composition: ResolvedComposition = [
            Composer::transform(|props| match props.get("color").and_then(PropValue::as_str) {
                Some(color) => format!("ring-{color}"),
                None => String::new(),
            }),
            Composer::from(VariantTable::new().variant("color", [("blue", "bg-blue-100")])),
        ]
        .into_iter()
        .collect();

        let resolution = composition.resolve(Props::new().with("color", "blue"));
        assert_eq!(resolution.class_name, "ring-blue bg-blue-100");
        assert!(resolution.props.is_empty());
    }

    #[test]
    fn empty_composition_yields_empty_class() {
        let resolution = ResolvedComposition::new().resolve(Props::new().with("id", "x"));
        assert_eq!(resolution.class_name, "");
        assert_eq!(resolution.props.len(), 1);
    }
}
