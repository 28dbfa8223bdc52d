//! Variant selection against a property bag.
//!
//! For every declared variant the active value is the explicit prop (when
//! present and not null), else the table default, else nothing. A value with
//! no matching entry contributes no classes. This never fails and never logs
//! above trace level: styling is cosmetic and must not break a render.

use super::key::VariantKey;
use super::table::VariantTable;
use crate::class_list::ClassList;
use crate::props::{PropValue, Props};

/// The active value of a variant.
///
/// Returns `None` when neither an explicit prop nor a default applies, or
/// when the explicit prop is an opaque handle that cannot name a value.
pub fn selected_value(table: &VariantTable, name: &str, props: &Props) -> Option<VariantKey> {
    match props.get(name) {
        Some(PropValue::Null) | None => table.default_for(name).cloned(),
        Some(value) => value.to_variant_key(),
    }
}

/// The classes selected for one variant.
pub fn resolve_variant<'t>(table: &'t VariantTable, name: &str, props: &Props) -> Option<&'t ClassList> {
    let values = table.get(name)?;
    let selected = selected_value(table, name, props)?;
    values.get(selected.as_str())
}

/// Append the classes of every variant, then of every matching compound
/// variant, in declaration order.
pub fn resolve_variants(table: &VariantTable, props: &Props, out: &mut ClassList) {
    for (name, values) in table.iter() {
        let Some(selected) = selected_value(table, name, props) else {
            continue;
        };
        match values.get(selected.as_str()) {
            Some(classes) => out.extend_from(classes),
            None => tracing::trace!(
                target: crate::logging::targets::COMPOSE,
                variant = name,
                value = selected.as_str(),
                "no classes declared for variant value"
            ),
        }
    }

    for compound in table.compound_variants() {
        if compound.matches(|name| selected_value(table, name, props)) {
            out.extend_from(compound.classes());
        }
    }
}
