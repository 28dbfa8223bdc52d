//! Variant tables and their resolution.

mod compound;
pub(crate) mod key;
mod resolver;
pub(crate) mod table;

pub use compound::CompoundVariant;
pub use key::VariantKey;
pub use resolver::{resolve_variant, resolve_variants, selected_value};
pub use table::{VariantTable, VariantValues};
