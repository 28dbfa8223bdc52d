//! Variant-driven class name composition for Horizon Lattice.
//!
//! This crate turns a base element plus a chain of *composers* into a
//! reusable composed element whose class attribute is computed per render:
//!
//! - **Class lists**: ordered, deduplicated class tokens
//! - **Variants**: named styling axes mapping values to classes, with
//!   defaults and compound variants
//! - **Composition**: literal classes, transforms, variant tables and other
//!   composed elements, flattened once at build time
//! - **Sheets**: named compositions loaded from TOML or JSON files
//!
//! # Example
//!
//! ```
//! use horizon_lattice_classed::prelude::*;
//!
//! let button = classed(
//!     "button",
//!     [
//!         Composer::from("px-4 py-2"),
//!         Composer::from(
//!             VariantTable::new()
//!                 .variant("color", [("blue", "bg-blue-100"), ("red", "bg-red-100")])
//!                 .variant("size", [(1, "text-xs"), (2, "text-sm")])
//!                 .default_variant("color", "blue"),
//!         ),
//!     ],
//! );
//!
//! // Compose an already composed element; its chain is inlined.
//! let danger = classed(&button, ["font-bold"]);
//!
//! let element = danger.render(
//!     Props::new().with("color", "red").with("size", 2).with("type", "submit"),
//!     None,
//! );
//! assert_eq!(element.tag, "button");
//! assert_eq!(element.class_name, "px-4 py-2 font-bold bg-red-100 text-sm");
//! assert_eq!(element.props.len(), 1);
//! ```

pub mod class_list;
pub mod classed;
pub mod compose;
pub mod element;
pub mod logging;
pub mod props;
pub mod sheet;
pub mod variant;

mod error;

pub use class_list::{ClassInput, ClassList, merge_classes};
pub use classed::{Base, Classed, ClassedBuilder, classed};
pub use compose::{Composer, Resolution, ResolvedComposition, Transform};
pub use element::{Component, Element, NodeRef, RenderHost, Target};
pub use error::{Error, Result};
pub use props::{CLASS_NAME, PropValue, Props};
pub use sheet::{ClassedSheet, SheetEntry};
pub use variant::{CompoundVariant, VariantKey, VariantTable, VariantValues};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::class_list::{ClassList, merge_classes};
    pub use crate::classed::{Classed, ClassedBuilder, classed};
    pub use crate::compose::Composer;
    pub use crate::element::{Component, Element, NodeRef, RenderHost, Target};
    pub use crate::props::{PropValue, Props};
    pub use crate::sheet::ClassedSheet;
    pub use crate::variant::{CompoundVariant, VariantTable};
}
