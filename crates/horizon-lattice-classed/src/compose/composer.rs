//! Composition chain links.

use std::fmt;
use std::sync::Arc;

use crate::class_list::ClassList;
use crate::classed::Classed;
use crate::props::Props;
use crate::variant::VariantTable;

type TransformFn = dyn Fn(&Props) -> String + Send + Sync;

/// A caller-owned function computing classes from the live properties.
///
/// Transforms run on every render with the full, unfiltered property bag.
/// A panic inside a transform is not caught.
#[derive(Clone)]
pub struct Transform(Arc<TransformFn>);

impl Transform {
    /// Wrap a class-computing function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Props) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Run the transform.
    pub fn apply(&self, props: &Props) -> String {
        (self.0)(props)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Transform(..)")
    }
}

/// One link of a composition chain.
///
/// Every kind of composer input is classified into this closed set once,
/// when the composed element is built.
#[derive(Debug, Clone)]
pub enum Composer {
    /// Literal classes.
    Class(ClassList),
    /// Classes computed from properties.
    Transform(Transform),
    /// A variant table.
    Variants(VariantTable),
    /// Another composed element, inlined rather than nested.
    Classed(Classed),
}

impl Composer {
    /// Build a transform composer from a closure.
    pub fn transform<F>(f: F) -> Self
    where
        F: Fn(&Props) -> String + Send + Sync + 'static,
    {
        Composer::Transform(Transform::new(f))
    }
}

impl From<&str> for Composer {
    fn from(classes: &str) -> Self {
        Composer::Class(ClassList::parse(classes))
    }
}

impl From<String> for Composer {
    fn from(classes: String) -> Self {
        Composer::Class(ClassList::parse(&classes))
    }
}

impl From<ClassList> for Composer {
    fn from(classes: ClassList) -> Self {
        Composer::Class(classes)
    }
}

impl From<Transform> for Composer {
    fn from(transform: Transform) -> Self {
        Composer::Transform(transform)
    }
}

impl From<VariantTable> for Composer {
    fn from(table: VariantTable) -> Self {
        Composer::Variants(table)
    }
}

impl From<Classed> for Composer {
    fn from(classed: Classed) -> Self {
        Composer::Classed(classed)
    }
}

impl From<&Classed> for Composer {
    fn from(classed: &Classed) -> Self {
        Composer::Classed(classed.clone())
    }
}
