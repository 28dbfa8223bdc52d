//! Render targets and rendered elements.
//!
//! A composed element always bottoms out in a primitive [`Element`]: a tag,
//! its computed class string, the forwarded properties and the caller's
//! [`NodeRef`]. How that element reaches the screen is up to a
//! [`RenderHost`].

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::props::Props;

/// An opaque reference handle supplied by the caller.
///
/// The handle is carried unchanged through every layer of composition to the
/// primitive element, so a host can bind it to whatever node it creates.
#[derive(Clone)]
pub struct NodeRef(Arc<dyn Any + Send + Sync>);

impl NodeRef {
    /// Wrap a host value as a reference handle.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Downcast to the host type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Check whether two handles are the same handle.
    pub fn ptr_eq(&self, other: &NodeRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeRef({:p})", Arc::as_ptr(&self.0))
    }
}

/// A primitive element ready for the host.
#[derive(Debug, Clone)]
pub struct Element {
    /// Primitive tag name (e.g. "button").
    pub tag: String,
    /// Final merged class string.
    pub class_name: String,
    /// Forwarded properties, with consumed keys removed.
    pub props: Props,
    /// Reference handle passed through from the caller.
    pub node_ref: Option<NodeRef>,
}

impl Element {
    /// Create an element with no classes or properties.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            class_name: String::new(),
            props: Props::new(),
            node_ref: None,
        }
    }

    /// Check whether the class string contains a token.
    pub fn has_class(&self, class: &str) -> bool {
        self.class_name.split_whitespace().any(|c| c == class)
    }

    /// Check whether every token of `classes` is present.
    pub fn has_classes(&self, classes: &str) -> bool {
        classes.split_whitespace().all(|c| self.has_class(c))
    }
}

type RenderFn = dyn Fn(Props, Option<NodeRef>) -> Element + Send + Sync;

/// A host component used as a base target.
///
/// The component receives the forwarded properties (with the computed
/// `className` set) and the caller's reference handle.
///
/// # Example
///
/// ```
/// use horizon_lattice_classed::{Component, Element};
///
/// let link = Component::new("Link", |props, node_ref| Element {
///     tag: "a".into(),
///     class_name: props.class_name().unwrap_or_default().to_string(),
///     props,
///     node_ref,
/// });
/// assert_eq!(link.name(), "Link");
/// ```
#[derive(Clone)]
pub struct Component {
    name: String,
    render: Arc<RenderFn>,
}

impl Component {
    /// Create a component from a render function.
    pub fn new<F>(name: impl Into<String>, render: F) -> Self
    where
        F: Fn(Props, Option<NodeRef>) -> Element + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            render: Arc::new(render),
        }
    }

    /// Component name, for diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the component.
    pub fn render(&self, props: Props, node_ref: Option<NodeRef>) -> Element {
        (self.render)(props, node_ref)
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component").field("name", &self.name).finish()
    }
}

/// The thing a composed element ultimately renders.
#[derive(Debug, Clone)]
pub enum Target {
    /// A primitive element tag.
    Tag(String),
    /// A host component.
    Component(Component),
}

impl Target {
    /// The primitive tag, if this is one.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Target::Tag(tag) => Some(tag),
            Target::Component(_) => None,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Tag(tag) => f.write_str(tag),
            Target::Component(component) => write!(f, "<{}>", component.name()),
        }
    }
}

impl From<&str> for Target {
    fn from(tag: &str) -> Self {
        Target::Tag(tag.to_string())
    }
}

impl From<String> for Target {
    fn from(tag: String) -> Self {
        Target::Tag(tag)
    }
}

impl From<Component> for Target {
    fn from(component: Component) -> Self {
        Target::Component(component)
    }
}

/// The host rendering system.
///
/// Implement this to turn primitive elements into real nodes.
pub trait RenderHost {
    /// What the host produces for one element.
    type Output;

    /// Render one primitive element.
    fn render_element(&mut self, element: Element) -> Self::Output;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_ref_identity() {
        let a = NodeRef::new(42u32);
        let b = a.clone();
        let c = NodeRef::new(42u32);
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&c));
        assert_eq!(a.downcast_ref::<u32>(), Some(&42));
        assert!(a.downcast_ref::<i64>().is_none());
    }

    #[test]
    fn element_class_queries() {
        let mut element = Element::new("button");
        element.class_name = "bg-blue-100 test".to_string();
        assert!(element.has_class("test"));
        assert!(!element.has_class("bg-blue"));
        assert!(element.has_classes("test bg-blue-100"));
    }

    #[test]
    fn component_target_display() {
        let target = Target::from(Component::new("Card", |_, _| Element::new("div")));
        assert_eq!(target.to_string(), "<Card>");
        assert!(target.tag().is_none());
        assert_eq!(Target::from("a").tag(), Some("a"));
    }
}
