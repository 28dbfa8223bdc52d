//! Composed elements.
//!
//! [`classed`] binds a composition chain to a base target and returns a
//! [`Classed`] element. All chain work happens once, at creation; rendering
//! only selects variants and merges classes.

use std::fmt;
use std::sync::Arc;

use crate::class_list::ClassList;
use crate::compose::{Composer, Resolution, ResolvedComposition, Transform};
use crate::element::{Component, Element, NodeRef, RenderHost, Target};
use crate::logging::targets;
use crate::props::{CLASS_NAME, Props};
use crate::variant::VariantTable;

/// The base a composed element renders.
///
/// Either a plain [`Target`] or another composed element whose composition
/// is inlined ahead of the new chain.
#[derive(Debug, Clone)]
pub enum Base {
    /// A primitive tag or host component.
    Target(Target),
    /// A previously composed element.
    Classed(Classed),
}

impl From<&str> for Base {
    fn from(tag: &str) -> Self {
        Base::Target(Target::from(tag))
    }
}

impl From<String> for Base {
    fn from(tag: String) -> Self {
        Base::Target(Target::from(tag))
    }
}

impl From<Target> for Base {
    fn from(target: Target) -> Self {
        Base::Target(target)
    }
}

impl From<Component> for Base {
    fn from(component: Component) -> Self {
        Base::Target(Target::Component(component))
    }
}

impl From<Classed> for Base {
    fn from(classed: Classed) -> Self {
        Base::Classed(classed)
    }
}

impl From<&Classed> for Base {
    fn from(classed: &Classed) -> Self {
        Base::Classed(classed.clone())
    }
}

#[derive(Debug)]
struct ClassedInner {
    target: Target,
    composition: ResolvedComposition,
    name: Option<String>,
}

/// A reusable composed element.
///
/// Cloning is cheap: the resolved composition is shared and never mutated,
/// so one `Classed` can be rendered from any number of places at once.
///
/// # Example
///
/// ```
/// use horizon_lattice_classed::prelude::*;
///
/// let button = classed(
///     "button",
///     [Composer::from(
///         VariantTable::new()
///             .variant("color", [("blue", "bg-blue-100")])
///             .default_variant("color", "blue"),
///     )],
/// );
///
/// assert_eq!(button.render(Props::new(), None).class_name, "bg-blue-100");
///
/// let element = button.render(Props::new().with("color", "blue").with_class_name("test"), None);
/// assert_eq!(element.class_name, "bg-blue-100 test");
///
/// let element = button.render(Props::new().with("color", "green"), None);
/// assert_eq!(element.class_name, "");
/// ```
#[derive(Clone)]
pub struct Classed {
    inner: Arc<ClassedInner>,
}

static_assertions::assert_impl_all!(Classed: Send, Sync);

/// Compose a base target with a chain of composers.
///
/// Composers are applied in order: literal classes and transforms
/// accumulate, variant tables merge (later names replace earlier value-sets)
/// and composed elements are inlined.
pub fn classed<B, I>(base: B, composers: I) -> Classed
where
    B: Into<Base>,
    I: IntoIterator,
    I::Item: Into<Composer>,
{
    let mut builder = ClassedBuilder::new(base);
    for composer in composers {
        builder = builder.compose(composer);
    }
    builder.build()
}

impl Classed {
    /// Start building a composed element.
    pub fn builder(base: impl Into<Base>) -> ClassedBuilder {
        ClassedBuilder::new(base)
    }

    /// The ultimately rendered target.
    pub fn target(&self) -> &Target {
        &self.inner.target
    }

    /// The flattened composition.
    pub fn composition(&self) -> &ResolvedComposition {
        &self.inner.composition
    }

    /// The merged variant table.
    pub fn variants(&self) -> &VariantTable {
        self.inner.composition.variants()
    }

    /// Variant names accepted as properties, in declaration order.
    pub fn variant_names(&self) -> impl Iterator<Item = &str> {
        self.variants().names()
    }

    /// Diagnostic name, if one was given.
    pub fn display_name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    /// Resolve classes and forwarded properties without rendering.
    pub fn resolve(&self, props: Props) -> Resolution {
        self.inner.composition.resolve(props)
    }

    /// Compute only the class string for a property bag.
    pub fn class_name(&self, props: &Props) -> String {
        self.inner.composition.class_name(props).to_string()
    }

    /// Render to a primitive element.
    ///
    /// `node_ref` is handed unchanged to the primitive element, through any
    /// host component the target may be.
    pub fn render(&self, props: Props, node_ref: Option<NodeRef>) -> Element {
        let resolution = self.resolve(props);
        tracing::trace!(
            target: targets::RENDER,
            target_name = %self.inner.target,
            class_name = %resolution.class_name,
            "rendering composed element"
        );
        render_target(&self.inner.target, resolution, node_ref)
    }

    /// Render onto a different primitive tag, keeping the composition.
    pub fn render_as(&self, tag: impl Into<String>, props: Props, node_ref: Option<NodeRef>) -> Element {
        let resolution = self.resolve(props);
        render_target(&Target::Tag(tag.into()), resolution, node_ref)
    }

    /// Render and hand the element to a host.
    pub fn render_with<H: RenderHost>(
        &self,
        host: &mut H,
        props: Props,
        node_ref: Option<NodeRef>,
    ) -> H::Output {
        host.render_element(self.render(props, node_ref))
    }
}

fn render_target(target: &Target, resolution: Resolution, node_ref: Option<NodeRef>) -> Element {
    let Resolution { class_name, mut props } = resolution;
    match target {
        Target::Tag(tag) => Element {
            tag: tag.clone(),
            class_name,
            props,
            node_ref,
        },
        Target::Component(component) => {
            props.set(CLASS_NAME, class_name);
            component.render(props, node_ref)
        }
    }
}

impl fmt::Debug for Classed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Classed")
            .field("name", &self.inner.name)
            .field("target", &self.inner.target)
            .field("variants", &self.variants().names().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for composed elements with a fluent API.
///
/// # Example
///
/// ```
/// use horizon_lattice_classed::prelude::*;
///
/// let chip = Classed::builder("span")
///     .name("Chip")
///     .class("inline-flex rounded-full")
///     .variants(VariantTable::new().variant("tone", [("info", "bg-sky-100")]))
///     .transform(|props| {
///         if props.get("selected").and_then(|v| v.as_bool()) == Some(true) {
///             "ring-2".to_string()
///         } else {
///             String::new()
///         }
///     })
///     .build();
///
/// let element = chip.render(Props::new().with("tone", "info").with("selected", true), None);
/// assert_eq!(element.class_name, "inline-flex rounded-full ring-2 bg-sky-100");
/// ```
#[derive(Debug)]
pub struct ClassedBuilder {
    target: Target,
    composition: ResolvedComposition,
    name: Option<String>,
}

impl ClassedBuilder {
    /// Create a builder for a base.
    ///
    /// A composed base contributes its target and its whole composition.
    pub fn new(base: impl Into<Base>) -> Self {
        match base.into() {
            Base::Target(target) => Self {
                target,
                composition: ResolvedComposition::new(),
                name: None,
            },
            Base::Classed(classed) => Self {
                target: classed.inner.target.clone(),
                composition: classed.inner.composition.clone(),
                name: None,
            },
        }
    }

    /// Set a diagnostic name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Append literal classes.
    pub fn class(mut self, classes: impl Into<ClassList>) -> Self {
        self.composition.push_classes(&classes.into());
        self
    }

    /// Append a variant table.
    pub fn variants(mut self, table: VariantTable) -> Self {
        self.composition.push_variants(&table);
        self
    }

    /// Append a class-computing transform.
    pub fn transform<F>(mut self, f: F) -> Self
    where
        F: Fn(&Props) -> String + Send + Sync + 'static,
    {
        self.composition.push(Composer::Transform(Transform::new(f)));
        self
    }

    /// Append any composer.
    pub fn compose(mut self, composer: impl Into<Composer>) -> Self {
        self.composition.push(composer.into());
        self
    }

    /// Finish the composed element.
    pub fn build(self) -> Classed {
        tracing::debug!(
            target: targets::COMPOSE,
            name = self.name.as_deref().unwrap_or(""),
            target_name = %self.target,
            sources = self.composition.sources().len(),
            variants = self.composition.variants().len(),
            "built composed element"
        );
        Classed {
            inner: Arc::new(ClassedInner {
                target: self.target,
                composition: self.composition,
                name: self.name,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::PropValue;

    fn color_button() -> Classed {
        classed(
            "button",
            [VariantTable::new()
                .variant("color", [("blue", "bg-blue-100"), ("red", "bg-red-100")])
                .default_variant("color", "blue")],
        )
    }

    #[test]
    fn plain_tag_renders_caller_classes() {
        let button = classed("button", Vec::<Composer>::new());
        let element = button.render(Props::new().with_class_name("test"), None);
        assert_eq!(element.tag, "button");
        assert_eq!(element.class_name, "test");
    }

    #[test]
    fn classed_base_is_flattened() {
        let button = color_button();
        let anchor = classed(&button, ["bg-red-100"]);

        assert_eq!(anchor.target().tag(), Some("button"));
        let element = anchor.render(Props::new(), None);
        assert_eq!(element.tag, "button");
        assert!(element.has_classes("bg-blue-100 bg-red-100"));
    }

    #[test]
    fn classed_composer_inlines_its_variants() {
        let button = color_button();
        let anchor = classed("a", [&button]);

        let element = anchor.render(Props::new().with("color", "red"), None);
        assert_eq!(element.tag, "a");
        assert_eq!(element.class_name, "bg-red-100");
        assert!(element.props.is_empty());
    }

    #[test]
    fn node_ref_reaches_primitive() {
        let node_ref = NodeRef::new(7u32);
        let element = color_button().render(Props::new(), Some(node_ref.clone()));
        assert!(element.node_ref.unwrap().ptr_eq(&node_ref));
    }

    #[test]
    fn component_target_receives_class_name() {
        let link = Component::new("Link", |mut props, node_ref| {
            let class_name = match props.remove(CLASS_NAME) {
                Some(PropValue::Str(s)) => s,
                _ => String::new(),
            };
            Element {
                tag: "a".to_string(),
                class_name,
                props,
                node_ref,
            }
        });
        let styled = classed(link, ["underline"]);

        let node_ref = NodeRef::new("anchor");
        let element = styled.render(Props::new().with("href", "/"), Some(node_ref.clone()));
        assert_eq!(element.tag, "a");
        assert_eq!(element.class_name, "underline");
        assert_eq!(element.props.get("href"), Some(&PropValue::from("/")));
        assert!(element.node_ref.unwrap().ptr_eq(&node_ref));
    }

    #[test]
    fn render_as_swaps_tag_only() {
        let element = color_button().render_as("a", Props::new().with("color", "red"), None);
        assert_eq!(element.tag, "a");
        assert_eq!(element.class_name, "bg-red-100");
    }

    #[test]
    fn render_with_host() {
        struct TagCollector(Vec<String>);

        impl RenderHost for TagCollector {
            type Output = usize;

            fn render_element(&mut self, element: Element) -> usize {
                self.0.push(format!("<{} class=\"{}\">", element.tag, element.class_name));
                self.0.len()
            }
        }

        let mut host = TagCollector(vec![]);
        let count = color_button().render_with(&mut host, Props::new(), None);
        assert_eq!(count, 1);
        assert_eq!(host.0[0], "<button class=\"bg-blue-100\">");
    }

    #[test]
    fn builder_matches_factory() {
        let table = VariantTable::new().variant("size", [("sm", "text-sm")]);
        let built = Classed::builder("p")
            .class("m-0")
            .variants(table.clone())
            .name("Para")
            .build();
        let made = classed("p", [Composer::from("m-0"), Composer::from(table)]);

        let props = Props::new().with("size", "sm");
        assert_eq!(built.class_name(&props), made.class_name(&props));
        assert_eq!(built.display_name(), Some("Para"));
        assert_eq!(made.display_name(), None);
        assert_eq!(built.variant_names().collect::<Vec<_>>(), vec!["size"]);
    }
}
