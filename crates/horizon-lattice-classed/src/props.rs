//! Render-time property bags.
//!
//! A [`Props`] value is created per render, read by the composition engine
//! and then forwarded (minus consumed keys) to the underlying element.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::variant::VariantKey;
use crate::variant::key::{normalize_float, widen_f32};

/// Property key holding caller-supplied classes.
pub const CLASS_NAME: &str = "className";

/// A single property value.
#[derive(Clone)]
pub enum PropValue {
    /// Explicitly absent. Treated like a missing key by variant resolution.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// String value.
    Str(String),
    /// Opaque host value (callbacks, host objects). Never inspected.
    Handle(Arc<dyn Any + Send + Sync>),
}

impl PropValue {
    /// Wrap an arbitrary host value.
    pub fn handle<T: Any + Send + Sync>(value: T) -> Self {
        PropValue::Handle(Arc::new(value))
    }

    /// Check for [`PropValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, PropValue::Null)
    }

    /// Get the string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get the boolean payload, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Downcast a handle payload.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            PropValue::Handle(h) => h.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Normalize a scalar value into a variant key.
    ///
    /// Returns `None` for `Null` and for handles, which can never match a
    /// declared variant value.
    pub fn to_variant_key(&self) -> Option<VariantKey> {
        match self {
            PropValue::Null | PropValue::Handle(_) => None,
            PropValue::Bool(b) => Some(VariantKey::from(*b)),
            PropValue::Int(i) => Some(VariantKey::from(*i)),
            PropValue::Float(f) => Some(VariantKey::from(*f)),
            PropValue::Str(s) => Some(VariantKey::from(s.as_str())),
        }
    }
}

impl fmt::Debug for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Null => f.write_str("Null"),
            PropValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            PropValue::Int(i) => f.debug_tuple("Int").field(i).finish(),
            PropValue::Float(v) => f.debug_tuple("Float").field(v).finish(),
            PropValue::Str(s) => f.debug_tuple("Str").field(s).finish(),
            PropValue::Handle(_) => f.write_str("Handle(..)"),
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Null => Ok(()),
            PropValue::Bool(b) => write!(f, "{b}"),
            PropValue::Int(i) => write!(f, "{i}"),
            PropValue::Float(v) => f.write_str(&normalize_float(*v)),
            PropValue::Str(s) => f.write_str(s),
            PropValue::Handle(_) => f.write_str("[handle]"),
        }
    }
}

impl PartialEq for PropValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PropValue::Null, PropValue::Null) => true,
            (PropValue::Bool(a), PropValue::Bool(b)) => a == b,
            (PropValue::Int(a), PropValue::Int(b)) => a == b,
            (PropValue::Float(a), PropValue::Float(b)) => a == b,
            (PropValue::Str(a), PropValue::Str(b)) => a == b,
            (PropValue::Handle(a), PropValue::Handle(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Str(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Str(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

macro_rules! prop_from_integer {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for PropValue {
                fn from(value: $ty) -> Self {
                    PropValue::Int(i64::from(value))
                }
            }
        )+
    };
}

prop_from_integer!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! prop_from_wide_integer {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for PropValue {
                /// Values outside the `i64` range keep their decimal form as a string.
                fn from(value: $ty) -> Self {
                    i64::try_from(value).map_or_else(|_| PropValue::Str(value.to_string()), PropValue::Int)
                }
            }
        )+
    };
}

prop_from_wide_integer!(i128, isize, u64, u128, usize);

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Float(value)
    }
}

impl From<f32> for PropValue {
    fn from(value: f32) -> Self {
        PropValue::Float(widen_f32(value))
    }
}

impl<T: Into<PropValue>> From<Option<T>> for PropValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(PropValue::Null, Into::into)
    }
}

/// A render-time property bag.
///
/// # Example
///
/// ```
/// use horizon_lattice_classed::Props;
///
/// let props = Props::new()
///     .with("color", "blue")
///     .with("size", 4)
///     .with_class_name("mt-2");
///
/// assert_eq!(props.class_name(), Some("mt-2"));
/// assert_eq!(props.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props {
    values: HashMap<String, PropValue>,
}

impl Props {
    /// Create an empty property bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Builder-style `className` insert.
    pub fn with_class_name(self, classes: impl Into<String>) -> Self {
        self.with(CLASS_NAME, classes.into())
    }

    /// Insert or replace a property.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Option<PropValue> {
        self.values.insert(key.into(), value.into())
    }

    /// Get a property.
    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.values.get(key)
    }

    /// Remove a property.
    pub fn remove(&mut self, key: &str) -> Option<PropValue> {
        self.values.remove(key)
    }

    /// Check whether a property is present (even if `Null`).
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// The caller-supplied `className`, if it is a string.
    pub fn class_name(&self) -> Option<&str> {
        self.get(CLASS_NAME).and_then(PropValue::as_str)
    }

    /// Iterate over all properties.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over property names.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|k| k.as_str())
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Keep only properties for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &PropValue) -> bool) {
        self.values.retain(|k, v| keep(k, v));
    }
}

impl<K: Into<String>, V: Into<PropValue>> FromIterator<(K, V)> for Props {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl IntoIterator for Props {
    type Item = (String, PropValue);
    type IntoIter = std::collections::hash_map::IntoIter<String, PropValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}
