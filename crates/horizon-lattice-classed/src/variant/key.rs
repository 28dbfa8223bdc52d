//! Variant value keys.
//!
//! Variant values are always compared as strings. Booleans become `"true"` /
//! `"false"` and numbers become their decimal form, so a table declared with
//! `4` is matched by a prop of `4` or `"4"` alike.
//!
//! # Example
//!
//! ```
//! use horizon_lattice_classed::VariantKey;
//!
//! assert_eq!(VariantKey::from(true), "true");
//! assert_eq!(VariantKey::from(4), VariantKey::from("4"));
//! assert_eq!(VariantKey::from(4.0), "4");
//! assert_eq!(VariantKey::from(1.5), "1.5");
//! ```

use std::borrow::Borrow;
use std::fmt;

use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::{Serialize, Serializer};

/// A normalized variant value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariantKey(String);

impl VariantKey {
    /// Create a key from an already-normalized string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the normalized string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key into its string.
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Normalize a float the way a numeric literal prints.
///
/// Integral values drop the fractional part so `4.0` and `4` share a key.
pub(crate) fn normalize_float(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e21 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

/// Widen an `f32` through its shortest decimal form.
///
/// `0.1f32` widens to `0.1`, not `0.10000000149011612`.
pub(crate) fn widen_f32(value: f32) -> f64 {
    value.to_string().parse().unwrap_or(f64::from(value))
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for VariantKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for VariantKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for VariantKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for VariantKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl From<&str> for VariantKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for VariantKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&String> for VariantKey {
    fn from(value: &String) -> Self {
        Self(value.clone())
    }
}

impl From<&VariantKey> for VariantKey {
    fn from(value: &VariantKey) -> Self {
        value.clone()
    }
}

impl From<bool> for VariantKey {
    fn from(value: bool) -> Self {
        Self(if value { "true" } else { "false" }.to_string())
    }
}

macro_rules! key_from_integer {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for VariantKey {
                fn from(value: $ty) -> Self {
                    Self(value.to_string())
                }
            }
        )+
    };
}

key_from_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl From<f64> for VariantKey {
    fn from(value: f64) -> Self {
        Self(normalize_float(value))
    }
}

impl From<f32> for VariantKey {
    fn from(value: f32) -> Self {
        Self(normalize_float(widen_f32(value)))
    }
}

impl Serialize for VariantKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for VariantKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct KeyVisitor;

        impl Visitor<'_> for KeyVisitor {
            type Value = VariantKey;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string, boolean or number variant value")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<VariantKey, E> {
                Ok(VariantKey::from(v))
            }

            fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<VariantKey, E> {
                Ok(VariantKey::from(v))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<VariantKey, E> {
                Ok(VariantKey::from(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<VariantKey, E> {
                Ok(VariantKey::from(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<VariantKey, E> {
                Ok(VariantKey::from(v))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<VariantKey, E> {
                Ok(VariantKey::from(v))
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}
