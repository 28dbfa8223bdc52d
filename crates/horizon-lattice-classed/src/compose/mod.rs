//! Composition chains and their resolution.

mod composer;
mod engine;
mod resolved;

pub use composer::{Composer, Transform};
pub use engine::Resolution;
pub use resolved::{ClassSource, ResolvedComposition};
