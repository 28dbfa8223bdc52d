//! Tracing integration.
//!
//! The crate logs through `tracing` and never installs a subscriber. To see
//! composition logs, install one in your application and filter on the
//! targets below:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_lattice_classed=debug")
//!     .init();
//! ```
//!
//! Rendering logs at `trace` level only. An unresolvable variant value is not
//! a warning; it just contributes no classes.

/// Target names for log filtering.
pub mod targets {
    /// Crate-wide target.
    pub const CLASSED: &str = "horizon_lattice_classed";
    /// Composition building and variant resolution.
    pub const COMPOSE: &str = "horizon_lattice_classed::compose";
    /// Per-render resolution.
    pub const RENDER: &str = "horizon_lattice_classed::render";
    /// Composition sheet loading.
    pub const SHEET: &str = "horizon_lattice_classed::sheet";
}
