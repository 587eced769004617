//! Tracing targets used by the column types.
//!
//! The crate only emits events through `tracing`; installing a subscriber is
//! up to the application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("bound_grid::column=debug")
//!     .init();
//! ```

/// Target names for log filtering.
pub mod targets {
    /// Column configuration (derived cell text and sort rules).
    pub const COLUMN: &str = "bound_grid::column";
    /// Sort rule construction.
    pub const SORT: &str = "bound_grid::sort";
    /// Default title derivation and display-name lookup.
    pub const TITLE: &str = "bound_grid::title";
}
