//! Column primitives for data grids.
//!
//! This crate provides the pieces a grid widget needs from its columns, without
//! the grid itself:
//!
//! - **Property columns**: bind one field of a row to a cell, render it with an
//!   optional format pattern, and derive an ascending sort rule from the same
//!   accessor
//! - **Template columns**: render through any function and take any sort rule
//! - **Sort rules**: multi-step comparisons over rows, with the property list
//!   needed to push sorting down to a data source
//! - **Header modes**: how the grid renders its header row
//!
//! # Example
//!
//! ```ignore
//! use bound_grid::prelude::*;
//! use bound_grid::field;
//!
//! struct Person {
//!     name: String,
//!     age: u32,
//! }
//!
//! let column = PropertyColumn::configured(ColumnParameters::new(field!(Person, age)))?;
//!
//! let mut rows = vec![
//!     Person { name: "B".into(), age: 40 },
//!     Person { name: "A".into(), age: 30 },
//! ];
//! column.sort_by().unwrap().sort_rows(&mut rows, SortDirection::Ascending);
//! assert_eq!(column.render_cell(&rows[0]).as_deref(), Some("30"));
//! ```
//!
//! # Logging
//!
//! Configuration is traced through `tracing` under the targets in
//! [`logging::targets`].

pub mod accessor;
pub mod column;
pub mod display_name;
pub mod format;
pub mod header;
pub mod logging;
pub mod property_column;
pub mod sort;
pub mod template_column;
pub mod value;

mod error;

pub use accessor::{Accessor, FieldDescriptor};
pub use column::{Align, Column, ColumnOptions};
pub use display_name::{DisplayNameRegistry, DisplayNameResolver, NoDisplayNames};
pub use error::{Error, Result};
pub use format::Formattable;
pub use header::{to_label, HeaderMode};
pub use property_column::{CellTextFn, ColumnParameters, PropertyColumn};
pub use sort::{Comparer, GridSort, SortDirection, SortedProperty};
pub use template_column::TemplateColumn;
pub use value::{CellValue, FormatFn, OrderFn};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::accessor::{Accessor, FieldDescriptor};
    pub use crate::column::{Align, Column, ColumnOptions};
    pub use crate::display_name::{DisplayNameRegistry, DisplayNameResolver};
    pub use crate::header::HeaderMode;
    pub use crate::property_column::{ColumnParameters, PropertyColumn};
    pub use crate::sort::{Comparer, GridSort, SortDirection};
    pub use crate::template_column::TemplateColumn;
    pub use crate::value::CellValue;
}
