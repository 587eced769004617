//! A column whose cells display one value selected from each row.
//!
//! `PropertyColumn` derives everything from its accessor: the cell text
//! (optionally through a format pattern) and an ascending sort rule. Its sort
//! rule cannot be assigned directly; columns that need a custom rule should be
//! a [`TemplateColumn`](crate::TemplateColumn).
//!
//! # Example
//!
//! ```ignore
//! use bound_grid::{field, Column, ColumnParameters, PropertyColumn, SortDirection};
//!
//! struct Person {
//!     name: String,
//!     age: u32,
//! }
//!
//! let mut column = PropertyColumn::new(field!(Person, age));
//! column.configure(ColumnParameters::new(field!(Person, age)).with_format("D3"))?;
//!
//! let row = Person { name: "A".into(), age: 30 };
//! assert_eq!(column.render_cell(&row).as_deref(), Some("030"));
//! assert_eq!(column.title(), Some("age"));
//! ```

use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use crate::accessor::{Accessor, FieldDescriptor};
use crate::column::{Column, ColumnOptions};
use crate::display_name::{resolve_title, DisplayNameResolver, NoDisplayNames};
use crate::error::{Error, Result};
use crate::logging::targets;
use crate::sort::{Comparer, GridSort};
use crate::value::CellValue;

/// Function producing a cell's text from a row.
pub type CellTextFn<R> = Arc<dyn Fn(&R) -> Option<String> + Send + Sync>;

/// The inputs of one configuration pass of a [`PropertyColumn`].
pub struct ColumnParameters<R, V> {
    /// Selects the displayed value from a row.
    pub property: Accessor<R, V>,
    /// Format pattern for the value. Requires a formattable value type.
    pub format: Option<String>,
    /// Order used when sorting. Defaults to the value type's natural order.
    pub comparer: Option<Comparer<V>>,
    /// Header text. Derived from the accessor's field when unset.
    pub title: Option<String>,
}

impl<R, V> ColumnParameters<R, V> {
    /// Parameters with only the accessor set.
    pub fn new(property: Accessor<R, V>) -> Self {
        Self {
            property,
            format: None,
            comparer: None,
            title: None,
        }
    }

    /// Sets the format pattern.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Sets the sort comparer.
    pub fn with_comparer(mut self, comparer: Comparer<V>) -> Self {
        self.comparer = Some(comparer);
        self
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl<R, V> Clone for ColumnParameters<R, V> {
    fn clone(&self) -> Self {
        Self {
            property: self.property.clone(),
            format: self.format.clone(),
            comparer: self.comparer.clone(),
            title: self.title.clone(),
        }
    }
}

impl<R, V> fmt::Debug for ColumnParameters<R, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnParameters")
            .field("property", &self.property)
            .field("format", &self.format)
            .field("comparer", &self.comparer)
            .field("title", &self.title)
            .finish()
    }
}

/// Functions derived from the accessor, format and comparer of the last
/// successful configuration pass.
struct Derived<R, V> {
    property: Accessor<R, V>,
    format: Option<String>,
    comparer: Option<Comparer<V>>,
    cell_text: CellTextFn<R>,
    sort: GridSort<R>,
}

impl<R, V> Derived<R, V> {
    fn matches(&self, property: &Accessor<R, V>, format: Option<&str>, comparer: Option<&Comparer<V>>) -> bool {
        let same_comparer = match (&self.comparer, comparer) {
            (None, None) => true,
            (Some(current), Some(requested)) => current.same_as(requested),
            _ => false,
        };
        self.property.same_as(property) && self.format.as_deref() == format && same_comparer
    }
}

/// A column displaying a single value of each row.
pub struct PropertyColumn<R, V> {
    property: Accessor<R, V>,
    derived: Option<Derived<R, V>>,
    title: Option<String>,
    /// Accessor the current title was derived from; `None` if the title was
    /// supplied explicitly or not derived yet.
    title_source: Option<Accessor<R, V>>,
    options: ColumnOptions,
    display_names: Arc<dyn DisplayNameResolver>,
}

impl<R: 'static, V: CellValue + 'static> PropertyColumn<R, V> {
    /// Creates an unconfigured column for `property`.
    ///
    /// The column renders nothing until [`configure`](Self::configure) or
    /// [`refresh`](Self::refresh) has run.
    pub fn new(property: Accessor<R, V>) -> Self {
        Self {
            property,
            derived: None,
            title: None,
            title_source: None,
            options: ColumnOptions::default(),
            display_names: Arc::new(NoDisplayNames),
        }
    }

    /// Creates a column and runs its first configuration pass.
    pub fn configured(params: ColumnParameters<R, V>) -> Result<Self> {
        let mut column = Self::new(params.property.clone());
        column.configure(params)?;
        Ok(column)
    }

    /// Uses `resolver` to look up default titles.
    pub fn with_display_names(mut self, resolver: Arc<dyn DisplayNameResolver>) -> Self {
        self.display_names = resolver;
        self
    }

    /// Sets presentation options.
    pub fn with_options(mut self, options: ColumnOptions) -> Self {
        self.options = options;
        self
    }

    /// Applies a configuration pass.
    ///
    /// Cell text and sort rule are re-derived when the accessor, format or
    /// comparer differ from the previous pass. An explicit `params.title`
    /// replaces the title and is kept by later passes that leave it unset.
    /// Otherwise the title is derived from the accessor's field descriptor,
    /// once per accessor. On error nothing about the column changes.
    pub fn configure(&mut self, params: ColumnParameters<R, V>) -> Result<()> {
        let ColumnParameters {
            property,
            format,
            comparer,
            title,
        } = params;
        let format = format.filter(|pattern| !pattern.is_empty());

        let cached = self
            .derived
            .as_ref()
            .is_some_and(|derived| derived.matches(&property, format.as_deref(), comparer.as_ref()));

        if cached {
            tracing::trace!(
                target: targets::COLUMN,
                field = ?property.field_descriptor(),
                "column unchanged, keeping derived functions"
            );
        } else {
            let derived = Self::derive(&property, format, comparer).inspect_err(|err| {
                tracing::warn!(
                    target: targets::COLUMN,
                    field = ?property.field_descriptor(),
                    error = %err,
                    "rejected column configuration"
                );
            })?;
            tracing::debug!(
                target: targets::COLUMN,
                field = ?property.field_descriptor(),
                format = ?derived.format,
                custom_comparer = derived.comparer.is_some(),
                "derived cell text and sort rule"
            );
            self.derived = Some(derived);
        }

        match title {
            Some(title) => {
                self.title = Some(title);
                self.title_source = None;
            }
            None => {
                let explicit = self.title.is_some() && self.title_source.is_none();
                let already_derived = self
                    .title_source
                    .as_ref()
                    .is_some_and(|source| source.same_as(&property));
                if !explicit && !already_derived {
                    self.title = self.derive_title(&property);
                    self.title_source = Some(property.clone());
                }
            }
        }

        self.property = property;
        Ok(())
    }

    /// Re-runs configuration with the current settings and no explicit title
    /// change. Use after [`new`](Self::new) to configure with defaults.
    pub fn refresh(&mut self) -> Result<()> {
        let mut params = ColumnParameters::new(self.property.clone());
        if let Some(derived) = &self.derived {
            params.format = derived.format.clone();
            params.comparer = derived.comparer.clone();
        }
        if self.title_source.is_none() {
            params.title = self.title.clone();
        }
        self.configure(params)
    }

    fn derive(
        property: &Accessor<R, V>,
        format: Option<String>,
        comparer: Option<Comparer<V>>,
    ) -> Result<Derived<R, V>> {
        let cell_text = Self::cell_text_fn(property, format.as_deref())?;
        let sort = match &comparer {
            Some(comparer) => GridSort::by_ascending_with(property, comparer.clone()),
            None => GridSort::by_ascending(property)?,
        };
        Ok(Derived {
            property: property.clone(),
            format,
            comparer,
            cell_text,
            sort,
        })
    }

    fn cell_text_fn(property: &Accessor<R, V>, format: Option<&str>) -> Result<CellTextFn<R>> {
        let property = property.clone();
        match format {
            Some(pattern) => {
                let render = V::formatter().ok_or_else(|| {
                    Error::configuration(format!(
                        "format requested for non-formattable value type '{}'",
                        type_name::<V>()
                    ))
                })?;
                let pattern = pattern.to_string();
                Ok(Arc::new(move |row: &R| render(&property.get(row), &pattern)))
            }
            None => Ok(Arc::new(move |row: &R| property.get(row).to_cell_text())),
        }
    }

    fn derive_title(&self, property: &Accessor<R, V>) -> Option<String> {
        let field = property.field_descriptor()?;
        let title = resolve_title(self.display_names.as_ref(), field);
        tracing::debug!(target: targets::TITLE, %field, title = %title, "derived column title");
        Some(title)
    }
}

impl<R, V> PropertyColumn<R, V> {
    /// The accessor of the last configuration pass (or of construction).
    pub fn property(&self) -> &Accessor<R, V> {
        &self.property
    }

    /// The field the accessor reads, if known.
    pub fn field(&self) -> Option<&FieldDescriptor> {
        self.property.field_descriptor()
    }

    /// The active format pattern.
    pub fn format(&self) -> Option<&str> {
        self.derived.as_ref().and_then(|d| d.format.as_deref())
    }

    /// The active custom comparer.
    pub fn comparer(&self) -> Option<&Comparer<V>> {
        self.derived.as_ref().and_then(|d| d.comparer.as_ref())
    }

    /// Returns `true` once a configuration pass has succeeded.
    pub fn is_configured(&self) -> bool {
        self.derived.is_some()
    }

    /// Mutable presentation options.
    pub fn options_mut(&mut self) -> &mut ColumnOptions {
        &mut self.options
    }
}

impl<R, V> Column<R> for PropertyColumn<R, V> {
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn options(&self) -> &ColumnOptions {
        &self.options
    }

    fn render_cell(&self, row: &R) -> Option<String> {
        self.derived.as_ref().and_then(|d| (d.cell_text)(row))
    }

    fn sort_by(&self) -> Option<&GridSort<R>> {
        self.derived.as_ref().map(|d| &d.sort)
    }

    fn set_sort_by(&mut self, _sort: GridSort<R>) -> Result<()> {
        tracing::warn!(
            target: targets::COLUMN,
            field = ?self.property.field_descriptor(),
            "attempted to assign a sort rule to a property column"
        );
        Err(Error::unsupported(
            "set_sort_by",
            "PropertyColumn",
            "TemplateColumn",
        ))
    }
}

impl<R, V> fmt::Debug for PropertyColumn<R, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyColumn")
            .field("property", &self.property)
            .field("title", &self.title)
            .field("format", &self.format())
            .field("configured", &self.is_configured())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
