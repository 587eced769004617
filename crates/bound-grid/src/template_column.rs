//! A column rendered by a caller-supplied template, with a freely assignable
//! sort rule.

use std::fmt;
use std::sync::Arc;

use crate::column::{Column, ColumnOptions};
use crate::error::Result;
use crate::property_column::CellTextFn;
use crate::sort::GridSort;

/// A column whose cell text comes from an arbitrary function of the row.
///
/// Unlike [`PropertyColumn`](crate::PropertyColumn), the sort rule is not
/// derived from anything and may be set at any time.
///
/// # Example
///
/// ```ignore
/// let full_name = TemplateColumn::new(|p: &Person| Some(format!("{} {}", p.first, p.last)))
///     .with_title("Name")
///     .with_sort_by(
///         GridSort::by_ascending(&field!(Person, last))?
///             .then_ascending(&field!(Person, first))?,
///     );
/// ```
pub struct TemplateColumn<R> {
    template: CellTextFn<R>,
    title: Option<String>,
    sort: Option<GridSort<R>>,
    options: ColumnOptions,
}

impl<R> TemplateColumn<R> {
    /// Creates a column rendering `template` for each row.
    pub fn new<F>(template: F) -> Self
    where
        F: Fn(&R) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            template: Arc::new(template),
            title: None,
            sort: None,
            options: ColumnOptions::default(),
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the sort rule.
    pub fn with_sort_by(mut self, sort: GridSort<R>) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Sets presentation options.
    pub fn with_options(mut self, options: ColumnOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces the title.
    pub fn set_title(&mut self, title: Option<String>) {
        self.title = title;
    }

    /// Removes the sort rule.
    pub fn clear_sort_by(&mut self) {
        self.sort = None;
    }

    /// Mutable presentation options.
    pub fn options_mut(&mut self) -> &mut ColumnOptions {
        &mut self.options
    }
}

impl<R> Column<R> for TemplateColumn<R> {
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn options(&self) -> &ColumnOptions {
        &self.options
    }

    fn render_cell(&self, row: &R) -> Option<String> {
        (self.template)(row)
    }

    fn sort_by(&self) -> Option<&GridSort<R>> {
        self.sort.as_ref()
    }

    fn set_sort_by(&mut self, sort: GridSort<R>) -> Result<()> {
        self.sort = Some(sort);
        Ok(())
    }
}

impl<R> fmt::Debug for TemplateColumn<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateColumn")
            .field("title", &self.title)
            .field("sort", &self.sort)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field;
    use crate::sort::SortDirection;
    use std::cmp::Ordering;

    struct Person {
        first: &'static str,
        last: &'static str,
    }

    #[test]
    fn test_template_render() {
        let column = TemplateColumn::new(|p: &Person| Some(format!("{} {}", p.first, p.last)))
            .with_title("Name");
        let row = Person {
            first: "Ada",
            last: "Lovelace",
        };
        assert_eq!(column.render_cell(&row).as_deref(), Some("Ada Lovelace"));
        assert_eq!(column.title(), Some("Name"));
        assert!(!column.is_sortable());
    }

    #[test]
    fn test_sort_can_be_assigned() {
        let mut column = TemplateColumn::new(|p: &Person| Some(p.last.to_string()));
        column
            .set_sort_by(GridSort::by_descending(&field!(Person, last)).unwrap())
            .unwrap();
        assert!(column.is_sortable());

        let a = Person { first: "A", last: "Abbott" };
        let b = Person { first: "B", last: "Byron" };
        let sort = column.sort_by().unwrap();
        assert_eq!(sort.compare(&a, &b, SortDirection::Ascending), Ordering::Greater);

        column.clear_sort_by();
        assert!(column.sort_by().is_none());
    }

    #[test]
    fn test_tooltip_uses_cell_text() {
        let column = TemplateColumn::new(|p: &Person| Some(p.first.to_string()))
            .with_options(ColumnOptions::new().with_tooltip(true));
        let row = Person { first: "Ada", last: "L" };
        assert_eq!(column.tooltip_text(&row).as_deref(), Some("Ada"));
    }
}
