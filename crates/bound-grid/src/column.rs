//! The column abstraction shared by every column kind.

use crate::error::Result;
use crate::sort::{GridSort, SortDirection};

/// Horizontal alignment of a column's header and cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Align {
    /// Leading edge (left in left-to-right layouts).
    #[default]
    Start,
    /// Centered.
    Center,
    /// Trailing edge.
    End,
    /// Always left.
    Left,
    /// Always right.
    Right,
}

impl Align {
    /// The CSS-style keyword for this alignment.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Center => "center",
            Self::End => "end",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Presentation options common to all column kinds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnOptions {
    /// Alignment of header and cells.
    pub align: Align,
    /// Whether the column can be sorted. `None` means "if it has a sort rule".
    pub sortable: Option<bool>,
    /// Direction to sort by when the grid first renders, if this column is
    /// the grid's default sort.
    pub initial_sort: Option<SortDirection>,
    /// Whether cells show their text as a tooltip.
    pub tooltip: bool,
    /// Extra class applied to the column's cells.
    pub class: Option<String>,
    /// Extra inline style applied to the column's cells.
    pub style: Option<String>,
}

impl ColumnOptions {
    /// Creates default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the alignment.
    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Forces the column sortable or not.
    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = Some(sortable);
        self
    }

    /// Makes this column the grid's default sort.
    pub fn with_initial_sort(mut self, direction: SortDirection) -> Self {
        self.initial_sort = Some(direction);
        self
    }

    /// Enables tooltips.
    pub fn with_tooltip(mut self, tooltip: bool) -> Self {
        self.tooltip = tooltip;
        self
    }

    /// Sets the cell class.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Sets the cell style.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }
}

/// A column of a grid over rows of type `R`.
///
/// The host calls [`Column::render_cell`] for each visible row and uses
/// [`Column::sort_by`] when the user sorts by this column.
pub trait Column<R> {
    /// Header text, if any.
    fn title(&self) -> Option<&str>;

    /// Presentation options.
    fn options(&self) -> &ColumnOptions;

    /// Text for the cell of `row`. `None` renders an empty cell.
    fn render_cell(&self, row: &R) -> Option<String>;

    /// The rule used when sorting by this column.
    fn sort_by(&self) -> Option<&GridSort<R>>;

    /// Replaces the rule used when sorting by this column.
    fn set_sort_by(&mut self, sort: GridSort<R>) -> Result<()>;

    /// Whether the host should offer sorting on this column.
    fn is_sortable(&self) -> bool {
        self.options()
            .sortable
            .unwrap_or_else(|| self.sort_by().is_some())
    }

    /// Tooltip for the cell of `row`, when tooltips are enabled.
    fn tooltip_text(&self, row: &R) -> Option<String> {
        if self.options().tooltip {
            self.render_cell(row)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = ColumnOptions::new()
            .with_align(Align::End)
            .with_sortable(false)
            .with_initial_sort(SortDirection::Descending)
            .with_tooltip(true)
            .with_class("numeric")
            .with_style("width: 6rem");

        assert_eq!(options.align.as_str(), "end");
        assert_eq!(options.sortable, Some(false));
        assert_eq!(options.initial_sort, Some(SortDirection::Descending));
        assert!(options.tooltip);
        assert_eq!(options.class.as_deref(), Some("numeric"));
        assert_eq!(options.style.as_deref(), Some("width: 6rem"));
    }

    #[test]
    fn test_default_options() {
        let options = ColumnOptions::default();
        assert_eq!(options.align, Align::Start);
        assert_eq!(options.sortable, None);
        assert!(!options.tooltip);
    }
}
