//! Sort rules for grid rows.
//!
//! A [`GridSort`] is an ordered list of comparison steps, each comparing the
//! value one accessor selects from two rows. The first step that tells the
//! rows apart decides the order:
//!
//! ```ignore
//! let rule = GridSort::by_ascending(&field!(Person, last_name))?
//!     .then_ascending(&field!(Person, first_name))?
//!     .then_descending(&field!(Person, age))?;
//!
//! rule.sort_rows(&mut people, SortDirection::Ascending);
//! ```
//!
//! Sorting a column descending reverses the whole rule, so the steps above
//! would then run last name descending, first name descending, age ascending.

use std::any::type_name;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::accessor::Accessor;
use crate::error::{Error, Result};
use crate::logging::targets;
use crate::value::CellValue;

/// Direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum SortDirection {
    /// Ascending on the first request, then toggling on each further request.
    #[default]
    Auto,
    /// Smallest value first.
    Ascending,
    /// Largest value first.
    Descending,
}

impl SortDirection {
    /// Returns the opposite direction. `Auto` toggles to `Descending`, as it
    /// behaves like `Ascending` until resolved.
    pub fn toggle(self) -> Self {
        match self {
            Self::Auto | Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Resolves a requested direction against the column's current one.
    ///
    /// `Auto` starts ascending and flips an existing direction; explicit
    /// directions are returned unchanged.
    pub fn resolve(self, current: Option<SortDirection>) -> Self {
        match (self, current) {
            (Self::Auto, Some(Self::Ascending)) => Self::Descending,
            (Self::Auto, _) => Self::Ascending,
            (explicit, _) => explicit,
        }
    }

    /// Returns `true` for [`SortDirection::Descending`].
    pub fn is_descending(self) -> bool {
        self == Self::Descending
    }
}

/// A total order over values of type `V`.
///
/// Cloning keeps the comparer's identity; see [`Comparer::same_as`].
pub struct Comparer<V> {
    compare: Arc<dyn Fn(&V, &V) -> Ordering + Send + Sync>,
}

impl<V> Comparer<V> {
    /// Wraps a comparison function.
    pub fn new<F>(compare: F) -> Self
    where
        F: Fn(&V, &V) -> Ordering + Send + Sync + 'static,
    {
        Self {
            compare: Arc::new(compare),
        }
    }

    /// Compares two values.
    #[inline]
    pub fn compare(&self, a: &V, b: &V) -> Ordering {
        (self.compare)(a, b)
    }

    /// Returns `true` if both handles refer to the same comparer.
    pub fn same_as(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.compare), Arc::as_ptr(&other.compare))
    }
}

impl<V: CellValue + 'static> Comparer<V> {
    /// The natural order of `V`.
    ///
    /// Fails with [`Error::Configuration`] if `V` has no default ordering.
    pub fn natural() -> Result<Self> {
        let order = V::default_ordering().ok_or_else(|| {
            Error::configuration(format!(
                "the type '{}' has no default ordering; supply a comparer",
                type_name::<V>()
            ))
        })?;
        Ok(Self::new(order))
    }
}

impl<V> Clone for Comparer<V> {
    fn clone(&self) -> Self {
        Self {
            compare: Arc::clone(&self.compare),
        }
    }
}

impl<V> fmt::Debug for Comparer<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparer").finish_non_exhaustive()
    }
}

/// A property name and direction, for handing a sort to a data source that
/// sorts by name (e.g. a query builder).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortedProperty {
    /// Name of the sorted field.
    pub property_name: String,
    /// Effective direction of this step.
    pub direction: SortDirection,
}

type RowCompare<R> = Arc<dyn Fn(&R, &R) -> Ordering + Send + Sync>;

struct SortStep<R> {
    compare: RowCompare<R>,
    descending: bool,
    property_name: Option<String>,
}

impl<R> Clone for SortStep<R> {
    fn clone(&self) -> Self {
        Self {
            compare: Arc::clone(&self.compare),
            descending: self.descending,
            property_name: self.property_name.clone(),
        }
    }
}

/// A sort rule over rows of type `R`.
pub struct GridSort<R> {
    steps: Vec<SortStep<R>>,
}

impl<R: 'static> GridSort<R> {
    /// Sorts ascending by the natural order of the accessor's values.
    pub fn by_ascending<V: CellValue + 'static>(accessor: &Accessor<R, V>) -> Result<Self> {
        Ok(Self::by_ascending_with(accessor, Comparer::natural()?))
    }

    /// Sorts ascending by the accessor's values using `comparer`.
    pub fn by_ascending_with<V: 'static>(accessor: &Accessor<R, V>, comparer: Comparer<V>) -> Self {
        Self {
            steps: vec![Self::step(accessor, comparer, false)],
        }
    }

    /// Sorts descending by the natural order of the accessor's values.
    pub fn by_descending<V: CellValue + 'static>(accessor: &Accessor<R, V>) -> Result<Self> {
        Ok(Self::by_descending_with(accessor, Comparer::natural()?))
    }

    /// Sorts descending by the accessor's values using `comparer`.
    pub fn by_descending_with<V: 'static>(accessor: &Accessor<R, V>, comparer: Comparer<V>) -> Self {
        Self {
            steps: vec![Self::step(accessor, comparer, true)],
        }
    }

    /// Adds an ascending tie-breaker by natural order.
    pub fn then_ascending<V: CellValue + 'static>(self, accessor: &Accessor<R, V>) -> Result<Self> {
        Ok(self.then_ascending_with(accessor, Comparer::natural()?))
    }

    /// Adds an ascending tie-breaker using `comparer`.
    pub fn then_ascending_with<V: 'static>(
        mut self,
        accessor: &Accessor<R, V>,
        comparer: Comparer<V>,
    ) -> Self {
        self.steps.push(Self::step(accessor, comparer, false));
        self
    }

    /// Adds a descending tie-breaker by natural order.
    pub fn then_descending<V: CellValue + 'static>(self, accessor: &Accessor<R, V>) -> Result<Self> {
        Ok(self.then_descending_with(accessor, Comparer::natural()?))
    }

    /// Adds a descending tie-breaker using `comparer`.
    pub fn then_descending_with<V: 'static>(
        mut self,
        accessor: &Accessor<R, V>,
        comparer: Comparer<V>,
    ) -> Self {
        self.steps.push(Self::step(accessor, comparer, true));
        self
    }

    fn step<V: 'static>(accessor: &Accessor<R, V>, comparer: Comparer<V>, descending: bool) -> SortStep<R> {
        let property_name = accessor
            .field_descriptor()
            .map(|field| field.field_name().to_string());
        tracing::trace!(
            target: targets::SORT,
            property = property_name.as_deref().unwrap_or("<computed>"),
            descending,
            "adding sort step"
        );
        let accessor = accessor.clone();
        SortStep {
            compare: Arc::new(move |a: &R, b: &R| comparer.compare(&accessor.get(a), &accessor.get(b))),
            descending,
            property_name,
        }
    }
}

impl<R> GridSort<R> {
    /// Compares two rows. `Auto` compares like `Ascending`.
    pub fn compare(&self, a: &R, b: &R, direction: SortDirection) -> Ordering {
        let ordering = self
            .steps
            .iter()
            .map(|step| {
                let ordering = (step.compare)(a, b);
                if step.descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal);

        if direction.is_descending() {
            ordering.reverse()
        } else {
            ordering
        }
    }

    /// Stable-sorts `rows` by this rule.
    pub fn sort_rows(&self, rows: &mut [R], direction: SortDirection) {
        rows.sort_by(|a, b| self.compare(a, b, direction));
    }

    /// Lists the named fields this rule sorts by, with their effective
    /// directions. Steps whose accessor has no field descriptor are skipped.
    pub fn to_property_list(&self, direction: SortDirection) -> Vec<SortedProperty> {
        self.steps
            .iter()
            .filter_map(|step| {
                let name = step.property_name.as_ref()?;
                let descending = step.descending != direction.is_descending();
                Some(SortedProperty {
                    property_name: name.clone(),
                    direction: if descending {
                        SortDirection::Descending
                    } else {
                        SortDirection::Ascending
                    },
                })
            })
            .collect()
    }

    /// Number of comparison steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if the rule has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl<R> Clone for GridSort<R> {
    fn clone(&self) -> Self {
        Self {
            steps: self.steps.clone(),
        }
    }
}

impl<R> fmt::Debug for GridSort<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let steps: Vec<_> = self
            .steps
            .iter()
            .map(|step| (step.property_name.as_deref(), step.descending))
            .collect();
        f.debug_struct("GridSort").field("steps", &steps).finish()
    }
}
