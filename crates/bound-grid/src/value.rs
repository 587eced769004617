//! Capabilities of the values a column can bind.
//!
//! A column needs three things from its value type: a default text form, and
//! optionally pattern rendering and a natural ordering. The optional ones are
//! reported at runtime through [`CellValue::formatter`] and
//! [`CellValue::default_ordering`], so a column can reject an unusable
//! configuration with an error instead of a missing trait bound.
//!
//! `Option<T>` is treated as a nullable `T`: `None` renders as no text, sorts
//! before every `Some`, and the capabilities are those of `T`.

use std::cmp::Ordering;
use std::fmt::{Display, Write as FmtWrite};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use crate::format::Formattable;

/// Renders a value through a pattern. `None` means "no text".
pub type FormatFn<V> = fn(&V, &str) -> Option<String>;

/// A total order over values.
pub type OrderFn<V> = fn(&V, &V) -> Ordering;

/// A value that can be displayed in a grid cell.
pub trait CellValue {
    /// The default text for the value, or `None` for an absent value.
    fn to_cell_text(&self) -> Option<String>;

    /// Pattern renderer, if the type supports format patterns.
    fn formatter() -> Option<FormatFn<Self>>
    where
        Self: Sized,
    {
        None
    }

    /// Natural ascending order, if the type has one.
    fn default_ordering() -> Option<OrderFn<Self>>
    where
        Self: Sized,
    {
        None
    }
}

fn format_numeric<V: Formattable>(value: &V, pattern: &str) -> Option<String> {
    Some(value.format_with(pattern))
}

/// Writes a chrono delayed format. An invalid strftime pattern yields `None`.
fn render_strftime(formatted: impl Display) -> Option<String> {
    let mut out = String::new();
    write!(out, "{formatted}").ok()?;
    Some(out)
}

fn order_of<V: Ord>(a: &V, b: &V) -> Ordering {
    a.cmp(b)
}

macro_rules! impl_numeric_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl CellValue for $ty {
                fn to_cell_text(&self) -> Option<String> {
                    Some(self.to_string())
                }

                fn formatter() -> Option<FormatFn<Self>> {
                    Some(format_numeric::<$ty>)
                }

                fn default_ordering() -> Option<OrderFn<Self>> {
                    Some(order_of::<$ty>)
                }
            }
        )*
    };
}

impl_numeric_value!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl CellValue for f64 {
    fn to_cell_text(&self) -> Option<String> {
        Some(self.to_string())
    }

    fn formatter() -> Option<FormatFn<Self>> {
        Some(format_numeric::<f64>)
    }

    fn default_ordering() -> Option<OrderFn<Self>> {
        Some(f64::total_cmp)
    }
}

impl CellValue for f32 {
    fn to_cell_text(&self) -> Option<String> {
        Some(self.to_string())
    }

    fn formatter() -> Option<FormatFn<Self>> {
        Some(format_numeric::<f32>)
    }

    fn default_ordering() -> Option<OrderFn<Self>> {
        Some(f32::total_cmp)
    }
}

macro_rules! impl_ordered_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl CellValue for $ty {
                fn to_cell_text(&self) -> Option<String> {
                    Some(self.to_string())
                }

                fn default_ordering() -> Option<OrderFn<Self>> {
                    Some(order_of::<$ty>)
                }
            }
        )*
    };
}

impl_ordered_value!(String, &'static str, char, bool);

macro_rules! impl_temporal_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl CellValue for $ty {
                fn to_cell_text(&self) -> Option<String> {
                    Some(self.to_string())
                }

                fn formatter() -> Option<FormatFn<Self>> {
                    fn render(value: &$ty, pattern: &str) -> Option<String> {
                        render_strftime(value.format(pattern)).or_else(|| value.to_cell_text())
                    }
                    Some(render)
                }

                fn default_ordering() -> Option<OrderFn<Self>> {
                    Some(order_of::<$ty>)
                }
            }
        )*
    };
}

impl_temporal_value!(NaiveDate, NaiveTime, NaiveDateTime);

impl<Tz: TimeZone> CellValue for DateTime<Tz>
where
    Tz::Offset: Display,
{
    fn to_cell_text(&self) -> Option<String> {
        Some(self.to_string())
    }

    fn formatter() -> Option<FormatFn<Self>> {
        Some(format_date_time::<Tz>)
    }

    fn default_ordering() -> Option<OrderFn<Self>> {
        Some(order_of::<Self>)
    }
}

fn format_date_time<Tz: TimeZone>(value: &DateTime<Tz>, pattern: &str) -> Option<String>
where
    Tz::Offset: Display,
{
    render_strftime(value.format(pattern)).or_else(|| value.to_cell_text())
}

impl<T: CellValue> CellValue for Option<T> {
    fn to_cell_text(&self) -> Option<String> {
        self.as_ref().and_then(T::to_cell_text)
    }

    fn formatter() -> Option<FormatFn<Self>> {
        T::formatter().map(|_| format_optional::<T> as FormatFn<Self>)
    }

    fn default_ordering() -> Option<OrderFn<Self>> {
        T::default_ordering().map(|_| order_optional::<T> as OrderFn<Self>)
    }
}

fn format_optional<T: CellValue>(value: &Option<T>, pattern: &str) -> Option<String> {
    let render = T::formatter()?;
    value.as_ref().and_then(|inner| render(inner, pattern))
}

fn order_optional<T: CellValue>(a: &Option<T>, b: &Option<T>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => T::default_ordering().map_or(Ordering::Equal, |cmp| cmp(a, b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    struct Opaque;

    impl CellValue for Opaque {
        fn to_cell_text(&self) -> Option<String> {
            Some("opaque".into())
        }
    }

    #[test]
    fn test_numbers_are_formattable_and_ordered() {
        let render = i32::formatter().unwrap();
        assert_eq!(render(&1500, "N0"), Some("1,500".to_string()));
        let order = f64::default_ordering().unwrap();
        assert_eq!(order(&1.0, &2.0), Ordering::Less);
        assert_eq!(order(&f64::NAN, &1.0), Ordering::Greater);
    }

    #[test]
    fn test_text_is_ordered_but_not_formattable() {
        assert!(String::formatter().is_none());
        assert!(<&'static str>::formatter().is_none());
        assert!(bool::formatter().is_none());
        let order = String::default_ordering().unwrap();
        assert_eq!(order(&"apple".into(), &"banana".into()), Ordering::Less);
        assert_eq!("x".to_string().to_cell_text(), Some("x".to_string()));
    }

    #[test]
    fn test_custom_type_defaults_to_no_capabilities() {
        assert!(Opaque::formatter().is_none());
        assert!(Opaque::default_ordering().is_none());
        assert!(Option::<Opaque>::formatter().is_none());
        assert!(Option::<Opaque>::default_ordering().is_none());
    }

    #[test]
    fn test_optional_values() {
        let none: Option<i32> = None;
        assert_eq!(none.to_cell_text(), None);
        assert_eq!(Some(7).to_cell_text(), Some("7".to_string()));

        let render = Option::<i32>::formatter().unwrap();
        assert_eq!(render(&Some(7), "D3"), Some("007".to_string()));
        assert_eq!(render(&None, "D3"), None);

        let order = Option::<i32>::default_ordering().unwrap();
        assert_eq!(order(&None, &Some(1)), Ordering::Less);
        assert_eq!(order(&Some(2), &Some(1)), Ordering::Greater);
        assert_eq!(order(&None, &None), Ordering::Equal);
    }

    #[test]
    fn test_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let render = NaiveDate::formatter().unwrap();
        assert_eq!(render(&date, "%d/%m/%Y"), Some("09/03/2024".to_string()));
        assert_eq!(date.to_cell_text(), Some("2024-03-09".to_string()));

        let later = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let order = NaiveDate::default_ordering().unwrap();
        assert_eq!(order(&date, &later), Ordering::Less);
    }

    #[test]
    fn test_invalid_date_pattern_falls_back_to_default_text() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let render = NaiveDate::formatter().unwrap();
        assert_eq!(render(&date, "%Q"), Some("2024-03-09".to_string()));
    }

    #[test]
    fn test_date_times_with_zones() {
        let offset = FixedOffset::east_opt(3600).unwrap();
        let stamp = offset.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let render = DateTime::<FixedOffset>::formatter().unwrap();
        assert_eq!(render(&stamp, "%H:%M %z"), Some("03:04 +0100".to_string()));

        let utc = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let order = DateTime::<Utc>::default_ordering().unwrap();
        assert_eq!(order(&utc, &utc), Ordering::Equal);
    }
}
