//! Pattern-based rendering of numeric values.
//!
//! Patterns are a single specifier letter followed by an optional precision,
//! e.g. `"N2"`, `"D5"`, `"x"`, `"E3"`:
//!
//! | specifier | meaning | default precision |
//! |---|---|---|
//! | `D` | integer digits, zero-padded to the precision | 0 |
//! | `F` | fixed point | 2 |
//! | `N` | fixed point with `,` thousands separators | 2 |
//! | `P` | percent (value × 100) followed by `" %"` | 2 |
//! | `E` | scientific, exponent with sign and at least three digits | 6 |
//! | `X` | hexadecimal, integers only; letter case follows the specifier | 0 |
//! | `G` | general, same as the default text | - |
//!
//! Anything else renders the value's default text. `D` and `X` on floating
//! point values also fall back to the default text.

/// Values that can be rendered through a format pattern.
pub trait Formattable {
    /// Renders the value using `pattern`.
    fn format_with(&self, pattern: &str) -> String;
}

/// A parsed standard numeric pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NumericPattern {
    /// Lowercase specifier letter.
    kind: char,
    uppercase: bool,
    precision: Option<usize>,
}

impl NumericPattern {
    const MAX_PRECISION: usize = 99;

    fn parse(pattern: &str) -> Option<Self> {
        let mut chars = pattern.chars();
        let letter = chars.next().filter(char::is_ascii_alphabetic)?;
        let rest = chars.as_str();
        let precision = if rest.is_empty() {
            None
        } else if rest.bytes().all(|b| b.is_ascii_digit()) {
            Some(rest.parse::<usize>().ok()?.min(Self::MAX_PRECISION))
        } else {
            return None;
        };
        Some(Self {
            kind: letter.to_ascii_lowercase(),
            uppercase: letter.is_ascii_uppercase(),
            precision,
        })
    }

    fn precision_or(&self, default: usize) -> usize {
        self.precision.unwrap_or(default)
    }
}

macro_rules! impl_formattable_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Formattable for $ty {
                fn format_with(&self, pattern: &str) -> String {
                    match NumericPattern::parse(pattern) {
                        Some(p) if p.kind == 'x' => {
                            let hex = if p.uppercase {
                                format!("{:X}", self)
                            } else {
                                format!("{:x}", self)
                            };
                            pad_zeros(&hex, p.precision_or(0))
                        }
                        Some(p) => format_integer(*self as i128, p),
                        None => self.to_string(),
                    }
                }
            }
        )*
    };
}

impl_formattable_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl Formattable for f64 {
    fn format_with(&self, pattern: &str) -> String {
        match NumericPattern::parse(pattern) {
            Some(p) if self.is_finite() => format_float(*self, p),
            _ => self.to_string(),
        }
    }
}

impl Formattable for f32 {
    fn format_with(&self, pattern: &str) -> String {
        match NumericPattern::parse(pattern) {
            // Widen through the shortest decimal form so 0.1f32 stays 0.1.
            Some(p) if self.is_finite() => match self.to_string().parse::<f64>() {
                Ok(wide) => format_float(wide, p),
                Err(_) => self.to_string(),
            },
            _ => self.to_string(),
        }
    }
}

fn format_integer(value: i128, p: NumericPattern) -> String {
    match p.kind {
        'd' => {
            let sign = if value < 0 { "-" } else { "" };
            let digits = value.unsigned_abs().to_string();
            format!("{sign}{}", pad_zeros(&digits, p.precision_or(0)))
        }
        'f' | 'n' | 'p' | 'e' => format_decimal(Decimal::from_integer(value), p),
        _ => value.to_string(),
    }
}

fn format_float(value: f64, p: NumericPattern) -> String {
    match p.kind {
        'f' | 'n' | 'p' | 'e' => format_decimal(Decimal::from_float(value), p),
        _ => value.to_string(),
    }
}

fn format_decimal(value: Decimal, p: NumericPattern) -> String {
    match p.kind {
        'n' => value.fixed(p.precision_or(2), true),
        'p' => format!("{} %", value.scale(2).fixed(p.precision_or(2), true)),
        'e' => value.scientific(p.precision_or(6), p.uppercase),
        _ => value.fixed(p.precision_or(2), false),
    }
}

/// An exact decimal `0.d0 d1 d2 ... × 10^point`.
///
/// Digits carry no leading or trailing zeros, so zero has no digits. Rounding
/// goes half away from zero on the decimal digits, never through binary
/// floating point.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Decimal {
    negative: bool,
    digits: Vec<u8>,
    /// Number of digits before the decimal point.
    point: i32,
}

impl Decimal {
    fn from_digits(negative: bool, text: &str, point: i32) -> Self {
        let mut decimal = Self {
            negative,
            digits: text.bytes().map(|b| b - b'0').collect(),
            point,
        };
        let leading = decimal.digits.iter().take_while(|&&d| d == 0).count();
        decimal.digits.drain(..leading);
        decimal.point -= leading as i32;
        decimal.normalize();
        decimal
    }

    fn from_integer(value: i128) -> Self {
        let text = value.unsigned_abs().to_string();
        Self::from_digits(value < 0, &text, text.len() as i32)
    }

    /// Starts from the shortest text that reads back as `value`.
    fn from_float(value: f64) -> Self {
        let text = format!("{:e}", value.abs());
        let (mantissa, exponent) = text.split_once('e').unwrap_or((text.as_str(), "0"));
        let exponent: i32 = exponent.parse().unwrap_or(0);
        let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
        Self::from_digits(value.is_sign_negative(), &digits, exponent + 1)
    }

    /// Multiplies by `10^places`.
    fn scale(mut self, places: i32) -> Self {
        if !self.digits.is_empty() {
            self.point += places;
        }
        self
    }

    fn normalize(&mut self) {
        while self.digits.last() == Some(&0) {
            self.digits.pop();
        }
        if self.digits.is_empty() {
            self.point = 0;
        }
    }

    /// Keeps the first `count` digits.
    fn round_to_len(&mut self, count: usize) {
        if self.digits.len() <= count {
            return;
        }
        let round_up = self.digits[count] >= 5;
        self.digits.truncate(count);
        if round_up {
            let mut carry = true;
            for digit in self.digits.iter_mut().rev() {
                if *digit == 9 {
                    *digit = 0;
                } else {
                    *digit += 1;
                    carry = false;
                    break;
                }
            }
            if carry {
                self.digits.insert(0, 1);
                self.point += 1;
            }
        }
        self.normalize();
    }

    /// Keeps `places` digits after the decimal point.
    fn round_fraction(&mut self, places: usize) {
        let keep = self.point + places as i32;
        if keep < 0 {
            self.digits.clear();
            self.normalize();
        } else {
            self.round_to_len(keep as usize);
        }
    }

    fn digit_char(&self, index: i32) -> char {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.digits.get(i))
            .map_or('0', |&d| char::from(b'0' + d))
    }

    fn sign(&self) -> &'static str {
        if self.negative && !self.digits.is_empty() { "-" } else { "" }
    }

    fn fixed(&self, places: usize, grouped: bool) -> String {
        let mut rounded = self.clone();
        rounded.round_fraction(places);

        let integer: String = if rounded.point <= 0 {
            "0".to_string()
        } else {
            (0..rounded.point).map(|i| rounded.digit_char(i)).collect()
        };
        let integer = if grouped { group_thousands(&integer) } else { integer };
        let mut text = format!("{}{integer}", rounded.sign());
        if places > 0 {
            text.push('.');
            text.extend((0..places as i32).map(|i| rounded.digit_char(rounded.point + i)));
        }
        text
    }

    fn scientific(&self, precision: usize, uppercase: bool) -> String {
        let mut rounded = self.clone();
        rounded.round_to_len(precision + 1);

        let exponent = if rounded.digits.is_empty() { 0 } else { rounded.point - 1 };
        let mut text = format!("{}{}", rounded.sign(), rounded.digit_char(0));
        if precision > 0 {
            text.push('.');
            text.extend((1..=precision as i32).map(|i| rounded.digit_char(i)));
        }
        let marker = if uppercase { 'E' } else { 'e' };
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        format!("{text}{marker}{exp_sign}{:03}", exponent.unsigned_abs())
    }
}

fn pad_zeros(digits: &str, width: usize) -> String {
    format!("{digits:0>width$}")
}

/// Inserts `,` separators into a run of ASCII digits.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pattern() {
        assert_eq!(
            NumericPattern::parse("N2"),
            Some(NumericPattern {
                kind: 'n',
                uppercase: true,
                precision: Some(2)
            })
        );
        assert_eq!(NumericPattern::parse("x").map(|p| p.uppercase), Some(false));
        assert_eq!(NumericPattern::parse("0.00"), None);
        assert_eq!(NumericPattern::parse("N2x"), None);
        assert_eq!(NumericPattern::parse(""), None);
    }

    #[test]
    fn test_integer_patterns() {
        assert_eq!(42i32.format_with("D5"), "00042");
        assert_eq!((-42i32).format_with("D5"), "-00042");
        assert_eq!(1234567i64.format_with("N"), "1,234,567.00");
        assert_eq!(1234567i64.format_with("N0"), "1,234,567");
        assert_eq!(30u8.format_with("F1"), "30.0");
        assert_eq!(255u32.format_with("X"), "FF");
        assert_eq!(255u32.format_with("x4"), "00ff");
        assert_eq!((-1i8).format_with("X"), "FF");
        assert_eq!(3i32.format_with("P0"), "300 %");
        assert_eq!(12345i32.format_with("E2"), "1.23E+004");
        assert_eq!(7usize.format_with("G"), "7");
    }

    #[test]
    fn test_float_patterns() {
        assert_eq!(3.14159f64.format_with("F2"), "3.14");
        assert_eq!(1234.5f64.format_with("N1"), "1,234.5");
        assert_eq!((-1234.5f64).format_with("N2"), "-1,234.50");
        assert_eq!(0.256f64.format_with("P1"), "25.6 %");
        assert_eq!(1234.5678f64.format_with("e3"), "1.235e+003");
        assert_eq!(0.00012f64.format_with("E1"), "1.2E-004");
        assert_eq!(0.1f32.format_with("F3"), "0.100");
    }

    #[test]
    fn test_midpoints_round_away_from_zero() {
        assert_eq!(2.5f64.format_with("F0"), "3");
        assert_eq!((-2.5f64).format_with("F0"), "-3");
        assert_eq!(0.125f64.format_with("F2"), "0.13");
        assert_eq!(0.5f64.format_with("N0"), "1");
        assert_eq!(1234.5f64.format_with("N0"), "1,235");
        assert_eq!(0.125f64.format_with("P0"), "13 %");
        assert_eq!(1.25f64.format_with("E1"), "1.3E+000");
        assert_eq!(125i32.format_with("e1"), "1.3e+002");
    }

    #[test]
    fn test_rounding_carries_into_new_digit() {
        assert_eq!(9.5f64.format_with("F0"), "10");
        assert_eq!(999.5f64.format_with("N0"), "1,000");
        assert_eq!(99.5f64.format_with("E1"), "1.0E+002");
        assert_eq!(0.0004f64.format_with("F3"), "0.000");
        assert_eq!((-0.0004f64).format_with("F3"), "0.000");
        assert_eq!(0f64.format_with("E2"), "0.00E+000");
    }

    #[test]
    fn test_percent_of_huge_integers() {
        assert_eq!(
            i128::MAX.format_with("P0"),
            "17,014,118,346,046,923,173,168,730,371,588,410,572,700 %"
        );
        assert_eq!(
            (i128::MAX / 10).format_with("P0"),
            "1,701,411,834,604,692,317,316,873,037,158,841,057,200 %"
        );
        assert_eq!(
            i128::MIN.format_with("P0"),
            "-17,014,118,346,046,923,173,168,730,371,588,410,572,800 %"
        );
    }

    #[test]
    fn test_integer_scientific_keeps_every_digit() {
        assert_eq!(i64::MAX.format_with("E18"), "9.223372036854775807E+018");
        assert_eq!(i64::MIN.format_with("E18"), "-9.223372036854775808E+018");
        assert_eq!(u64::MAX.format_with("E3"), "1.845E+019");
        assert_eq!(0u8.format_with("E1"), "0.0E+000");
    }

    #[test]
    fn test_unknown_pattern_uses_default_text() {
        assert_eq!(42i32.format_with("#,##0"), "42");
        assert_eq!(2.5f64.format_with("X"), "2.5");
        assert_eq!(f64::NAN.format_with("F2"), "NaN");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("123456"), "123,456");
    }
}
