//! Header rendering modes for a grid.
//!
//! A grid either renders no header row, a regular header row, or a header row
//! that stays pinned while the body scrolls. Hosts pass the mode to markup as a
//! lowercase attribute value obtained through [`to_label`].

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::{Error, Result};

/// How a grid renders its header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum HeaderMode {
    /// No header row.
    None,
    /// A header row that scrolls with the body.
    #[default]
    Default,
    /// A header row pinned to the top of the viewport.
    Sticky,
}

impl HeaderMode {
    /// Every header mode, in declaration order.
    pub const ALL: [HeaderMode; 3] = [HeaderMode::None, HeaderMode::Default, HeaderMode::Sticky];

    /// Returns the lowercase label for this mode.
    pub fn label(self) -> &'static str {
        labels()[&self].as_str()
    }
}

/// Label table, built from the variant names on first use.
fn labels() -> &'static HashMap<HeaderMode, String> {
    static LABELS: OnceLock<HashMap<HeaderMode, String>> = OnceLock::new();
    LABELS.get_or_init(|| {
        HeaderMode::ALL
            .iter()
            .map(|&mode| (mode, format!("{mode:?}").to_lowercase()))
            .collect()
    })
}

/// Maps an optional header mode to its attribute label.
///
/// Returns `None` when no mode is set.
pub fn to_label(mode: Option<HeaderMode>) -> Option<&'static str> {
    mode.map(HeaderMode::label)
}

impl fmt::Display for HeaderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for HeaderMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        HeaderMode::ALL
            .into_iter()
            .find(|mode| mode.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownHeaderMode(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_label() {
        assert_eq!(to_label(None), None);
        assert_eq!(to_label(Some(HeaderMode::None)), Some("none"));
        assert_eq!(to_label(Some(HeaderMode::Default)), Some("default"));
        assert_eq!(to_label(Some(HeaderMode::Sticky)), Some("sticky"));
    }

    #[test]
    fn test_every_mode_has_a_lowercase_label() {
        for mode in HeaderMode::ALL {
            let label = mode.label();
            assert!(!label.is_empty());
            assert_eq!(label, label.to_lowercase());
            assert_eq!(mode.to_string(), label);
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("sticky".parse::<HeaderMode>(), Ok(HeaderMode::Sticky));
        assert_eq!(" Default ".parse::<HeaderMode>(), Ok(HeaderMode::Default));
        assert_eq!("NONE".parse::<HeaderMode>(), Ok(HeaderMode::None));
        assert_eq!(
            "floating".parse::<HeaderMode>(),
            Err(Error::UnknownHeaderMode("floating".into()))
        );
    }

    #[test]
    fn test_default_mode() {
        assert_eq!(HeaderMode::default(), HeaderMode::Default);
    }
}
