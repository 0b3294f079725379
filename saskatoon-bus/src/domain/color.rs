//! Route color type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid hex color.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color {value:?}: {reason}")]
pub struct InvalidColor {
    value: String,
    reason: &'static str,
}

/// A 6-digit RGB hex color, stored upper-case without a leading `#`.
///
/// # Examples
///
/// ```
/// use saskatoon_bus::domain::HexColor;
///
/// let green = HexColor::parse("8cc63f").unwrap();
/// assert_eq!(green.as_str(), "8CC63F");
///
/// assert!(HexColor::parse("#8CC63F").is_err());
/// assert!(HexColor::parse("8CC63").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor([u8; 6]);

impl HexColor {
    /// Parse a color from exactly 6 hex digits (either case).
    pub fn parse(s: &str) -> Result<Self, InvalidColor> {
        let bytes = s.as_bytes();

        if bytes.len() != 6 {
            return Err(InvalidColor {
                value: s.to_string(),
                reason: "must be exactly 6 characters",
            });
        }

        let mut out = [0u8; 6];
        for (slot, &b) in out.iter_mut().zip(bytes) {
            if !b.is_ascii_hexdigit() {
                return Err(InvalidColor {
                    value: s.to_string(),
                    reason: "must be hex digits 0-9, A-F",
                });
            }
            *slot = b.to_ascii_uppercase();
        }

        Ok(HexColor(out))
    }

    pub fn as_str(&self) -> &str {
        // SAFETY: We only store ASCII hex digits
        std::str::from_utf8(&self.0).unwrap()
    }
}

impl fmt::Debug for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HexColor({})", self.as_str())
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for HexColor {
    type Error = InvalidColor;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        HexColor::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.as_str().to_string()
    }
}
