//! Route identity type.

use std::fmt;

/// Error returned when a route short-name code is not a number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid route code {code:?}: {reason}")]
pub struct InvalidRouteCode {
    code: String,
    reason: &'static str,
}

impl InvalidRouteCode {
    /// The offending raw code.
    pub fn code(&self) -> &str {
        &self.code
    }
}

/// Numeric route identity, parsed from the feed's route short name.
///
/// The short name is published with leading zeros (`"060"`); the parsed
/// integer is used both as the stable route ID and, rendered back in decimal,
/// as the display short name.
///
/// # Examples
///
/// ```
/// use saskatoon_bus::domain::RouteId;
///
/// let route = RouteId::parse(" 060 ").unwrap();
/// assert_eq!(route.get(), 60);
/// assert_eq!(route.short_name(), "60");
///
/// assert!(RouteId::parse("60A").is_err());
/// assert!(RouteId::parse("").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RouteId(u32);

impl RouteId {
    /// Parse a raw route short-name code.
    ///
    /// Surrounding whitespace is ignored; the rest must be ASCII digits.
    pub fn parse(code: &str) -> Result<Self, InvalidRouteCode> {
        let trimmed = code.trim();

        if trimmed.is_empty() {
            return Err(InvalidRouteCode {
                code: code.to_string(),
                reason: "must not be empty",
            });
        }

        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidRouteCode {
                code: code.to_string(),
                reason: "must contain only digits",
            });
        }

        trimmed
            .parse::<u32>()
            .map(RouteId)
            .map_err(|_| InvalidRouteCode {
                code: code.to_string(),
                reason: "out of range",
            })
    }

    /// Wrap an already-numeric route ID.
    pub const fn new(id: u32) -> Self {
        RouteId(id)
    }

    /// The numeric value.
    pub fn get(&self) -> u32 {
        self.0
    }

    /// Display short name, without leading zeros.
    pub fn short_name(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Debug for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteId({})", self.0)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
