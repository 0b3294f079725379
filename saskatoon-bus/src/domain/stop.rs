//! Public stop identity type.

use std::fmt;

/// Error returned when a stop's public code is not a number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop code {code:?}")]
pub struct InvalidStopCode {
    code: String,
}

impl InvalidStopCode {
    /// The offending raw code.
    pub fn code(&self) -> &str {
        &self.code
    }
}

/// Numeric stop ID, parsed from the stop code printed on the stop sign.
///
/// The app uses this code (not the feed's internal `stop_id`) so riders can
/// type the number they see at the stop.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StopId(u32);

impl StopId {
    /// Parse a stop code. Must be ASCII digits, surrounding whitespace ignored.
    pub fn parse(code: &str) -> Result<Self, InvalidStopCode> {
        let trimmed = code.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidStopCode {
                code: code.to_string(),
            });
        }
        trimmed
            .parse::<u32>()
            .map(StopId)
            .map_err(|_| InvalidStopCode {
                code: code.to_string(),
            })
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_codes() {
        assert_eq!(StopId::parse("3459").unwrap().get(), 3459);
        assert_eq!(StopId::parse("0012").unwrap().get(), 12);
        assert_eq!(StopId::parse(" 5588 ").unwrap().get(), 5588);
    }

    #[test]
    fn reject_non_numeric() {
        assert!(StopId::parse("").is_err());
        assert!(StopId::parse("STOP1").is_err());
        assert!(StopId::parse("12-3").is_err());
        assert!(StopId::parse("4294967296").is_err());
    }

    #[test]
    fn error_display() {
        let err = StopId::parse("N/A").unwrap_err();
        assert_eq!(err.code(), "N/A");
        assert_eq!(err.to_string(), "invalid stop code \"N/A\"");
    }
}
