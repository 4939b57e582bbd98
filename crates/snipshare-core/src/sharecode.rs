use crate::error::CoreError;
use std::fmt::Display;
use std::str::FromStr;

/// The number of digits in a share code.
pub const CODE_LENGTH: usize = 4;

/// A validated share code: the public 4-digit identifier of a published
/// snippet.
///
/// Validation only checks the shape (exactly four ASCII digits). The
/// allocator never issues codes with a leading zero, so a well-formed
/// code like `"0999"` simply never hits a record.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ShareCode(String);

impl ShareCode {
    /// Creates a `ShareCode` after validating the input.
    pub fn new(code: impl Into<String>) -> Result<Self, CoreError> {
        let code = code.into();
        Self::validate(&code)?;
        Ok(Self(code))
    }

    /// Creates a `ShareCode` without validation.
    ///
    /// Use this only for codes produced by trusted internal sources
    /// (the allocator, fixtures).
    pub fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(code: &str) -> Result<(), CoreError> {
        if code.len() != CODE_LENGTH {
            return Err(CoreError::InvalidCode(format!(
                "length must be exactly {}, got {}",
                CODE_LENGTH,
                code.len()
            )));
        }

        if !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(CoreError::InvalidCode(format!(
                "must contain only ASCII digits: '{}'",
                code
            )));
        }

        Ok(())
    }
}

impl Display for ShareCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ShareCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_codes() {
        assert!(ShareCode::new("1000").is_ok());
        assert!(ShareCode::new("9999").is_ok());
        // Well-formed but never allocated; the lookup contract accepts it.
        assert!(ShareCode::new("0999").is_ok());
    }

    #[test]
    fn wrong_length() {
        assert!(ShareCode::new("").is_err());
        assert!(ShareCode::new("123").is_err());
        assert!(ShareCode::new("12345").is_err());
    }

    #[test]
    fn non_digits() {
        assert!(ShareCode::new("12a4").is_err());
        assert!(ShareCode::new("abcd").is_err());
        assert!(ShareCode::new("12 4").is_err());
        // Two Arabic-Indic digits are 4 bytes: they pass the length
        // check and must be caught by the ASCII-digit check.
        assert!(ShareCode::new("١٢").is_err());
    }

    #[test]
    fn display_round_trip() {
        let code = ShareCode::new("4242").unwrap();
        assert_eq!(code.to_string(), "4242");
        assert_eq!(code.as_str(), "4242");
    }

    #[test]
    fn from_str_parses() {
        let code: ShareCode = "1234".parse().unwrap();
        assert_eq!(code.as_str(), "1234");
        assert!("12x4".parse::<ShareCode>().is_err());
    }
}
