//! Input validation applied before any action is dispatched

use crate::constants::{ADDRESS_MIN_LEN, ADDRESS_PREFIX};
use crate::error::ValidationError;

/// True iff `address` carries the chain prefix and meets the minimum length.
pub fn validate_address(address: &str) -> bool {
    address.starts_with(ADDRESS_PREFIX) && address.chars().count() >= ADDRESS_MIN_LEN
}

/// True iff `input` parses as a finite number strictly greater than zero.
pub fn validate_amount(input: &str) -> bool {
    parse_amount(input).is_some()
}

/// Parses a positive, finite amount.
pub fn parse_amount(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

/// Checks an address field, distinguishing empty from malformed input.
pub fn require_address(address: &str) -> Result<&str, ValidationError> {
    let address = address.trim();
    if address.is_empty() {
        return Err(ValidationError::MissingAddress);
    }
    if !validate_address(address) {
        return Err(ValidationError::InvalidAddress);
    }
    Ok(address)
}

/// Checks an amount field.
pub fn require_amount(input: &str) -> Result<f64, ValidationError> {
    parse_amount(input).ok_or(ValidationError::InvalidAmount)
}

/// Fails with `MissingFields` if any value is blank.
pub fn require_filled(values: &[&str]) -> Result<(), ValidationError> {
    if values.iter().any(|v| v.trim().is_empty()) {
        Err(ValidationError::MissingFields)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_rules() {
        assert!(validate_address("wtf1abc12345"));
        assert!(validate_address("wtf1abcdefghijk"));
        assert!(validate_address("wtf1longeraddress123456789"));
        assert!(!validate_address("wtf1"));
        assert!(!validate_address("cosmos1abc"));
        assert!(!validate_address("cosmos1abcdef"));
        assert!(!validate_address("invalid"));
        assert!(!validate_address(""));
    }

    #[test]
    fn test_address_length_boundary() {
        assert!(!validate_address("wtf1abcde"));
        assert!(validate_address("wtf1abcdef"));
    }

    #[test]
    fn test_amount_rules() {
        assert!(validate_amount("0.1"));
        assert!(validate_amount("100"));
        assert!(validate_amount(" 42 "));
        assert!(!validate_amount("0"));
        assert!(!validate_amount("-5"));
        assert!(!validate_amount("abc"));
        assert!(!validate_amount(""));
        assert!(!validate_amount("inf"));
        assert!(!validate_amount("NaN"));
    }

    #[test]
    fn test_require_address_errors() {
        assert_eq!(require_address("  "), Err(ValidationError::MissingAddress));
        assert_eq!(require_address("wtf1"), Err(ValidationError::InvalidAddress));
        assert_eq!(require_address(" wtf1abc12345 "), Ok("wtf1abc12345"));
    }

    #[test]
    fn test_require_filled() {
        assert!(require_filled(&["a", "b"]).is_ok());
        assert_eq!(require_filled(&["a", " "]), Err(ValidationError::MissingFields));
    }
}
