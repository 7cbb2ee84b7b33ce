//! Indian phone number validation and E.164 normalization.
//!
//! Accepted input forms: a 10-digit mobile number starting 6-9, a
//! 12-digit number with the 91 country code, or an 11-digit number with
//! a leading trunk 0. Everything normalizes to `+91XXXXXXXXXX`.

use thiserror::Error;

/// Phone number validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PhoneError {
    /// Input is empty after stripping non-digits.
    #[error("phone number is required")]
    Empty,

    /// Input does not match any accepted Indian number form.
    #[error("invalid phone number format, use a 10-digit number or +91 prefix")]
    InvalidFormat,
}

/// Normalizes a raw phone input to E.164 (`+91XXXXXXXXXX`).
///
/// # Errors
///
/// Returns `PhoneError` when the input is empty or not a recognizable
/// Indian mobile number.
pub fn normalize_phone(raw: &str) -> Result<String, PhoneError> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    if digits.is_empty() {
        return Err(PhoneError::Empty);
    }

    let national = match digits.len() {
        10 => digits,
        12 if digits.starts_with("91") => digits[2..].to_string(),
        11 if digits.starts_with('0') => digits[1..].to_string(),
        _ => return Err(PhoneError::InvalidFormat),
    };

    // Indian mobile numbers start with 6-9.
    if national.len() != 10 || !national.starts_with(['6', '7', '8', '9']) {
        return Err(PhoneError::InvalidFormat);
    }

    Ok(format!("+91{national}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("9876543210", "+919876543210")]
    #[case("919876543210", "+919876543210")]
    #[case("+91 98765 43210", "+919876543210")]
    #[case("09876543210", "+919876543210")]
    #[case("98765-43210", "+919876543210")]
    fn test_normalize_accepted_forms(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_phone(input).as_deref(), Ok(expected));
    }

    #[rstest]
    #[case("12345")]
    #[case("5876543210")] // starts below 6
    #[case("987654321012")] // 12 digits without country code
    #[case("abcdefghij")]
    fn test_normalize_rejected_forms(#[case] input: &str) {
        assert!(normalize_phone(input).is_err());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_phone(""), Err(PhoneError::Empty));
        assert_eq!(normalize_phone("   "), Err(PhoneError::Empty));
    }
}
