//! Score entry validation.

use crate::error::ValidationError;
use crate::model::{MAX_SCORE, MIN_SCORE};

/// Range-check an already parsed value.
pub fn validate_score(value: i64) -> Result<u8, ValidationError> {
    if value < i64::from(MIN_SCORE) || value > i64::from(MAX_SCORE) {
        return Err(ValidationError::OutOfRange(value));
    }
    // In range, so the cast is lossless.
    Ok(value as u8)
}

/// Parse a typed score entry such as `"7"`.
pub fn parse_score(input: &str) -> Result<u8, ValidationError> {
    let trimmed = input.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| ValidationError::NotANumber(trimmed.to_string()))?;
    validate_score(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds() {
        assert_eq!(parse_score("0"), Ok(0));
        assert_eq!(parse_score(" 8 "), Ok(8));
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(parse_score("9"), Err(ValidationError::OutOfRange(9)));
        assert_eq!(parse_score("-1"), Err(ValidationError::OutOfRange(-1)));
    }

    #[test]
    fn rejects_non_numeric() {
        assert!(matches!(parse_score(""), Err(ValidationError::NotANumber(_))));
        assert!(matches!(parse_score("seven"), Err(ValidationError::NotANumber(_))));
        assert!(matches!(parse_score("5.5"), Err(ValidationError::NotANumber(_))));
    }
}
