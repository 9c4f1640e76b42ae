//! Client-side checks run before anything is sent to the service.

/// Minimum trimmed length, in characters, of a review worth analyzing.
pub const MIN_REVIEW_CHARS: usize = 10;

pub const REVIEW_TOO_SHORT: &str = "Review must be at least 10 characters long";

/// Rejects review text whose trimmed length is under [`MIN_REVIEW_CHARS`].
pub fn validate_review_text(text: &str) -> Result<(), &'static str> {
    if text.trim().chars().count() < MIN_REVIEW_CHARS {
        return Err(REVIEW_TOO_SHORT);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_rejected() {
        assert_eq!(validate_review_text("short"), Err(REVIEW_TOO_SHORT));
        assert_eq!(validate_review_text(""), Err(REVIEW_TOO_SHORT));
    }

    #[test]
    fn test_whitespace_does_not_count() {
        assert!(validate_review_text("   123456789   \n").is_err());
        assert!(validate_review_text("  1234567890  ").is_ok());
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        // 9 multi-byte characters: 18 bytes, still too short
        assert!(validate_review_text("éééééáááá").is_err());
    }

    #[test]
    fn test_every_short_length_rejected() {
        for n in 0..MIN_REVIEW_CHARS {
            let text = format!("  {}  ", "x".repeat(n));
            assert!(validate_review_text(&text).is_err(), "length {n} accepted");
        }
    }
}
