use icu_normalizer::ComposingNormalizerBorrowed;

use crate::error::ValidationError;

/// NFC-normalise user text so composed and decomposed kana store identically.
pub fn normalize(text: &str) -> String {
    ComposingNormalizerBorrowed::new_nfc()
        .normalize(text)
        .into_owned()
}

/// A trimmed, normalised value that must not be blank.
pub fn required(field: &'static str, text: &str) -> Result<String, ValidationError> {
    let value = normalize(text.trim());
    if value.is_empty() {
        return Err(ValidationError::Empty(field));
    }
    Ok(value)
}

/// Free text: normalised, trailing whitespace dropped, may be empty.
pub fn free_text(text: &str) -> String {
    normalize(text.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims() {
        assert_eq!(required("genre name", "  Animals \n").unwrap(), "Animals");
    }

    #[test]
    fn test_required_rejects_blank() {
        assert_eq!(
            required("word", " \t "),
            Err(ValidationError::Empty("word"))
        );
        assert_eq!(
            required("word", "").unwrap_err().to_string(),
            "word must not be empty"
        );
    }

    #[test]
    fn test_decomposed_kana_is_composed() {
        // か + combining dakuten
        assert_eq!(normalize("\u{304B}\u{3099}"), "\u{304C}");
        assert_eq!(required("word", "\u{304B}\u{3099}").unwrap(), "が");
    }

    #[test]
    fn test_free_text_keeps_inner_newlines() {
        assert_eq!(free_text("line one\nline two\n\n"), "line one\nline two");
        assert_eq!(free_text(""), "");
    }
}
