//! Character classification.
//!
//! A "bad" character ends the token being scanned: quotes, backtick,
//! backslash, `[`, raw line breaks, and every Unicode whitespace character.

/// Structural characters that can never be part of a grouped token.
pub const STRUCTURAL_BAD_CHARS: [char; 7] = ['"', '\'', '`', '\\', '[', '\n', '\r'];

/// Whitespace that `char::is_whitespace` does not cover.
const EXTRA_WHITESPACE: [char; 1] = ['\u{feff}'];

/// Returns true if `c` breaks the current token.
#[inline]
pub fn is_bad_char(c: char) -> bool {
    c.is_whitespace() || STRUCTURAL_BAD_CHARS.contains(&c) || EXTRA_WHITESPACE.contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_chars() {
        for c in ['"', '\'', '`', '\\', '[', '\n', '\r'] {
            assert!(is_bad_char(c), "{c:?} should be bad");
        }
    }

    #[test]
    fn test_unicode_whitespace() {
        for c in [
            ' ', '\t', '\u{0c}', '\u{0b}', '\u{a0}', '\u{1680}', '\u{2000}', '\u{2005}',
            '\u{200a}', '\u{2028}', '\u{2029}', '\u{202f}', '\u{205f}', '\u{3000}', '\u{feff}',
        ] {
            assert!(is_bad_char(c), "{c:?} should be bad");
        }
    }

    #[test]
    fn test_token_chars() {
        for c in ['a', 'Z', '0', '-', '_', ':', '(', ')', ',', ']', '/', '.', '!', 'é'] {
            assert!(!is_bad_char(c), "{c:?} should not be bad");
        }
    }
}
