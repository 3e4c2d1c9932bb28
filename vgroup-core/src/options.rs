//! Delimiter options.

use crate::charset::is_bad_char;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};

/// The four structural characters recognized by the transformer.
///
/// Every field is optional when deserialized; missing fields take the
/// defaults `:` `(` `)` `,`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformOptions {
    /// Separates a variant prefix from its body.
    pub variant_char: char,
    /// Opens a group.
    pub expand_open_char: char,
    /// Closes a group.
    pub expand_close_char: char,
    /// Separates items within a group.
    pub separator_char: char,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            variant_char: ':',
            expand_open_char: '(',
            expand_close_char: ')',
            separator_char: ',',
        }
    }
}

impl TransformOptions {
    /// Creates options with the default delimiters.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variant_char(mut self, c: char) -> Self {
        self.variant_char = c;
        self
    }

    pub fn with_expand_open_char(mut self, c: char) -> Self {
        self.expand_open_char = c;
        self
    }

    pub fn with_expand_close_char(mut self, c: char) -> Self {
        self.expand_close_char = c;
        self
    }

    pub fn with_separator_char(mut self, c: char) -> Self {
        self.separator_char = c;
        self
    }

    fn named(&self) -> [(&'static str, char); 4] {
        [
            ("variant_char", self.variant_char),
            ("expand_open_char", self.expand_open_char),
            ("expand_close_char", self.expand_close_char),
            ("separator_char", self.separator_char),
        ]
    }

    /// Checks that the delimiters are pairwise distinct and that none of
    /// them is a token-breaking character.
    pub fn validate(&self) -> Result<(), CoreError> {
        let named = self.named();

        for (name, ch) in named {
            if is_bad_char(ch) {
                return Err(CoreError::ReservedDelimiter { name, ch });
            }
        }

        for (i, &(first, a)) in named.iter().enumerate() {
            for &(second, b) in &named[i + 1..] {
                if a == b {
                    return Err(CoreError::DelimiterCollision {
                        first,
                        second,
                        ch: a,
                    });
                }
            }
        }

        Ok(())
    }
}
