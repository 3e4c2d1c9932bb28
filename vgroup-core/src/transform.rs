//! Span queries and string reconstruction.
//!
//! [`Transformer`] runs the state machine over an input, then splices each
//! resolved [`Match`] back over the original text. Everything outside a
//! match is copied through untouched.

use crate::error::CoreError;
use crate::machine::Machine;
use crate::options::TransformOptions;
use serde::Serialize;
use std::borrow::Cow;

/// A resolved group: the original span and its expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    /// Byte offset where the variant token begins.
    pub start: usize,
    /// Byte offset of the consumed closing delimiter (inclusive).
    pub end: usize,
    /// Replacement text.
    pub content: String,
}

/// Expands grouped variants with a fixed set of delimiters.
///
/// A transformer holds no per-call state and can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct Transformer {
    options: TransformOptions,
}

impl Transformer {
    /// Creates a transformer after validating `options`.
    pub fn new(options: TransformOptions) -> Result<Self, CoreError> {
        options.validate()?;
        Ok(Self { options })
    }

    /// Returns the delimiters this transformer was built with.
    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Returns the resolved spans of `content`, ordered by start offset and
    /// never overlapping.
    pub fn find_matches(&self, content: &str) -> Vec<Match> {
        Machine::new(content, &self.options).run()
    }

    /// Expands every well-formed group in `content`.
    ///
    /// Returns the input unchanged (borrowed) when nothing expands.
    pub fn transform<'a>(&self, content: &'a str) -> Cow<'a, str> {
        let matches = self.find_matches(content);
        if matches.is_empty() {
            return Cow::Borrowed(content);
        }

        tracing::debug!(
            groups = matches.len(),
            bytes = content.len(),
            "expanded grouped variants"
        );
        Cow::Owned(splice(
            content,
            &matches,
            self.options.expand_close_char.len_utf8(),
        ))
    }
}

fn splice(content: &str, matches: &[Match], close_len: usize) -> String {
    let mut out = String::with_capacity(content.len());
    let mut cursor = 0;

    for m in matches {
        debug_assert!(cursor <= m.start, "overlapping matches");
        out.push_str(&content[cursor..m.start]);
        out.push_str(&m.content);
        cursor = m.end + close_len;
    }

    out.push_str(&content[cursor..]);
    out
}

/// Builds a reusable transform function.
///
/// `None` uses the default delimiters.
pub fn create_transformer(
    options: Option<TransformOptions>,
) -> Result<impl Fn(&str) -> String + Clone + Send + Sync, CoreError> {
    let transformer = Transformer::new(options.unwrap_or_default())?;
    Ok(move |content: &str| transformer.transform(content).into_owned())
}

/// Expands `content` with the default delimiters.
pub fn expand(content: &str) -> String {
    Transformer::default().transform(content).into_owned()
}
