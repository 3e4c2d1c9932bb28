//! # vgroup-core
//!
//! Grouped variant expansion.
//!
//! Rewrites the compact `variant:(item,item,...)` shorthand into repeated
//! `variant:item` tokens, leaving everything else (including malformed
//! groups) exactly as it was:
//!
//! ```
//! use vgroup_core::expand;
//!
//! assert_eq!(
//!     expand("test dark:(p-2,m-3,lg:(p-3,m-4))"),
//!     "test dark:p-2 dark:m-3 dark:lg:p-3 dark:lg:m-4"
//! );
//! ```
//!
//! This crate provides:
//! - Delimiter options and their validation
//! - The character-driven expansion state machine
//! - Span queries and string reconstruction

pub mod charset;
pub mod error;
mod machine;
pub mod options;
pub mod transform;

pub use error::CoreError;
pub use options::TransformOptions;
pub use transform::{create_transformer, expand, Match, Transformer};
