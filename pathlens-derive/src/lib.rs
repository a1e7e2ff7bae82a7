//! Compile-time path extraction for pathlens.
//!
//! This crate provides the [`path!`] macro, which reads a sample access
//! closure at compile time and expands to the equivalent `pathlens::Path`.
//! The closure is only inspected, never compiled or called, so the data it
//! mentions does not need to exist.
//!
//! # Example
//!
//! ```rust,ignore
//! use pathlens::{Lens, Value, path};
//!
//! let attribute = path!(|s, i, j| s.list.items[i].attributes[j]);
//! assert_eq!(attribute.to_string(), "list.items[$0].attributes[$1]");
//!
//! let lens = attribute.lens_with([1usize, 0]).unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod path;

use proc_macro::TokenStream;

/// Builds a `pathlens::Path` from a sample access closure.
///
/// The first closure parameter names the root; the body must be a chain of
/// field accesses and index operations on it. Inside `[..]`:
///
/// - an integer literal becomes a fixed index
/// - a string literal becomes an attribute key
/// - any path expression (usually another closure parameter) becomes the
///   next variable-index placeholder
///
/// Tuple fields (`s.pair.0`) become fixed indexes. A leading `&`, a block
/// with a single tail expression, and `return` are looked through.
///
/// # Example
///
/// ```rust,ignore
/// use pathlens::path;
///
/// let by_id = path!(|s: &State, id| &s.users[id].profile["display name"]);
/// assert_eq!(by_id.to_string(), "users[$0].profile[\"display name\"]");
/// ```
///
/// # Errors
///
/// Anything other than field and index access on the root parameter is a
/// compile error pointing at the offending expression.
#[proc_macro]
pub fn path(input: TokenStream) -> TokenStream {
    path::path_impl(input)
}
