//! # pathlens
//!
//! Immutable, path-based lenses into nested plain data.
//!
//! ## Overview
//!
//! A state tree is a [`Value`]: objects, arrays and scalars whose containers
//! are reference counted. A lens reads one position of such a tree, or
//! returns a new tree with that position replaced. The input is never
//! touched, and every branch off the updated route is shared with it.
//!
//! Lenses are compiled from a [`Path`], and a path can be written three ways:
//!
//! - **Sample expressions**: [`path_from_expression`] reads the text of an
//!   access closure such as `|s, i, j| s.list.items[i].attributes[j]`.
//! - **Builder**: [`Path::builder`] appends segments one at a time.
//! - **Macro**: `path!` (feature `derive`) reads a real closure at compile
//!   time.
//!
//! Placeholders (`[i]` above) are filled in when the path is compiled, so one
//! path serves every row of a list.
//!
//! ## Modules
//!
//! - [`value`]: the tree model
//! - [`shallow_copy`]: one-level container copies
//! - [`optics`]: the lens algebra (attribute, index, fallback, compose)
//! - [`path`]: segments, paths, parsing and prettifying
//! - [`compile`]: turning paths into lenses
//! - [`error`]: the error types
//!
//! ## Feature Flags
//!
//! - `derive`: the `path!` macro (enabled by default)
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use pathlens::prelude::*;
//! use serde_json::json;
//!
//! let state = Value::from(json!({
//!     "list": {
//!         "items": [
//!             { "name": "First" },
//!             { "name": "Second", "attributes": ["A1", "A2"] }
//!         ]
//!     }
//! }));
//!
//! let path = path_from_expression("|s, i, j| s.list.items[i].attributes[j]").unwrap();
//! assert_eq!(prettify_path(&path), "list.items[$0].attributes[$1]");
//!
//! let lens = path.lens_with([1usize, 0]).unwrap();
//! assert_eq!(lens.get(&state).unwrap(), Value::from("A1"));
//!
//! let updated = lens.set(&state, Value::from("A1 (edited)")).unwrap();
//! assert_eq!(updated["list"]["items"][1]["attributes"][0], Value::from("A1 (edited)"));
//! assert_eq!(state["list"]["items"][1]["attributes"][0], Value::from("A1"));
//! assert!(updated["list"]["items"][0].ptr_eq(&state["list"]["items"][0]));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use pathlens::prelude::*;
/// ```
pub mod prelude {
    pub use crate::compile::{CompileOptions, PathLens, VariableIndex, lens_from_path};
    pub use crate::error::{Error, LensError, PathError};
    pub use crate::optics::{Lens, array_index_lens, attribute_lens, compose};
    pub use crate::path::{Path, Segment, path_from_expression, prettify_path};
    pub use crate::shallow_copy::ShallowCopy;
    pub use crate::value::{Value, ValueKind};

    #[cfg(feature = "derive")]
    pub use pathlens_derive::path;
}

pub mod compile;
pub mod error;
pub mod optics;
pub mod path;
pub mod shallow_copy;
pub mod value;

pub use compile::{CompileOptions, PathLens, VariableIndex, lens_from_path, lens_from_path_with};
pub use error::{Error, LensError, PathError};
pub use optics::{
    ArrayIndexLens, AttributeLens, BoxedLens, ComposedLens, FallbackLens, FunctionLens,
    IdentityLens, Lens, MAX_ARRAY_PADDING, array_index_lens, attribute_lens, compose,
    fallback_for,
};
pub use path::{Path, PathBuilder, Segment, path_from_expression, prettify_path};
pub use shallow_copy::ShallowCopy;
pub use value::{Array, Object, Value, ValueKind};

#[cfg(feature = "derive")]
pub use pathlens_derive::path;
