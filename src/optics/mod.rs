//! Lens algebra over the [`Value`](crate::Value) tree.
//!
//! This module provides the building blocks that compiled paths are made of:
//!
//! - [`AttributeLens`]: focus on one object key
//! - [`ArrayIndexLens`]: focus on one array position
//! - [`FallbackLens`]: tolerate a missing container on the way to the focus
//! - [`ComposedLens`] and [`compose`]: chain lenses into a deep focus
//! - [`IdentityLens`]: focus on the whole tree
//! - [`FunctionLens`]: a lens from a getter and setter closure
//!
//! # Example
//!
//! ```
//! use pathlens::{Lens, Value, array_index_lens, attribute_lens, compose};
//! use serde_json::json;
//!
//! let lens = compose([
//!     attribute_lens("list").with_fallback(Value::Null, Value::empty_object()).boxed(),
//!     attribute_lens("items").with_fallback(Value::Null, Value::empty_object()).boxed(),
//!     array_index_lens(0).with_fallback(Value::Null, Value::empty_array()).boxed(),
//! ]);
//!
//! // Reading through a missing branch yields the fallback.
//! assert!(lens.get(&Value::empty_object()).unwrap().is_null());
//!
//! // Writing through it creates the branch.
//! let created = lens.set(&Value::empty_object(), Value::from("first")).unwrap();
//! assert_eq!(serde_json::Value::from(created), json!({ "list": { "items": ["first"] } }));
//! ```

mod fallback;
mod lens;
mod primitives;

pub use fallback::FallbackLens;
pub use fallback::fallback_for;

pub use lens::BoxedLens;
pub use lens::ComposedLens;
pub use lens::FunctionLens;
pub use lens::IdentityLens;
pub use lens::Lens;
pub use lens::compose;

pub use primitives::ArrayIndexLens;
pub use primitives::MAX_ARRAY_PADDING;
pub use primitives::AttributeLens;
pub use primitives::array_index_lens;
pub use primitives::attribute_lens;
