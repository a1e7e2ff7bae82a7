//! One-level copies of containers.
//!
//! A shallow copy allocates a fresh top-level container holding the same
//! entries as the source. Nested containers are not duplicated; the copy
//! points at the very same [`Arc`](std::sync::Arc) allocations. Lenses use
//! this to rebuild exactly one level of the tree per `set`.

use std::sync::Arc;

use crate::value::{Array, Object, Value};

/// Types that can produce a one-level copy of themselves.
///
/// # Examples
///
/// ```
/// use pathlens::{ShallowCopy, Value};
/// use serde_json::json;
///
/// let source = Value::from(json!({ "inner": { "x": 1 } }));
/// let copy = source.shallow_copy();
///
/// assert_eq!(copy, source);
/// assert!(!copy.ptr_eq(&source));
/// assert!(copy["inner"].ptr_eq(&source["inner"]));
/// ```
pub trait ShallowCopy {
    /// Returns a new container with the same entries as `self`.
    #[must_use]
    fn shallow_copy(&self) -> Self;
}

impl ShallowCopy for Array {
    fn shallow_copy(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl ShallowCopy for Object {
    fn shallow_copy(&self) -> Self {
        self.iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl ShallowCopy for Value {
    /// Containers get a fresh top-level allocation; scalars copy as themselves.
    fn shallow_copy(&self) -> Self {
        match self {
            Self::Array(items) => Self::Array(Arc::new(items.shallow_copy())),
            Self::Object(entries) => Self::Object(Arc::new(entries.shallow_copy())),
            scalar => scalar.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_array_copy_shares_elements() {
        let source = Value::from(json!([{ "a": 1 }, [2]]));
        let copy = source.shallow_copy();

        assert_eq!(copy, source);
        assert!(!copy.ptr_eq(&source));
        assert!(copy[0].ptr_eq(&source[0]));
        assert!(copy[1].ptr_eq(&source[1]));
    }

    #[test]
    fn test_object_copy_is_independent_at_top_level() {
        let source = Value::from(json!({ "a": 1 }));
        let mut entries = source.as_object().unwrap().shallow_copy();
        entries.insert("b".to_string(), Value::from(2));

        assert_eq!(source, Value::from(json!({ "a": 1 })));
        assert_eq!(Value::from(entries), Value::from(json!({ "a": 1, "b": 2 })));
    }

    #[test]
    fn test_scalar_copy_is_equal() {
        let source = Value::from("text");
        assert_eq!(source.shallow_copy(), source);
    }
}
