//! Fallback lenses: reading and writing through missing containers.

use crate::error::LensError;
use crate::value::Value;

use super::Lens;

/// Wraps a lens so that an absent source is not an error.
///
/// A source is absent when it is falsy: `Null`, `false`, zero or the empty
/// string (see [`Value::is_falsy`]).
///
/// - `get` on an absent source returns `get_fallback` without calling the
///   inner lens.
/// - `set` on an absent source hands `set_fallback` to the inner lens in its
///   place, so writing into a missing branch materializes the container.
///
/// # Example
///
/// ```
/// use pathlens::{Lens, Value, attribute_lens, fallback_for};
///
/// let name = fallback_for(attribute_lens("name"), Value::from("unnamed"), Value::empty_object());
///
/// assert_eq!(name.get(&Value::Null).unwrap(), Value::from("unnamed"));
///
/// let created = name.set(&Value::Null, Value::from("Ada")).unwrap();
/// assert_eq!(created["name"], Value::from("Ada"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct FallbackLens<L> {
    inner: L,
    get_fallback: Value,
    set_fallback: Value,
}

impl<L> FallbackLens<L> {
    /// Creates a new fallback lens.
    ///
    /// # Arguments
    ///
    /// * `inner` - The lens to protect
    /// * `get_fallback` - What `get` reports for an absent source
    /// * `set_fallback` - What `set` writes into in place of an absent source
    #[must_use]
    pub const fn new(inner: L, get_fallback: Value, set_fallback: Value) -> Self {
        Self {
            inner,
            get_fallback,
            set_fallback,
        }
    }
}

impl<L: Lens> Lens for FallbackLens<L> {
    fn get(&self, source: &Value) -> Result<Value, LensError> {
        if source.is_falsy() {
            return Ok(self.get_fallback.clone());
        }
        self.inner.get(source)
    }

    fn set(&self, source: &Value, value: Value) -> Result<Value, LensError> {
        if source.is_falsy() {
            return self.inner.set(&self.set_fallback, value);
        }
        self.inner.set(source, value)
    }
}

/// Wraps `lens` with fallbacks for absent sources. See [`FallbackLens`].
pub const fn fallback_for<L: Lens>(
    lens: L,
    get_fallback: Value,
    set_fallback: Value,
) -> FallbackLens<L> {
    FallbackLens::new(lens, get_fallback, set_fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LensError;
    use crate::optics::{array_index_lens, attribute_lens};
    use crate::value::ValueKind;
    use serde_json::json;

    #[test]
    fn test_present_source_delegates() {
        let lens = fallback_for(array_index_lens(0), Value::Null, Value::empty_array());
        let source = Value::from(json!(["a"]));
        assert_eq!(lens.get(&source).unwrap(), Value::from("a"));
    }

    #[test]
    fn test_absent_source_materializes_array() {
        let lens = fallback_for(array_index_lens(1), Value::Null, Value::empty_array());
        let created = lens.set(&Value::Null, Value::from("x")).unwrap();
        assert_eq!(serde_json::Value::from(created), json!([null, "x"]));
    }

    #[test]
    fn test_falsy_source_is_replaced_on_write() {
        let lens = attribute_lens("b").with_fallback(Value::Null, Value::empty_object());
        let created = lens.set(&Value::from(false), Value::from(1)).unwrap();
        assert_eq!(serde_json::Value::from(created), json!({ "b": 1 }));
    }

    #[test]
    fn test_wrong_shape_is_still_an_error() {
        let lens = attribute_lens("a").with_fallback(Value::Null, Value::empty_object());
        assert_eq!(
            lens.get(&Value::from(3)),
            Err(LensError::ShapeMismatch {
                expected: ValueKind::Object,
                found: ValueKind::Number,
            })
        );
    }
}
