//! Single-level lenses: one object key or one array position.

use std::sync::Arc;

use crate::error::LensError;
use crate::shallow_copy::ShallowCopy;
use crate::value::{Value, ValueKind};

use super::Lens;

/// The most `Null` slots a single array write may add past the current end.
pub const MAX_ARRAY_PADDING: usize = 1 << 16;

/// Focuses on one key of an object.
///
/// Reading a missing key yields [`Value::Null`]. Writing copies the object
/// and inserts or replaces the key. Any source that is not an object is a
/// [`LensError::ShapeMismatch`]; in particular arrays are never read by key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeLens {
    name: String,
}

impl AttributeLens {
    /// Creates a lens on the key `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The focused key.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Lens for AttributeLens {
    fn get(&self, source: &Value) -> Result<Value, LensError> {
        match source {
            Value::Object(entries) => Ok(entries.get(&self.name).cloned().unwrap_or_default()),
            other => Err(shape_mismatch(ValueKind::Object, other)),
        }
    }

    fn set(&self, source: &Value, value: Value) -> Result<Value, LensError> {
        match source {
            Value::Object(entries) => {
                let mut copy = entries.shallow_copy();
                copy.insert(self.name.clone(), value);
                Ok(Value::Object(Arc::new(copy)))
            }
            other => Err(shape_mismatch(ValueKind::Object, other)),
        }
    }
}

/// Focuses on one position of an array.
///
/// Reading past the end yields [`Value::Null`]. Writing copies the array and
/// replaces the position; writing past the end pads the gap with `Null`, up
/// to [`MAX_ARRAY_PADDING`] slots. A write further out is a
/// [`LensError::IndexTooLarge`]. Any source that is not an array is a
/// [`LensError::ShapeMismatch`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArrayIndexLens {
    index: usize,
}

impl ArrayIndexLens {
    /// Creates a lens on position `index`.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self { index }
    }

    /// The focused position.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }
}

impl Lens for ArrayIndexLens {
    fn get(&self, source: &Value) -> Result<Value, LensError> {
        match source {
            Value::Array(items) => Ok(items.get(self.index).cloned().unwrap_or_default()),
            other => Err(shape_mismatch(ValueKind::Array, other)),
        }
    }

    fn set(&self, source: &Value, value: Value) -> Result<Value, LensError> {
        match source {
            Value::Array(items) => {
                let length = items.len();
                if self.index >= length && self.index - length >= MAX_ARRAY_PADDING {
                    return Err(LensError::IndexTooLarge {
                        index: self.index,
                        length,
                    });
                }
                let mut copy = items.shallow_copy();
                if self.index >= length {
                    copy.resize(self.index + 1, Value::Null);
                }
                copy[self.index] = value;
                Ok(Value::Array(Arc::new(copy)))
            }
            other => Err(shape_mismatch(ValueKind::Array, other)),
        }
    }
}

/// Creates a lens on the object key `name`.
pub fn attribute_lens(name: impl Into<String>) -> AttributeLens {
    AttributeLens::new(name)
}

/// Creates a lens on array position `index`.
#[must_use]
pub const fn array_index_lens(index: usize) -> ArrayIndexLens {
    ArrayIndexLens::new(index)
}

const fn shape_mismatch(expected: ValueKind, found: &Value) -> LensError {
    LensError::ShapeMismatch {
        expected,
        found: found.kind(),
    }
}
