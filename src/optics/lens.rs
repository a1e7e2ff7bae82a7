//! The lens trait and its generic combinators.
//!
//! A lens is a pure `get`/`set` pair over the [`Value`] tree. `set` never
//! touches its input: it returns a new tree in which every container on the
//! way to the focus is a fresh copy, while untouched branches stay shared.
//!
//! # Laws
//!
//! For trees where the focus exists, every lens in this crate satisfies:
//!
//! 1. **GetPut Law**: Getting and setting back yields an equal tree.
//!    ```text
//!    lens.set(&source, lens.get(&source)?)? == source
//!    ```
//!
//! 2. **PutGet Law**: Setting then getting yields the set value.
//!    ```text
//!    lens.get(&lens.set(&source, value)?)? == value
//!    ```
//!
//! 3. **PutPut Law**: Two consecutive sets is equivalent to the last set.
//!    ```text
//!    lens.set(&lens.set(&source, v1)?, v2)? == lens.set(&source, v2)?
//!    ```

use std::sync::Arc;

use super::FallbackLens;
use crate::error::LensError;
use crate::value::Value;

/// A boxed, thread-safe lens. Compiled paths are folds of these.
pub type BoxedLens = Box<dyn Lens + Send + Sync>;

/// A focus on one position inside a [`Value`] tree.
///
/// Both the source tree and the returned tree are owned by the caller. A
/// lens keeps no state between calls, so one lens can serve any number of
/// trees and threads at once.
pub trait Lens {
    /// Reads the focused value.
    ///
    /// # Arguments
    ///
    /// * `source` - The tree to read from
    ///
    /// # Errors
    ///
    /// Returns [`LensError::ShapeMismatch`] when a container along the way
    /// has the wrong kind.
    fn get(&self, source: &Value) -> Result<Value, LensError>;

    /// Returns a new tree with the focused value replaced.
    ///
    /// # Arguments
    ///
    /// * `source` - The tree to update (left untouched)
    /// * `value` - The new value for the focus
    ///
    /// # Errors
    ///
    /// Returns [`LensError::ShapeMismatch`] when a container along the way
    /// has the wrong kind.
    fn set(&self, source: &Value, value: Value) -> Result<Value, LensError>;

    /// Returns a new tree with `function` applied to the focused value.
    ///
    /// Equivalent to `set(source, function(get(source)?))`.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`get`](Self::get) and [`set`](Self::set).
    ///
    /// # Example
    ///
    /// ```
    /// use pathlens::{Lens, Value, attribute_lens};
    /// use serde_json::json;
    ///
    /// let count = attribute_lens("count");
    /// let source = Value::from(json!({ "count": 1 }));
    ///
    /// let updated = count
    ///     .modify(&source, |value| Value::from(value.as_i64().unwrap_or(0) + 1))
    ///     .unwrap();
    /// assert_eq!(updated["count"], Value::from(2));
    /// assert_eq!(source["count"], Value::from(1));
    /// ```
    fn modify<F>(&self, source: &Value, function: F) -> Result<Value, LensError>
    where
        Self: Sized,
        F: FnOnce(Value) -> Value,
    {
        let current = self.get(source)?;
        self.set(source, function(current))
    }

    /// Focuses further through `other`, starting from this lens's focus.
    ///
    /// # Example
    ///
    /// ```
    /// use pathlens::{Lens, Value, array_index_lens, attribute_lens};
    /// use serde_json::json;
    ///
    /// let first_item = attribute_lens("items").compose(array_index_lens(0));
    /// let source = Value::from(json!({ "items": ["a", "b"] }));
    /// assert_eq!(first_item.get(&source).unwrap(), Value::from("a"));
    /// ```
    fn compose<L>(self, other: L) -> ComposedLens<Self, L>
    where
        Self: Sized,
        L: Lens,
    {
        ComposedLens::new(self, other)
    }

    /// Wraps this lens so that a falsy source (see [`Value::is_falsy`]) reads
    /// as `get_fallback` and is replaced by `set_fallback` before writing.
    fn with_fallback(self, get_fallback: Value, set_fallback: Value) -> FallbackLens<Self>
    where
        Self: Sized,
    {
        FallbackLens::new(self, get_fallback, set_fallback)
    }

    /// Erases the lens type.
    fn boxed(self) -> BoxedLens
    where
        Self: Sized + Send + Sync + 'static,
    {
        Box::new(self)
    }
}

impl<L: Lens + ?Sized> Lens for Box<L> {
    fn get(&self, source: &Value) -> Result<Value, LensError> {
        (**self).get(source)
    }

    fn set(&self, source: &Value, value: Value) -> Result<Value, LensError> {
        (**self).set(source, value)
    }
}

impl<L: Lens + ?Sized> Lens for Arc<L> {
    fn get(&self, source: &Value) -> Result<Value, LensError> {
        (**self).get(source)
    }

    fn set(&self, source: &Value, value: Value) -> Result<Value, LensError> {
        (**self).set(source, value)
    }
}

impl<L: Lens + ?Sized> Lens for &L {
    fn get(&self, source: &Value) -> Result<Value, LensError> {
        (**self).get(source)
    }

    fn set(&self, source: &Value, value: Value) -> Result<Value, LensError> {
        (**self).set(source, value)
    }
}

/// The lens whose focus is the whole tree.
///
/// `get` returns the source and `set` returns the new value. It is the
/// starting point of [`compose`] and the lens of the empty path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IdentityLens;

impl Lens for IdentityLens {
    fn get(&self, source: &Value) -> Result<Value, LensError> {
        Ok(source.clone())
    }

    fn set(&self, _source: &Value, value: Value) -> Result<Value, LensError> {
        Ok(value)
    }
}

/// A lens implemented using getter and setter closures.
///
/// # Example
///
/// ```
/// use pathlens::{FunctionLens, Lens, LensError, Value, attribute_lens};
/// use serde_json::json;
///
/// // Views a string as its upper-case form.
/// let shout = FunctionLens::new(
///     |source: &Value| Ok(Value::from(source.as_str().unwrap_or("").to_uppercase())),
///     |_source: &Value, value: Value| Ok::<_, LensError>(value),
/// );
/// let name = attribute_lens("name").compose(shout);
///
/// let source = Value::from(json!({ "name": "ada" }));
/// assert_eq!(name.get(&source).unwrap(), Value::from("ADA"));
/// ```
#[derive(Clone)]
pub struct FunctionLens<G, S>
where
    G: Fn(&Value) -> Result<Value, LensError>,
    S: Fn(&Value, Value) -> Result<Value, LensError>,
{
    getter: G,
    setter: S,
}

impl<G, S> FunctionLens<G, S>
where
    G: Fn(&Value) -> Result<Value, LensError>,
    S: Fn(&Value, Value) -> Result<Value, LensError>,
{
    /// Creates a new `FunctionLens` from a getter and setter.
    #[must_use]
    pub const fn new(getter: G, setter: S) -> Self {
        Self { getter, setter }
    }
}

impl<G, S> Lens for FunctionLens<G, S>
where
    G: Fn(&Value) -> Result<Value, LensError>,
    S: Fn(&Value, Value) -> Result<Value, LensError>,
{
    fn get(&self, source: &Value) -> Result<Value, LensError> {
        (self.getter)(source)
    }

    fn set(&self, source: &Value, value: Value) -> Result<Value, LensError> {
        (self.setter)(source, value)
    }
}

impl<G, S> std::fmt::Debug for FunctionLens<G, S>
where
    G: Fn(&Value) -> Result<Value, LensError>,
    S: Fn(&Value, Value) -> Result<Value, LensError>,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("FunctionLens")
            .finish_non_exhaustive()
    }
}

/// A lens composed of two lenses.
///
/// `get` descends through `first` then `second`. `set` reads the parent
/// through `first`, writes the value into it with `second`, and writes the
/// rebuilt parent back with `first`, so every ancestor is copied on the way up.
#[derive(Clone, Debug)]
pub struct ComposedLens<L1, L2> {
    first: L1,
    second: L2,
}

impl<L1, L2> ComposedLens<L1, L2> {
    /// Creates a new composed lens.
    ///
    /// # Arguments
    ///
    /// * `first` - The outer lens (focuses on the parent container)
    /// * `second` - The inner lens (focuses inside that container)
    #[must_use]
    pub const fn new(first: L1, second: L2) -> Self {
        Self { first, second }
    }
}

impl<L1: Lens, L2: Lens> Lens for ComposedLens<L1, L2> {
    fn get(&self, source: &Value) -> Result<Value, LensError> {
        let parent = self.first.get(source)?;
        self.second.get(&parent)
    }

    fn set(&self, source: &Value, value: Value) -> Result<Value, LensError> {
        let parent = self.first.get(source)?;
        let updated_parent = self.second.set(&parent, value)?;
        self.first.set(source, updated_parent)
    }
}

/// Folds `lenses` left to right into one lens, starting from [`IdentityLens`].
///
/// An empty sequence yields the identity.
///
/// # Example
///
/// ```
/// use pathlens::{Lens, Value, array_index_lens, attribute_lens, compose};
/// use serde_json::json;
///
/// let lens = compose([
///     attribute_lens("list").boxed(),
///     attribute_lens("items").boxed(),
///     array_index_lens(1).boxed(),
/// ]);
///
/// let source = Value::from(json!({ "list": { "items": ["a", "b"] } }));
/// let updated = lens.set(&source, Value::from("z")).unwrap();
/// assert_eq!(serde_json::Value::from(updated), json!({ "list": { "items": ["a", "z"] } }));
/// ```
pub fn compose<I>(lenses: I) -> BoxedLens
where
    I: IntoIterator<Item = BoxedLens>,
{
    lenses
        .into_iter()
        .fold(IdentityLens.boxed(), |composed, next| {
            composed.compose(next).boxed()
        })
}
