//! Compilation of paths into lenses.
//!
//! Compiling happens in three steps:
//!
//! 1. The supplied variable indexes are checked against the number of
//!    placeholders in the path.
//! 2. Each placeholder is replaced by a concrete segment: a numeric value
//!    becomes a fixed index, a string value becomes an attribute key.
//! 3. Every segment becomes a primitive lens wrapped in a fallback, and the
//!    lenses are folded into one with [`compose`].
//!
//! The path itself is never modified, so one path can be compiled again and
//! again with different values.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::LensError;
use crate::optics::{BoxedLens, Lens, array_index_lens, attribute_lens, compose, fallback_for};
use crate::path::{Path, Segment};
use crate::value::Value;

/// A concrete value for one variable-index placeholder.
///
/// The same placeholder syntax serves both array positions and object keys;
/// the kind of value supplied here decides which one a placeholder becomes.
///
/// # Examples
///
/// ```
/// use pathlens::VariableIndex;
///
/// assert_eq!(VariableIndex::from(3usize), VariableIndex::Index(3));
/// assert_eq!(VariableIndex::from("id-7"), VariableIndex::Key("id-7".to_string()));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum VariableIndex {
    /// Resolves to a fixed array index.
    Index(usize),
    /// Resolves to an attribute key.
    Key(String),
}

impl VariableIndex {
    fn to_segment(&self) -> Segment {
        match self {
            Self::Index(index) => Segment::fixed(*index),
            Self::Key(name) => Segment::attribute(name.clone()),
        }
    }
}

impl From<usize> for VariableIndex {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for VariableIndex {
    fn from(name: &str) -> Self {
        Self::Key(name.to_string())
    }
}

impl From<String> for VariableIndex {
    fn from(name: String) -> Self {
        Self::Key(name)
    }
}

/// Settings for [`lens_from_path_with`].
///
/// # Examples
///
/// ```
/// use pathlens::{CompileOptions, Lens, Value, lens_from_path_with, path_from_expression};
///
/// let path = path_from_expression("|s| s.settings.theme").unwrap();
/// let options = CompileOptions::new().with_get_fallback(Value::from("light"));
/// let lens = lens_from_path_with(&path, &[], &options).unwrap();
///
/// assert_eq!(lens.get(&Value::empty_object()).unwrap(), Value::from("light"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompileOptions {
    get_fallback: Value,
}

impl CompileOptions {
    /// Default settings: a missing focus reads as [`Value::Null`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            get_fallback: Value::Null,
        }
    }

    /// Sets the value reported when the focus is missing or `Null`.
    #[must_use]
    pub fn with_get_fallback(mut self, value: Value) -> Self {
        self.get_fallback = value;
        self
    }

    /// The value reported when the focus is missing or `Null`.
    #[must_use]
    pub const fn get_fallback(&self) -> &Value {
        &self.get_fallback
    }
}

/// The lens compiled from a [`Path`].
///
/// Reads through missing containers yield the configured fallback and
/// writes through them create empty objects or arrays as needed. The lens
/// is immutable and cheap to clone, and it can be shared between threads.
#[derive(Clone)]
pub struct PathLens {
    path: Path,
    lens: Arc<dyn Lens + Send + Sync>,
    get_fallback: Value,
}

impl PathLens {
    /// The resolved path this lens focuses on.
    #[must_use]
    pub const fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the focus and deserializes it into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`LensError::Conversion`] when the focus does not fit `T`, and
    /// the errors of [`Lens::get`].
    ///
    /// # Examples
    ///
    /// ```
    /// use pathlens::{Value, path_from_expression};
    /// use serde_json::json;
    ///
    /// let lens = path_from_expression("|s, i| s.items[i].tags").unwrap().lens_with([0usize]).unwrap();
    /// let state = Value::from(json!({ "items": [{ "tags": ["a", "b"] }] }));
    ///
    /// let tags: Vec<String> = lens.get_as(&state).unwrap();
    /// assert_eq!(tags, vec!["a", "b"]);
    /// ```
    pub fn get_as<T: DeserializeOwned>(&self, root: &Value) -> Result<T, LensError> {
        let focus = self.get(root)?;
        Ok(serde_json::from_value(serde_json::Value::from(focus))?)
    }

    /// Serializes `value` and writes it at the focus.
    ///
    /// # Errors
    ///
    /// Returns [`LensError::Conversion`] when `value` cannot be serialized,
    /// and the errors of [`Lens::set`].
    pub fn set_from<T: Serialize + ?Sized>(
        &self,
        root: &Value,
        value: &T,
    ) -> Result<Value, LensError> {
        let json = serde_json::to_value(value)?;
        self.lens.set(root, Value::from(json))
    }
}

impl Lens for PathLens {
    /// A `Null` focus, including one behind a missing container, reads as
    /// the configured fallback.
    fn get(&self, source: &Value) -> Result<Value, LensError> {
        let focus = self.lens.get(source)?;
        if focus.is_null() {
            return Ok(self.get_fallback.clone());
        }
        Ok(focus)
    }

    fn set(&self, source: &Value, value: Value) -> Result<Value, LensError> {
        self.lens.set(source, value)
    }
}

impl fmt::Debug for PathLens {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("PathLens")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for PathLens {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.path)
    }
}

impl Path {
    /// Replaces every placeholder with a concrete segment.
    ///
    /// When the path has no placeholders, `variable_indexes` is ignored.
    ///
    /// # Errors
    ///
    /// - [`LensError::MissingVariableIndexes`] when the path has placeholders
    ///   and `variable_indexes` is empty.
    /// - [`LensError::ArityMismatch`] when the counts differ.
    /// - [`LensError::UnsupportedSegment`] for a placeholder whose position
    ///   has no value, which only a path built without the numbering check
    ///   can contain.
    pub fn resolve(&self, variable_indexes: &[VariableIndex]) -> Result<Self, LensError> {
        let expected = self.variable_count();
        if expected == 0 {
            return Ok(self.clone());
        }
        if variable_indexes.is_empty() {
            return Err(LensError::MissingVariableIndexes { expected });
        }
        if variable_indexes.len() != expected {
            return Err(LensError::ArityMismatch {
                expected,
                actual: variable_indexes.len(),
            });
        }

        let segments = self
            .iter()
            .map(|segment| match segment {
                Segment::VariableIndex { position } => variable_indexes
                    .get(*position)
                    .map(VariableIndex::to_segment)
                    .ok_or_else(|| LensError::UnsupportedSegment {
                        segment: segment.clone(),
                    }),
                other => Ok(other.clone()),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_segments_unchecked(segments))
    }

    /// Compiles a path without placeholders.
    ///
    /// # Errors
    ///
    /// Returns [`LensError::MissingVariableIndexes`] if the path has placeholders.
    pub fn lens(&self) -> Result<PathLens, LensError> {
        lens_from_path(self, &[])
    }

    /// Compiles the path with one value per placeholder, in order.
    ///
    /// # Errors
    ///
    /// See [`lens_from_path`].
    ///
    /// # Examples
    ///
    /// ```
    /// use pathlens::{Lens, Value, path_from_expression};
    /// use serde_json::json;
    ///
    /// let path = path_from_expression("|s, i, j| s.list.items[i].attributes[j]").unwrap();
    /// let lens = path.lens_with([1usize, 0]).unwrap();
    ///
    /// let state = Value::from(json!({
    ///     "list": { "items": [{ "name": "First" }, { "name": "Second", "attributes": ["A1", "A2"] }] }
    /// }));
    /// assert_eq!(lens.get(&state).unwrap(), Value::from("A1"));
    /// ```
    pub fn lens_with<I, V>(&self, variable_indexes: I) -> Result<PathLens, LensError>
    where
        I: IntoIterator<Item = V>,
        V: Into<VariableIndex>,
    {
        let variable_indexes: Vec<VariableIndex> =
            variable_indexes.into_iter().map(Into::into).collect();
        lens_from_path(self, &variable_indexes)
    }
}

/// Compiles `path` into a lens, filling placeholders from `variable_indexes`.
///
/// # Errors
///
/// - [`LensError::MissingVariableIndexes`] / [`LensError::ArityMismatch`]
///   when the values do not match the placeholders.
/// - [`LensError::UnsupportedSegment`] if a placeholder survives resolution.
pub fn lens_from_path(
    path: &Path,
    variable_indexes: &[VariableIndex],
) -> Result<PathLens, LensError> {
    lens_from_path_with(path, variable_indexes, &CompileOptions::default())
}

/// Like [`lens_from_path`], with explicit [`CompileOptions`].
///
/// # Errors
///
/// See [`lens_from_path`].
pub fn lens_from_path_with(
    path: &Path,
    variable_indexes: &[VariableIndex],
    options: &CompileOptions,
) -> Result<PathLens, LensError> {
    let resolved = path.resolve(variable_indexes)?;
    let lenses = resolved
        .iter()
        .map(lens_for_segment)
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        path = %path,
        resolved = %resolved,
        variables = path.variable_count(),
        "compiled path lens"
    );

    Ok(PathLens {
        path: resolved,
        lens: Arc::from(compose(lenses)),
        get_fallback: options.get_fallback.clone(),
    })
}

fn lens_for_segment(segment: &Segment) -> Result<BoxedLens, LensError> {
    match segment {
        Segment::Attribute { name } => Ok(fallback_for(
            attribute_lens(name.clone()),
            Value::Null,
            Value::empty_object(),
        )
        .boxed()),
        Segment::FixedIndex { index } => Ok(fallback_for(
            array_index_lens(*index),
            Value::Null,
            Value::empty_array(),
        )
        .boxed()),
        Segment::VariableIndex { .. } => Err(LensError::UnsupportedSegment {
            segment: segment.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn two_variable_path() -> Path {
        Path::builder()
            .attr("list")
            .attr("items")
            .var()
            .attr("attributes")
            .var()
            .build()
    }

    #[test]
    fn test_resolve_numeric_and_key_values() {
        let path = Path::builder().attr("rows").var().attr("by_id").var().build();
        let resolved = path
            .resolve(&[VariableIndex::Index(2), VariableIndex::from("abc")])
            .unwrap();
        assert_eq!(
            resolved.segments(),
            &[
                Segment::attribute("rows"),
                Segment::fixed(2),
                Segment::attribute("by_id"),
                Segment::attribute("abc"),
            ]
        );
    }

    #[test]
    fn test_resolve_ignores_values_without_placeholders() {
        let path = Path::builder().attr("a").build();
        assert_eq!(path.resolve(&[VariableIndex::Index(9)]).unwrap(), path);
    }

    #[test]
    fn test_missing_values_are_reported() {
        assert_eq!(
            lens_from_path(&two_variable_path(), &[]).unwrap_err(),
            LensError::MissingVariableIndexes { expected: 2 }
        );
    }

    #[test]
    fn test_wrong_count_is_reported() {
        assert_eq!(
            two_variable_path().lens_with([1usize]).unwrap_err(),
            LensError::ArityMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_resolve_reports_placeholder_without_value() {
        let path =
            Path::from_segments_unchecked(vec![Segment::variable(0), Segment::variable(5)]);
        assert_eq!(
            path.resolve(&[VariableIndex::Index(0), VariableIndex::Index(1)]),
            Err(LensError::UnsupportedSegment {
                segment: Segment::variable(5)
            })
        );
    }

    #[test]
    fn test_unresolved_placeholder_is_unsupported() {
        let error = lens_for_segment(&Segment::variable(0)).err().unwrap();
        assert_eq!(
            error,
            LensError::UnsupportedSegment {
                segment: Segment::variable(0)
            }
        );
    }

    #[test]
    fn test_empty_path_compiles_to_identity() {
        let lens = Path::root().lens().unwrap();
        let state = Value::from(json!({ "a": 1 }));
        assert_eq!(lens.get(&state).unwrap(), state);
        assert_eq!(lens.set(&state, Value::from(5)).unwrap(), Value::from(5));
    }

    #[test]
    fn test_display_and_debug_show_resolved_path() {
        let lens = two_variable_path().lens_with([1usize, 0]).unwrap();
        assert_eq!(lens.to_string(), "list.items[1].attributes[0]");
        assert!(format!("{lens:?}").starts_with("PathLens { path: "));
    }

    #[test]
    fn test_get_fallback_is_configurable() {
        let options = CompileOptions::new().with_get_fallback(Value::from(0));
        let lens =
            lens_from_path_with(&two_variable_path(), &[0usize.into(), 3usize.into()], &options)
                .unwrap();
        assert_eq!(lens.get(&Value::empty_object()).unwrap(), Value::from(0));

        let state = Value::from(json!({ "list": { "items": [{ "attributes": [1, 2, 3, 4] }] } }));
        assert_eq!(lens.get(&state).unwrap(), Value::from(4));
    }

    #[test]
    fn test_typed_round_trip() {
        let lens = Path::builder().attr("point").build().lens().unwrap();

        #[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug)]
        struct Point {
            x: i32,
            y: i32,
        }

        let updated = lens
            .set_from(&Value::empty_object(), &Point { x: 1, y: 2 })
            .unwrap();
        let point: Point = lens.get_as(&updated).unwrap();
        assert_eq!(point, Point { x: 1, y: 2 });
    }

    #[test]
    fn test_typed_read_reports_conversion_error() {
        let lens = Path::builder().attr("n").build().lens().unwrap();
        let state = Value::from(json!({ "n": "not a number" }));
        let result: Result<u32, LensError> = lens.get_as(&state);
        assert!(matches!(result, Err(LensError::Conversion { .. })));
    }
}
