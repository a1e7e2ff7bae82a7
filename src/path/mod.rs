//! Paths: serializable descriptions of a navigation through nested data.
//!
//! A [`Path`] is an ordered list of [`Segment`]s. It never refers to any
//! particular tree, so one path can be parsed once, cached, and compiled
//! into lenses over and over with different variable indexes.
//!
//! Paths come from three places:
//!
//! - [`path_from_expression`]: the textual form of a sample access closure
//!   such as `|s, i| s.list.items[i].name`.
//! - [`Path::builder`]: a small combinator DSL.
//! - The `path!` macro (feature `derive`), which reads a real closure at
//!   compile time.
//!
//! The prettified form produced by [`Display`](std::fmt::Display) parses
//! back with [`str::parse`].
//!
//! # Examples
//!
//! ```
//! use pathlens::{Path, Segment, path_from_expression};
//!
//! let path = path_from_expression("|d, i| d.foo.bar[i].baz[5]").unwrap();
//! assert_eq!(
//!     path.segments(),
//!     &[
//!         Segment::attribute("foo"),
//!         Segment::attribute("bar"),
//!         Segment::variable(0),
//!         Segment::attribute("baz"),
//!         Segment::fixed(5),
//!     ]
//! );
//! assert_eq!(path.to_string(), "foo.bar[$0].baz[5]");
//! assert_eq!("foo.bar[$0].baz[5]".parse::<Path>().unwrap(), path);
//! ```

mod builder;
mod parser;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PathError;

pub use builder::PathBuilder;
pub use parser::path_from_expression;

/// One step of a [`Path`].
///
/// Serialized untagged, so each variant reads as a one-field JSON object:
/// `{"name": "items"}`, `{"index": 5}` or `{"position": 0}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Segment {
    /// Navigate into an object by key.
    Attribute {
        /// The key.
        name: String,
    },
    /// Navigate into an array at a statically known position.
    FixedIndex {
        /// The array position.
        index: usize,
    },
    /// A placeholder resolved when the path is compiled.
    VariableIndex {
        /// Zero-based ordinal among the placeholders of the path.
        position: usize,
    },
}

impl Segment {
    /// Creates an attribute segment.
    pub fn attribute(name: impl Into<String>) -> Self {
        Self::Attribute { name: name.into() }
    }

    /// Creates a fixed-index segment.
    #[must_use]
    pub const fn fixed(index: usize) -> Self {
        Self::FixedIndex { index }
    }

    /// Creates a variable-index placeholder.
    #[must_use]
    pub const fn variable(position: usize) -> Self {
        Self::VariableIndex { position }
    }

    /// Returns `true` for a variable-index placeholder.
    #[must_use]
    pub const fn is_variable(&self) -> bool {
        matches!(self, Self::VariableIndex { .. })
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attribute { name } if is_identifier(name) => formatter.write_str(name),
            Self::Attribute { name } => write_quoted_key(formatter, name),
            Self::FixedIndex { index } => write!(formatter, "[{index}]"),
            Self::VariableIndex { position } => write!(formatter, "[${position}]"),
        }
    }
}

/// An ordered, data-independent navigation through nested containers.
///
/// Variable placeholders are numbered `0, 1, 2, ...` in order of appearance;
/// every constructor upholds this, including deserialization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Segment>", into = "Vec<Segment>")]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// The empty path. Its lens is the identity.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Starts a [`PathBuilder`].
    #[must_use]
    pub fn builder() -> PathBuilder {
        PathBuilder::new()
    }

    /// Builds a path from raw segments, checking placeholder numbering.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::PlaceholderOutOfOrder`] when the placeholder
    /// positions are not `0, 1, 2, ...` in order of appearance.
    pub fn from_segments(segments: Vec<Segment>) -> Result<Self, PathError> {
        let mut expected = 0;
        for segment in &segments {
            if let Segment::VariableIndex { position } = segment {
                if *position != expected {
                    return Err(PathError::PlaceholderOutOfOrder {
                        expected,
                        found: *position,
                    });
                }
                expected += 1;
            }
        }
        Ok(Self { segments })
    }

    pub(crate) const fn from_segments_unchecked(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Returns the segments in navigation order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Iterates over the segments.
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` for the root path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of variable-index placeholders.
    #[must_use]
    pub fn variable_count(&self) -> usize {
        self.segments.iter().filter(|segment| segment.is_variable()).count()
    }

    /// Returns `true` when the path has no placeholders left.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.variable_count() == 0
    }
}

impl fmt::Display for Path {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.segments.iter().enumerate() {
            if position > 0 && matches!(segment, Segment::Attribute { name } if is_identifier(name))
            {
                formatter.write_str(".")?;
            }
            write!(formatter, "{segment}")?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<Segment>> for Path {
    type Error = PathError;

    fn try_from(segments: Vec<Segment>) -> Result<Self, Self::Error> {
        Self::from_segments(segments)
    }
}

impl From<Path> for Vec<Segment> {
    fn from(path: Path) -> Self {
        path.segments
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

/// Renders a path in its human-readable form.
///
/// Attribute names are joined with `.`, fixed indexes render as `[n]` and
/// placeholders as `[$k]`. Keys that are not identifiers are quoted:
/// `["first name"]`. The result is purely diagnostic.
///
/// # Examples
///
/// ```
/// use pathlens::{Path, prettify_path};
///
/// let path = Path::builder().attr("list").attr("items").var().attr("name").build();
/// assert_eq!(prettify_path(&path), "list.items[$0].name");
/// ```
#[must_use]
pub fn prettify_path(path: &Path) -> String {
    path.to_string()
}

pub(crate) fn is_identifier(name: &str) -> bool {
    let mut characters = name.chars();
    characters.next().is_some_and(is_identifier_start) && characters.all(is_identifier_continue)
}

pub(crate) fn is_identifier_start(character: char) -> bool {
    character.is_alphabetic() || character == '_' || character == '$'
}

pub(crate) fn is_identifier_continue(character: char) -> bool {
    character.is_alphanumeric() || character == '_' || character == '$'
}

fn write_quoted_key(formatter: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    formatter.write_str("[\"")?;
    for character in name.chars() {
        if character == '"' || character == '\\' {
            formatter.write_str("\\")?;
        }
        write!(formatter, "{character}")?;
    }
    formatter.write_str("\"]")
}
