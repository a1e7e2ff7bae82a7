//! Error types for path extraction and lens evaluation.
//!
//! Every failure is returned synchronously to the caller; nothing in this
//! crate logs or swallows an error. A missing container on the way to the
//! focus is not an error at all: it is absorbed by the fallback lenses.

use std::fmt;

use crate::path::Segment;
use crate::value::ValueKind;

/// An error raised while turning a sample expression into a [`Path`](crate::path::Path).
///
/// # Examples
///
/// ```rust
/// use pathlens::{PathError, path_from_expression};
///
/// let error = path_from_expression("s.list.items").unwrap_err();
/// assert!(matches!(error, PathError::MissingBody { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// No closure, arrow, or `return` body could be isolated.
    MissingBody {
        /// The text that was inspected.
        expression: String,
    },
    /// A body was found but it contains no expression.
    EmptyExpression,
    /// A character that cannot appear in an access chain.
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// Byte offset inside the isolated body.
        offset: usize,
    },
    /// The text ended where an identifier was required.
    UnexpectedEnd {
        /// Byte offset inside the isolated body.
        offset: usize,
    },
    /// A `[` without its matching `]`.
    UnterminatedBracket {
        /// Byte offset of the opening bracket.
        offset: usize,
    },
    /// Bracket contents that are neither an integer, an identifier, nor a quoted key.
    InvalidIndex {
        /// The raw bracket contents.
        index: String,
    },
    /// A `[$k]` placeholder whose position does not follow the previous ones.
    PlaceholderOutOfOrder {
        /// The position the parser expected next.
        expected: usize,
        /// The position written in the text.
        found: usize,
    },
}

impl fmt::Display for PathError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBody { expression } => write!(
                formatter,
                "could not isolate an expression body in `{expression}`"
            ),
            Self::EmptyExpression => write!(formatter, "expression body is empty"),
            Self::UnexpectedCharacter { character, offset } => write!(
                formatter,
                "unexpected character `{character}` at offset {offset}"
            ),
            Self::UnexpectedEnd { offset } => {
                write!(formatter, "unexpected end of expression at offset {offset}")
            }
            Self::UnterminatedBracket { offset } => {
                write!(formatter, "unterminated `[` at offset {offset}")
            }
            Self::InvalidIndex { index } => write!(formatter, "invalid index `[{index}]`"),
            Self::PlaceholderOutOfOrder { expected, found } => write!(
                formatter,
                "variable placeholder `${found}` out of order, expected `${expected}`"
            ),
        }
    }
}

impl std::error::Error for PathError {}

/// An error raised while compiling a path into a lens or while running a lens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LensError {
    /// The path has variable placeholders but no values were supplied.
    MissingVariableIndexes {
        /// Number of placeholders in the path.
        expected: usize,
    },
    /// The number of supplied values differs from the number of placeholders.
    ArityMismatch {
        /// Number of placeholders in the path.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },
    /// A container of the wrong kind was found along the path.
    ShapeMismatch {
        /// The container kind the lens needed.
        expected: ValueKind,
        /// The kind actually found.
        found: ValueKind,
    },
    /// A segment that cannot be turned into a lens reached lens construction.
    UnsupportedSegment {
        /// The offending segment.
        segment: Segment,
    },
    /// A write past the end of an array would pad it with too many `Null`s.
    IndexTooLarge {
        /// The position written to.
        index: usize,
        /// The length of the array at the time of the write.
        length: usize,
    },
    /// A typed read or write could not convert between the tree and a Rust type.
    Conversion {
        /// The `serde_json` error message.
        message: String,
    },
}

impl fmt::Display for LensError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingVariableIndexes { expected } => write!(
                formatter,
                "path contains variable indexes but none were supplied (expected {expected}, supplied 0)"
            ),
            Self::ArityMismatch { expected, actual } => write!(
                formatter,
                "path contains {expected} variable indexes but {actual} were supplied"
            ),
            Self::ShapeMismatch { expected, found } => {
                write!(formatter, "expected {expected} but found {found}")
            }
            Self::UnsupportedSegment { segment } => {
                write!(formatter, "unsupported path segment {segment:?}")
            }
            Self::IndexTooLarge { index, length } => write!(
                formatter,
                "index {index} is too far past the end of an array of length {length}"
            ),
            Self::Conversion { message } => write!(formatter, "conversion failed: {message}"),
        }
    }
}

impl std::error::Error for LensError {}

impl From<serde_json::Error> for LensError {
    fn from(error: serde_json::Error) -> Self {
        Self::Conversion {
            message: error.to_string(),
        }
    }
}

/// Either kind of failure, for callers that parse and compile in one go.
///
/// # Examples
///
/// ```rust
/// use pathlens::{Error, path_from_expression};
///
/// fn first_name(expression: &str) -> Result<String, Error> {
///     let path = path_from_expression(expression)?;
///     Ok(path.lens()?.to_string())
/// }
///
/// assert_eq!(first_name("|s| s.people[0].name").unwrap(), "people[0].name");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Failure while extracting a path.
    Path(PathError),
    /// Failure while compiling or running a lens.
    Lens(LensError),
}

impl fmt::Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(error) => write!(formatter, "{error}"),
            Self::Lens(error) => write!(formatter, "{error}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Path(error) => Some(error),
            Self::Lens(error) => Some(error),
        }
    }
}

impl From<PathError> for Error {
    fn from(error: PathError) -> Self {
        Self::Path(error)
    }
}

impl From<LensError> for Error {
    fn from(error: LensError) -> Self {
        Self::Lens(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_mismatch_display_names_both_counts() {
        let error = LensError::ArityMismatch {
            expected: 2,
            actual: 3,
        };
        assert_eq!(
            format!("{error}"),
            "path contains 2 variable indexes but 3 were supplied"
        );
    }

    #[test]
    fn test_missing_variable_indexes_display() {
        let error = LensError::MissingVariableIndexes { expected: 2 };
        assert_eq!(
            format!("{error}"),
            "path contains variable indexes but none were supplied (expected 2, supplied 0)"
        );
    }

    #[test]
    fn test_shape_mismatch_display() {
        let error = LensError::ShapeMismatch {
            expected: ValueKind::Object,
            found: ValueKind::Array,
        };
        assert_eq!(format!("{error}"), "expected object but found array");
    }

    #[test]
    fn test_placeholder_out_of_order_display() {
        let error = PathError::PlaceholderOutOfOrder {
            expected: 0,
            found: 1,
        };
        assert_eq!(
            format!("{error}"),
            "variable placeholder `$1` out of order, expected `$0`"
        );
    }

    #[test]
    fn test_error_wraps_sources() {
        let error = Error::from(PathError::EmptyExpression);
        assert_eq!(format!("{error}"), "expression body is empty");
        assert!(std::error::Error::source(&error).is_some());
    }
}
