//! A combinator DSL for writing paths by hand.

use super::{Path, Segment};

/// Builds a [`Path`] one segment at a time.
///
/// Placeholders added with [`var`](Self::var) are numbered automatically,
/// so the result always satisfies the path invariants.
///
/// # Examples
///
/// ```
/// use pathlens::{Path, path_from_expression};
///
/// let built = Path::builder()
///     .attr("list")
///     .attr("items")
///     .var()
///     .attr("attributes")
///     .var()
///     .build();
///
/// let parsed = path_from_expression("|s, i, j| s.list.items[i].attributes[j]").unwrap();
/// assert_eq!(built, parsed);
/// ```
#[derive(Clone, Debug, Default)]
#[must_use]
pub struct PathBuilder {
    segments: Vec<Segment>,
    variables: usize,
}

impl PathBuilder {
    /// Starts an empty builder.
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
            variables: 0,
        }
    }

    /// Appends an attribute segment.
    pub fn attr(mut self, name: impl Into<String>) -> Self {
        self.segments.push(Segment::attribute(name));
        self
    }

    /// Appends a fixed-index segment.
    pub fn index(mut self, index: usize) -> Self {
        self.segments.push(Segment::fixed(index));
        self
    }

    /// Appends the next variable-index placeholder.
    pub fn var(mut self) -> Self {
        self.segments.push(Segment::variable(self.variables));
        self.variables += 1;
        self
    }

    /// Finishes the path.
    #[must_use]
    pub fn build(self) -> Path {
        Path::from_segments_unchecked(self.segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_numbers_placeholders_in_order() {
        let path = PathBuilder::new().var().index(4).attr("x").var().build();
        assert_eq!(
            path.segments(),
            &[
                Segment::variable(0),
                Segment::fixed(4),
                Segment::attribute("x"),
                Segment::variable(1),
            ]
        );
    }

    #[test]
    fn test_empty_builder_is_root() {
        assert_eq!(PathBuilder::new().build(), Path::root());
    }
}
