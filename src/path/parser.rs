//! Extraction of paths from the textual form of sample access expressions.
//!
//! The sample is never evaluated. Its body is isolated from the closure,
//! arrow, or `function` syntax around it, then read as an access chain:
//! a root parameter followed by `.name`, `?.name` and `[..]` accessors.

use std::str::FromStr;

use tracing::trace;

use super::{Path, Segment, is_identifier, is_identifier_continue, is_identifier_start};
use crate::error::PathError;

/// Derives a [`Path`] from the source text of a sample access function.
///
/// Accepted shapes:
///
/// - Rust closures: `|s, i| s.list.items[i].name`, `move |s| { s.list }`
/// - Arrow functions: `(s, i) => s.list.items[i]`, `s => { return s.list; }`
/// - Function expressions: `function (d, i) { return d.foo.bar[i]; }`
///
/// The first identifier of the body names the root parameter and is
/// dropped, as is a leading `&`. Inside brackets an integer literal becomes
/// a fixed index, a quoted string becomes an attribute key, and any
/// identifier becomes the next variable-index placeholder.
///
/// # Errors
///
/// Returns [`PathError::MissingBody`] when no single expression body can be
/// isolated, and the other [`PathError`] variants when the body is not a
/// plain access chain.
///
/// # Examples
///
/// ```
/// use pathlens::{Segment, path_from_expression};
///
/// let path = path_from_expression("function (d, i) { return d.foo.bar[i].baz[5]; }").unwrap();
/// assert_eq!(path.to_string(), "foo.bar[$0].baz[5]");
///
/// let root_array = path_from_expression("|rows| rows[0].name").unwrap();
/// assert_eq!(root_array.segments()[0], Segment::fixed(0));
/// ```
pub fn path_from_expression(expression: &str) -> Result<Path, PathError> {
    let body = extract_body(expression)?;
    let path = Path::from_segments_unchecked(parse_chain(body, ChainStart::RootParameter)?);
    trace!(
        expression,
        path = %path,
        segments = path.len(),
        "parsed path from expression"
    );
    Ok(path)
}

impl FromStr for Path {
    type Err = PathError;

    /// Parses the prettified form, e.g. `list.items[$0].name` or `[0].name`.
    ///
    /// `[$k]` placeholders must be numbered from zero in order of appearance.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        parse_chain(text, ChainStart::Accessor).map(Self::from_segments_unchecked)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ChainStart {
    /// The chain opens with the root parameter, which carries no path information.
    RootParameter,
    /// The chain opens directly with an accessor or an attribute name.
    Accessor,
}

fn extract_body(expression: &str) -> Result<&str, PathError> {
    let missing = || PathError::MissingBody {
        expression: expression.to_string(),
    };
    let trimmed = expression.trim();
    let closure = strip_keyword(trimmed, "move").unwrap_or(trimmed);

    let body = if let Some(parameters_and_body) = closure.strip_prefix('|') {
        let (_, body) = parameters_and_body.split_once('|').ok_or_else(missing)?;
        skip_return_type(body)
    } else if let Some(signature_and_body) = strip_keyword(trimmed, "function") {
        let open = signature_and_body.find('{').ok_or_else(missing)?;
        &signature_and_body[open..]
    } else if let Some((_, body)) = trimmed.split_once("=>") {
        body
    } else {
        return Err(missing());
    };

    let expression_body = strip_parentheses(unwrap_block(body.trim()).ok_or_else(missing)?);
    if expression_body.is_empty() {
        return Err(PathError::EmptyExpression);
    }
    Ok(expression_body)
}

fn skip_return_type(body: &str) -> &str {
    let body = body.trim_start();
    body.strip_prefix("->").map_or(body, |typed| {
        typed.find('{').map_or(typed, |open| &typed[open..])
    })
}

/// Reduces `{ return expr; }` or `{ expr }` to `expr`. `None` for multi-statement blocks.
fn unwrap_block(body: &str) -> Option<&str> {
    let Some(block) = body.strip_prefix('{') else {
        return Some(strip_semicolons(body));
    };
    let statement = block.trim_end().strip_suffix('}')?.trim();
    let statement = strip_keyword(statement, "return").unwrap_or(statement);
    let expression = strip_semicolons(statement);
    if expression.contains(';') {
        return None;
    }
    Some(expression)
}

/// Removes parentheses that enclose the whole expression, e.g. `((s.a))` to `s.a`.
fn strip_parentheses(mut text: &str) -> &str {
    while let Some(inner) = text
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .filter(|inner| is_balanced(inner))
    {
        text = inner.trim();
    }
    text
}

fn is_balanced(text: &str) -> bool {
    let mut depth = 0usize;
    let mut quote = None;
    let mut characters = text.chars();
    while let Some(character) = characters.next() {
        match (quote, character) {
            (Some(_), '\\') => {
                characters.next();
            }
            (Some(open_quote), _) if character == open_quote => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(character),
            (None, '(') => depth += 1,
            (None, ')') => match depth.checked_sub(1) {
                Some(remaining) => depth = remaining,
                None => return false,
            },
            (None, _) => {}
        }
    }
    depth == 0 && quote.is_none()
}

fn strip_semicolons(text: &str) -> &str {
    text.trim_end_matches(|character: char| character == ';' || character.is_whitespace())
}

fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(keyword)?;
    match rest.chars().next() {
        Some(next) if is_identifier_continue(next) => None,
        _ => Some(rest.trim_start()),
    }
}

fn parse_chain(text: &str, start: ChainStart) -> Result<Vec<Segment>, PathError> {
    let mut scanner = Scanner::new(text);
    let mut segments = Vec::new();
    let mut variables = 0;

    scanner.skip_whitespace();
    match start {
        ChainStart::RootParameter => {
            if scanner.peek() == Some('&') {
                scanner.bump();
                scanner.skip_whitespace();
            }
            scanner.expect_identifier()?;
        }
        ChainStart::Accessor => {
            if let Some(name) = scanner.identifier() {
                segments.push(Segment::attribute(name));
            }
        }
    }

    loop {
        scanner.skip_whitespace();
        match scanner.peek() {
            None => return Ok(segments),
            Some('.') => {
                scanner.bump();
                scanner.skip_whitespace();
                segments.push(Segment::attribute(scanner.expect_identifier()?));
            }
            Some('?') => {
                scanner.bump();
                if scanner.peek() != Some('.') {
                    return Err(scanner.unexpected());
                }
                scanner.bump();
                scanner.skip_whitespace();
                if scanner.peek() != Some('[') {
                    segments.push(Segment::attribute(scanner.expect_identifier()?));
                }
            }
            Some('[') => {
                let contents = scanner.bracket_contents()?;
                let segment = index_segment(contents.trim(), start, variables)?;
                if segment.is_variable() {
                    variables += 1;
                }
                segments.push(segment);
            }
            Some(_) => return Err(scanner.unexpected()),
        }
    }
}

fn index_segment(
    contents: &str,
    start: ChainStart,
    next_position: usize,
) -> Result<Segment, PathError> {
    let invalid = || PathError::InvalidIndex {
        index: contents.to_string(),
    };

    if is_digits(contents) {
        return contents.parse().map(Segment::fixed).map_err(|_| invalid());
    }
    if let Some(key) = unquote(contents) {
        return Ok(Segment::attribute(key));
    }
    if start == ChainStart::Accessor
        && let Some(digits) = contents.strip_prefix('$').filter(|digits| is_digits(digits))
    {
        let found: usize = digits.parse().map_err(|_| invalid())?;
        if found != next_position {
            return Err(PathError::PlaceholderOutOfOrder {
                expected: next_position,
                found,
            });
        }
        return Ok(Segment::variable(found));
    }
    if is_identifier(contents) {
        return Ok(Segment::variable(next_position));
    }
    Err(invalid())
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|byte| byte.is_ascii_digit())
}

fn unquote(text: &str) -> Option<String> {
    let quote = text.chars().next().filter(|first| *first == '"' || *first == '\'')?;
    let inner = text.strip_prefix(quote)?.strip_suffix(quote)?;
    let mut key = String::with_capacity(inner.len());
    let mut characters = inner.chars();
    while let Some(character) = characters.next() {
        if character == '\\' {
            key.push(characters.next()?);
        } else {
            key.push(character);
        }
    }
    Some(key)
}

struct Scanner<'a> {
    text: &'a str,
    offset: usize,
}

impl<'a> Scanner<'a> {
    const fn new(text: &'a str) -> Self {
        Self { text, offset: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.text[self.offset..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let character = self.peek()?;
        self.offset += character.len_utf8();
        Some(character)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn identifier(&mut self) -> Option<&'a str> {
        let start = self.offset;
        if !self.peek().is_some_and(is_identifier_start) {
            return None;
        }
        while self.peek().is_some_and(is_identifier_continue) {
            self.bump();
        }
        Some(&self.text[start..self.offset])
    }

    fn expect_identifier(&mut self) -> Result<&'a str, PathError> {
        self.identifier().ok_or_else(|| self.unexpected())
    }

    fn unexpected(&self) -> PathError {
        self.peek().map_or(
            PathError::UnexpectedEnd {
                offset: self.offset,
            },
            |character| PathError::UnexpectedCharacter {
                character,
                offset: self.offset,
            },
        )
    }

    /// Consumes `[ ... ]` and returns the text between the brackets.
    fn bracket_contents(&mut self) -> Result<&'a str, PathError> {
        let open = self.offset;
        self.bump();
        let start = self.offset;
        let mut quote = None;
        while let Some(character) = self.bump() {
            match (quote, character) {
                (Some(_), '\\') => {
                    self.bump();
                }
                (Some(open_quote), _) if character == open_quote => quote = None,
                (None, '"' | '\'') => quote = Some(character),
                (None, ']') => return Ok(&self.text[start..self.offset - 1]),
                _ => {}
            }
        }
        Err(PathError::UnterminatedBracket { offset: open })
    }
}
