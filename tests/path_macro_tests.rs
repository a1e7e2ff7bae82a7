//! Tests for the `path!` macro.
//!
//! The macro must produce exactly the path that the runtime parser derives
//! from the same closure text.

use pathlens::{Lens, Path, Segment, Value, path, path_from_expression};
use rstest::rstest;
use serde_json::json;

#[rstest]
fn test_macro_numbers_placeholders() {
    let path = path!(|d, i| d.foo.bar[i].baz[5]);
    assert_eq!(
        path.segments(),
        &[
            Segment::attribute("foo"),
            Segment::attribute("bar"),
            Segment::variable(0),
            Segment::attribute("baz"),
            Segment::fixed(5),
        ]
    );
}

#[rstest]
fn test_macro_agrees_with_runtime_parser() {
    let compiled = path!(|s: &State, i: usize, j: usize| &s.list.items[i].attributes[j]);
    let parsed =
        path_from_expression("|s: &State, i: usize, j: usize| &s.list.items[i].attributes[j]")
            .unwrap();
    assert_eq!(compiled, parsed);
}

#[rstest]
fn test_macro_and_runtime_parser_agree_on_parentheses() {
    assert_eq!(
        path!(|s, i| (s.items[i].name)),
        path_from_expression("|s, i| (s.items[i].name)").unwrap()
    );
}

#[rstest]
fn test_macro_block_and_string_keys() {
    let path = path!(|s| { s.labels["first name"] });
    assert_eq!(path.to_string(), r#"labels["first name"]"#);
}

#[rstest]
fn test_macro_root_only() {
    assert_eq!(path!(|s| s), Path::root());
}

#[rstest]
fn test_macro_path_compiles_to_a_lens() {
    let state = Value::from(json!({
        "list": { "items": [{ "name": "First" }, { "name": "Second", "attributes": ["A1"] }] }
    }));
    let lens = path!(|s, i, j| s.list.items[i].attributes[j])
        .lens_with([1usize, 0])
        .unwrap();
    assert_eq!(lens.get(&state).unwrap(), Value::from("A1"));
}
