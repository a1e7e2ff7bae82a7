//! Property-based tests for compiled path lenses.
//!
//! Every compiled lens must satisfy, for routes that exist in the tree:
//!
//! - **GetPut Law**: `lens.set(&data, lens.get(&data)?)? == data`
//! - **PutGet Law**: `lens.get(&lens.set(&data, value)?)? == value`
//! - **PutPut Law**: `lens.set(&lens.set(&data, v1)?, v2)? == lens.set(&data, v2)?`
//!
//! and, for every route, `set` must leave its input untouched.
//!
//! Trees are generated randomly; routes are picked by walking the generated
//! tree so the focus always exists. Array positions are written as
//! placeholders and supplied at compile time.

use pathlens::{Lens, Path, PathLens, Value, VariableIndex};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn json_leaf() -> impl Strategy<Value = serde_json::Value> {
    prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::Bool),
        any::<i64>().prop_map(serde_json::Value::from),
        "[a-z]{0,6}".prop_map(serde_json::Value::String),
    ]
}

fn json_tree() -> impl Strategy<Value = serde_json::Value> {
    json_leaf().prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(serde_json::Value::Array),
            prop::collection::btree_map("[a-z]{1,3}", inner, 0..4)
                .prop_map(|entries| serde_json::Value::Object(entries.into_iter().collect())),
        ]
    })
}

fn tree() -> impl Strategy<Value = Value> {
    json_tree().prop_map(Value::from)
}

fn leaf() -> impl Strategy<Value = Value> {
    json_leaf().prop_map(Value::from)
}

fn choices() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(any::<usize>(), 0..6)
}

/// Walks `data` guided by `choices` and compiles a lens for the route taken.
fn existing_route(data: &Value, choices: &[usize]) -> PathLens {
    let mut builder = Path::builder();
    let mut values = Vec::new();
    let mut current = data.clone();

    for choice in choices {
        let next = match &current {
            Value::Object(entries) if !entries.is_empty() => {
                let Some((key, child)) = entries.iter().nth(choice % entries.len()) else {
                    break;
                };
                builder = builder.attr(key.clone());
                child.clone()
            }
            Value::Array(items) if !items.is_empty() => {
                let index = choice % items.len();
                builder = builder.var();
                values.push(VariableIndex::Index(index));
                items[index].clone()
            }
            _ => break,
        };
        current = next;
    }

    pathlens::lens_from_path(&builder.build(), &values).unwrap()
}

// =============================================================================
// Lens Laws
// =============================================================================

proptest! {
    /// GetPut Law: Getting and setting back yields an equal tree
    #[test]
    fn prop_get_put_law(data in tree(), route in choices()) {
        let lens = existing_route(&data, &route);
        let focus = lens.get(&data).unwrap();
        prop_assert_eq!(lens.set(&data, focus).unwrap(), data);
    }

    /// PutGet Law: Setting then getting yields the set value
    #[test]
    fn prop_put_get_law(data in tree(), route in choices(), value in leaf()) {
        let lens = existing_route(&data, &route);
        let updated = lens.set(&data, value.clone()).unwrap();
        prop_assert_eq!(lens.get(&updated).unwrap(), value);
    }

    /// PutPut Law: Two consecutive sets is equivalent to the last set
    #[test]
    fn prop_put_put_law(
        data in tree(),
        route in choices(),
        first in leaf(),
        second in leaf()
    ) {
        let lens = existing_route(&data, &route);
        let left = lens.set(&lens.set(&data, first).unwrap(), second.clone()).unwrap();
        let right = lens.set(&data, second).unwrap();
        prop_assert_eq!(left, right);
    }

    /// Modifying with the identity function yields an equal tree
    #[test]
    fn prop_identity_modify(data in tree(), route in choices()) {
        let lens = existing_route(&data, &route);
        prop_assert_eq!(lens.modify(&data, |value| value).unwrap(), data);
    }

    /// Setting never changes the source tree
    #[test]
    fn prop_set_does_not_mutate(data in tree(), route in choices(), value in tree()) {
        let before = serde_json::Value::from(&data);
        let lens = existing_route(&data, &route);
        let _updated = lens.set(&data, value).unwrap();
        prop_assert_eq!(serde_json::Value::from(&data), before);
    }

    /// Writes through missing attributes always succeed on an object root
    #[test]
    fn prop_missing_attributes_are_created(
        names in prop::collection::vec("[a-z]{1,4}", 1..5),
        value in leaf()
    ) {
        let path = names
            .iter()
            .fold(Path::builder(), |builder, name| builder.attr(name.clone()))
            .build();
        let lens = path.lens().unwrap();
        let updated = lens.set(&Value::empty_object(), value.clone()).unwrap();
        prop_assert_eq!(lens.get(&updated).unwrap(), value);
    }
}
