use proptest::prelude::*;
use std::sync::Arc;
use structview::ViewEngine;
use structview_shape::{Dynamic, FieldDecl, ScalarKind, TypeRegistry, Value};

/// Flat struct of int fields; `tags[i]` lists the views of field `i`
fn flat_struct(tags: &[Vec<&str>]) -> (ViewEngine, Dynamic) {
    let mut registry = TypeRegistry::new();
    let int = registry.scalar(ScalarKind::Int);
    let fields = tags
        .iter()
        .enumerate()
        .map(|(i, views)| {
            let decl = FieldDecl::new(format!("F{i}"), int);
            if views.is_empty() {
                decl
            } else {
                decl.with_tag(format!("view:\"{}\"", views.join(",")))
            }
        })
        .collect();
    let ty = registry.struct_type("Flat", fields).unwrap();
    let value = Value::Struct((0..tags.len() as i64).map(Value::Int).collect());
    (ViewEngine::new(Arc::new(registry)), Dynamic::new(ty, value))
}

fn membership() -> impl Strategy<Value = Vec<Vec<&'static str>>> {
    prop::collection::vec(prop::sample::subsequence(vec!["a", "b"], 0..=2), 1..8)
}

proptest! {
    #[test]
    fn proptest_untagged_structs_render_as_identity(
        width in 1usize..10,
        view in "[a-z]{1,8}",
    ) {
        let (engine, value) = flat_struct(&vec![Vec::new(); width]);
        let projection = engine.render(&value, &view).unwrap();
        prop_assert!(projection.is_same_as(&value.value));
    }

    #[test]
    fn proptest_views_keep_exactly_their_fields(tags in membership()) {
        let (engine, value) = flat_struct(&tags);
        let Value::Struct(values) = &value.value else {
            unreachable!();
        };

        for view in ["a", "b"] {
            let members: Vec<usize> = tags
                .iter()
                .enumerate()
                .filter(|(_, views)| views.contains(&view))
                .map(|(i, _)| i)
                .collect();
            let projection = engine.render(&value, view).unwrap();

            if members.is_empty() || members.len() == tags.len() {
                prop_assert!(projection.is_same_as(&value.value));
                continue;
            }

            let fields = projection.as_fields().expect("filtered struct");
            let names: Vec<&str> = fields.names().collect();
            let expected: Vec<String> = members.iter().map(|i| format!("F{i}")).collect();
            prop_assert_eq!(names, expected.iter().map(String::as_str).collect::<Vec<_>>());
            for (name, projected) in fields.iter() {
                let index: usize = name[1..].parse().unwrap();
                prop_assert!(projected.is_same_as(&values[index]));
            }
        }
    }

    #[test]
    fn proptest_rendering_is_deterministic(tags in membership(), view in "[ab]") {
        let (engine, value) = flat_struct(&tags);
        let first = engine.render(&value, &view).unwrap();
        let second = engine.render(&value, &view).unwrap();
        prop_assert_eq!(first, second);
    }
}
