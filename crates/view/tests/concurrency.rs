mod common;

use common::{activity_value, node_list, register_catalog, register_node};
use std::sync::{Arc, Barrier};
use std::thread;
use structview::ViewEngine;
use structview_shape::{Dynamic, FieldDecl, ScalarKind, TypeRegistry, Value};

const VIEWS: [&str; 4] = ["admin", "support", "user", "a"];
const THREADS: usize = 32;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

struct Roots {
    activity: Dynamic,
    list: Dynamic,
}

fn setup() -> (TypeRegistry, Roots) {
    let mut registry = TypeRegistry::new();
    let [.., activity_ptr] = register_catalog(&mut registry);
    let node = register_node(&mut registry);
    let roots = Roots {
        activity: Dynamic::new(activity_ptr, Value::pointer(activity_value())),
        list: Dynamic::new(node.node_ptr, node_list(5)),
    };
    (registry, roots)
}

/// Debug rendering of both roots; identical output means identical projections
fn render_all(engine: &ViewEngine, roots: &Roots, view: &str) -> String {
    let activity = engine.render(&roots.activity, view).expect("activity renders");
    let list = engine.render(&roots.list, view).expect("list renders");
    format!("{activity:?}\n{list:?}")
}

#[test]
fn concurrent_first_use_agrees_with_sequential_rendering() {
    init_logging();
    let (registry, roots) = setup();
    let registry = Arc::new(registry);

    let reference = ViewEngine::new(Arc::clone(&registry));
    let expected: Vec<String> = VIEWS
        .iter()
        .map(|view| render_all(&reference, &roots, view))
        .collect();

    let engine = Arc::new(ViewEngine::new(registry));
    let roots = Arc::new(roots);
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let engine = Arc::clone(&engine);
            let roots = Arc::clone(&roots);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let view = VIEWS[i % VIEWS.len()];
                barrier.wait();
                (i % VIEWS.len(), render_all(&engine, &roots, view))
            })
        })
        .collect();

    for handle in handles {
        let (view, rendered) = handle.join().expect("render thread");
        assert_eq!(rendered, expected[view], "view {}", VIEWS[view]);
    }
    assert_eq!(engine.cached_strategies(), reference.cached_strategies());
}

#[test]
fn shared_engine_serves_repeated_renders_from_many_threads() {
    init_logging();
    let (registry, roots) = setup();
    let engine = ViewEngine::new(Arc::new(registry));
    let expected = render_all(&engine, &roots, "support");
    let cached = engine.cached_strategies();

    thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for _ in 0..50 {
                    assert_eq!(render_all(&engine, &roots, "support"), expected);
                }
            });
        }
    });
    assert_eq!(engine.cached_strategies(), cached);
}

#[test]
fn overlapping_builds_keep_untagged_structs_intact() {
    init_logging();
    const WIDTH: usize = 2_000;

    for round in 0..50 {
        let mut registry = TypeRegistry::new();
        let int = registry.scalar(ScalarKind::Int);
        let plain = registry
            .struct_type(
                "Plain",
                (0..WIDTH).map(|i| FieldDecl::new(format!("F{i}"), int)).collect(),
            )
            .unwrap();
        let wrapper = registry
            .struct_type("Wrapper", vec![FieldDecl::new("Inner", plain)])
            .unwrap();
        let engine = ViewEngine::new(Arc::new(registry));

        let plain_value = Value::Struct((0..WIDTH as i64).map(Value::Int).collect());
        let plain_root = Dynamic::new(plain, plain_value.clone());
        let wrapper_root = Dynamic::new(wrapper, Value::Struct(vec![plain_value]));
        let barrier = Barrier::new(2);

        thread::scope(|scope| {
            scope.spawn(|| {
                barrier.wait();
                let projection = engine.render(&plain_root, "x").unwrap();
                assert!(projection.is_same_as(&plain_root.value), "round {round}: Plain");
            });
            scope.spawn(|| {
                barrier.wait();
                let projection = engine.render(&wrapper_root, "x").unwrap();
                assert!(projection.is_same_as(&wrapper_root.value), "round {round}: Wrapper");
            });
        });

        // the published decision is the sequential one
        let again = engine.render(&wrapper_root, "x").unwrap();
        assert!(again.is_same(), "round {round}: cached Wrapper decision");
    }
}
