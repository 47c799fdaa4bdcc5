#![allow(dead_code)]

use std::sync::Arc;
use structview::ViewEngine;
use structview_shape::{Dynamic, FieldDecl, ScalarKind, TypeId, TypeRegistry, Value};

/// User / Product / Activity types shared by the scenario tests
pub struct Catalog {
    pub engine: ViewEngine,
    pub user: TypeId,
    pub user_ptr: TypeId,
    pub product: TypeId,
    pub products: TypeId,
    pub activity: TypeId,
    pub activity_ptr: TypeId,
}

pub fn register_catalog(registry: &mut TypeRegistry) -> [TypeId; 6] {
    let uint = registry.scalar(ScalarKind::Uint);
    let string = registry.scalar(ScalarKind::String);

    let user = registry
        .struct_type(
            "User",
            vec![
                FieldDecl::new("Id", uint).with_tag(r#"view:"support,admin""#),
                FieldDecl::new("Name", string).with_tag(r#"view:"support,user""#),
                FieldDecl::new("Password", string).with_tag(r#"view:"user""#),
                FieldDecl::new("Key", string),
            ],
        )
        .expect("User");
    let user_ptr = registry.pointer_to(user).expect("*User");

    let product = registry
        .struct_type(
            "Product",
            vec![
                FieldDecl::new("Id", uint),
                FieldDecl::new("Name", string).with_tag(r#"view:"support, user""#),
                FieldDecl::new("Code", string).with_tag(r#"view:"support""#),
            ],
        )
        .expect("Product");
    let products = registry.slice_of(product).expect("[]Product");

    let activity = registry
        .struct_type(
            "Activity",
            vec![
                FieldDecl::new("User", user_ptr),
                FieldDecl::new("Products", products),
            ],
        )
        .expect("Activity");
    let activity_ptr = registry.pointer_to(activity).expect("*Activity");

    [user, user_ptr, product, products, activity, activity_ptr]
}

pub fn catalog() -> Catalog {
    let mut registry = TypeRegistry::new();
    let [user, user_ptr, product, products, activity, activity_ptr] =
        register_catalog(&mut registry);
    Catalog {
        engine: ViewEngine::new(Arc::new(registry)),
        user,
        user_ptr,
        product,
        products,
        activity,
        activity_ptr,
    }
}

pub fn user_value() -> Value {
    Value::Struct(vec![
        Value::Uint(7),
        Value::from("Jon Doe"),
        Value::from("secret"),
        Value::from("12345"),
    ])
}

pub fn product_value(id: u64, name: &str, code: &str) -> Value {
    Value::Struct(vec![Value::Uint(id), Value::from(name), Value::from(code)])
}

pub fn activity_value() -> Value {
    Value::Struct(vec![
        Value::pointer(user_value()),
        Value::slice(vec![
            product_value(3, "T-shirt", "123-456-7890"),
            product_value(5, "Shoes", "789-000-1111"),
        ]),
    ])
}

impl Catalog {
    pub fn user_ptr_value(&self) -> Dynamic {
        Dynamic::new(self.user_ptr, Value::pointer(user_value()))
    }

    pub fn activity_ptr_value(&self) -> Dynamic {
        Dynamic::new(self.activity_ptr, Value::pointer(activity_value()))
    }
}

/// Declaration-ordered field names of a rewritten struct
pub fn names(projection: &structview::Projection<'_>) -> Vec<String> {
    projection
        .as_fields()
        .map(|fields| fields.names().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Singly linked `Node { Value int "a", Label string, Next *Node "a" }`
pub struct NodeTypes {
    pub node: TypeId,
    pub node_ptr: TypeId,
}

pub fn register_node(registry: &mut TypeRegistry) -> NodeTypes {
    let int = registry.scalar(ScalarKind::Int);
    let string = registry.scalar(ScalarKind::String);
    let node = registry.declare_struct("Node");
    let node_ptr = registry.pointer_to(node).expect("*Node");
    registry
        .define_struct(
            node,
            vec![
                FieldDecl::new("Value", int).with_tag(r#"view:"a""#),
                FieldDecl::new("Label", string),
                FieldDecl::new("Next", node_ptr).with_tag(r#"view:"a""#),
            ],
        )
        .expect("Node");
    NodeTypes { node, node_ptr }
}

/// Linked list `0 -> 1 -> ... -> len-1`
pub fn node_list(len: i64) -> Value {
    let mut next = Value::null();
    for i in (0..len).rev() {
        next = Value::pointer(Value::Struct(vec![
            Value::Int(i),
            Value::from(format!("node-{i}")),
            next,
        ]));
    }
    next
}
