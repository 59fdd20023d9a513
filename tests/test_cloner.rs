extern crate just_hook;


use std::cell::Cell;
use std::rc::Rc;

use graph_util::*;
use just_hook::runner::ds::object::ObjectType;
use just_hook::runner::ds::object_property::{PropertyDescriptor, PropertyKey};
use just_hook::runner::ds::operations::object::{call, get, set, set_prototype_of};
use just_hook::runner::ds::operations::type_conversion::to_string;
use just_hook::runner::ds::value::JsValue;
use just_hook::runner::hook::cloner::{shallow_clone, substitute_one};
use just_hook::runner::hook::{hook_handler, HookEngine, HookError};

fn array_len(o: &just_hook::runner::ds::object::JsObjectType) -> u32 {
    match &*(**o).borrow() {
        ObjectType::Array(a) => a.length(),
        _ => panic!("Expected an array"),
    }
}

#[test]
fn test_root_clone_isolation() {
    let desktop = desktop_graph();
    let engine = HookEngine::new(desktop.graph.clone());
    let wrapper = engine.get_hook(desktop.spawn.clone()).unwrap();

    let clone = engine.get_obj(&desktop.root).unwrap();
    assert!(!same(&clone, &desktop.root));

    // Hooked path is copied, everything else is shared.
    let cloned_process = read_obj(&clone, "process");
    assert!(!same(&cloned_process, &desktop.process));
    assert!(is_same_value(&read(&cloned_process, "spawn"), &wrapper));
    assert!(is_same_value(&read(&desktop.process, "spawn"), &desktop.spawn));
    assert!(is_same_value(&read(&cloned_process, "kill"), &desktop.kill));
    assert!(same(&read_obj(&clone, "config"), &desktop.config));
    assert!(same(
        &walk(&clone, &["config", "theme"]),
        &walk(&desktop.root, &["config", "theme"])
    ));
    assert!(same(&read_obj(&clone, "wm"), &desktop.wm));

    // Top-level writes stay on their side.
    assert!(set(&clone, PropertyKey::from("version"), JsValue::from("2.0")).unwrap());
    assert_eq!(read(&desktop.root, "version"), JsValue::from("1.0"));
    assert!(set(&desktop.root, PropertyKey::from("extra"), JsValue::from(true)).unwrap());
    assert_eq!(read(&clone, "extra"), JsValue::Undefined);
}

#[test]
fn test_root_clone_without_hooks() {
    let desktop = desktop_graph();
    let engine = HookEngine::new(desktop.graph.clone());
    let clone = engine.new_root().unwrap();

    assert!(!same(&clone, &desktop.root));
    assert!(same(&read_obj(&clone, "process"), &desktop.process));
    assert_eq!(read(&clone, "version"), JsValue::from("1.0"));
}

#[test]
fn test_hierarchy_shares_overlapping_paths() {
    let (realm, graph, root) = new_graph();
    let a = realm.new_object();
    let b = realm.new_object();
    let c = constant(&realm, "c", "c");
    let d = constant(&realm, "d", "d");
    let untouched = realm.new_object();
    put(&b, "c", c.clone());
    put(&b, "d", d.clone());
    put(&a, "b", b.clone());
    put(&a, "untouched", untouched.clone());
    put(&root, "a", a.clone());

    let engine = HookEngine::new(graph);
    let wrapper_c = engine
        .create_hook(c.clone(), hook_handler(|_, _, _| Ok(JsValue::from("C"))))
        .unwrap();
    let wrapper_d = engine
        .create_hook(d.clone(), hook_handler(|_, _, _| Ok(JsValue::from("D"))))
        .unwrap();

    let new_root = engine.new_root().unwrap();
    let new_a = read_obj(&new_root, "a");
    let new_b = read_obj(&new_a, "b");
    assert!(!same(&new_a, &a));
    assert!(!same(&new_b, &b));
    assert!(same(&walk(&new_root, &["a", "b"]), &new_b));
    assert!(same(&read_obj(&new_a, "untouched"), &untouched));

    assert!(is_same_value(&read(&new_b, "c"), &wrapper_c));
    assert!(is_same_value(&read(&new_b, "d"), &wrapper_d));
    assert_eq!(
        call(&read_obj(&new_b, "c"), JsValue::Undefined, vec![]).unwrap(),
        JsValue::from("C")
    );

    // The live graph is unchanged.
    assert!(is_same_value(&read(&b, "c"), &c));
    assert!(is_same_value(&read(&b, "d"), &d));
}

#[test]
fn test_new_root_with_single_hook() {
    let desktop = desktop_graph();
    let engine = HookEngine::new(desktop.graph.clone());
    engine.get_hook(desktop.kill.clone()).unwrap();
    let spawn_wrapper = engine.get_hook(desktop.spawn.clone()).unwrap();

    let new_root = engine.new_root_with(desktop.spawn.clone()).unwrap();
    let process = read_obj(&new_root, "process");
    assert!(is_same_value(&read(&process, "spawn"), &spawn_wrapper));
    assert!(is_same_value(&read(&process, "kill"), &desktop.kill));
}

#[test]
fn test_arrays_on_the_path_are_copied() {
    let desktop = desktop_graph();
    let engine = HookEngine::new(desktop.graph.clone());
    let wrapper = engine.get_hook(desktop.close_window.clone()).unwrap();

    let new_root = engine.new_root().unwrap();
    let windows = walk(&new_root, &["wm", "windows"]);
    assert!(!same(&windows, &desktop.windows));
    assert_eq!(array_len(&windows), 2);

    let first = read_obj(&windows, "0");
    assert!(!same(&first, &desktop.first_window));
    assert!(is_same_value(&read(&first, "close"), &wrapper));
    assert_eq!(read(&first, "title"), JsValue::from("terminal"));
    assert!(same(
        &read_obj(&windows, "1"),
        &walk(&desktop.root, &["wm", "windows", "1"])
    ));
}

#[test]
fn test_inherited_hook_becomes_own_property_of_clone() {
    let (realm, graph, root) = new_graph();
    let proto = realm.new_object();
    let method = name_getter(&realm, "method");
    put(&proto, "method", method.clone());
    let instance = realm.new_object();
    assert!(set_prototype_of(&instance, Some(proto.clone())));
    put(&instance, "name", "instance");
    put(&root, "instance", instance.clone());

    let engine = HookEngine::new(graph);
    let wrapper = engine.get_hook(method.clone()).unwrap();
    let new_root = engine.new_root().unwrap();
    let new_instance = read_obj(&new_root, "instance");

    let own = (*new_instance)
        .borrow()
        .as_js_object()
        .get_own_property(&PropertyKey::from("method"))
        .cloned();
    match own.as_ref().and_then(|d| d.value()) {
        Some(value) => assert!(is_same_value(value, &wrapper)),
        None => panic!("Expected an own data property"),
    }
    assert!(is_same_value(&read(&proto, "method"), &method));
    assert!(!(*instance)
        .borrow()
        .as_js_object()
        .has_own_property(&PropertyKey::from("method")));
}

#[test]
fn test_stale_location_fails_whole_clone() {
    let desktop = desktop_graph();
    let engine = HookEngine::new(desktop.graph.clone());
    engine.get_hook(desktop.kill.clone()).unwrap();
    engine.get_hook(desktop.close_window.clone()).unwrap();

    assert!(set(&desktop.root, PropertyKey::from("wm"), JsValue::from(0)).unwrap());
    assert_eq!(
        engine.new_root().unwrap_err(),
        HookError::LocationStale {
            path: "wm.windows[0].close".to_string()
        }
    );
    assert_eq!(
        engine.get_obj(&desktop.root).unwrap_err(),
        HookError::LocationStale {
            path: "wm.windows[0].close".to_string()
        }
    );
}

#[test]
fn test_removed_intermediate_is_stale() {
    let desktop = desktop_graph();
    let engine = HookEngine::new(desktop.graph.clone());
    engine.get_hook(desktop.close_window.clone()).unwrap();

    (*desktop.wm)
        .borrow_mut()
        .as_js_object_mut()
        .delete(&PropertyKey::from("windows"));
    assert!(matches!(
        engine.new_root_with(desktop.close_window.clone()),
        Err(HookError::LocationStale { .. })
    ));
}

#[test]
fn test_frozen_intermediate_fails() {
    let (realm, graph, root) = new_graph();
    let locked = realm.new_object();
    let f = constant(&realm, "f", "f");
    put(&locked, "f", f.clone());
    define(&root, "locked", PropertyDescriptor::frozen(JsValue::Object(locked)));

    let engine = HookEngine::new(graph);
    engine.get_hook(f).unwrap();
    assert_eq!(
        engine.new_root().unwrap_err(),
        HookError::ImmutableProperty {
            key: "locked".to_string()
        }
    );
}

#[test]
fn test_clone_obj_substitutes_on_context() {
    let desktop = desktop_graph();
    let engine = HookEngine::new(desktop.graph.clone());
    let wrapper = engine.get_hook(desktop.close_window.clone()).unwrap();

    let clone = engine.clone_obj(desktop.close_window.clone()).unwrap();
    assert!(!same(&clone, &desktop.first_window));
    assert!(is_same_value(&read(&clone, "close"), &wrapper));
    assert_eq!(read(&clone, "title"), JsValue::from("terminal"));
    assert!(is_same_value(
        &read(&desktop.first_window, "close"),
        &desktop.close_window
    ));
}

#[test]
fn test_get_obj_applies_all_hooks_of_one_node() {
    let desktop = desktop_graph();
    let engine = HookEngine::new(desktop.graph.clone());
    let spawn_wrapper = engine.get_hook(desktop.spawn.clone()).unwrap();
    let kill_wrapper = engine.get_hook(desktop.kill.clone()).unwrap();
    engine.get_hook(desktop.close_window.clone()).unwrap();

    let clone = engine.get_obj(&desktop.process).unwrap();
    assert!(is_same_value(&read(&clone, "spawn"), &spawn_wrapper));
    assert!(is_same_value(&read(&clone, "kill"), &kill_wrapper));
    assert!(is_same_value(&read(&desktop.process, "spawn"), &desktop.spawn));
}

#[test]
fn test_get_obj_on_node_without_hooks() {
    let desktop = desktop_graph();
    let engine = HookEngine::new(desktop.graph.clone());
    engine.get_hook(desktop.spawn.clone()).unwrap();

    let clone = engine.get_obj(&desktop.config).unwrap();
    assert!(!same(&clone, &desktop.config));
    assert!(same(&read_obj(&clone, "theme"), &read_obj(&desktop.config, "theme")));
}

#[test]
fn test_get_obj_clones_the_scope_it_was_given() {
    let (realm, graph, root) = new_graph();
    let proto = realm.new_object();
    let method = this_echo(&realm, "method");
    put(&proto, "method", method.clone());
    let child = realm.new_object();
    assert!(set_prototype_of(&child, Some(proto.clone())));
    put(&root, "child", child.clone());

    let engine = HookEngine::new(graph);
    let wrapper = engine.get_hook(method.clone()).unwrap();
    let info = engine.binding(method.clone()).unwrap().target_info().unwrap();
    assert!(same(&info.context, &child));
    assert!(same(&info.owner, &proto));

    // `proto` only declares the hook, so its clone is a plain copy of `proto`.
    let proto_clone = engine.get_obj(&proto).unwrap();
    assert!(!same(&proto_clone, &proto));
    let prototype = (*proto_clone).borrow().as_js_object().get_prototype_of().unwrap();
    assert!(!same(&prototype, &proto));
    assert!(is_same_value(&read(&proto_clone, "method"), &method));

    let child_clone = engine.get_obj(&child).unwrap();
    let prototype = (*child_clone).borrow().as_js_object().get_prototype_of().unwrap();
    assert!(same(&prototype, &proto));
    assert!(is_same_value(&read(&child_clone, "method"), &wrapper));
}

#[test]
fn test_get_obj_scope_conflict() {
    let (realm, graph, root) = new_graph();
    let tools = realm.new_object();
    let first = constant(&realm, "first", "first");
    let second = constant(&realm, "second", "second");
    put(&tools, "run", first.clone());
    put(&root, "tools", tools.clone());

    let engine = HookEngine::new(graph);
    engine.get_hook(first).unwrap();
    put(&tools, "run", second.clone());
    engine.get_hook(second).unwrap();

    // Both hooks were found at `tools.run` and disagree on what the clone holds there.
    assert_eq!(
        engine.get_obj(&tools).unwrap_err(),
        HookError::ScopeConflict {
            first: "tools.run".to_string(),
            second: "tools.run".to_string()
        }
    );
}

#[test]
fn test_clone_obj_shadows_inherited_setter() {
    let (realm, graph, root) = new_graph();
    let method = constant(&realm, "method", "m");
    let writes = Rc::new(Cell::new(0));
    let counter = writes.clone();
    let stored = method.clone();
    let getter = realm.new_function("get method", move |_, _| Ok(JsValue::Object(stored.clone())));
    let setter = realm.new_function("set method", move |_, _| {
        counter.set(counter.get() + 1);
        Ok(JsValue::Undefined)
    });
    let proto = realm.new_object();
    define(
        &proto,
        "method",
        PropertyDescriptor::Accessor {
            get: Some(getter),
            set: Some(setter),
            enumerable: true,
            configurable: true,
        },
    );
    let child = realm.new_object();
    assert!(set_prototype_of(&child, Some(proto)));
    put(&root, "child", child.clone());

    let engine = HookEngine::new(graph);
    let wrapper = engine.get_hook(method.clone()).unwrap();
    let clone = engine.clone_obj(method.clone()).unwrap();

    assert_eq!(writes.get(), 0);
    assert!(is_same_value(&read(&clone, "method"), &wrapper));
    assert!(is_same_value(&read(&child, "method"), &method));
}

#[test]
fn test_paths_through_fresh_getter_results() {
    let (realm, graph, root) = new_graph();
    let f = constant(&realm, "f", "f");
    let g = constant(&realm, "g", "g");
    let inner_f = realm.new_object();
    put(&inner_f, "f", f.clone());
    let inner_g = realm.new_object();
    put(&inner_g, "g", g.clone());
    let (via_a, via_b) = (inner_f.clone(), inner_g.clone());
    define_fresh(&root, &realm, "a", move |fresh| put(fresh, "inner", via_a.clone()));
    define_fresh(&root, &realm, "b", move |fresh| put(fresh, "inner", via_b.clone()));

    let engine = HookEngine::new(graph);
    let wrapper_f = engine.get_hook(f.clone()).unwrap();
    let wrapper_g = engine.get_hook(g.clone()).unwrap();
    let info = engine.binding(g.clone()).unwrap().target_info().unwrap();
    assert_eq!(info.path.to_string(), "b.inner.g");

    let new_root = engine.new_root().unwrap();
    assert!(!same(&read_obj(&new_root, "a"), &read_obj(&new_root, "b")));
    let new_inner_f = walk(&new_root, &["a", "inner"]);
    let new_inner_g = walk(&new_root, &["b", "inner"]);
    assert!(!same(&new_inner_f, &new_inner_g));
    assert!(is_same_value(&read(&new_inner_f, "f"), &wrapper_f));
    assert!(is_same_value(&read(&new_inner_g, "g"), &wrapper_g));
    assert!(is_same_value(&read(&inner_f, "f"), &f));
}

#[test]
fn test_shallow_clone_copies_accessors() {
    let (realm, _, _) = new_graph();
    let o = realm.new_object();
    put(&o, "first", "Ada");
    let getter = realm.new_function("get greeting", |this, _| match &this {
        JsValue::Object(o) => {
            let first = get(o, &PropertyKey::from("first"))?;
            Ok(JsValue::from(format!("hello {}", to_string(&first)?)))
        }
        _ => Ok(JsValue::Undefined),
    });
    define(
        &o,
        "greeting",
        PropertyDescriptor::Accessor {
            get: Some(getter),
            set: None,
            enumerable: false,
            configurable: true,
        },
    );

    let clone = shallow_clone(&o);
    put(&clone, "first", "Grace");
    let desc = (*clone)
        .borrow()
        .as_js_object()
        .get_own_property(&PropertyKey::from("greeting"))
        .cloned()
        .unwrap();
    assert!(desc.is_accessor_descriptor());
    assert_eq!(read(&clone, "greeting"), JsValue::from("hello Grace"));
    assert_eq!(read(&o, "greeting"), JsValue::from("hello Ada"));
}

#[test]
fn test_substitute_one_keeps_prototype() {
    let (realm, _, _) = new_graph();
    let proto = realm.new_object();
    put(&proto, "shared", 1);
    let o = realm.new_object();
    assert!(set_prototype_of(&o, Some(proto.clone())));
    put(&o, "key", "old");

    let clone = substitute_one(&o, PropertyKey::from("key"), JsValue::from("new")).unwrap();
    assert_eq!(read(&clone, "key"), JsValue::from("new"));
    assert_eq!(read(&clone, "shared"), JsValue::from(1));
    assert_eq!(read(&o, "key"), JsValue::from("old"));
    assert!(Rc::ptr_eq(
        &(*clone).borrow().as_js_object().get_prototype_of().unwrap(),
        &proto
    ));
}
