//! # just-hook - Function interception for JavaScript-style object graphs
//!
//! Intercepts calls to any function reachable from a shared root object without touching
//! the function's declaration site:
//! - Object model with prototype delegation and full property descriptors
//! - Breadth-first, identity based location of functions in cyclic graphs
//! - Wrappers that preserve receiver and argument semantics
//! - In-place installation or copy-on-write clones of the graph
//!
//! ## Quick Start
//!
//! ### Hooking a method
//!
//! ```
//! use std::rc::Rc;
//! use just_hook::runner::ds::graph::ObjectGraph;
//! use just_hook::runner::ds::object_property::PropertyKey;
//! use just_hook::runner::ds::operations::object::{
//!     create_data_property_or_throw, get, invoke,
//! };
//! use just_hook::runner::ds::operations::type_conversion::to_string;
//! use just_hook::runner::ds::realm::CodeRealm;
//! use just_hook::runner::ds::value::JsValue;
//! use just_hook::runner::hook::{hook_handler, HookEngine};
//!
//! let realm = Rc::new(CodeRealm::new());
//! let root = realm.new_object();
//! let greeter = realm.new_object();
//! let greet = realm.new_function("greet", |this, _args| match &this {
//!     JsValue::Object(o) => get(o, &PropertyKey::from("name")),
//!     _ => Ok(JsValue::Undefined),
//! });
//! create_data_property_or_throw(&greeter, "greet", greet.clone()).unwrap();
//! create_data_property_or_throw(&greeter, "name", "root").unwrap();
//! create_data_property_or_throw(&root, "a", greeter.clone()).unwrap();
//!
//! let engine = HookEngine::new(Rc::new(ObjectGraph::with_root(realm, root)));
//! engine
//!     .create_hook(greet.clone(), hook_handler(|invocation, _args, _this| {
//!         let name = invocation.run()?;
//!         Ok(JsValue::from(format!("hi {}", to_string(&name)?)))
//!     }))
//!     .unwrap();
//!
//! // Destructive: every reader of `a.greet` now gets the wrapper.
//! engine.override_target(greet).unwrap();
//! let result = invoke(&JsValue::Object(greeter), &PropertyKey::from("greet"), vec![]).unwrap();
//! assert_eq!(result, JsValue::from("hi root"));
//! ```
//!
//! ### Cloning instead of overriding
//!
//! [`runner::hook::HookEngine::new_root`] builds a new root in which only the nodes on the
//! way to hooked functions are copied; everything else is shared with the live graph.
//! [`runner::hook::HookEngine::get_obj`] does the same for a single node.
//!
//! ## Architecture
//!
//! - **[`parser`]** - PEG grammar for textual property paths
//! - **[`runner`]**
//!   - **[`runner::ds`]** - Data structures (values, objects, descriptors, the graph)
//!   - **[`runner::hook`]** - The interception engine

#[macro_use]
extern crate lazy_static;

pub mod parser;
pub mod runner;
