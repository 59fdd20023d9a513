//! Function interception over a shared object graph.
//!
//! A hook replaces a function reachable from the graph root with a **wrapper** that routes
//! every call through a user supplied **handler**. The original function is never touched;
//! the wrapper is either installed in place or substituted into copy-on-write clones of
//! the graph.
//!
//! ### Key Components
//!
//! - **[`HookEngine`]**: Entry point tying everything below together
//! - **[`HookRegistry`]**: One [`Binding`] per hooked function, found from the original or
//!   from its wrapper
//! - **[`GraphLocator`]**: Breadth-first search for where a function lives
//! - **[`dispatcher`]**: Builds wrappers and runs the handler for each call
//! - **[`writer`]**: Writes a value while keeping the replaced property's attributes
//! - **[`cloner`]**: Shallow clones and hierarchy clones with substitutions
//!
//! ### Call Flow
//!
//! When a wrapper is called:
//!
//! 1. **Receiver**: the caller's receiver, or the node the original was found on when the
//!    caller supplied none
//! 2. **Invocation**: a fresh [`Invocation`] capturing that receiver and the arguments
//! 3. **Handler**: runs with the invocation, the arguments and the receiver; its result
//!    (or error) is what the caller gets
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use just_hook::runner::ds::graph::ObjectGraph;
//! use just_hook::runner::ds::operations::object::{call, create_data_property_or_throw};
//! use just_hook::runner::ds::realm::CodeRealm;
//! use just_hook::runner::ds::value::JsValue;
//! use just_hook::runner::hook::{hook_handler, HookEngine};
//!
//! let realm = Rc::new(CodeRealm::new());
//! let root = realm.new_object();
//! let double = realm.new_function("double", |_this, args| match args.first() {
//!     Some(JsValue::Number(n)) => Ok(JsValue::from(format!("{}{}", n, n))),
//!     _ => Ok(JsValue::Undefined),
//! });
//! create_data_property_or_throw(&root, "double", double.clone()).unwrap();
//!
//! let engine = HookEngine::new(Rc::new(ObjectGraph::with_root(realm, root)));
//! let wrapper = engine
//!     .create_hook(double, hook_handler(|invocation, _args, _this| {
//!         invocation.call(Some(vec![JsValue::from(7)]), None)
//!     }))
//!     .unwrap();
//!
//! let result = call(&wrapper, JsValue::Undefined, vec![JsValue::from(1)]).unwrap();
//! assert_eq!(result, JsValue::from("77"));
//! ```

pub mod cloner;
pub mod config;
pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod locator;
pub mod registry;
pub mod types;
pub mod writer;

pub use config::{ConfigError, HookConfig};
pub use engine::HookEngine;
pub use error::HookError;
pub use locator::GraphLocator;
pub use registry::HookRegistry;
pub use types::{forward_handler, hook_handler, Binding, HookHandler, Invocation, TargetInfo};
