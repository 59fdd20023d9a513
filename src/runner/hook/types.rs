//! Core types of the interception engine.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::function_object::function_name;
use crate::runner::ds::object::JsObjectType;
use crate::runner::ds::object_property::PropertyKey;
use crate::runner::ds::operations::object::call;
use crate::runner::ds::property_path::PropertyPath;
use crate::runner::ds::value::JsValue;

/// Interception logic run on every call through a wrapper.
///
/// Receives the per-call [`Invocation`], the call's arguments and the effective receiver.
/// Whatever it returns is what the wrapper's caller sees.
pub type HookHandler = Rc<dyn Fn(&Invocation, Vec<JsValue>, JsValue) -> Result<JsValue, JErrorType>>;

pub fn hook_handler<F>(handler: F) -> HookHandler
where
    F: Fn(&Invocation, Vec<JsValue>, JsValue) -> Result<JsValue, JErrorType> + 'static,
{
    Rc::new(handler)
}

/// Handler that forwards the call to the original unchanged.
pub fn forward_handler() -> HookHandler {
    hook_handler(|invocation, args, context| invocation.apply(Some(context), Some(args)))
}

/// Where a function was found in the graph.
#[derive(Clone)]
pub struct TargetInfo {
    /// The object that declares the property; differs from `context` for inherited keys.
    pub owner: JsObjectType,
    /// The node the function was read from. Unbound calls use it as their receiver.
    pub context: JsObjectType,
    pub key: PropertyKey,
    /// Keys from the root to the function; the last one is `key`.
    pub path: PropertyPath,
}
impl TargetInfo {
    pub fn is_inherited(&self) -> bool {
        !Rc::ptr_eq(&self.owner, &self.context)
    }
}
impl fmt::Debug for TargetInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetInfo")
            .field("key", &self.key)
            .field("path", &self.path.to_string())
            .field("inherited", &self.is_inherited())
            .finish()
    }
}

/// The engine's record of one intercepted function.
pub struct Binding {
    original: JsObjectType,
    handler: RefCell<Option<HookHandler>>,
    target_info: RefCell<Option<TargetInfo>>,
    wrapper: RefCell<Option<JsObjectType>>,
}
impl Binding {
    pub(crate) fn new(
        original: JsObjectType,
        handler: Option<HookHandler>,
        target_info: Option<TargetInfo>,
    ) -> Self {
        Binding {
            original,
            handler: RefCell::new(handler),
            target_info: RefCell::new(target_info),
            wrapper: RefCell::new(None),
        }
    }

    pub fn original(&self) -> &JsObjectType {
        &self.original
    }

    pub fn original_name(&self) -> String {
        function_name(&self.original).unwrap_or_default()
    }

    /// The installed handler, or the forwarding default.
    pub fn handler(&self) -> HookHandler {
        match &*self.handler.borrow() {
            Some(handler) => handler.clone(),
            None => forward_handler(),
        }
    }

    /// Replaces the handler. `None` restores forwarding.
    pub fn set_handler(&self, handler: Option<HookHandler>) {
        self.handler.replace(handler);
    }

    pub fn target_info(&self) -> Option<TargetInfo> {
        self.target_info.borrow().clone()
    }

    pub fn is_located(&self) -> bool {
        self.target_info.borrow().is_some()
    }

    pub(crate) fn set_target_info(&self, info: TargetInfo) {
        self.target_info.replace(Some(info));
    }

    /// Receiver used when a wrapper is called without one: the node the original was
    /// found on, or `Undefined` while the binding is unlocated.
    pub fn fallback_context(&self) -> JsValue {
        match &*self.target_info.borrow() {
            Some(info) => JsValue::Object(info.context.clone()),
            None => JsValue::Undefined,
        }
    }

    pub fn wrapper(&self) -> Option<JsObjectType> {
        self.wrapper.borrow().clone()
    }

    pub(crate) fn set_wrapper(&self, wrapper: JsObjectType) {
        self.wrapper.replace(Some(wrapper));
    }
}
impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("original", &self.original_name())
            .field("target_info", &*self.target_info.borrow())
            .field("has_handler", &self.handler.borrow().is_some())
            .field("has_wrapper", &self.wrapper.borrow().is_some())
            .finish()
    }
}

/// Per-call capability handed to a handler. It closes over the call's own arguments and
/// receiver, so nested hooked calls never see each other's state.
pub struct Invocation {
    original: JsObjectType,
    args: Vec<JsValue>,
    context: JsValue,
}
impl Invocation {
    pub(crate) fn new(original: JsObjectType, args: Vec<JsValue>, context: JsValue) -> Self {
        Invocation {
            original,
            args,
            context,
        }
    }

    /// The untouched original function.
    pub fn original(&self) -> &JsObjectType {
        &self.original
    }

    pub fn args(&self) -> &[JsValue] {
        &self.args
    }

    /// The effective receiver of the intercepted call.
    pub fn context(&self) -> &JsValue {
        &self.context
    }

    /// Calls the original. Missing arguments default to the call's own, a missing or
    /// `Undefined` receiver to the effective receiver.
    pub fn call(
        &self,
        args: Option<Vec<JsValue>>,
        this: Option<JsValue>,
    ) -> Result<JsValue, JErrorType> {
        let this = resolve_context(this.unwrap_or(JsValue::Undefined), &self.context);
        call(&self.original, this, args.unwrap_or_else(|| self.args.clone()))
    }

    /// Same as [`Invocation::call`] with the receiver first.
    pub fn apply(
        &self,
        this: Option<JsValue>,
        args: Option<Vec<JsValue>>,
    ) -> Result<JsValue, JErrorType> {
        self.call(args, this)
    }

    /// Calls the original exactly as the wrapper was called.
    pub fn run(&self) -> Result<JsValue, JErrorType> {
        call(&self.original, self.context.clone(), self.args.clone())
    }
}

pub(crate) fn resolve_context(context: JsValue, fallback: &JsValue) -> JsValue {
    if context.is_undefined() {
        fallback.clone()
    } else {
        context
    }
}
