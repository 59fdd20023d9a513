use std::rc::Rc;

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::JsObjectType;
use crate::runner::ds::realm::CodeRealm;
use crate::runner::ds::value::JsValue;
use crate::runner::hook::config::HookConfig;
use crate::runner::hook::types::{resolve_context, Binding, Invocation};

/// Builds the wrapper function for `binding`. Every call is routed through [`dispatch`].
///
/// The wrapper holds its binding strongly, so a wrapper installed in a graph keeps working
/// after the engine that created it is gone.
pub fn materialize_wrapper(
    binding: &Rc<Binding>,
    config: &HookConfig,
    realm: &CodeRealm,
) -> JsObjectType {
    let name = config.wrapper_name(&binding.original_name());
    let binding = binding.clone();
    realm.new_function(&name, move |this, args| dispatch(&binding, this, args))
}

/// One intercepted call: settle the receiver, hand the handler a fresh [`Invocation`] and
/// return whatever it returns.
pub fn dispatch(binding: &Binding, this: JsValue, args: Vec<JsValue>) -> Result<JsValue, JErrorType> {
    let context = resolve_context(this, &binding.fallback_context());
    let invocation = Invocation::new(binding.original().clone(), args.clone(), context.clone());
    let handler = binding.handler();
    tracing::trace!(
        function = %binding.original_name(),
        argc = args.len(),
        "Dispatching hooked call"
    );
    handler(&invocation, args, context)
}
