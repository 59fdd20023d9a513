//! Registry of hook bindings.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::runner::ds::graph::JsGraphType;
use crate::runner::ds::object::{object_id, JsObjectType};
use crate::runner::ds::operations::type_conversion::get_type;
use crate::runner::ds::value::JsValue;
use crate::runner::hook::config::HookConfig;
use crate::runner::hook::dispatcher::materialize_wrapper;
use crate::runner::hook::error::{HookError, Result};
use crate::runner::hook::locator::GraphLocator;
use crate::runner::hook::types::{Binding, HookHandler, TargetInfo};

#[derive(Default)]
struct BindingTables {
    by_original: HashMap<usize, Rc<Binding>>,
    by_wrapper: HashMap<usize, Rc<Binding>>,
    /// Creation order.
    bindings: Vec<Rc<Binding>>,
}

/// Tracks one [`Binding`] per intercepted function, reachable from either the original
/// or its wrapper.
///
/// The tables are only borrowed for lookups and inserts. Location searches read the graph
/// and may run accessor code, which in turn may call hooked functions, so no borrow is
/// held while one runs.
pub struct HookRegistry {
    graph: JsGraphType,
    config: HookConfig,
    tables: RefCell<BindingTables>,
}

impl HookRegistry {
    pub fn new(graph: JsGraphType, config: HookConfig) -> Self {
        Self {
            graph,
            config,
            tables: RefCell::new(BindingTables::default()),
        }
    }

    pub fn graph(&self) -> &JsGraphType {
        &self.graph
    }

    pub fn config(&self) -> &HookConfig {
        &self.config
    }

    /// Binding for `f`, whether `f` is an original or a wrapper issued for one.
    pub fn lookup(&self, f: &JsObjectType) -> Option<Rc<Binding>> {
        let id = object_id(f);
        let tables = self.tables.borrow();
        tables
            .by_wrapper
            .get(&id)
            .or_else(|| tables.by_original.get(&id))
            .cloned()
    }

    /// Installs `handler` on the binding for `target`, creating the binding if needed.
    /// An existing binding keeps its location.
    pub fn register(&self, target: &JsValue, handler: HookHandler) -> Result<Rc<Binding>> {
        let binding = self.resolve_or_create(target)?;
        binding.set_handler(Some(handler));
        Ok(binding)
    }

    /// The binding for `target`, created (and located) on first request. Wrappers resolve
    /// to the binding they were issued for.
    pub fn resolve_or_create(&self, target: &JsValue) -> Result<Rc<Binding>> {
        let f = match target {
            JsValue::Object(o) if (**o).borrow().is_callable() => o,
            _ => return Err(HookError::InvalidTarget(get_type(target).to_string())),
        };
        if let Some(binding) = self.lookup(f) {
            return Ok(binding);
        }

        let target_info = self.locate(f);
        let binding = Rc::new(Binding::new(f.clone(), None, target_info));
        match binding.target_info() {
            Some(info) => tracing::debug!(
                function = %binding.original_name(),
                path = %info.path,
                inherited = info.is_inherited(),
                "Created hook binding"
            ),
            None => tracing::debug!(
                function = %binding.original_name(),
                "Created hook binding without a location"
            ),
        }

        let mut tables = self.tables.borrow_mut();
        tables.by_original.insert(object_id(f), binding.clone());
        tables.bindings.push(binding.clone());
        Ok(binding)
    }

    /// Whether `binding` has a location, searching again first if it has none and retries
    /// are enabled.
    pub fn ensure_located(&self, binding: &Binding) -> bool {
        if binding.is_located() {
            return true;
        }
        if !self.config.retry_failed_location {
            return false;
        }
        match self.locate(binding.original()) {
            Some(info) => {
                tracing::debug!(
                    function = %binding.original_name(),
                    path = %info.path,
                    "Located hook binding on retry"
                );
                binding.set_target_info(info);
                true
            }
            None => false,
        }
    }

    /// Location of `binding`, or `LocationNotFound`.
    pub fn located_info(&self, binding: &Binding) -> Result<TargetInfo> {
        self.ensure_located(binding);
        binding
            .target_info()
            .ok_or_else(|| HookError::LocationNotFound(binding.original_name()))
    }

    /// The binding's wrapper, materialized on first request and stable afterwards.
    pub fn wrapper_for(&self, binding: &Rc<Binding>) -> JsObjectType {
        if let Some(wrapper) = binding.wrapper() {
            return wrapper;
        }
        let wrapper = materialize_wrapper(binding, &self.config, self.graph.realm());
        binding.set_wrapper(wrapper.clone());
        self.tables
            .borrow_mut()
            .by_wrapper
            .insert(object_id(&wrapper), binding.clone());
        wrapper
    }

    /// Every binding in creation order.
    pub fn bindings(&self) -> Vec<Rc<Binding>> {
        self.tables.borrow().bindings.clone()
    }

    /// Every binding that has (or now finds) a location, in creation order.
    pub fn located_bindings(&self) -> Vec<(Rc<Binding>, TargetInfo)> {
        self.bindings()
            .into_iter()
            .filter_map(|binding| {
                self.ensure_located(&binding);
                binding.target_info().map(|info| (binding, info))
            })
            .collect()
    }

    /// Bindings relevant to cloning `scope`: all located ones for the root, otherwise
    /// those whose context is `scope`.
    pub fn bindings_for_scope(&self, scope: &JsObjectType) -> Vec<(Rc<Binding>, TargetInfo)> {
        let located = self.located_bindings();
        if self.graph.is_root(scope) {
            return located;
        }
        located
            .into_iter()
            .filter(|(_, info)| Rc::ptr_eq(&info.context, scope))
            .collect()
    }

    fn locate(&self, f: &JsObjectType) -> Option<TargetInfo> {
        GraphLocator::new(&self.graph)
            .with_max_nodes(self.config.max_search_nodes)
            .locate(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ds::graph::ObjectGraph;
    use crate::runner::ds::operations::object::create_data_property_or_throw;
    use crate::runner::ds::realm::CodeRealm;
    use crate::runner::hook::types::forward_handler;

    fn setup() -> (HookRegistry, JsObjectType, JsObjectType) {
        let realm = Rc::new(CodeRealm::new());
        let root = realm.new_object();
        let tools = realm.new_object();
        let f = realm.new_function("f", |_, _| Ok(JsValue::Null));
        create_data_property_or_throw(&tools, "f", f.clone()).unwrap();
        create_data_property_or_throw(&root, "tools", tools.clone()).unwrap();
        let graph = Rc::new(ObjectGraph::with_root(realm, root));
        (HookRegistry::new(graph, HookConfig::default()), tools, f)
    }

    #[test]
    fn test_non_function_is_invalid_target() {
        let (registry, tools, _) = setup();
        assert_eq!(
            registry.resolve_or_create(&JsValue::Object(tools)).unwrap_err(),
            HookError::InvalidTarget("object".to_string())
        );
        assert_eq!(
            registry.resolve_or_create(&JsValue::from(3)).unwrap_err(),
            HookError::InvalidTarget("number".to_string())
        );
        assert!(registry.bindings().is_empty());
    }

    #[test]
    fn test_wrapper_resolves_to_same_binding() {
        let (registry, tools, f) = setup();
        let binding = registry.resolve_or_create(&JsValue::Object(f.clone())).unwrap();
        let info = binding.target_info().unwrap();
        assert!(Rc::ptr_eq(&info.context, &tools));
        assert_eq!(info.path.to_string(), "tools.f");

        let wrapper = registry.wrapper_for(&binding);
        assert!(Rc::ptr_eq(&registry.wrapper_for(&binding), &wrapper));
        let again = registry.resolve_or_create(&JsValue::Object(wrapper)).unwrap();
        assert!(Rc::ptr_eq(&again, &binding));
        assert_eq!(registry.bindings().len(), 1);
    }

    #[test]
    fn test_register_replaces_only_handler() {
        let (registry, _, f) = setup();
        let first = registry
            .register(&JsValue::Object(f.clone()), forward_handler())
            .unwrap();
        let second = registry
            .register(&JsValue::Object(f), forward_handler())
            .unwrap();
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(registry.bindings().len(), 1);
    }

    #[test]
    fn test_failed_location_is_retried() {
        let realm = Rc::new(CodeRealm::new());
        let graph = Rc::new(ObjectGraph::new(realm.clone()));
        let registry = HookRegistry::new(graph.clone(), HookConfig::default());
        let f = realm.new_function("late", |_, _| Ok(JsValue::Null));

        let binding = registry.resolve_or_create(&JsValue::Object(f.clone())).unwrap();
        assert!(!binding.is_located());
        assert!(matches!(
            registry.located_info(&binding),
            Err(HookError::LocationNotFound(_))
        ));

        let root = realm.new_object();
        create_data_property_or_throw(&root, "late", f).unwrap();
        graph.set_root(root);
        assert!(registry.ensure_located(&binding));
        assert_eq!(binding.target_info().unwrap().path.to_string(), "late");
    }

    #[test]
    fn test_retry_can_be_disabled() {
        let realm = Rc::new(CodeRealm::new());
        let graph = Rc::new(ObjectGraph::new(realm.clone()));
        let config = HookConfig::default().with_retry_failed_location(false);
        let registry = HookRegistry::new(graph.clone(), config);
        let f = realm.new_function("late", |_, _| Ok(JsValue::Null));
        let binding = registry.resolve_or_create(&JsValue::Object(f.clone())).unwrap();

        let root = realm.new_object();
        create_data_property_or_throw(&root, "late", f).unwrap();
        graph.set_root(root);
        assert!(!registry.ensure_located(&binding));
        assert!(registry.located_bindings().is_empty());
    }

    #[test]
    fn test_scope_selection() {
        let (registry, tools, f) = setup();
        registry.resolve_or_create(&JsValue::Object(f)).unwrap();
        let root = registry.graph().root().unwrap();
        let unrelated = registry.graph().realm().new_object();

        assert_eq!(registry.bindings_for_scope(&root).len(), 1);
        assert_eq!(registry.bindings_for_scope(&tools).len(), 1);
        assert!(registry.bindings_for_scope(&unrelated).is_empty());
    }
}
