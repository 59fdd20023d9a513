use std::rc::Rc;

use crate::runner::ds::graph::JsGraphType;
use crate::runner::ds::object::JsObjectType;
use crate::runner::ds::property_path::PropertyPath;
use crate::runner::ds::value::JsValue;
use crate::runner::hook::cloner::{clone_hierarchy, substitute_all, substitute_one};
use crate::runner::hook::config::HookConfig;
use crate::runner::hook::error::{HookError, Result};
use crate::runner::hook::registry::HookRegistry;
use crate::runner::hook::types::{Binding, HookHandler, TargetInfo};
use crate::runner::hook::writer::write_value;

/// Entry point for intercepting functions of one object graph.
pub struct HookEngine {
    registry: HookRegistry,
}

impl HookEngine {
    pub fn new(graph: JsGraphType) -> Self {
        Self::with_config(graph, HookConfig::default())
    }

    pub fn with_config(graph: JsGraphType, config: HookConfig) -> Self {
        HookEngine {
            registry: HookRegistry::new(graph, config),
        }
    }

    pub fn graph(&self) -> &JsGraphType {
        self.registry.graph()
    }

    pub fn config(&self) -> &HookConfig {
        self.registry.config()
    }

    /// Routes calls of `target` through `handler` and returns the wrapper. Hooking the same
    /// function again (or its wrapper) swaps the handler and returns the same wrapper.
    pub fn create_hook(&self, target: impl Into<JsValue>, handler: HookHandler) -> Result<JsObjectType> {
        let binding = self.registry.register(&target.into(), handler)?;
        Ok(self.registry.wrapper_for(&binding))
    }

    /// The wrapper for `target`, creating a forwarding hook if there is none yet.
    pub fn get_hook(&self, target: impl Into<JsValue>) -> Result<JsObjectType> {
        let binding = self.binding(target)?;
        Ok(self.registry.wrapper_for(&binding))
    }

    pub fn binding(&self, target: impl Into<JsValue>) -> Result<Rc<Binding>> {
        self.registry.resolve_or_create(&target.into())
    }

    /// Hooks the function currently stored at `path`, written as in
    /// [`PropertyPath`]'s display form. The binding's own location is still the first one
    /// the graph search finds, which may be a shorter path to the same function.
    pub fn hook_at(&self, path: &str, handler: HookHandler) -> Result<JsObjectType> {
        if self.graph().root().is_none() {
            return Err(HookError::MissingRoot);
        }
        let parsed = path
            .parse::<PropertyPath>()
            .map_err(|e| HookError::InvalidPath {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        match self.graph().resolve_path(&parsed) {
            None | Some(JsValue::Undefined) => Err(HookError::LocationNotFound(path.to_string())),
            Some(value) => self.create_hook(value, handler),
        }
    }

    /// Installs the wrapper at the original's location, in place. Every reader of that
    /// property sees the wrapper from now on.
    pub fn override_target(&self, target: impl Into<JsValue>) -> Result<JsObjectType> {
        let binding = self.binding(target)?;
        let info = self.registry.located_info(&binding)?;
        let wrapper = self.registry.wrapper_for(&binding);
        write_value(
            &info.owner,
            info.key.clone(),
            JsValue::Object(wrapper.clone()),
            &info.owner,
        )?;
        tracing::debug!(
            function = %binding.original_name(),
            path = %info.path,
            "Installed hook in place"
        );
        Ok(wrapper)
    }

    /// Copy of the node the target was found on, holding the wrapper instead.
    pub fn clone_obj(&self, target: impl Into<JsValue>) -> Result<JsObjectType> {
        let binding = self.binding(target)?;
        let info = self.registry.located_info(&binding)?;
        let wrapper = self.registry.wrapper_for(&binding);
        let clone = substitute_one(&info.context, info.key.clone(), JsValue::Object(wrapper))?;
        tracing::debug!(path = %info.path, "Cloned hooked node");
        Ok(clone)
    }

    /// Copy of `scope` with every applicable hook substituted.
    ///
    /// For the root this is a hierarchy clone over all located hooks. Any other node gets
    /// the hooks that were found on it, each at its own key; two hooks claiming the same
    /// key are a conflict. A node without hooks is cloned as it is.
    pub fn get_obj(&self, scope: &JsObjectType) -> Result<JsObjectType> {
        let matches = self.registry.bindings_for_scope(scope);
        if self.graph().is_root(scope) {
            return self.clone_root(scope, &matches);
        }

        for (i, (_, info)) in matches.iter().enumerate() {
            let clash = matches[i + 1..].iter().find(|(_, other)| {
                !Rc::ptr_eq(&other.context, &info.context) || other.key == info.key
            });
            if let Some((_, other)) = clash {
                return Err(HookError::ScopeConflict {
                    first: info.path.to_string(),
                    second: other.path.to_string(),
                });
            }
        }

        let substitutions = matches
            .iter()
            .map(|(binding, info)| {
                (
                    info.key.clone(),
                    JsValue::Object(self.registry.wrapper_for(binding)),
                )
            })
            .collect();
        let clone = substitute_all(scope, substitutions)?;
        tracing::debug!(hooks = matches.len(), "Cloned scope with hooks applied");
        Ok(clone)
    }

    /// New root with every located hook substituted.
    pub fn new_root(&self) -> Result<JsObjectType> {
        let root = self.graph().root().ok_or(HookError::MissingRoot)?;
        let located = self.registry.located_bindings();
        self.clone_root(&root, &located)
    }

    /// New root with only `target`'s hook substituted. A hook without a location cannot
    /// be placed in the hierarchy and fails with `LocationStale`.
    pub fn new_root_with(&self, target: impl Into<JsValue>) -> Result<JsObjectType> {
        let root = self.graph().root().ok_or(HookError::MissingRoot)?;
        let binding = self.binding(target)?;
        let info = match self.registry.located_info(&binding) {
            Err(HookError::LocationNotFound(name)) => {
                return Err(HookError::LocationStale { path: name })
            }
            located => located?,
        };
        self.clone_root(&root, &[(binding, info)])
    }

    /// Every binding in creation order.
    pub fn bindings(&self) -> Vec<Rc<Binding>> {
        self.registry.bindings()
    }

    fn clone_root(
        &self,
        root: &JsObjectType,
        located: &[(Rc<Binding>, TargetInfo)],
    ) -> Result<JsObjectType> {
        let substitutions: Vec<(PropertyPath, JsValue)> = located
            .iter()
            .map(|(binding, info)| {
                (
                    info.path.clone(),
                    JsValue::Object(self.registry.wrapper_for(binding)),
                )
            })
            .collect();
        let clone = clone_hierarchy(root, &substitutions)?;
        tracing::debug!(hooks = substitutions.len(), "Cloned root hierarchy");
        Ok(clone)
    }
}
