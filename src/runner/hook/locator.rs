//! Finding where a function lives in the object graph.
//!
//! The search is breadth-first from the root, so the shallowest location wins; among
//! locations at the same depth, the one reached first in key order wins. Keys of a node
//! are its own keys followed by those of its delegation chain, up to (not including) the
//! realm's chain roots. Values are compared by identity only.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

use crate::runner::ds::graph::ObjectGraph;
use crate::runner::ds::object::{object_id, JsObjectType};
use crate::runner::ds::object_property::PropertyKey;
use crate::runner::ds::operations::object::get;
use crate::runner::ds::property_path::PropertyPath;
use crate::runner::ds::value::JsValue;
use crate::runner::hook::types::TargetInfo;

pub struct GraphLocator<'a> {
    graph: &'a ObjectGraph,
    max_nodes: Option<usize>,
}

impl<'a> GraphLocator<'a> {
    pub fn new(graph: &'a ObjectGraph) -> Self {
        GraphLocator {
            graph,
            max_nodes: None,
        }
    }

    pub fn with_max_nodes(mut self, max_nodes: Option<usize>) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// First location of `target` reachable from the root, or `None`. A graph without a
    /// root locates nothing.
    pub fn locate(&self, target: &JsObjectType) -> Option<TargetInfo> {
        let root = self.graph.root()?;
        // Visited nodes stay alive until the search ends so their ids cannot be reused by
        // objects a getter creates later on.
        let mut visited: HashMap<usize, JsObjectType> = HashMap::new();
        let mut queue: VecDeque<(JsObjectType, PropertyPath)> = VecDeque::new();
        queue.push_back((root, PropertyPath::new()));

        while let Some((node, path)) = queue.pop_front() {
            match visited.entry(object_id(&node)) {
                Entry::Occupied(_) => continue,
                Entry::Vacant(slot) => {
                    slot.insert(node.clone());
                }
            }
            if let Some(max) = self.max_nodes {
                if visited.len() > max {
                    tracing::warn!(
                        max_nodes = max,
                        "Location search stopped at the node limit"
                    );
                    return None;
                }
            }

            for key in self.collect_keys(&node) {
                let value = match get(&node, &key) {
                    Ok(value) => value,
                    // A throwing accessor hides the property from the search.
                    Err(_) => continue,
                };
                if let JsValue::Object(child) = value {
                    if Rc::ptr_eq(&child, target) {
                        let owner = self
                            .find_owner(&node, &key)
                            .unwrap_or_else(|| node.clone());
                        let info = TargetInfo {
                            owner,
                            context: node.clone(),
                            path: path.child(key.clone()),
                            key,
                        };
                        tracing::trace!(
                            path = %info.path,
                            visited = visited.len(),
                            "Located target"
                        );
                        return Some(info);
                    }
                    if !visited.contains_key(&object_id(&child)) {
                        queue.push_back((child, path.child(key)));
                    }
                }
            }
        }

        tracing::trace!(visited = visited.len(), "Target not reachable from root");
        None
    }

    /// Own keys, then keys of each delegation target, de-duplicated in first-seen order.
    pub fn collect_keys(&self, node: &JsObjectType) -> Vec<PropertyKey> {
        let mut keys: Vec<PropertyKey> = vec![];
        let mut seen: HashSet<PropertyKey> = HashSet::new();
        for current in self.delegation_chain(node) {
            for key in (*current).borrow().as_js_object().own_property_keys() {
                if seen.insert(key.clone()) {
                    keys.push(key);
                }
            }
        }
        keys
    }

    /// Nearest object in `node`'s chain (inclusive) that declares `key` itself.
    pub fn find_owner(&self, node: &JsObjectType, key: &PropertyKey) -> Option<JsObjectType> {
        self.delegation_chain(node)
            .into_iter()
            .find(|current| (**current).borrow().as_js_object().has_own_property(key))
    }

    /// `node` followed by its prototypes, cut at the first built-in chain root.
    fn delegation_chain(&self, node: &JsObjectType) -> Vec<JsObjectType> {
        let realm = self.graph.realm();
        let mut chain = vec![node.clone()];
        chain.extend((**node).borrow().as_js_object().prototype_chain());
        chain
            .into_iter()
            .take_while(|o| !realm.is_chain_root(o))
            .collect()
    }
}
