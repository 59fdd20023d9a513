//! Copy-on-write cloning of graph nodes.
//!
//! A clone is one level deep: it gets its own property table (same descriptors, same
//! prototype) while every nested value is still shared with the source. Substitutions are
//! then written into the clone, leaving the source untouched.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::runner::ds::object::{object_id, JsObjectType};
use crate::runner::ds::object_property::PropertyKey;
use crate::runner::ds::operations::object::get;
use crate::runner::ds::property_path::PropertyPath;
use crate::runner::ds::value::JsValue;
use crate::runner::hook::error::{HookError, Result};
use crate::runner::hook::writer::write_value;

/// New object with the same prototype and own descriptors as `source`. Arrays keep their
/// elements, functions keep their behaviour.
pub fn shallow_clone(source: &JsObjectType) -> JsObjectType {
    let copy = (**source).borrow().clone();
    Rc::new(RefCell::new(copy))
}

/// Objects are shallow-cloned, primitives are returned as they are.
pub fn clone_value(value: &JsValue) -> JsValue {
    match value {
        JsValue::Object(o) => JsValue::Object(shallow_clone(o)),
        other => other.clone(),
    }
}

/// Clone of `source` with `replacement` written at `key`, shaped after `source`'s own
/// descriptor.
pub fn substitute_one(
    source: &JsObjectType,
    key: PropertyKey,
    replacement: JsValue,
) -> Result<JsObjectType> {
    substitute_all(source, vec![(key, replacement)])
}

/// Like [`substitute_one`] for several keys of the same node, applied in order onto a
/// single clone.
pub fn substitute_all(
    source: &JsObjectType,
    substitutions: Vec<(PropertyKey, JsValue)>,
) -> Result<JsObjectType> {
    let clone = shallow_clone(source);
    for (key, replacement) in substitutions {
        write_value(&clone, key, replacement, source)?;
    }
    Ok(clone)
}

/// Builds a new root where each `(path, replacement)` holds its replacement and only the
/// nodes along those paths are copied.
///
/// A node lying on several paths is cloned once and shared by all of them. Nodes are read
/// from the live graph, so a path whose intermediate step no longer yields an object fails
/// the whole operation with `LocationStale`. Terminal substitutions are written after all
/// intermediate links, so a replacement always wins over a cloned node at the same key.
pub fn clone_hierarchy(
    root: &JsObjectType,
    substitutions: &[(PropertyPath, JsValue)],
) -> Result<JsObjectType> {
    let mut clones: HashMap<usize, (JsObjectType, JsObjectType)> = HashMap::new();
    let root_clone = clone_cached(&mut clones, root);
    let mut terminals: Vec<(JsObjectType, JsObjectType, PropertyKey, JsValue)> = vec![];

    for (path, replacement) in substitutions {
        let last = match path.last() {
            Some(key) => key.clone(),
            None => {
                return Err(HookError::LocationStale {
                    path: path.to_string(),
                })
            }
        };

        let mut node = root.clone();
        let mut node_clone = root_clone.clone();
        for key in &path.keys()[..path.len() - 1] {
            let child = match get(&node, key) {
                Ok(JsValue::Object(child)) => child,
                _ => {
                    return Err(HookError::LocationStale {
                        path: path.to_string(),
                    })
                }
            };
            let child_clone = clone_cached(&mut clones, &child);
            write_value(
                &node_clone,
                key.clone(),
                JsValue::Object(child_clone.clone()),
                &node,
            )?;
            node = child;
            node_clone = child_clone;
        }
        terminals.push((node_clone, node, last, replacement.clone()));
    }

    for (target, reference, key, replacement) in terminals {
        write_value(&target, key, replacement, &reference)?;
    }
    Ok(root_clone)
}

/// Cached clone of `node`. The source is kept next to its clone so a node produced by a
/// getter stays alive and its id is never handed to another node.
fn clone_cached(
    clones: &mut HashMap<usize, (JsObjectType, JsObjectType)>,
    node: &JsObjectType,
) -> JsObjectType {
    clones
        .entry(object_id(node))
        .or_insert_with(|| (node.clone(), shallow_clone(node)))
        .1
        .clone()
}
