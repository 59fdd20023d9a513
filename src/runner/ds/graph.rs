//! The shared root graph handle.
//!
//! Hosts hand the engine an [`ObjectGraph`] instead of exposing the root through an
//! ambient global. The root may be installed after the graph handle has been shared;
//! until then every lookup simply finds nothing.

use std::cell::RefCell;
use std::rc::Rc;

use crate::runner::ds::object::JsObjectType;
use crate::runner::ds::operations::object::get;
use crate::runner::ds::property_path::PropertyPath;
use crate::runner::ds::realm::JsCodeRealmType;
use crate::runner::ds::value::JsValue;

pub type JsGraphType = Rc<ObjectGraph>;

pub struct ObjectGraph {
    realm: JsCodeRealmType,
    root: RefCell<Option<JsObjectType>>,
}
impl ObjectGraph {
    pub fn new(realm: JsCodeRealmType) -> Self {
        ObjectGraph {
            realm,
            root: RefCell::new(None),
        }
    }

    pub fn with_root(realm: JsCodeRealmType, root: JsObjectType) -> Self {
        ObjectGraph {
            realm,
            root: RefCell::new(Some(root)),
        }
    }

    pub fn realm(&self) -> &JsCodeRealmType {
        &self.realm
    }

    pub fn root(&self) -> Option<JsObjectType> {
        self.root.borrow().clone()
    }

    /// Installs a new root and returns the previous one.
    pub fn set_root(&self, root: JsObjectType) -> Option<JsObjectType> {
        self.root.replace(Some(root))
    }

    pub fn is_root(&self, o: &JsObjectType) -> bool {
        match &*self.root.borrow() {
            Some(root) => Rc::ptr_eq(root, o),
            None => false,
        }
    }

    /// Value currently stored at `path`. `None` when there is no root, a step is not an
    /// object, or a read fails.
    pub fn resolve_path(&self, path: &PropertyPath) -> Option<JsValue> {
        let mut current = JsValue::Object(self.root()?);
        for key in path.keys() {
            current = match &current {
                JsValue::Object(o) => get(o, key).ok()?,
                _ => return None,
            };
        }
        Some(current)
    }
}
