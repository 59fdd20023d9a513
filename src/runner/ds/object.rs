use crate::runner::ds::array_object::ArrayObject;
use crate::runner::ds::function_object::FunctionObject;
use crate::runner::ds::object_property::{PropertyDescriptor, PropertyKey};
use crate::runner::ds::operations::test_and_comparison::{same_object_option, same_value};
use crate::runner::ds::symbol::SYMBOL_TO_STRING_TAG;
use crate::runner::ds::value::JsValue;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub type JsObjectType = Rc<RefCell<ObjectType>>;

/// Identity of an object, usable as a hash key for as long as the object is alive.
pub fn object_id(o: &JsObjectType) -> usize {
    Rc::as_ptr(o) as *const () as usize
}

#[derive(Clone)]
pub enum ObjectType {
    Ordinary(OrdinaryObject),
    Function(FunctionObject),
    Array(ArrayObject),
}
impl std::fmt::Debug for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectType::Ordinary(_) => write!(f, "ObjectType::Ordinary"),
            ObjectType::Function(_) => write!(f, "ObjectType::Function"),
            ObjectType::Array(_) => write!(f, "ObjectType::Array"),
        }
    }
}

impl ObjectType {
    pub fn is_callable(&self) -> bool {
        match self {
            ObjectType::Function(_) => true,
            _ => false,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionObject> {
        match self {
            ObjectType::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_js_object(&self) -> &dyn JsObject {
        match self {
            ObjectType::Ordinary(o) => o,
            ObjectType::Function(o) => o,
            ObjectType::Array(o) => o,
        }
    }

    pub fn as_js_object_mut(&mut self) -> &mut dyn JsObject {
        match self {
            ObjectType::Ordinary(o) => o,
            ObjectType::Function(o) => o,
            ObjectType::Array(o) => o,
        }
    }
}

#[derive(Clone)]
pub struct ObjectBase {
    properties: HashMap<PropertyKey, PropertyDescriptor>,
    insertion_order: Vec<PropertyKey>,
    is_extensible: bool,
    prototype: Option<JsObjectType>,
}
impl ObjectBase {
    pub fn new(prototype: Option<JsObjectType>) -> Self {
        ObjectBase {
            properties: HashMap::new(),
            insertion_order: Vec::new(),
            is_extensible: true,
            prototype,
        }
    }

    /// Inserts or replaces a property without any validation. A replaced key keeps its
    /// position in the key order.
    pub(crate) fn insert_property(&mut self, key: PropertyKey, descriptor: PropertyDescriptor) {
        if !self.properties.contains_key(&key) {
            self.insertion_order.push(key.clone());
        }
        self.properties.insert(key, descriptor);
    }

    pub(crate) fn remove_property(&mut self, key: &PropertyKey) -> Option<PropertyDescriptor> {
        let removed = self.properties.remove(key);
        if removed.is_some() {
            self.insertion_order.retain(|k| k != key);
        }
        removed
    }
}

pub trait JsObject {
    fn get_object_base_mut(&mut self) -> &mut ObjectBase;

    fn get_object_base(&self) -> &ObjectBase;

    fn get_prototype_of(&self) -> Option<JsObjectType> {
        self.get_object_base().prototype.clone()
    }

    /// Replaces the prototype link. Cycle detection needs the object's own handle and
    /// lives in [`crate::runner::ds::operations::object::set_prototype_of`].
    fn set_prototype_of(&mut self, prototype: Option<JsObjectType>) -> bool {
        if same_object_option(&self.get_object_base().prototype, &prototype) {
            return true;
        }
        if !self.is_extensible() {
            return false;
        }
        self.get_object_base_mut().prototype = prototype;
        true
    }

    /// The delegation chain above this object, nearest first.
    fn prototype_chain(&self) -> Vec<JsObjectType> {
        let mut chain: Vec<JsObjectType> = vec![];
        let mut next = self.get_prototype_of();
        while let Some(p) = next {
            if chain.iter().any(|seen| Rc::ptr_eq(seen, &p)) {
                break;
            }
            next = (*p).borrow().as_js_object().get_prototype_of();
            chain.push(p);
        }
        chain
    }

    fn is_extensible(&self) -> bool {
        self.get_object_base().is_extensible
    }

    fn prevent_extensions(&mut self) -> bool {
        self.get_object_base_mut().is_extensible = false;
        true
    }

    fn get_own_property(&self, property: &PropertyKey) -> Option<&PropertyDescriptor> {
        self.get_object_base().properties.get(property)
    }

    fn has_own_property(&self, property: &PropertyKey) -> bool {
        self.get_object_base().properties.contains_key(property)
    }

    fn define_own_property(
        &mut self,
        property: PropertyKey,
        descriptor: PropertyDescriptor,
    ) -> bool {
        ordinary_define_own_property(self, property, descriptor)
    }

    fn has_property(&self, property: &PropertyKey) -> bool {
        if self.has_own_property(property) {
            true
        } else {
            self.prototype_chain()
                .iter()
                .any(|p| (**p).borrow().as_js_object().has_own_property(property))
        }
    }

    fn delete(&mut self, property: &PropertyKey) -> bool {
        match self.get_own_property(property) {
            None => true,
            Some(pd) => {
                if pd.is_configurable() {
                    self.get_object_base_mut().remove_property(property);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Integer keys ascending, then string keys and finally symbol keys, each in
    /// insertion order.
    fn own_property_keys(&self) -> Vec<PropertyKey> {
        let mut int_keys = vec![];
        let mut str_keys = vec![];
        let mut sym_keys = vec![];
        for key in &self.get_object_base().insertion_order {
            match key {
                PropertyKey::Int(d) => int_keys.push(*d),
                PropertyKey::Str(_) => str_keys.push(key.clone()),
                PropertyKey::Sym(_) => sym_keys.push(key.clone()),
            }
        }
        int_keys.sort_unstable();

        let mut result: Vec<PropertyKey> = int_keys.into_iter().map(PropertyKey::Int).collect();
        result.append(&mut str_keys);
        result.append(&mut sym_keys);
        result
    }

    fn to_string(&self) -> String {
        let tag_key = PropertyKey::Sym(SYMBOL_TO_STRING_TAG.clone());
        match self.get_own_property(&tag_key).and_then(|d| d.value()) {
            Some(JsValue::String(tag)) => format!("[object {}]", tag),
            _ => "[object Object]".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct OrdinaryObject {
    object_base: ObjectBase,
}
impl OrdinaryObject {
    pub fn new(prototype: Option<JsObjectType>) -> Self {
        OrdinaryObject {
            object_base: ObjectBase::new(prototype),
        }
    }
}
impl JsObject for OrdinaryObject {
    fn get_object_base_mut(&mut self) -> &mut ObjectBase {
        &mut self.object_base
    }

    fn get_object_base(&self) -> &ObjectBase {
        &self.object_base
    }
}

pub fn ordinary_define_own_property<J: JsObject + ?Sized>(
    o: &mut J,
    property: PropertyKey,
    descriptor: PropertyDescriptor,
) -> bool {
    let allowed = match o.get_own_property(&property) {
        None => o.is_extensible(),
        Some(current) => is_compatible_redefinition(current, &descriptor),
    };
    if allowed {
        o.get_object_base_mut()
            .insert_property(property, descriptor);
    }
    allowed
}

fn is_compatible_redefinition(current: &PropertyDescriptor, descriptor: &PropertyDescriptor) -> bool {
    if current.is_configurable() {
        return true;
    }
    if descriptor.is_configurable() || current.is_enumerable() != descriptor.is_enumerable() {
        return false;
    }
    match (current, descriptor) {
        (
            PropertyDescriptor::Data {
                value: current_value,
                writable: current_writable,
                ..
            },
            PropertyDescriptor::Data {
                value: desc_value,
                writable: desc_writable,
                ..
            },
        ) => *current_writable || (!*desc_writable && same_value(current_value, desc_value)),
        (
            PropertyDescriptor::Accessor {
                get: current_get,
                set: current_set,
                ..
            },
            PropertyDescriptor::Accessor {
                get: desc_get,
                set: desc_set,
                ..
            },
        ) => same_object_option(current_get, desc_get) && same_object_option(current_set, desc_set),
        // A non-configurable property never changes kind.
        _ => false,
    }
}
