//! Abstract operations over object handles.
//!
//! All of these clone what they need out of the `RefCell` before running any accessor or
//! function code, so the code they run may freely borrow (or mutate) the same objects.

use std::rc::Rc;

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::JsObjectType;
use crate::runner::ds::object_property::{PropertyDescriptor, PropertyKey};
use crate::runner::ds::value::JsValue;

/// Own descriptor of `o` for `p` together with the next object in its chain.
fn own_property_and_prototype(
    o: &JsObjectType,
    p: &PropertyKey,
) -> (Option<PropertyDescriptor>, Option<JsObjectType>) {
    let o = (**o).borrow();
    let obj = o.as_js_object();
    (obj.get_own_property(p).cloned(), obj.get_prototype_of())
}

/// Nearest descriptor for `p` along the chain starting at `o` (inclusive).
pub fn find_property(o: &JsObjectType, p: &PropertyKey) -> Option<PropertyDescriptor> {
    let mut current = Some(o.clone());
    while let Some(obj) = current {
        let (desc, proto) = own_property_and_prototype(&obj, p);
        if desc.is_some() {
            return desc;
        }
        current = proto;
    }
    None
}

pub fn get(o: &JsObjectType, p: &PropertyKey) -> Result<JsValue, JErrorType> {
    get_with_receiver(o, p, &JsValue::Object(o.clone()))
}

pub fn get_with_receiver(
    o: &JsObjectType,
    p: &PropertyKey,
    receiver: &JsValue,
) -> Result<JsValue, JErrorType> {
    match find_property(o, p) {
        None => Ok(JsValue::Undefined),
        Some(PropertyDescriptor::Data { value, .. }) => Ok(value),
        Some(PropertyDescriptor::Accessor { get, .. }) => match get {
            None => Ok(JsValue::Undefined),
            Some(getter) => call(&getter, receiver.clone(), Vec::new()),
        },
    }
}

pub fn get_v(v: &JsValue, p: &PropertyKey) -> Result<JsValue, JErrorType> {
    match v {
        JsValue::Object(o) => get_with_receiver(o, p, v),
        _ => Err(JErrorType::TypeError(format!(
            "Cannot read property '{}' of {}",
            p, v
        ))),
    }
}

/// Ordinary `[[Set]]` with `o` as its own receiver. Returns `Ok(false)` when the object
/// refuses the assignment.
pub fn set(o: &JsObjectType, p: PropertyKey, v: JsValue) -> Result<bool, JErrorType> {
    match find_property(o, &p) {
        Some(PropertyDescriptor::Accessor { set, .. }) => match set {
            None => Ok(false),
            Some(setter) => {
                call(&setter, JsValue::Object(o.clone()), vec![v])?;
                Ok(true)
            }
        },
        Some(PropertyDescriptor::Data {
            writable: false, ..
        }) => Ok(false),
        _ => {
            let existing = (**o).borrow().as_js_object().get_own_property(&p).cloned();
            let mut target = (**o).borrow_mut();
            let receiver = target.as_js_object_mut();
            Ok(match existing {
                Some(desc @ PropertyDescriptor::Data { .. }) => {
                    receiver.define_own_property(p, desc.with_value(v))
                }
                Some(PropertyDescriptor::Accessor { .. }) => false,
                None => receiver.define_own_property(p, PropertyDescriptor::data(v)),
            })
        }
    }
}

pub fn define_property_or_throw(
    o: &JsObjectType,
    p: PropertyKey,
    desc: PropertyDescriptor,
) -> Result<(), JErrorType> {
    let message = format!("Cannot redefine property: {}", p);
    if (**o).borrow_mut().as_js_object_mut().define_own_property(p, desc) {
        Ok(())
    } else {
        Err(JErrorType::TypeError(message))
    }
}

pub fn create_data_property_or_throw(
    o: &JsObjectType,
    p: impl Into<PropertyKey>,
    v: impl Into<JsValue>,
) -> Result<(), JErrorType> {
    define_property_or_throw(o, p.into(), PropertyDescriptor::data(v.into()))
}

/// Calls `f` with an explicit receiver. `JsValue::Undefined` means no receiver.
pub fn call(f: &JsObjectType, this: JsValue, args: Vec<JsValue>) -> Result<JsValue, JErrorType> {
    let behaviour = match (**f).borrow().as_function() {
        Some(func) => func.behaviour(),
        None => {
            return Err(JErrorType::TypeError(format!(
                "{} is not a function",
                (**f).borrow().as_js_object().to_string()
            )))
        }
    };
    behaviour(this, args)
}

/// Reads `p` from `v` and calls it with `v` as the receiver.
pub fn invoke(v: &JsValue, p: &PropertyKey, args: Vec<JsValue>) -> Result<JsValue, JErrorType> {
    match get_v(v, p)? {
        JsValue::Object(f) => call(&f, v.clone(), args),
        _ => Err(JErrorType::TypeError(format!("'{}' is not a function", p))),
    }
}

/// Sets the prototype of `o`, refusing links that would close a cycle.
pub fn set_prototype_of(o: &JsObjectType, prototype: Option<JsObjectType>) -> bool {
    if let Some(p) = &prototype {
        if Rc::ptr_eq(p, o) {
            return false;
        }
        let chain = (**p).borrow().as_js_object().prototype_chain();
        if chain.iter().any(|c| Rc::ptr_eq(c, o)) {
            return false;
        }
    }
    (**o).borrow_mut().as_js_object_mut().set_prototype_of(prototype)
}
