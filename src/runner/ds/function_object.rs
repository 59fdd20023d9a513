use std::rc::Rc;

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::{JsObject, JsObjectType, ObjectBase};
use crate::runner::ds::object_property::{PropertyDescriptor, PropertyKey};
use crate::runner::ds::value::JsValue;

lazy_static! {
    pub static ref FUNCTION_NAME_PROP: PropertyKey = PropertyKey::Str("name".to_string());
}

/// Host implementation of a function: receives the receiver (`Undefined` when the caller
/// supplied none) and the argument list.
pub type NativeFunction = Rc<dyn Fn(JsValue, Vec<JsValue>) -> Result<JsValue, JErrorType>>;

/// A callable object. Cloning one yields a distinct object sharing the same behaviour.
#[derive(Clone)]
pub struct FunctionObject {
    behaviour: NativeFunction,
    object_base: ObjectBase,
}
impl FunctionObject {
    pub fn new(name: &str, behaviour: NativeFunction, prototype: Option<JsObjectType>) -> Self {
        let mut object_base = ObjectBase::new(prototype);
        object_base.insert_property(
            FUNCTION_NAME_PROP.clone(),
            PropertyDescriptor::Data {
                value: JsValue::String(name.to_string()),
                writable: false,
                enumerable: false,
                configurable: true,
            },
        );
        FunctionObject {
            behaviour,
            object_base,
        }
    }

    pub fn behaviour(&self) -> NativeFunction {
        self.behaviour.clone()
    }

    /// The own `name` property, or an empty string when it is missing or not a string.
    pub fn name(&self) -> String {
        match self.get_own_property(&FUNCTION_NAME_PROP).and_then(|d| d.value()) {
            Some(JsValue::String(s)) => s.to_string(),
            _ => String::new(),
        }
    }
}
impl JsObject for FunctionObject {
    fn get_object_base_mut(&mut self) -> &mut ObjectBase {
        &mut self.object_base
    }

    fn get_object_base(&self) -> &ObjectBase {
        &self.object_base
    }

    fn to_string(&self) -> String {
        format!("function {}() {{ [native code] }}", self.name())
    }
}

/// Name of the function behind `f`, if it is one.
pub fn function_name(f: &JsObjectType) -> Option<String> {
    (**f).borrow().as_function().map(|func| func.name())
}
