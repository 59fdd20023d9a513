use crate::runner::ds::array_object::ArrayObject;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::function_object::{FunctionObject, NativeFunction};
use crate::runner::ds::object::{JsObjectType, ObjectType, OrdinaryObject};
use crate::runner::ds::value::JsValue;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WellKnownIntrinsics {
    ArrayPrototype,
    FunctionPrototype,
    ObjectPrototype,
}

pub type JsCodeRealmType = Rc<CodeRealm>;

/// Owner of the intrinsic prototypes every object of a graph delegates to.
pub struct CodeRealm {
    intrinsics: HashMap<WellKnownIntrinsics, JsObjectType>,
}
impl CodeRealm {
    pub fn new() -> Self {
        let object_prototype = wrap(ObjectType::Ordinary(OrdinaryObject::new(None)));
        let function_prototype = wrap(ObjectType::Ordinary(OrdinaryObject::new(Some(
            object_prototype.clone(),
        ))));
        let array_prototype = wrap(ObjectType::Ordinary(OrdinaryObject::new(Some(
            object_prototype.clone(),
        ))));

        let mut intrinsics = HashMap::new();
        intrinsics.insert(WellKnownIntrinsics::ObjectPrototype, object_prototype);
        intrinsics.insert(WellKnownIntrinsics::FunctionPrototype, function_prototype);
        intrinsics.insert(WellKnownIntrinsics::ArrayPrototype, array_prototype);
        CodeRealm { intrinsics }
    }

    pub fn get_intrinsic(&self, which: WellKnownIntrinsics) -> JsObjectType {
        // Every intrinsic is inserted by `new`.
        self.intrinsics[&which].clone()
    }

    /// Key enumeration along a delegation chain stops at these objects.
    pub fn is_chain_root(&self, o: &JsObjectType) -> bool {
        [
            WellKnownIntrinsics::ObjectPrototype,
            WellKnownIntrinsics::FunctionPrototype,
        ]
        .iter()
        .any(|which| Rc::ptr_eq(&self.intrinsics[which], o))
    }

    pub fn new_object(&self) -> JsObjectType {
        wrap(ObjectType::Ordinary(OrdinaryObject::new(Some(
            self.get_intrinsic(WellKnownIntrinsics::ObjectPrototype),
        ))))
    }

    pub fn new_function_object(&self, name: &str, behaviour: NativeFunction) -> JsObjectType {
        wrap(ObjectType::Function(FunctionObject::new(
            name,
            behaviour,
            Some(self.get_intrinsic(WellKnownIntrinsics::FunctionPrototype)),
        )))
    }

    pub fn new_function<F>(&self, name: &str, behaviour: F) -> JsObjectType
    where
        F: Fn(JsValue, Vec<JsValue>) -> Result<JsValue, JErrorType> + 'static,
    {
        self.new_function_object(name, Rc::new(behaviour))
    }

    pub fn new_array(&self, elements: Vec<JsValue>) -> JsObjectType {
        wrap(ObjectType::Array(ArrayObject::new(
            elements,
            Some(self.get_intrinsic(WellKnownIntrinsics::ArrayPrototype)),
        )))
    }
}

impl Default for CodeRealm {
    fn default() -> Self {
        Self::new()
    }
}

fn wrap(o: ObjectType) -> JsObjectType {
    Rc::new(RefCell::new(o))
}
