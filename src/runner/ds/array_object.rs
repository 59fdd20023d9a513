use crate::runner::ds::object::{ordinary_define_own_property, JsObject, JsObjectType, ObjectBase};
use crate::runner::ds::object_property::{PropertyDescriptor, PropertyKey};
use crate::runner::ds::value::{JsNumberType, JsValue};

lazy_static! {
    pub static ref ARRAY_LENGTH_PROP: PropertyKey = PropertyKey::Str("length".to_string());
}

#[derive(Clone)]
pub struct ArrayObject {
    object_base: ObjectBase,
}
impl ArrayObject {
    pub fn new(elements: Vec<JsValue>, prototype: Option<JsObjectType>) -> Self {
        let mut object_base = ObjectBase::new(prototype);
        let len = elements.len() as i64;
        for (idx, value) in elements.into_iter().enumerate() {
            object_base.insert_property(PropertyKey::Int(idx as u32), PropertyDescriptor::data(value));
        }
        object_base.insert_property(
            ARRAY_LENGTH_PROP.clone(),
            PropertyDescriptor::Data {
                value: JsValue::Number(JsNumberType::Integer(len)),
                writable: true,
                enumerable: false,
                configurable: false,
            },
        );
        ArrayObject { object_base }
    }

    pub fn length(&self) -> u32 {
        match self.get_own_property(&ARRAY_LENGTH_PROP) {
            Some(PropertyDescriptor::Data {
                value: JsValue::Number(JsNumberType::Integer(n)),
                ..
            }) => *n as u32,
            _ => 0,
        }
    }

    fn is_length_writable(&self) -> bool {
        self.get_own_property(&ARRAY_LENGTH_PROP)
            .map(|d| d.is_writable())
            .unwrap_or(false)
    }

    fn store_length(&mut self, len: u32) {
        if let Some(desc) = self.get_own_property(&ARRAY_LENGTH_PROP).cloned() {
            self.object_base.insert_property(
                ARRAY_LENGTH_PROP.clone(),
                desc.with_value(JsValue::Number(JsNumberType::Integer(len as i64))),
            );
        }
    }

    /// Element values in index order; holes read as `Undefined`.
    pub fn elements(&self) -> Vec<JsValue> {
        (0..self.length())
            .map(|idx| {
                self.get_own_property(&PropertyKey::Int(idx))
                    .and_then(|d| d.value())
                    .cloned()
                    .unwrap_or(JsValue::Undefined)
            })
            .collect()
    }
}
impl JsObject for ArrayObject {
    fn get_object_base_mut(&mut self) -> &mut ObjectBase {
        &mut self.object_base
    }

    fn get_object_base(&self) -> &ObjectBase {
        &self.object_base
    }

    fn define_own_property(
        &mut self,
        property: PropertyKey,
        descriptor: PropertyDescriptor,
    ) -> bool {
        let index = match property {
            PropertyKey::Int(idx) => Some(idx),
            _ => None,
        };
        if let Some(idx) = index {
            let old_len = self.length();
            if idx >= old_len && !self.is_length_writable() {
                return false;
            }
            if !ordinary_define_own_property(self, property, descriptor) {
                return false;
            }
            if idx >= old_len {
                self.store_length(idx + 1);
            }
            true
        } else if property == *ARRAY_LENGTH_PROP {
            array_set_length(self, descriptor)
        } else {
            ordinary_define_own_property(self, property, descriptor)
        }
    }

    fn to_string(&self) -> String {
        "[object Array]".to_string()
    }
}

fn array_set_length(array: &mut ArrayObject, descriptor: PropertyDescriptor) -> bool {
    let new_len = match descriptor.value() {
        Some(JsValue::Number(JsNumberType::Integer(n))) if *n >= 0 && *n < u32::MAX as i64 => {
            *n as u32
        }
        Some(_) => return false,
        None => return ordinary_define_own_property(array, ARRAY_LENGTH_PROP.clone(), descriptor),
    };
    let old_len = array.length();
    if !ordinary_define_own_property(array, ARRAY_LENGTH_PROP.clone(), descriptor) {
        return false;
    }
    for idx in new_len..old_len {
        array.object_base.remove_property(&PropertyKey::Int(idx));
    }
    true
}
