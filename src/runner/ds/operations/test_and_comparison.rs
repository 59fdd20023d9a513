use crate::runner::ds::object::JsObjectType;
use crate::runner::ds::operations::type_conversion::{
    get_type, TYPE_STR_BOOLEAN, TYPE_STR_FUNCTION, TYPE_STR_NULL, TYPE_STR_NUMBER, TYPE_STR_OBJECT,
    TYPE_STR_STRING, TYPE_STR_SYMBOL, TYPE_STR_UNDEFINED,
};
use crate::runner::ds::value::{JsNumberType, JsValue};
use std::rc::Rc;

fn is_same_value(a: &JsValue, b: &JsValue, strict_mode: bool) -> bool {
    let type_a = get_type(a);
    if type_a != get_type(b) {
        return false;
    }
    if type_a == TYPE_STR_UNDEFINED || type_a == TYPE_STR_NULL {
        return true;
    }
    match (a, b) {
        (JsValue::Number(na), JsValue::Number(nb)) if type_a == TYPE_STR_NUMBER => {
            match (na, nb) {
                (JsNumberType::NaN, JsNumberType::NaN) => !strict_mode,
                (JsNumberType::NaN, _) | (_, JsNumberType::NaN) => false,
                (JsNumberType::PositiveInfinity, JsNumberType::PositiveInfinity) => true,
                (JsNumberType::NegativeInfinity, JsNumberType::NegativeInfinity) => true,
                (JsNumberType::PositiveInfinity, _)
                | (JsNumberType::NegativeInfinity, _)
                | (_, JsNumberType::PositiveInfinity)
                | (_, JsNumberType::NegativeInfinity) => false,
                _ => as_f64(na) == as_f64(nb),
            }
        }
        (JsValue::String(a_value), JsValue::String(b_value)) if type_a == TYPE_STR_STRING => {
            a_value == b_value
        }
        (JsValue::Boolean(a_value), JsValue::Boolean(b_value)) if type_a == TYPE_STR_BOOLEAN => {
            a_value == b_value
        }
        (JsValue::Symbol(a_value), JsValue::Symbol(b_value)) if type_a == TYPE_STR_SYMBOL => {
            a_value == b_value
        }
        (JsValue::Object(a_value), JsValue::Object(b_value))
            if type_a == TYPE_STR_OBJECT || type_a == TYPE_STR_FUNCTION =>
        {
            same_object(a_value, b_value)
        }
        _ => false,
    }
}

fn as_f64(n: &JsNumberType) -> f64 {
    match n {
        JsNumberType::Integer(i) => *i as f64,
        JsNumberType::Float(f) => *f,
        _ => f64::NAN,
    }
}

pub fn same_object(a: &JsObjectType, b: &JsObjectType) -> bool {
    Rc::ptr_eq(a, b)
}

pub fn same_object_option(a: &Option<JsObjectType>, b: &Option<JsObjectType>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => same_object(a, b),
        _ => false,
    }
}

pub fn same_value(a: &JsValue, b: &JsValue) -> bool {
    is_same_value(a, b, false)
}

pub fn strict_equality_comparison(a: &JsValue, b: &JsValue) -> bool {
    is_same_value(a, b, true)
}
