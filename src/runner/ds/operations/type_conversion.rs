use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::ObjectType;
use crate::runner::ds::value::JsValue;

pub const TYPE_STR_UNDEFINED: &str = "undefined";
pub const TYPE_STR_NULL: &str = "null";
pub const TYPE_STR_BOOLEAN: &str = "boolean";
pub const TYPE_STR_STRING: &str = "string";
pub const TYPE_STR_SYMBOL: &str = "symbol";
pub const TYPE_STR_NUMBER: &str = "number";
pub const TYPE_STR_OBJECT: &str = "object";
pub const TYPE_STR_FUNCTION: &str = "function";

pub fn get_type(a: &JsValue) -> &'static str {
    match a {
        JsValue::Undefined => TYPE_STR_UNDEFINED,
        JsValue::Null => TYPE_STR_NULL,
        JsValue::Boolean(_) => TYPE_STR_BOOLEAN,
        JsValue::String(_) => TYPE_STR_STRING,
        JsValue::Symbol(_) => TYPE_STR_SYMBOL,
        JsValue::Number(_) => TYPE_STR_NUMBER,
        JsValue::Object(o) => match *(**o).borrow() {
            ObjectType::Ordinary(_) => TYPE_STR_OBJECT,
            ObjectType::Function(_) => TYPE_STR_FUNCTION,
            ObjectType::Array(_) => TYPE_STR_OBJECT,
        },
    }
}

/// String conversion as done by `"" + v`. Objects are not asked for a primitive; they
/// render through their own `to_string`.
pub fn to_string(v: &JsValue) -> Result<String, JErrorType> {
    match v {
        JsValue::Undefined => Ok(TYPE_STR_UNDEFINED.to_string()),
        JsValue::Null => Ok(TYPE_STR_NULL.to_string()),
        JsValue::Boolean(b) => Ok(b.to_string()),
        JsValue::String(s) => Ok(s.to_string()),
        JsValue::Number(n) => Ok(n.to_string()),
        JsValue::Symbol(s) => Err(JErrorType::TypeError(format!(
            "'{}' symbol cannot be converted to string",
            s
        ))),
        JsValue::Object(o) => Ok((**o).borrow().as_js_object().to_string()),
    }
}
