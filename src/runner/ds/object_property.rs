use std::fmt;
use std::fmt::{Display, Formatter};

use crate::runner::ds::object::JsObjectType;
use crate::runner::ds::symbol::SymbolData;
use crate::runner::ds::value::JsValue;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    Str(String),
    Int(u32),
    Sym(SymbolData),
}
impl PropertyKey {
    /// Canonical array index strings ("0", "17", but not "017" or "-1") become integer keys,
    /// everything else stays a string key.
    pub fn from_str_key(s: &str) -> Self {
        match canonical_index(s) {
            Some(idx) => PropertyKey::Int(idx),
            None => PropertyKey::Str(s.to_string()),
        }
    }

    pub fn is_identifier(&self) -> bool {
        match self {
            PropertyKey::Str(s) => {
                let mut chars = s.chars();
                match chars.next() {
                    Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
                        chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
                    }
                    _ => false,
                }
            }
            _ => false,
        }
    }
}
impl Display for PropertyKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKey::Str(s) => write!(f, "{}", s),
            PropertyKey::Int(i) => write!(f, "{}", i),
            PropertyKey::Sym(s) => write!(f, "{}", s),
        }
    }
}
impl From<&str> for PropertyKey {
    fn from(s: &str) -> Self {
        PropertyKey::from_str_key(s)
    }
}
impl From<u32> for PropertyKey {
    fn from(i: u32) -> Self {
        PropertyKey::Int(i)
    }
}
impl From<SymbolData> for PropertyKey {
    fn from(s: SymbolData) -> Self {
        PropertyKey::Sym(s)
    }
}

fn canonical_index(s: &str) -> Option<u32> {
    if s.is_empty() || (s.len() > 1 && s.starts_with('0')) {
        return None;
    }
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // 2^32 - 1 is not a valid array index.
    match s.parse::<u32>() {
        Ok(idx) if idx != u32::MAX => Some(idx),
        _ => None,
    }
}

/// The full description of one own property: either a plain value slot or a
/// getter/setter pair, plus its attributes.
#[derive(Clone)]
pub enum PropertyDescriptor {
    Data {
        value: JsValue,
        writable: bool,
        enumerable: bool,
        configurable: bool,
    },
    Accessor {
        get: Option<JsObjectType>,
        set: Option<JsObjectType>,
        enumerable: bool,
        configurable: bool,
    },
}
impl PropertyDescriptor {
    /// Descriptor used by plain assignment: writable, enumerable and configurable.
    pub fn data(value: JsValue) -> Self {
        PropertyDescriptor::Data {
            value,
            writable: true,
            enumerable: true,
            configurable: true,
        }
    }

    pub fn hidden(value: JsValue) -> Self {
        PropertyDescriptor::Data {
            value,
            writable: true,
            enumerable: false,
            configurable: true,
        }
    }

    pub fn frozen(value: JsValue) -> Self {
        PropertyDescriptor::Data {
            value,
            writable: false,
            enumerable: true,
            configurable: false,
        }
    }

    /// Same attributes, different value. An accessor becomes a writable data property
    /// that keeps its enumerability and configurability.
    pub fn with_value(&self, value: JsValue) -> Self {
        match self {
            PropertyDescriptor::Data {
                writable,
                enumerable,
                configurable,
                ..
            } => PropertyDescriptor::Data {
                value,
                writable: *writable,
                enumerable: *enumerable,
                configurable: *configurable,
            },
            PropertyDescriptor::Accessor {
                enumerable,
                configurable,
                ..
            } => PropertyDescriptor::Data {
                value,
                writable: true,
                enumerable: *enumerable,
                configurable: *configurable,
            },
        }
    }

    pub fn value(&self) -> Option<&JsValue> {
        match self {
            PropertyDescriptor::Data { value, .. } => Some(value),
            PropertyDescriptor::Accessor { .. } => None,
        }
    }

    pub fn is_enumerable(&self) -> bool {
        match self {
            PropertyDescriptor::Data { enumerable, .. } => *enumerable,
            PropertyDescriptor::Accessor { enumerable, .. } => *enumerable,
        }
    }

    pub fn is_configurable(&self) -> bool {
        match self {
            PropertyDescriptor::Data { configurable, .. } => *configurable,
            PropertyDescriptor::Accessor { configurable, .. } => *configurable,
        }
    }

    /// Accessors have no writable attribute and report `false`.
    pub fn is_writable(&self) -> bool {
        match self {
            PropertyDescriptor::Data { writable, .. } => *writable,
            PropertyDescriptor::Accessor { .. } => false,
        }
    }

    pub fn is_data_descriptor(&self) -> bool {
        match self {
            PropertyDescriptor::Data { .. } => true,
            PropertyDescriptor::Accessor { .. } => false,
        }
    }

    pub fn is_accessor_descriptor(&self) -> bool {
        !self.is_data_descriptor()
    }
}
