use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use pest::error::Error;

use crate::parser::{parse_property_path, Rule};
use crate::runner::ds::object_property::PropertyKey;

/// Ordered keys leading from the graph root to some location. The empty path is the root.
///
/// Renders as `wm.windows[0]["odd key"]`; symbol keys render as `[Symbol(desc)]` and are
/// the only segments that cannot be parsed back.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PropertyPath {
    keys: Vec<PropertyKey>,
}
impl PropertyPath {
    pub fn new() -> Self {
        PropertyPath { keys: Vec::new() }
    }

    pub fn keys(&self) -> &[PropertyKey] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn last(&self) -> Option<&PropertyKey> {
        self.keys.last()
    }

    /// A new path one key deeper.
    pub fn child(&self, key: PropertyKey) -> Self {
        let mut keys = self.keys.clone();
        keys.push(key);
        PropertyPath { keys }
    }

    /// The path without its last key.
    pub fn parent(&self) -> Option<Self> {
        if self.keys.is_empty() {
            None
        } else {
            Some(PropertyPath {
                keys: self.keys[..self.keys.len() - 1].to_vec(),
            })
        }
    }
}
impl From<Vec<PropertyKey>> for PropertyPath {
    fn from(keys: Vec<PropertyKey>) -> Self {
        PropertyPath { keys }
    }
}
impl FromStr for PropertyPath {
    type Err = Error<Rule>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_property_path(s)
    }
}
impl Display for PropertyPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (idx, key) in self.keys.iter().enumerate() {
            match key {
                PropertyKey::Str(s) if key.is_identifier() => {
                    if idx > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", s)?;
                }
                PropertyKey::Str(s) => {
                    write!(f, "[\"{}\"]", s.replace('\\', "\\\\").replace('"', "\\\""))?
                }
                PropertyKey::Int(i) => write!(f, "[{}]", i)?,
                PropertyKey::Sym(s) => write!(f, "[{}]", s)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ds::symbol::SymbolData;

    #[test]
    fn test_display_mixes_segment_styles() {
        let path = PropertyPath::from(vec![
            PropertyKey::from("wm"),
            PropertyKey::from("windows"),
            PropertyKey::Int(0),
            PropertyKey::from("odd \"key\""),
            PropertyKey::Sym(SymbolData::new("tag")),
        ]);
        assert_eq!(
            path.to_string(),
            "wm.windows[0][\"odd \\\"key\\\"\"][Symbol(tag)]"
        );
    }

    #[test]
    fn test_parent_and_child() {
        let path = PropertyPath::new().child("a".into()).child("b".into());
        assert_eq!(path.len(), 2);
        assert_eq!(path.parent().unwrap().to_string(), "a");
        assert!(PropertyPath::new().parent().is_none());
        assert_eq!(PropertyPath::new().to_string(), "");
    }
}
