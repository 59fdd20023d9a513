//! Data structures of the object graph: values, objects, property descriptors and the
//! realm that owns the intrinsic prototypes.

pub mod array_object;
pub mod error;
pub mod function_object;
pub mod graph;
pub mod object;
pub mod object_property;
pub mod operations;
pub mod property_path;
pub mod realm;
pub mod symbol;
pub mod value;
