pub mod ds;
pub mod hook;
