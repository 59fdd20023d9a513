mod api;

pub use api::{parse_property_path, parse_to_token_tree, PathParser, Rule};
