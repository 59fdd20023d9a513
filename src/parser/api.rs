use pest::error::{Error, ErrorVariant};
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

use crate::runner::ds::object_property::PropertyKey;
use crate::runner::ds::property_path::PropertyPath;

#[derive(Parser)]
#[grammar = "parser/path_grammar.pest"] // relative to src
pub struct PathParser;

const TAB_WIDTH: usize = 2;

/// Debug rendering of the pest token tree for a path.
pub fn parse_to_token_tree(path: &str) -> Result<String, Error<Rule>> {
    let mut tree = vec![];
    for pair in PathParser::parse(Rule::path, path)? {
        tree.push(pair_to_string(pair, 0).join("\n"));
    }
    Ok(tree.join("\n"))
}

fn pair_to_string(pair: Pair<Rule>, level: usize) -> Vec<String> {
    let mut tree = vec![];
    let span = pair.as_span();
    let rule_name = format!(
        "{:?} => ({},{}) #{:?}",
        pair.as_rule(),
        span.start(),
        span.end(),
        span.as_str()
    );
    tree.push(format!("{}{}", " ".repeat(level * TAB_WIDTH), rule_name));
    for child_pair in pair.into_inner() {
        tree.append(pair_to_string(child_pair, level + 1).as_mut());
    }
    tree
}

pub fn parse_property_path(path: &str) -> Result<PropertyPath, Error<Rule>> {
    let mut keys = vec![];
    for pair in PathParser::parse(Rule::path, path)? {
        for segment in pair.into_inner() {
            match segment.as_rule() {
                Rule::identifier => keys.push(PropertyKey::Str(segment.as_str().to_string())),
                Rule::index => keys.push(build_index_key(&segment)?),
                Rule::string_key => keys.push(build_string_key(segment)?),
                Rule::EOI => { /* Do nothing */ }
                _ => return Err(get_unexpected_error(1, &segment)),
            }
        }
    }
    Ok(PropertyPath::from(keys))
}

fn build_index_key(pair: &Pair<Rule>) -> Result<PropertyKey, Error<Rule>> {
    match pair.as_str().parse::<u32>() {
        Ok(idx) if idx != u32::MAX => Ok(PropertyKey::Int(idx)),
        _ => Err(Error::new_from_span(
            ErrorVariant::CustomError {
                message: format!("'{}' is not a valid array index", pair.as_str()),
            },
            pair.as_span(),
        )),
    }
}

fn build_string_key(pair: Pair<Rule>) -> Result<PropertyKey, Error<Rule>> {
    let err = get_unexpected_error(2, &pair);
    let chars = pair.into_inner().next().ok_or(err)?;
    let mut unescaped = String::with_capacity(chars.as_str().len());
    let mut escaping = false;
    for c in chars.as_str().chars() {
        if escaping {
            unescaped.push(c);
            escaping = false;
        } else if c == '\\' {
            escaping = true;
        } else {
            unescaped.push(c);
        }
    }
    Ok(PropertyKey::from_str_key(&unescaped))
}

fn get_unexpected_error(id: i32, pair: &Pair<Rule>) -> Error<Rule> {
    let message = format!("Unexpected state reached [{:?}] - {}", pair.as_rule(), id);
    Error::new_from_span(ErrorVariant::CustomError { message }, pair.as_span())
}
