//! Dotted-path access into element props.
//!
//! The property panel addresses nested values with paths such as
//! `"cta.label"` or `"features.2.title"`. Object keys and array indices are
//! both plain segments. Reads of an absent path yield `None`; walking
//! through a scalar is an error, so a mistyped path is reported instead of
//! silently ignored.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::Props;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropsError {
    #[error("Property path is empty")]
    EmptyPath,

    #[error("Property path has an empty segment: {0:?}")]
    EmptySegment(String),

    #[error("Property {0:?} is neither an object nor an array")]
    NotAContainer(String),

    #[error("Segment {0:?} is not a valid array index")]
    InvalidIndex(String),

    #[error("Index {index} is out of bounds for array of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

fn split_path(path: &str) -> Result<Vec<&str>, PropsError> {
    if path.is_empty() {
        return Err(PropsError::EmptyPath);
    }
    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(PropsError::EmptySegment(path.to_string()));
    }
    Ok(segments)
}

fn parse_index(segment: &str) -> Result<usize, PropsError> {
    segment
        .parse()
        .map_err(|_| PropsError::InvalidIndex(segment.to_string()))
}

/// Reads the value at `path`.
pub fn get_path<'a>(props: &'a Props, path: &str) -> Result<Option<&'a Value>, PropsError> {
    let segments = split_path(path)?;
    let Some(mut current) = props.get(segments[0]) else {
        return Ok(None);
    };
    let mut parent = segments[0];

    for segment in &segments[1..] {
        let next = match current {
            Value::Object(map) => map.get(*segment),
            Value::Array(items) => items.get(parse_index(segment)?),
            Value::Null => None,
            _ => return Err(PropsError::NotAContainer(parent.to_string())),
        };
        match next {
            Some(value) => current = value,
            None => return Ok(None),
        }
        parent = *segment;
    }
    Ok(Some(current))
}

/// Writes `value` at `path`, creating intermediate objects as needed.
///
/// Missing or `null` intermediates become empty objects. Array segments must
/// address an existing slot. On error `props` is left unchanged.
pub fn set_path(props: &mut Props, path: &str, value: Value) -> Result<(), PropsError> {
    let segments = split_path(path)?;
    let (first, rest) = (segments[0], &segments[1..]);

    if rest.is_empty() {
        props.insert(first.to_string(), value);
        return Ok(());
    }

    // Validate against the current tree first so a failed write leaves no
    // half-created intermediates behind.
    if let Some(existing) = props.get(first) {
        check_writable(existing, first, rest)?;
    }

    let child = props
        .entry(first.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    set_in(child, rest, value);
    Ok(())
}

fn check_writable(node: &Value, name: &str, segments: &[&str]) -> Result<(), PropsError> {
    let Some((segment, rest)) = segments.split_first() else {
        return Ok(());
    };
    match node {
        Value::Object(map) => match map.get(*segment) {
            Some(child) => check_writable(child, segment, rest),
            None => Ok(()),
        },
        Value::Array(items) => {
            let index = parse_index(segment)?;
            match items.get(index) {
                Some(child) => check_writable(child, segment, rest),
                None => Err(PropsError::IndexOutOfBounds {
                    index,
                    len: items.len(),
                }),
            }
        }
        Value::Null => Ok(()),
        _ => Err(PropsError::NotAContainer(name.to_string())),
    }
}

/// Writes into a tree already checked by `check_writable`.
fn set_in(node: &mut Value, segments: &[&str], value: Value) {
    let Some((segment, rest)) = segments.split_first() else {
        *node = value;
        return;
    };
    if node.is_null() {
        *node = Value::Object(Map::new());
    }
    match node {
        Value::Object(map) => {
            let child = map
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            set_in(child, rest, value);
        }
        Value::Array(items) => {
            if let Some(child) = segment.parse::<usize>().ok().and_then(|i| items.get_mut(i)) {
                set_in(child, rest, value);
            }
        }
        _ => {}
    }
}
