// Argument validation against a tool's declared parameters

use serde_json::{Map, Value};

use super::registry::ToolDefinition;

/// Supplied keys the tool does not declare, in the order they were supplied
pub fn unknown_parameters(arguments: &Map<String, Value>, tool: &ToolDefinition) -> Vec<String> {
    arguments
        .keys()
        .filter(|key| !tool.accepts(key))
        .cloned()
        .collect()
}

/// Arguments after lenient normalization
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub arguments: Map<String, Value>,
    /// Keys that were dropped because no declared parameter matched
    pub ignored: Vec<String>,
}

/// Map camelCase aliases onto declared snake_case parameters and drop the rest
///
/// An alias never overrides a value supplied under the declared name.
pub fn normalize_aliases(arguments: Map<String, Value>, tool: &ToolDefinition) -> Normalized {
    let mut normalized = Normalized::default();
    let mut aliased = Vec::new();

    for (key, value) in arguments {
        if tool.accepts(&key) {
            normalized.arguments.insert(key, value);
            continue;
        }

        let snake = to_snake_case(&key);
        if snake != key && tool.accepts(&snake) {
            aliased.push((snake, value));
        } else {
            normalized.ignored.push(key);
        }
    }

    for (key, value) in aliased {
        normalized.arguments.entry(key).or_insert(value);
    }

    normalized
}

/// `methodFilter` -> `method_filter`
pub fn to_snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, ch) in key.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
