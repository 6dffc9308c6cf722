//! Renders JSON values as Lua data-module source.
//!
//! The wiki consumes the catalogs as Lua modules of the form
//! `local p = <table>\n\nreturn p\n`. Sequences render inline, mappings as
//! indented blocks with purely-numeric keys ordered numerically ahead of
//! the remaining keys in lexical order.

use serde_json::Value;
use std::cmp::Ordering;

/// Render a value wrapped as a returnable Lua module.
pub fn render_module(value: &Value) -> String {
    format!("local p = {}\n\nreturn p\n", to_lua(value, ""))
}

/// Render a value as a Lua literal at the given indentation.
pub fn to_lua(value: &Value, indent: &str) -> String {
    match value {
        Value::Array(items) => {
            if items.is_empty() {
                return "{}".to_string();
            }
            let rendered: Vec<String> = items.iter().map(|item| to_lua(item, indent)).collect();
            format!("{{ {} }}", rendered.join(", "))
        }
        Value::Object(map) => {
            if map.is_empty() {
                return "{}".to_string();
            }
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort_by(|a, b| compare_keys(a.as_str(), b.as_str()));

            let inner = format!("{indent}  ");
            let lines: Vec<String> = keys
                .into_iter()
                .map(|key| {
                    let rendered_key = if is_identifier(key) {
                        key.clone()
                    } else {
                        format!("[\"{key}\"]")
                    };
                    format!("{inner}{rendered_key} = {}", to_lua(&map[key], &inner))
                })
                .collect();
            format!("{{\n{}\n{indent}}}", lines.join(",\n"))
        }
        Value::String(s) => escape_string(s),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) => "false".to_string(),
        Value::Null => "nil".to_string(),
    }
}

/// Numeric keys ascending first, then everything else lexically.
fn compare_keys(a: &str, b: &str) -> Ordering {
    match (numeric_key(a), numeric_key(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

fn numeric_key(key: &str) -> Option<u128> {
    if !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()) {
        key.parse().ok()
    } else {
        None
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*` — keys that can be written without brackets.
fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
