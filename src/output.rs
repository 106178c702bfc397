//! Deterministic JSON text for query results.
//!
//! Object keys are always sorted, so the same result prints the same way
//! regardless of hash map ordering. Compact output uses no whitespace; pretty
//! output indents by two spaces per level.
//!
//! # Examples
//!
//! ```
//! use fieldq::Value;
//! use fieldq::output::{to_json, to_json_pretty};
//!
//! let value = Value::Integer(42);
//!
//! assert_eq!(to_json(&value), "42");
//! assert_eq!(to_json_pretty(&value), "42");
//! ```

use std::collections::HashMap;

use crate::value::Value;

pub struct JsonPrinter {
    pretty: bool,
}

impl JsonPrinter {
    pub fn new(pretty: bool) -> Self {
        JsonPrinter { pretty }
    }

    pub fn print(&self, value: &Value) -> String {
        self.print_value(value, 0)
    }

    fn print_value(&self, value: &Value, indent: usize) -> String {
        match value {
            Value::Null => "null".to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Integer(n) => n.to_string(),
            Value::Float(n) if n.is_finite() => n.to_string(),
            Value::Float(_) => "null".to_string(),
            Value::String(s) => format!("\"{}\"", escape_string(s)),
            Value::Array(arr) => {
                let items: Vec<String> = arr
                    .iter()
                    .map(|v| self.print_value(v, indent + 1))
                    .collect();
                self.wrap('[', ']', items, indent)
            }
            Value::Object(obj) => self.print_object(obj, indent),
        }
    }

    fn print_object(&self, obj: &HashMap<String, Value>, indent: usize) -> String {
        let mut entries: Vec<(&String, &Value)> = obj.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        let separator = if self.pretty { ": " } else { ":" };
        let items: Vec<String> = entries
            .into_iter()
            .map(|(k, v)| {
                format!(
                    "\"{}\"{}{}",
                    escape_string(k),
                    separator,
                    self.print_value(v, indent + 1)
                )
            })
            .collect();
        self.wrap('{', '}', items, indent)
    }

    fn wrap(&self, open: char, close: char, items: Vec<String>, indent: usize) -> String {
        if items.is_empty() {
            return format!("{}{}", open, close);
        }

        if self.pretty {
            let inner = "  ".repeat(indent + 1);
            let lines: Vec<String> = items
                .into_iter()
                .map(|item| format!("{}{}", inner, item))
                .collect();
            format!(
                "{}\n{}\n{}{}",
                open,
                lines.join(",\n"),
                "  ".repeat(indent),
                close
            )
        } else {
            format!("{}{}{}", open, items.join(","), close)
        }
    }
}

fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Compact JSON text.
///
/// ```
/// use fieldq::Value;
/// use fieldq::output::to_json;
/// use std::collections::HashMap;
///
/// let mut obj = HashMap::new();
/// obj.insert("name".to_string(), Value::String("Alice".to_string()));
/// obj.insert("age".to_string(), Value::Integer(30));
///
/// assert_eq!(to_json(&Value::Object(obj)), r#"{"age":30,"name":"Alice"}"#);
/// ```
pub fn to_json(value: &Value) -> String {
    JsonPrinter::new(false).print(value)
}

/// JSON text indented by two spaces per level, one element per line.
///
/// ```
/// use fieldq::Value;
/// use fieldq::output::to_json_pretty;
/// use std::collections::HashMap;
///
/// let mut obj = HashMap::new();
/// obj.insert("id".to_string(), Value::Integer(1));
///
/// assert_eq!(to_json_pretty(&Value::Object(obj)), "{\n  \"id\": 1\n}");
/// ```
pub fn to_json_pretty(value: &Value) -> String {
    JsonPrinter::new(true).print(value)
}
