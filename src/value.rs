use std::collections::HashMap;

/// A decoded document value.
///
/// This mirrors JSON with integers and floats kept apart, since relational
/// comparisons treat them differently (see the evaluator).
///
/// # Examples
///
/// ```
/// use fieldq::Value;
/// use std::collections::HashMap;
///
/// let id = Value::Integer(1);
/// let age = Value::Float(0.3);
/// let name = Value::String("Vincent".to_string());
///
/// let mut obj = HashMap::new();
/// obj.insert("id".to_string(), id);
/// obj.insert("age".to_string(), age);
/// obj.insert("name".to_string(), name);
/// let document = Value::Object(obj);
/// assert_eq!(document.type_name(), "object");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// JSON null
    Null,

    /// JSON boolean (true/false)
    Boolean(bool),

    /// Integer number
    Integer(i64),

    /// Floating-point number
    Float(f64),

    /// UTF-8 string
    String(String),

    /// Array of values
    Array(Vec<Value>),

    /// Object with string keys
    Object(HashMap<String, Value>),
}

impl Value {
    /// Human-readable name of the variant
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    pub fn as_object(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

// serde_json interop

impl Value {
    /// Decode JSON text into a document value.
    ///
    /// ```
    /// use fieldq::Value;
    ///
    /// let doc = Value::from_json_str(r#"{"id": 1, "ratio": 0.5}"#).unwrap();
    /// let obj = doc.as_object().unwrap();
    /// assert_eq!(obj["id"], Value::Integer(1));
    /// assert_eq!(obj["ratio"], Value::Float(0.5));
    /// ```
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<serde_json::Value>(text).map(Value::from)
    }
}

/// Numbers that fit in an `i64` stay integers; larger ones fall back to floats.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Boolean(b),
            Json::Number(n) => n
                .as_i64()
                .map(Value::Integer)
                .or_else(|| n.as_f64().map(Value::Float))
                .unwrap_or(Value::Null),
            Json::String(s) => Value::String(s),
            Json::Array(items) => items.into_iter().map(Value::from).collect(),
            Json::Object(fields) => Value::Object(
                fields
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

/// Non-finite floats have no JSON form and become null.
impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        use serde_json::Value as Json;

        match value {
            Value::Null => Json::Null,
            Value::Boolean(b) => Json::Bool(b),
            Value::Integer(n) => Json::from(n),
            Value::Float(n) => serde_json::Number::from_f64(n).map_or(Json::Null, Json::Number),
            Value::String(s) => Json::String(s),
            Value::Array(items) => items.into_iter().map(Json::from).collect(),
            Value::Object(fields) => fields
                .into_iter()
                .map(|(key, value)| (key, Json::from(value)))
                .collect(),
        }
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}
