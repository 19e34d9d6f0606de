use serde_json::{Map, Value};

/// Ordered query-string parameters for list requests.
///
/// Keys keep the order they were pushed in. Empty strings and absent values
/// are never stored, so a missing key always means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `key=value` unless the rendered value is empty.
    pub fn push(&mut self, key: &str, value: impl ToString) -> &mut Self {
        let value = value.to_string();
        if !value.is_empty() {
            self.pairs.push((key.to_string(), value));
        }
        self
    }

    pub fn push_opt<V: ToString>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(v) = value {
            self.push(key, v);
        }
        self
    }

    /// Builder-style [`push`](Self::push).
    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.push(key, value);
        self
    }

    /// Builds parameters from a JSON object, keeping its key order.
    ///
    /// `null`, `""`, arrays and nested objects are skipped.
    pub fn from_json(value: &Value) -> Self {
        let mut params = Self::new();
        if let Value::Object(map) = value {
            for (key, v) in map {
                match v {
                    Value::String(s) => {
                        params.push(key, s);
                    }
                    Value::Number(n) => {
                        params.push(key, n);
                    }
                    Value::Bool(b) => {
                        params.push(key, b);
                    }
                    _ => {}
                }
            }
        }
        params
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// URL-encoded `k=v&k=v` form, without the leading `?`.
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }

    /// Appends the encoded query to `path`, adding `?` only when needed.
    pub fn apply_to(&self, path: &str) -> String {
        if self.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, self.to_query_string())
        }
    }

    /// String-valued JSON object, in parameter order.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .pairs
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        Value::Object(map)
    }
}
