//! Request options for the Shopee partner API dispatcher.
//!
//! A [`RequestOptions`] is built fresh for every call and describes the method,
//! the caller's query parameters, an optional JSON body, extra headers and
//! whether the call is shop-authenticated.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::clients::errors::SdkError;

/// HTTP methods used by the partner API.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET; the default.
    #[default]
    Get,
    /// HTTP POST with a JSON body.
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// A single query parameter value.
///
/// Lists are sent as one repeated key per element, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    /// An explicit `null`, sent as the string `null`.
    Null,
    /// A boolean, sent as `true`/`false`.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    UInt(u64),
    /// A float.
    Float(f64),
    /// A string, sent verbatim.
    String(String),
    /// A list of scalars, sent as repeated keys.
    List(Vec<ParamValue>),
}

impl ParamValue {
    /// Converts a JSON value into a parameter value.
    ///
    /// Returns `None` for JSON objects, which have no query string form.
    #[must_use]
    pub fn from_json(value: Value) -> Option<Self> {
        Some(match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    Self::UInt(u)
                } else if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else {
                    Self::Float(n.as_f64()?)
                }
            }
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::List(
                items
                    .into_iter()
                    .map(Self::from_json)
                    .collect::<Option<Vec<_>>>()?,
            ),
            Value::Object(_) => return None,
        })
    }

    /// Appends `key=value` pairs for this value to `pairs`.
    pub(crate) fn push_pairs(&self, key: &str, pairs: &mut Vec<(String, String)>) {
        match self {
            Self::List(items) => {
                for item in items {
                    item.push_pairs(key, pairs);
                }
            }
            scalar => pairs.push((key.to_string(), scalar.to_string())),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::UInt(u) => write!(f, "{u}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
            Self::List(items) => {
                let joined: Vec<String> = items.iter().map(ToString::to_string).collect();
                f.write_str(&joined.join(","))
            }
        }
    }
}

macro_rules! impl_param_from {
    ($variant:ident => $($t:ty),+) => {
        $(
            impl From<$t> for ParamValue {
                fn from(value: $t) -> Self {
                    Self::$variant(value.into())
                }
            }
        )+
    };
}

impl_param_from!(Int => i8, i16, i32, i64);
impl_param_from!(UInt => u8, u16, u32, u64);
impl_param_from!(Float => f32, f64);
impl_param_from!(Bool => bool);
impl_param_from!(String => String, &str);

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::String(value.clone())
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

/// Ordered query parameters.
///
/// Inserting an existing key replaces its value in place, so the first
/// insertion fixes a key's position in the query string.
///
/// # Example
///
/// ```rust
/// use shopee_api::clients::{ParamValue, Params};
///
/// let mut params = Params::new();
/// params.insert("page_size", 20);
/// params.insert("item_id_list", vec![1, 2, 3]);
/// params.insert_opt("cursor", None::<String>);
///
/// assert_eq!(params.len(), 2);
/// assert_eq!(params.get("page_size"), Some(&ParamValue::Int(20)));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    /// Creates an empty parameter list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builds parameters from any serializable struct or map.
    ///
    /// Fields serialized as `null` (typically `Option::None`) are treated as
    /// absent and dropped. Nested objects are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::Serialization`] if `value` does not serialize to a
    /// flat JSON object.
    pub fn from_serialize<S: Serialize + ?Sized>(value: &S) -> Result<Self, SdkError> {
        let json = serde_json::to_value(value).map_err(|e| SdkError::Serialization {
            reason: e.to_string(),
        })?;
        let Value::Object(map) = json else {
            return Err(SdkError::Serialization {
                reason: "query parameters must serialize to an object".to_string(),
            });
        };

        let mut params = Self::new();
        for (key, value) in map {
            if value.is_null() {
                continue;
            }
            let param = ParamValue::from_json(value).ok_or_else(|| SdkError::Serialization {
                reason: format!("query parameter '{key}' cannot be a nested object"),
            })?;
            params.insert(key, param);
        }
        Ok(params)
    }

    /// Sets `key` to `value`, keeping the key's original position if present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Sets `key` only when `value` is present.
    pub fn insert_opt<V: Into<ParamValue>>(&mut self, key: impl Into<String>, value: Option<V>) {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    /// Appends every entry of `other`, with `other` winning on collisions.
    pub fn extend(&mut self, other: &Self) {
        for (key, value) in &other.entries {
            self.insert(key.clone(), value.clone());
        }
    }

    /// Returns the value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns the number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Flattens into `(key, value)` string pairs, expanding lists.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            value.push_pairs(key, &mut pairs);
        }
        pairs
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// Options for one dispatched request.
///
/// # Defaults
///
/// - `method`: [`HttpMethod::Get`]
/// - `params`: empty
/// - `body`: none
/// - `auth`: `false`
/// - `headers`: empty
///
/// # Example
///
/// ```rust
/// use shopee_api::clients::{HttpMethod, RequestOptions};
/// use serde_json::json;
///
/// let options = RequestOptions::post()
///     .auth(true)
///     .param("language", "en")
///     .body(json!({"item_id": 1}))
///     .header("X-Trace-Id", "abc");
///
/// assert_eq!(options.method, HttpMethod::Post);
/// assert!(options.auth);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestOptions {
    /// HTTP method.
    pub method: HttpMethod,
    /// Caller query parameters.
    pub params: Params,
    /// JSON body, omitted from the request when `None`.
    pub body: Option<Value>,
    /// Whether the call carries the shop's access token.
    pub auth: bool,
    /// Extra headers; these win over the defaults.
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    /// Creates GET options with no parameters.
    #[must_use]
    pub fn get() -> Self {
        Self::default()
    }

    /// Creates POST options with no body.
    #[must_use]
    pub fn post() -> Self {
        Self {
            method: HttpMethod::Post,
            ..Self::default()
        }
    }

    /// Sets whether the call is shop-authenticated.
    #[must_use]
    pub const fn auth(mut self, auth: bool) -> Self {
        self.auth = auth;
        self
    }

    /// Adds one query parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key, value);
        self
    }

    /// Replaces the query parameters.
    #[must_use]
    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Adds a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_method_display_and_default() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(HttpMethod::default(), HttpMethod::Get);
    }

    #[test]
    fn test_insert_replaces_value_in_place() {
        let mut params = Params::new();
        params.insert("a", 1);
        params.insert("b", 2);
        params.insert("a", 3);

        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(params.get("a"), Some(&ParamValue::Int(3)));
    }

    #[test]
    fn test_insert_opt_drops_absent_values_but_keeps_falsy_ones() {
        let mut params = Params::new();
        params.insert_opt("cursor", None::<&str>);
        params.insert_opt("offset", Some(0));
        params.insert_opt("flag", Some(false));
        params.insert("explicit", ParamValue::Null);

        assert!(params.get("cursor").is_none());
        assert_eq!(
            params.to_pairs(),
            vec![
                ("offset".to_string(), "0".to_string()),
                ("flag".to_string(), "false".to_string()),
                ("explicit".to_string(), "null".to_string()),
            ]
        );
    }

    #[test]
    fn test_lists_expand_to_repeated_keys_in_order() {
        let params: Params = [("item_id_list", vec![3u64, 1, 2])].into_iter().collect();

        assert_eq!(
            params.to_pairs(),
            vec![
                ("item_id_list".to_string(), "3".to_string()),
                ("item_id_list".to_string(), "1".to_string()),
                ("item_id_list".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_from_serialize_drops_none_fields() {
        #[derive(Serialize)]
        struct Query {
            time_range_field: &'static str,
            page_size: u32,
            cursor: Option<String>,
            order_status: Option<&'static str>,
        }

        let params = Params::from_serialize(&Query {
            time_range_field: "create_time",
            page_size: 20,
            cursor: None,
            order_status: Some("READY_TO_SHIP"),
        })
        .unwrap();

        assert_eq!(params.len(), 3);
        assert!(params.get("cursor").is_none());
        assert_eq!(params.get("page_size"), Some(&ParamValue::UInt(20)));
    }

    #[test]
    fn test_from_serialize_rejects_nested_objects_and_non_objects() {
        assert!(matches!(
            Params::from_serialize(&json!({"filter": {"a": 1}})),
            Err(SdkError::Serialization { .. })
        ));
        assert!(matches!(
            Params::from_serialize(&json!([1, 2])),
            Err(SdkError::Serialization { .. })
        ));
    }

    #[test]
    fn test_param_value_from_json_numbers() {
        assert_eq!(ParamValue::from_json(json!(5)), Some(ParamValue::UInt(5)));
        assert_eq!(ParamValue::from_json(json!(-5)), Some(ParamValue::Int(-5)));
        assert_eq!(ParamValue::from_json(json!(1.5)), Some(ParamValue::Float(1.5)));
    }

    #[test]
    fn test_extend_lets_later_params_win() {
        let mut base: Params = [("partner_id", 1), ("timestamp", 2)].into_iter().collect();
        let caller: Params = [("page_size", 20), ("timestamp", 9)].into_iter().collect();

        base.extend(&caller);

        let pairs = base.to_pairs();
        assert_eq!(pairs[1], ("timestamp".to_string(), "9".to_string()));
        assert_eq!(pairs[2], ("page_size".to_string(), "20".to_string()));
    }

    #[test]
    fn test_request_options_builder() {
        let options = RequestOptions::get()
            .auth(true)
            .param("page_size", 20)
            .header("X-Custom", "1");

        assert_eq!(options.method, HttpMethod::Get);
        assert!(options.auth);
        assert!(options.body.is_none());
        assert_eq!(options.params.len(), 1);
        assert_eq!(options.headers, vec![("X-Custom".to_string(), "1".to_string())]);
    }

    #[test]
    fn test_request_options_default_is_unauthenticated_get() {
        let options = RequestOptions::default();
        assert_eq!(options.method, HttpMethod::Get);
        assert!(!options.auth);
        assert!(options.params.is_empty());
    }
}
