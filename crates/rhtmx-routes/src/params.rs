// File: src/params.rs
// Purpose: Ordered parameter sets shared by matching, rendering and querystrings

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Insertion-ordered parameter mapping
///
/// Key order is significant: querystrings are rendered in enumeration order.
pub type Params = IndexMap<String, ParamValue>;

/// A single parameter value
///
/// `Null` behaves as an absent value everywhere: it is skipped by the
/// querystring builder and counts as missing when rendering a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Str(String),
    List(Vec<String>),
    Null,
}

impl ParamValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }

    /// Returns the string value, if this is a single value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Flattens the value the way it travels in a querystring
    ///
    /// Lists are joined with `/`, mirroring how catch-all captures look.
    ///
    /// ```
    /// use rhtmx_routes::ParamValue;
    ///
    /// assert_eq!(ParamValue::from(vec!["a", "b"]).joined(), Some("a/b".to_string()));
    /// assert_eq!(ParamValue::Null.joined(), None);
    /// ```
    pub fn joined(&self) -> Option<String> {
        match self {
            ParamValue::Str(value) => Some(value.clone()),
            ParamValue::List(values) => Some(values.join("/")),
            ParamValue::Null => None,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::Str(value.clone())
    }
}

macro_rules! display_into_param {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    ParamValue::Str(value.to_string())
                }
            }
        )*
    };
}

display_into_param!(i32, i64, u32, u64, usize, bool);

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        ParamValue::List(values)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(values: Vec<&str>) -> Self {
        ParamValue::List(values.into_iter().map(str::to_string).collect())
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(ParamValue::Null)
    }
}

/// Builds a [`Params`] literal
///
/// ```
/// use rhtmx_routes::{params, ParamValue};
///
/// let params = params! { "id" => 5, "tab" => "posts" };
/// assert_eq!(params.get("id"), Some(&ParamValue::from("5")));
/// ```
#[macro_export]
macro_rules! params {
    () => {
        $crate::Params::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut params = $crate::Params::new();
        $(
            params.insert(
                ::std::string::String::from($key),
                $crate::ParamValue::from($value),
            );
        )+
        params
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_render_as_decimal() {
        assert_eq!(ParamValue::from(5), ParamValue::Str("5".to_string()));
        assert_eq!(ParamValue::from(42u64).as_str(), Some("42"));
    }

    #[test]
    fn test_option_none_is_null() {
        let value: ParamValue = None::<&str>.into();
        assert!(value.is_null());
        assert_eq!(ParamValue::from(Some("x")), ParamValue::from("x"));
    }

    #[test]
    fn test_params_macro_keeps_insertion_order() {
        let params = params! { "b" => 1, "a" => 2, "c" => 3 };
        let keys: Vec<&str> = params.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_untagged_serde() {
        let params: Params = serde_json::from_str(r#"{"a":"x","b":["1","2"],"c":null}"#).unwrap();
        assert_eq!(params["a"], ParamValue::from("x"));
        assert_eq!(params["b"], ParamValue::from(vec!["1", "2"]));
        assert!(params["c"].is_null());
    }
}
