//! # Query Parameters
//!
//! `Params` is the per-call map of wire keys to JSON scalars. This module
//! also holds the snake_case to camelCase normalizer applied to optional
//! caller parameters, and the rendering of values into a query string.

use crate::configs::NormalizePolicy;
use reqwest::Url;
use serde_json::Value;
use std::collections::BTreeMap;

/// Wire key to value. Built fresh for each call.
pub type Params = BTreeMap<String, Value>;

/// Builds a [`Params`] map: `params! { "language_code" => "TR", "limit" => 5 }`.
#[macro_export]
macro_rules! params {
    () => {
        $crate::search::params::Params::new()
    };
    ($( $k:expr => $v:expr ),+ $(,)?) => {
        {
            let mut map = $crate::search::params::Params::new();
            $(
                map.insert(::std::string::String::from($k), $crate::__private::serde_json::Value::from($v));
            )+
            map
        }
    };
}

/// Removes every underscore that is not the first character and is followed
/// by an ASCII letter, upper-casing that letter.
///
/// `"language_code"` becomes `"languageCode"`; `"checkin"` is unchanged.
pub fn to_camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut chars = key.chars().peekable();
    let mut first = true;

    while let Some(c) = chars.next() {
        if c == '_' && !first {
            if let Some(&next) = chars.peek() {
                if next.is_ascii_alphabetic() {
                    out.push(next.to_ascii_uppercase());
                    chars.next();
                    first = false;
                    continue;
                }
            }
        }
        out.push(c);
        first = false;
    }
    out
}

/// Applies [`to_camel_case`] to every key, values untouched.
pub fn normalize_params(params: Params) -> Params {
    params
        .into_iter()
        .map(|(k, v)| (to_camel_case(&k), v))
        .collect()
}

/// Prepares optional caller parameters according to `policy`.
pub fn apply_policy(params: Params, policy: NormalizePolicy) -> Params {
    match policy {
        NormalizePolicy::Passthrough => params,
        NormalizePolicy::CamelCase => normalize_params(params),
    }
}

/// Renders one value as query-string text. `None` means the key is omitted.
fn render_scalar(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Flattens `params` into `(key, text)` pairs; arrays repeat their key.
pub fn to_query_pairs(params: &Params) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(params.len());
    for (key, value) in params {
        match value {
            Value::Array(items) => {
                for item in items {
                    if let Some(text) = render_scalar(item) {
                        pairs.push((key.clone(), text));
                    }
                }
            }
            other => {
                if let Some(text) = render_scalar(other) {
                    pairs.push((key.clone(), text));
                }
            }
        }
    }
    pairs
}

/// Appends `params` to the query string of `url`.
pub fn append_query(url: &mut Url, params: &Params) {
    let pairs = to_query_pairs(params);
    if pairs.is_empty() {
        return;
    }
    url.query_pairs_mut().extend_pairs(pairs);
}
