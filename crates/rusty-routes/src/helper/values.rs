//! `:name` placeholder substitution from serializable objects
//!
//! Lets a caller turn a pattern such as `/users/:id/posts/:slug` into a
//! concrete URL straight from a model value:
//!
//! ```
//! use rusty_routes::helper::replace_parameters;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Post {
//!     id: u32,
//!     slug: String,
//! }
//!
//! let post = Post { id: 7, slug: "hello world".to_string() };
//! assert_eq!(
//!     replace_parameters(&post, "/posts/:id/:slug"),
//!     "/posts/7/hello%20world"
//! );
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

static PARAMETER_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r":(\w+)").unwrap());

/// Renders a scalar JSON value as a URL token, `None` for anything else
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) => Some(String::new()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Replaces `:name` in `template` for each listed column the object exposes
///
/// Only scalar fields (strings, numbers, booleans) are substituted, URL-encoded.
/// Missing, null, array and nested-object fields leave their placeholder untouched.
///
/// # Examples
///
/// ```
/// use rusty_routes::helper::parse_values;
/// use serde_json::json;
///
/// let user = json!({ "id": 42, "tags": ["a", "b"] });
/// let url = parse_values(&user, &["id", "tags"], "/users/:id/:tags");
/// assert_eq!(url, "/users/42/:tags");
/// ```
pub fn parse_values<T, S>(object: &T, column_names: &[S], template: &str) -> String
where
    T: Serialize + ?Sized,
    S: AsRef<str>,
{
    let fields = match serde_json::to_value(object) {
        Ok(Value::Object(fields)) => fields,
        Ok(_) => return template.to_string(),
        Err(err) => {
            tracing::debug!("Cannot read placeholder values from object: {}", err);
            return template.to_string();
        }
    };

    column_names
        .iter()
        .map(|name| name.as_ref())
        .fold(template.to_string(), |url, name| {
            match fields.get(name).and_then(scalar_text) {
                Some(text) => url.replace(&format!(":{}", name), &urlencoding::encode(&text)),
                None => url,
            }
        })
}

/// Discovers every `:identifier` in `template` and substitutes it from `object`
pub fn replace_parameters<T>(object: &T, template: &str) -> String
where
    T: Serialize + ?Sized,
{
    let names: Vec<&str> = PARAMETER_TOKEN
        .captures_iter(template)
        .filter_map(|caps| caps.get(1))
        .map(|name| name.as_str())
        .collect();

    parse_values(object, &names, template)
}
