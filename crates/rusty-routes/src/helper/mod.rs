//! URL segment grammar primitives
//!
//! All functions are **pure**: given same input, always produce same output with no side effects.
//!
//! # Segment grammar
//!
//! A pattern is split on `/` into segments. A segment is either static text or a
//! dynamic parameter beginning with `:`. Dynamic segments may carry modifiers:
//!
//! - `?default` → optional, with an optional literal default (`:page?1`)
//! - `|regex` → the captured value must satisfy `regex` (`:id|^[0-9]+$`)
//! - trailing `*` → wildcard, absorbs extra URL depth (`:path*`)
//!
//! When both `?` and `|` are present, whichever comes first ends the parameter
//! name. A `?` only marks the segment optional when it precedes the first `|`,
//! so a regex body may itself contain `?`.

use std::borrow::Cow;

pub mod values;
pub use values::{parse_values, replace_parameters};

/// Checks whether a URL is already in normalized form
///
/// # Rules
///
/// - Must start with exactly one `/`
/// - Must not end with `/` (except root `/`)
///
/// # Examples
///
/// ```
/// use rusty_routes::helper::is_normalized_url;
///
/// assert!(is_normalized_url("/"));
/// assert!(is_normalized_url("/blog/post"));
///
/// assert!(!is_normalized_url(""));
/// assert!(!is_normalized_url("blog")); // Missing leading /
/// assert!(!is_normalized_url("/blog/")); // Trailing /
/// assert!(!is_normalized_url("//blog")); // Doubled leading /
/// ```
pub fn is_normalized_url(url: &str) -> bool {
    if url == "/" {
        return true;
    }

    url.starts_with('/') && !url.starts_with("//") && !url.ends_with('/')
}

/// Normalizes a URL to exactly one leading `/` and no trailing `/`
///
/// Returns `Cow::Borrowed` when the input is already normalized. Inner
/// doubled slashes are preserved; [`segmentize_url`] is what collapses them.
///
/// # Examples
///
/// ```
/// use rusty_routes::helper::normalize_url;
/// use std::borrow::Cow;
///
/// assert!(matches!(normalize_url("/blog"), Cow::Borrowed("/blog")));
/// assert_eq!(normalize_url("blog/post/"), "/blog/post");
/// assert_eq!(normalize_url("///blog///"), "/blog");
/// assert_eq!(normalize_url(""), "/");
/// ```
pub fn normalize_url(url: &str) -> Cow<'_, str> {
    if is_normalized_url(url) {
        return Cow::Borrowed(url);
    }

    let trimmed = url.trim_matches('/');
    if trimmed.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(format!("/{}", trimmed))
    }
}

/// Splits a URL into its non-empty `/`-delimited segments
///
/// Consecutive slashes collapse, so `a//b` yields `["a", "b"]`.
///
/// # Examples
///
/// ```
/// use rusty_routes::helper::segmentize_url;
///
/// assert_eq!(segmentize_url("/blog//post/10/"), vec!["blog", "post", "10"]);
/// assert!(segmentize_url("/").is_empty());
/// ```
pub fn segmentize_url(url: &str) -> Vec<&str> {
    url.split('/').filter(|s| !s.is_empty()).collect()
}

/// Joins segments back into a normalized URL, skipping empty ones
///
/// # Examples
///
/// ```
/// use rusty_routes::helper::rebuild_url;
///
/// assert_eq!(rebuild_url(&["blog", "", "post"]), "/blog/post");
/// assert_eq!(rebuild_url::<&str>(&[]), "/");
/// ```
pub fn rebuild_url<S: AsRef<str>>(segments: &[S]) -> String {
    let joined = segments
        .iter()
        .map(|s| s.as_ref())
        .filter(|s| !s.is_empty())
        .fold(String::new(), |mut url, segment| {
            url.push('/');
            url.push_str(segment);
            url
        });

    normalize_url(&joined).into_owned()
}

/// Strips the leading `:` of a dynamic segment
fn strip_marker(segment: &str) -> &str {
    segment.strip_prefix(':').unwrap_or(segment)
}

/// Returns true for dynamic segments, i.e. segments starting with `:`
pub fn segment_is_dynamic(segment: &str) -> bool {
    segment.starts_with(':')
}

/// Returns true for `:name*` wildcard segments
///
/// # Examples
///
/// ```
/// use rusty_routes::helper::segment_is_wildcard;
///
/// assert!(segment_is_wildcard(":path*"));
/// assert!(!segment_is_wildcard("path*"));
/// assert!(!segment_is_wildcard(":path"));
/// ```
pub fn segment_is_wildcard(segment: &str) -> bool {
    segment.starts_with(':') && segment.ends_with('*')
}

/// Returns true when the segment carries an optional marker
///
/// The `?` only counts when no `|` exists or when it comes before the first `|`.
///
/// # Examples
///
/// ```
/// use rusty_routes::helper::segment_is_optional;
///
/// assert!(segment_is_optional(":page?"));
/// assert!(segment_is_optional(":x?val|regex"));
/// assert!(!segment_is_optional(":x|regex?"));
/// assert!(!segment_is_optional(":x"));
/// ```
pub fn segment_is_optional(segment: &str) -> bool {
    let rest = strip_marker(segment);
    match (rest.find('?'), rest.find('|')) {
        (None, _) => false,
        (Some(_), None) => true,
        (Some(question), Some(pipe)) => question < pipe,
    }
}

/// Extracts the parameter name from a dynamic segment
///
/// Wildcards are cut at the first `*`; otherwise the name ends at the
/// earliest `?` or `|`.
///
/// # Examples
///
/// ```
/// use rusty_routes::helper::parameter_name;
///
/// assert_eq!(parameter_name(":post_id"), "post_id");
/// assert_eq!(parameter_name(":post_id?|^[0-9]+$"), "post_id");
/// assert_eq!(parameter_name(":post_id|^[0-9]+?$"), "post_id");
/// assert_eq!(parameter_name(":largecode*"), "largecode");
/// ```
pub fn parameter_name(segment: &str) -> &str {
    let rest = strip_marker(segment);

    if segment_is_wildcard(segment) {
        if let Some(star) = rest.find('*') {
            return &rest[..star];
        }
    }

    match (rest.find('?'), rest.find('|')) {
        (Some(question), Some(pipe)) => &rest[..question.min(pipe)],
        (Some(end), None) | (None, Some(end)) => &rest[..end],
        (None, None) => rest,
    }
}

/// Returns the raw regex body that follows the first `|`, if non-empty
pub fn segment_constraint(segment: &str) -> Option<&str> {
    segment
        .split_once('|')
        .map(|(_, body)| body)
        .filter(|body| !body.is_empty())
}

/// Returns the segment's regex constraint wrapped in `/` delimiters
///
/// # Examples
///
/// ```
/// use rusty_routes::helper::segment_regexp;
///
/// assert_eq!(segment_regexp(":id|^[0-9]+$"), Some("/^[0-9]+$/".to_string()));
/// assert_eq!(segment_regexp(":id|"), None);
/// assert_eq!(segment_regexp(":id"), None);
/// ```
pub fn segment_regexp(segment: &str) -> Option<String> {
    segment_constraint(segment).map(|body| format!("/{}/", body))
}

/// Returns the literal default declared between `?` and the next `|`
///
/// A `?` after the first `|` belongs to the regex body and declares nothing.
///
/// # Examples
///
/// ```
/// use rusty_routes::helper::segment_default_value;
///
/// assert_eq!(segment_default_value(":year?noYear"), Some("noYear"));
/// assert_eq!(segment_default_value(":page?1|^[0-9]+$"), Some("1"));
/// assert_eq!(segment_default_value(":page?"), None);
/// assert_eq!(segment_default_value(":page"), None);
/// assert_eq!(segment_default_value(":page|^[0-9]?$"), None);
/// ```
pub fn segment_default_value(segment: &str) -> Option<&str> {
    let question = segment.find('?')?;
    if segment.find('|').is_some_and(|pipe| pipe < question) {
        return None;
    }

    let after = &segment[question + 1..];
    let end = after.find('|').unwrap_or(after.len());

    Some(&after[..end]).filter(|value| !value.is_empty())
}
