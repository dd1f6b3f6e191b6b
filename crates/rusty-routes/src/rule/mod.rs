//! Named route rules
//!
//! A [`Rule`] is one compiled pattern. It knows how to match a URL against
//! itself and extract parameters; the [`Router`](crate::Router) decides which
//! rule wins.

use std::fmt;
use std::sync::Arc;

use crate::error::RouterError;
use crate::helper::{rebuild_url, segmentize_url};
use crate::Params;

pub mod segment;

pub use segment::{classify_segment, DynamicSegment, Segment, SegmentConstraint};

/// Predicate run after a structural match; `false` rejects the rule
pub type ConditionFn = Arc<dyn Fn(&Params, &str) -> bool + Send + Sync>;

/// Transform run on the parameters of the accepted rule
pub type AfterMatchFn = Arc<dyn Fn(Params, &str) -> Params + Send + Sync>;

/// A compiled, named route pattern
///
/// # Examples
///
/// ```
/// use rusty_routes::Rule;
///
/// let rule = Rule::from_pattern("blogPost", "/blog/post/:post_id?|^[0-9]+$").unwrap();
/// assert_eq!(rule.static_url(), "/blog/post");
/// assert_eq!(rule.dynamic_segment_count(), 1);
///
/// let params = rule.resolve_url("/blog/post/10").unwrap();
/// assert_eq!(params.get("post_id"), Some(&Some("10".to_string())));
///
/// assert!(rule.resolve_url("/blog/post/ten").is_none());
/// ```
#[derive(Clone)]
pub struct Rule {
    name: String,
    pattern: String,
    segments: Vec<Segment>,
    static_url: String,
    static_segment_count: usize,
    dynamic_segment_count: usize,
    wild_segment_count: usize,
    /// Position of the single wildcard segment, if any
    wildcard_index: Option<usize>,
    /// Start of the trailing run of optional segments
    optional_from: usize,
    condition: Option<ConditionFn>,
    after_match: Option<AfterMatchFn>,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("pattern", &self.pattern)
            .field("segments", &self.segments)
            .field("static_url", &self.static_url)
            .field("has_condition", &self.condition.is_some())
            .field("has_after_match", &self.after_match.is_some())
            .finish()
    }
}

impl Rule {
    /// Compiles `pattern` into a rule called `name`
    ///
    /// Counts static, dynamic and wildcard segments and builds the static URL
    /// (static segments only, in their relative order). Patterns with more
    /// than one wildcard segment are rejected.
    pub fn from_pattern(
        name: impl Into<String>,
        pattern: impl Into<String>,
    ) -> Result<Self, RouterError> {
        let name = name.into();
        let pattern = pattern.into();

        let segments: Vec<Segment> = segmentize_url(&pattern)
            .into_iter()
            .map(classify_segment)
            .collect();

        let static_segments: Vec<&str> = segments
            .iter()
            .filter(|segment| segment.is_static())
            .map(Segment::raw)
            .collect();
        let static_segment_count = static_segments.len();
        let dynamic_segment_count = segments.len() - static_segment_count;
        let static_url = rebuild_url(&static_segments);

        let wild_segment_count = segments.iter().filter(|s| s.is_wildcard()).count();
        if wild_segment_count > 1 {
            return Err(RouterError::MultipleWildcards {
                name,
                pattern,
                count: wild_segment_count,
            });
        }
        let wildcard_index = segments.iter().position(Segment::is_wildcard);

        let trailing_optional = segments
            .iter()
            .rev()
            .take_while(|segment| segment.is_optional())
            .count();
        let optional_from = segments.len() - trailing_optional;

        Ok(Self {
            name,
            pattern,
            segments,
            static_url,
            static_segment_count,
            dynamic_segment_count,
            wild_segment_count,
            wildcard_index,
            optional_from,
            condition: None,
            after_match: None,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    /// The pattern string this rule was compiled from
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Recompiles the rule from a new pattern, keeping name and callbacks
    ///
    /// On error the rule is left unchanged.
    pub fn set_pattern(&mut self, pattern: impl Into<String>) -> Result<&mut Self, RouterError> {
        let mut compiled = Rule::from_pattern(self.name.clone(), pattern)?;
        compiled.condition = self.condition.take();
        compiled.after_match = self.after_match.take();
        *self = compiled;
        Ok(self)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Pattern with only its static segments, e.g. `/blog/post` for `/blog/post/:id`
    pub fn static_url(&self) -> &str {
        &self.static_url
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn static_segment_count(&self) -> usize {
        self.static_segment_count
    }

    pub fn dynamic_segment_count(&self) -> usize {
        self.dynamic_segment_count
    }

    pub fn wild_segment_count(&self) -> usize {
        self.wild_segment_count
    }

    pub fn condition(&self) -> Option<&ConditionFn> {
        self.condition.as_ref()
    }

    /// Sets the predicate consulted after a structural match
    ///
    /// Returning `false` makes the router skip this rule and keep scanning.
    pub fn set_condition<F>(&mut self, condition: F) -> &mut Self
    where
        F: Fn(&Params, &str) -> bool + Send + Sync + 'static,
    {
        self.condition = Some(Arc::new(condition));
        self
    }

    /// Builder form of [`Rule::set_condition`]
    pub fn with_condition<F>(mut self, condition: F) -> Self
    where
        F: Fn(&Params, &str) -> bool + Send + Sync + 'static,
    {
        self.set_condition(condition);
        self
    }

    pub fn after_match(&self) -> Option<&AfterMatchFn> {
        self.after_match.as_ref()
    }

    /// Sets the transform whose result replaces the matched parameters
    pub fn set_after_match<F>(&mut self, after_match: F) -> &mut Self
    where
        F: Fn(Params, &str) -> Params + Send + Sync + 'static,
    {
        self.after_match = Some(Arc::new(after_match));
        self
    }

    /// Builder form of [`Rule::set_after_match`]
    pub fn with_after_match<F>(mut self, after_match: F) -> Self
    where
        F: Fn(Params, &str) -> Params + Send + Sync + 'static,
    {
        self.set_after_match(after_match);
        self
    }

    /// Runs the condition callback; rules without one always pass
    pub fn check_condition(&self, params: &Params, url: &str) -> bool {
        self.condition
            .as_ref()
            .map_or(true, |condition| condition(params, url))
    }

    /// Runs the after-match callback, or hands the parameters back untouched
    pub fn apply_after_match(&self, params: Params, url: &str) -> Params {
        match &self.after_match {
            Some(after_match) => after_match(params, url),
            None => params,
        }
    }

    // ========================================================================
    // Matching
    // ========================================================================

    /// Matches a URL against this rule
    ///
    /// Returns the extracted parameters on success. Unset optional parameters
    /// map to their default literal, or `None` when they declare none.
    pub fn resolve_url(&self, url: &str) -> Option<Params> {
        self.resolve_url_segments(&segmentize_url(url))
    }

    /// Matches pre-split URL segments against this rule
    ///
    /// # Algorithm
    ///
    /// 1. A wildcard rule first pulls the excess URL depth out right after the
    ///    wildcard position
    /// 2. More URL segments than pattern segments fails
    /// 3. Static segments must be present and equal ignoring ASCII case
    /// 4. Dynamic segments capture the URL segment, check the regex
    ///    constraint, or fall back to the default when optional and absent
    ///
    /// # Examples
    ///
    /// ```
    /// use rusty_routes::Rule;
    ///
    /// let rule = Rule::from_pattern("code", "/color/:color/largecode/:largecode*/edit").unwrap();
    /// let params = rule
    ///     .resolve_url_segments(&["color", "brown", "largecode", "code", "with", "slashes", "edit"])
    ///     .unwrap();
    /// assert_eq!(params["color"].as_deref(), Some("brown"));
    /// assert_eq!(params["largecode"].as_deref(), Some("code/with/slashes"));
    /// ```
    pub fn resolve_url_segments(&self, url_segments: &[&str]) -> Option<Params> {
        let mut url_segments = url_segments.to_vec();
        let wild_segments = self.capture_wildcard_segments(&mut url_segments);

        if url_segments.len() > self.segments.len() {
            tracing::trace!(
                "Rule `{}` rejected: {} URL segments for {} pattern segments",
                self.name,
                url_segments.len(),
                self.segments.len()
            );
            return None;
        }

        let mut params = Params::new();

        for (index, segment) in self.segments.iter().enumerate() {
            let candidate = url_segments.get(index).copied();

            match segment {
                Segment::Static(text) => match candidate {
                    Some(value) if value.eq_ignore_ascii_case(text) => {}
                    _ => return None,
                },
                Segment::Dynamic(dynamic) => {
                    let optional = dynamic.is_optional() && index >= self.optional_from;

                    let Some(value) = candidate else {
                        if !optional {
                            return None;
                        }
                        params.insert(
                            dynamic.name().to_string(),
                            dynamic.default_value().map(str::to_string),
                        );
                        continue;
                    };

                    if let Some(constraint) = dynamic.constraint() {
                        if !constraint.is_satisfied_by(value) {
                            return None;
                        }
                    }

                    let mut captured = value.to_string();
                    if dynamic.is_wildcard() && !wild_segments.is_empty() {
                        captured.push_str(&rebuild_url(&wild_segments));
                    }
                    params.insert(dynamic.name().to_string(), Some(captured));
                }
            }
        }

        Some(params)
    }

    /// Removes the URL segments a wildcard absorbs and returns them in order
    ///
    /// The wildcard keeps its own aligned segment; the `url - pattern` surplus
    /// right after it is drained so the rest stays aligned 1:1 with the pattern.
    fn capture_wildcard_segments<'u>(&self, url_segments: &mut Vec<&'u str>) -> Vec<&'u str> {
        let Some(wildcard_index) = self.wildcard_index else {
            return Vec::new();
        };

        let surplus = url_segments.len().saturating_sub(self.segments.len());
        if surplus == 0 || wildcard_index >= url_segments.len() {
            return Vec::new();
        }

        let start = wildcard_index + 1;
        let end = (start + surplus).min(url_segments.len());
        url_segments.drain(start..end).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value<'p>(params: &'p Params, name: &str) -> Option<&'p str> {
        params.get(name).and_then(|v| v.as_deref())
    }

    #[test]
    fn test_from_pattern_counts() {
        let rule = Rule::from_pattern("r", "/blog/:year/post/:slug?").unwrap();
        assert_eq!(rule.segment_count(), 4);
        assert_eq!(rule.static_segment_count(), 2);
        assert_eq!(rule.dynamic_segment_count(), 2);
        assert_eq!(rule.wild_segment_count(), 0);
        assert_eq!(rule.static_url(), "/blog/post");
    }

    #[test]
    fn test_from_pattern_without_static_segments() {
        let rule = Rule::from_pattern("r", ":a/:b").unwrap();
        assert_eq!(rule.static_url(), "/");
        assert_eq!(rule.static_segment_count(), 0);
    }

    #[test]
    fn test_from_pattern_rejects_two_wildcards() {
        let err = Rule::from_pattern("files", "/:a*/x/:b*").unwrap_err();
        assert!(matches!(err, RouterError::MultipleWildcards { count: 2, .. }));
    }

    #[test]
    fn test_static_match_is_case_insensitive() {
        let rule = Rule::from_pattern("about", "/about/team").unwrap();
        assert!(rule.resolve_url("/About/TEAM").is_some());
        assert!(rule.resolve_url("/about").is_none());
        assert!(rule.resolve_url("/about/team/x").is_none());
    }

    #[test]
    fn test_optional_demoted_before_required() {
        let rule = Rule::from_pattern("job", "job/:type?request/:id").unwrap();

        let params = rule.resolve_url("job/test/4").unwrap();
        assert_eq!(value(&params, "type"), Some("test"));
        assert_eq!(value(&params, "id"), Some("4"));

        // `type` is not truly optional because `id` after it is required
        assert!(rule.resolve_url("job/4").is_none());
        assert!(rule.resolve_url("job").is_none());
    }

    #[test]
    fn test_optional_default_used_when_absent() {
        let rule = Rule::from_pattern("list", "/list/:page?1").unwrap();
        let params = rule.resolve_url("/list").unwrap();
        assert_eq!(value(&params, "page"), Some("1"));
    }

    #[test]
    fn test_optional_without_default_is_none() {
        let rule = Rule::from_pattern("list", "/list/:page?").unwrap();
        let params = rule.resolve_url("/list").unwrap();
        assert_eq!(params.get("page"), Some(&None));
    }

    #[test]
    fn test_wildcard_absorbs_surplus() {
        let rule = Rule::from_pattern("files", "/files/:path*").unwrap();
        let params = rule.resolve_url("/files/a/b/c").unwrap();
        assert_eq!(value(&params, "path"), Some("a/b/c"));

        let params = rule.resolve_url("/files/a").unwrap();
        assert_eq!(value(&params, "path"), Some("a"));

        assert!(rule.resolve_url("/files").is_none());
    }

    #[test]
    fn test_wildcard_keeps_trailing_static_aligned() {
        let rule = Rule::from_pattern("edit", "/color/:color/largecode/:largecode*/edit").unwrap();
        assert!(rule
            .resolve_url("color/brown/largecode/code/with/slashes/view")
            .is_none());
    }

    #[test]
    fn test_wildcard_from_presplit_segments() {
        let rule = Rule::from_pattern("files", "/files/:path*").unwrap();
        let mut urls = vec!["files", "x", "y"];
        assert!(rule.resolve_url_segments(&urls).is_some());
        urls.push("z");
        assert_eq!(
            value(&rule.resolve_url_segments(&urls).unwrap(), "path"),
            Some("x/y/z")
        );
    }

    #[test]
    fn test_set_pattern_keeps_callbacks() {
        let mut rule = Rule::from_pattern("r", "/a/:id")
            .unwrap()
            .with_condition(|_, _| true);
        rule.set_pattern("/b/:id").unwrap();
        assert_eq!(rule.pattern(), "/b/:id");
        assert!(rule.condition().is_some());
        assert!(rule.resolve_url("/b/1").is_some());
    }

    #[test]
    fn test_set_pattern_error_leaves_rule_unchanged() {
        let mut rule = Rule::from_pattern("r", "/a/:id").unwrap();
        assert!(rule.set_pattern("/:x*/:y*").is_err());
        assert_eq!(rule.pattern(), "/a/:id");
    }

    #[test]
    fn test_callbacks_applied() {
        let rule = Rule::from_pattern("r", "/a/:id")
            .unwrap()
            .with_condition(|params, _| params.contains_key("id"))
            .with_after_match(|mut params, url| {
                params.insert("url".to_string(), Some(url.to_string()));
                params
            });

        let params = rule.resolve_url("/a/1").unwrap();
        assert!(rule.check_condition(&params, "/a/1"));
        let params = rule.apply_after_match(params, "/a/1");
        assert_eq!(value(&params, "url"), Some("/a/1"));
    }
}
