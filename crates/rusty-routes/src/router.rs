//! Rule registry, match orchestration and reverse URL generation

use std::collections::HashMap;

use crate::config::RouterConfig;
use crate::error::RouterError;
use crate::helper::{
    normalize_url, parameter_name, rebuild_url, segment_default_value, segment_is_dynamic,
    segment_is_optional, segmentize_url,
};
use crate::rule::Rule;
use crate::Params;

/// Literal written into generated URLs for required parameters nobody supplied
pub const DEFAULT_VALUE: &str = "default";

/// Result of matching a URL against the router
///
/// Borrowed from the router, so a shared `&Router` can serve any number of
/// concurrent matches.
#[derive(Debug, Clone)]
pub struct RouteMatch<'r> {
    rule: &'r Rule,
    params: Params,
}

impl<'r> RouteMatch<'r> {
    /// Name of the accepted rule
    pub fn route_name(&self) -> &'r str {
        self.rule.name()
    }

    pub fn rule(&self) -> &'r Rule {
        self.rule
    }

    /// Extracted parameters, after any after-match transform
    ///
    /// `None` marks an optional parameter that was absent and has no default.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Value of one parameter, `None` when missing or unset
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).and_then(|value| value.as_deref())
    }

    pub fn into_params(self) -> Params {
        self.params
    }
}

/// Ordered registry of named [`Rule`]s
///
/// Rules are tried in registration order unless [`Router::sort_rules`] has
/// been applied. Registration (`route`, `sort_rules`, `reset`) is expected to
/// finish before the router is shared for matching.
///
/// # Examples
///
/// ```
/// use rusty_routes::Router;
///
/// let mut router = Router::new();
/// router.route("authorDetails", "/authors/:author_id?/:details?").unwrap();
/// router.route("blogPost", "blog/post").unwrap();
/// router.route("jobRequest", "job/:type?request/:id").unwrap();
///
/// assert!(router.match_route("/blog/post/10").is_none());
///
/// let m = router.match_route("job/test/4").unwrap();
/// assert_eq!(m.route_name(), "jobRequest");
/// assert_eq!(m.param("type"), Some("test"));
/// assert_eq!(m.param("id"), Some("4"));
/// ```
#[derive(Debug, Clone)]
pub struct Router {
    rules: Vec<Rule>,
    default_value: String,
}

impl Router {
    /// Creates an empty router using [`DEFAULT_VALUE`] for reverse generation
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            default_value: DEFAULT_VALUE.to_string(),
        }
    }

    /// Builds a router from a loaded route table
    pub fn from_config(config: &RouterConfig) -> anyhow::Result<Self> {
        config.build_router()
    }

    // ========================================================================
    // Functional Builder Methods
    // ========================================================================

    /// Replaces the literal used for unsupplied required parameters
    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }

    /// Adds a prebuilt rule (functional builder)
    ///
    /// # Examples
    ///
    /// ```
    /// use rusty_routes::{Router, Rule};
    ///
    /// let router = Router::new()
    ///     .with_rule(Rule::from_pattern("about", "/about").unwrap())
    ///     .with_rule(Rule::from_pattern("user", "/users/:id").unwrap());
    /// assert_eq!(router.len(), 2);
    /// ```
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.add_rule(rule);
        self
    }

    /// Sorts rules by specificity (functional builder)
    pub fn with_sorted_rules(mut self) -> Self {
        self.sort_rules();
        self
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Compiles `pattern` and registers it under `name`
    ///
    /// Returns the stored rule so callbacks can be chained onto it. A name that
    /// is already registered is replaced in place, keeping its position.
    ///
    /// # Examples
    ///
    /// ```
    /// use rusty_routes::Router;
    ///
    /// let mut router = Router::new();
    /// router
    ///     .route("post", "/blog/post/:post_id")
    ///     .unwrap()
    ///     .set_condition(|params, _url| params.contains_key("post_id"));
    /// ```
    pub fn route(
        &mut self,
        name: impl Into<String>,
        pattern: impl Into<String>,
    ) -> Result<&mut Rule, RouterError> {
        let rule = Rule::from_pattern(name, pattern)?;
        Ok(self.add_rule(rule))
    }

    /// Registers a prebuilt rule, replacing any rule with the same name
    pub fn add_rule(&mut self, rule: Rule) -> &mut Rule {
        tracing::debug!("Registering route `{}` -> `{}`", rule.name(), rule.pattern());

        let index = match self.rules.iter().position(|r| r.name() == rule.name()) {
            Some(index) => {
                tracing::warn!("Route `{}` registered twice, replacing", rule.name());
                self.rules[index] = rule;
                index
            }
            None => {
                self.rules.push(rule);
                self.rules.len() - 1
            }
        };

        &mut self.rules[index]
    }

    /// Removes a rule by name, returning it
    pub fn remove(&mut self, name: &str) -> Option<Rule> {
        let index = self.rules.iter().position(|r| r.name() == name)?;
        Some(self.rules.remove(index))
    }

    /// Orders rules by specificity
    ///
    /// More static segments first; ties go to fewer dynamic segments. The sort
    /// is stable, so equally specific rules keep their registration order.
    pub fn sort_rules(&mut self) {
        self.rules.sort_by(|a, b| {
            b.static_segment_count()
                .cmp(&a.static_segment_count())
                .then_with(|| a.dynamic_segment_count().cmp(&b.dynamic_segment_count()))
        });
        tracing::debug!("Sorted {} routes by specificity", self.rules.len());
    }

    /// Drops every registered rule
    pub fn reset(&mut self) {
        self.rules.clear();
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name() == name)
    }

    pub fn rule_mut(&mut self, name: &str) -> Option<&mut Rule> {
        self.rules.iter_mut().find(|r| r.name() == name)
    }

    /// Rules in matching order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    // ========================================================================
    // Matching
    // ========================================================================

    /// Matches a URL against the registered rules
    ///
    /// The first rule that matches structurally and whose condition does not
    /// reject wins. A rejected rule is skipped, never retried. The winner's
    /// after-match transform, if any, replaces the parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use rusty_routes::Router;
    ///
    /// let mut router = Router::new();
    /// router.route("authorDetails", "/authors/:author_id?/:details?").unwrap();
    ///
    /// let m = router.match_route("/authors").unwrap();
    /// assert_eq!(m.params().get("author_id"), Some(&None));
    /// assert_eq!(m.params().get("details"), Some(&None));
    /// ```
    pub fn match_route(&self, url: &str) -> Option<RouteMatch<'_>> {
        let url = normalize_url(url);

        let matched = self.rules.iter().find_map(|rule| {
            let params = rule.resolve_url(&url)?;

            if !rule.check_condition(&params, &url) {
                tracing::debug!("Route `{}` matched `{}` but its condition rejected it", rule.name(), url);
                return None;
            }

            let params = rule.apply_after_match(params, &url);
            Some(RouteMatch { rule, params })
        });

        match &matched {
            Some(route_match) => {
                tracing::debug!("Matched `{}` to route `{}`", url, route_match.route_name())
            }
            None => tracing::debug!("No route matched `{}`", url),
        }

        matched
    }

    // ========================================================================
    // Reverse Generation
    // ========================================================================

    /// Generates a URL for a named rule
    ///
    /// Returns `None` if no rule has that name.
    ///
    /// # Examples
    ///
    /// ```
    /// use rusty_routes::{Params, Router};
    ///
    /// let mut router = Router::new();
    /// router.route("post", "/blog/post/:post_id").unwrap();
    ///
    /// let params = Params::from([("post_id".to_string(), Some("10".to_string()))]);
    /// assert_eq!(router.url("post", &params), Some("/blog/post/10".to_string()));
    /// assert_eq!(router.url("missing", &params), None);
    /// ```
    pub fn url(&self, name: &str, params: &Params) -> Option<String> {
        self.rule(name)
            .map(|rule| self.url_from_pattern(rule.pattern(), params))
    }

    /// Convenience wrapper over [`Router::url`] taking plain string pairs
    ///
    /// # Examples
    ///
    /// ```
    /// use rusty_routes::Router;
    ///
    /// let mut router = Router::new();
    /// router.route("post", "/posts/:year/:slug").unwrap();
    ///
    /// let url = router.url_for_params("post", &[("year", "2024"), ("slug", "hello-world")]);
    /// assert_eq!(url.as_deref(), Some("/posts/2024/hello-world"));
    /// ```
    pub fn url_for_params(&self, name: &str, params: &[(&str, &str)]) -> Option<String> {
        let param_map: Params = params
            .iter()
            .map(|(k, v)| (k.to_string(), Some(v.to_string())))
            .collect();

        self.url(name, &param_map)
    }

    /// Generates a URL from a raw pattern
    ///
    /// Parameter keys may be written with or without their leading `:`; when
    /// both spellings are given, the `:`-prefixed key wins. Each
    /// dynamic segment takes, in order of preference: the supplied value (an
    /// explicit `None` counts as supplied), the segment's default when it is
    /// optional, or the router's default literal.
    ///
    /// The URL ends at the last non-empty static segment, supplied value or
    /// default literal, so unsupplied optional segments after it vanish. Empty
    /// segments before that point are filled with the default literal.
    ///
    /// # Examples
    ///
    /// ```
    /// use rusty_routes::{Params, Router};
    ///
    /// let router = Router::new();
    /// let pattern = "/portfolio/:year?noYear/:category?noCategory/:budget?noBudget";
    ///
    /// let params = Params::from([("budget".to_string(), Some("50000-above".to_string()))]);
    /// assert_eq!(
    ///     router.url_from_pattern(pattern, &params),
    ///     "/portfolio/noYear/noCategory/50000-above"
    /// );
    /// assert_eq!(router.url_from_pattern(pattern, &Params::new()), "/portfolio");
    /// ```
    pub fn url_from_pattern(&self, pattern: &str, params: &Params) -> String {
        // plain keys first so `:name` overrides `name`
        let mut supplied: HashMap<&str, Option<&str>> = HashMap::with_capacity(params.len());
        for (key, value) in params.iter().filter(|(key, _)| !key.starts_with(':')) {
            supplied.insert(key.as_str(), value.as_deref());
        }
        for (key, value) in params.iter() {
            if let Some(name) = key.strip_prefix(':') {
                supplied.insert(name, value.as_deref());
            }
        }

        // (token, whether the token can end the URL)
        let tokens: Vec<(Option<&str>, bool)> = segmentize_url(pattern)
            .into_iter()
            .map(|segment| {
                if !segment_is_dynamic(segment) {
                    return (Some(segment), true);
                }

                let name = parameter_name(segment);
                match supplied.get(name) {
                    Some(value) => (*value, true),
                    None if segment_is_optional(segment) => (segment_default_value(segment), false),
                    None => (Some(self.default_value.as_str()), true),
                }
            })
            .collect();

        let Some(last) = tokens.iter().rposition(|(token, anchors)| {
            *anchors && token.is_some_and(|value| !value.is_empty())
        }) else {
            return rebuild_url::<&str>(&[]);
        };

        let filled: Vec<&str> = tokens[..=last]
            .iter()
            .map(|(token, _)| {
                token
                    .filter(|value| !value.is_empty())
                    .unwrap_or(self.default_value.as_str())
            })
            .collect();

        rebuild_url(&filled)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
