//! Compiled pattern segments
//!
//! A raw segment such as `:post_id?1|^[0-9]+$` is parsed once, when its rule is
//! compiled, into a [`Segment`]. Matching then works on the typed form instead
//! of re-reading modifiers from the string on every request.
use regex::Regex;

use crate::helper;

/// A single `/`-delimited token of a route pattern
///
/// # Examples
///
/// ```
/// use rusty_routes::rule::segment::{classify_segment, Segment};
///
/// let seg = classify_segment("blog");
/// assert!(matches!(seg, Segment::Static(_)));
///
/// let seg = classify_segment(":post_id?|^[0-9]+$");
/// let dynamic = seg.as_dynamic().unwrap();
/// assert_eq!(dynamic.name(), "post_id");
/// assert!(dynamic.is_optional());
/// assert_eq!(dynamic.constraint().unwrap().source(), "^[0-9]+$");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text, matched case-insensitively
    Static(String),
    /// `:name` parameter with its modifiers
    Dynamic(DynamicSegment),
}

/// Parsed form of a `:name` segment
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicSegment {
    raw: String,
    name: String,
    optional: bool,
    default_value: Option<String>,
    constraint: Option<SegmentConstraint>,
    wildcard: bool,
}

/// Regex constraint attached with `|`
///
/// A body that fails to compile is kept with no regex and accepts every value.
#[derive(Debug, Clone)]
pub struct SegmentConstraint {
    source: String,
    regex: Option<Regex>,
}

impl PartialEq for SegmentConstraint {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl SegmentConstraint {
    /// Compiles a raw regex body (no delimiters)
    pub fn compile(source: &str) -> Self {
        let regex = match Regex::new(source) {
            Ok(regex) => Some(regex),
            Err(err) => {
                tracing::warn!(
                    "Invalid segment constraint `{}`, accepting any value: {}",
                    source,
                    err
                );
                None
            }
        };

        Self {
            source: source.to_string(),
            regex,
        }
    }

    /// Raw regex body as written in the pattern
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether the body compiled into a usable regex
    pub fn is_valid(&self) -> bool {
        self.regex.is_some()
    }

    /// Checks a captured value, failing open for invalid constraints
    pub fn is_satisfied_by(&self, value: &str) -> bool {
        self.regex
            .as_ref()
            .map_or(true, |regex| regex.is_match(value))
    }
}

impl DynamicSegment {
    /// The pattern text this segment was parsed from
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Parameter name without the leading `:` or modifiers
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the segment was declared optional with `?`
    ///
    /// A rule only honors this when every following segment is optional too.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Literal default written after `?`, if any
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// Regex constraint written after `|`, if any
    pub fn constraint(&self) -> Option<&SegmentConstraint> {
        self.constraint.as_ref()
    }

    /// Whether the segment ends with `*` and absorbs extra URL depth
    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }
}

impl Segment {
    /// The pattern text this segment was parsed from
    pub fn raw(&self) -> &str {
        match self {
            Segment::Static(text) => text.as_str(),
            Segment::Dynamic(dynamic) => dynamic.raw(),
        }
    }

    /// Whether this is literal text
    pub fn is_static(&self) -> bool {
        matches!(self, Segment::Static(_))
    }

    /// The parsed parameter, for dynamic segments
    pub fn as_dynamic(&self) -> Option<&DynamicSegment> {
        match self {
            Segment::Dynamic(dynamic) => Some(dynamic),
            Segment::Static(_) => None,
        }
    }

    /// Declared optionality; static segments are never optional
    pub fn is_optional(&self) -> bool {
        self.as_dynamic().is_some_and(DynamicSegment::is_optional)
    }

    /// Whether this is a `:name*` wildcard
    pub fn is_wildcard(&self) -> bool {
        self.as_dynamic().is_some_and(DynamicSegment::is_wildcard)
    }
}

/// Classifies a raw pattern segment (pure function apart from the regex compile)
///
/// # Parsing Rules
///
/// 1. No leading `:` → **Static**
/// 2. Otherwise **Dynamic**, with name, optional flag, default literal, regex
///    constraint and wildcard flag derived by the [`helper`] grammar functions
pub fn classify_segment(segment: &str) -> Segment {
    if !helper::segment_is_dynamic(segment) {
        return Segment::Static(segment.to_string());
    }

    Segment::Dynamic(DynamicSegment {
        raw: segment.to_string(),
        name: helper::parameter_name(segment).to_string(),
        optional: helper::segment_is_optional(segment),
        default_value: helper::segment_default_value(segment).map(str::to_string),
        constraint: helper::segment_constraint(segment).map(SegmentConstraint::compile),
        wildcard: helper::segment_is_wildcard(segment),
    })
}
