//! Segment grammar precedence tests
//!
//! The `?`, `|` and `*` modifiers interact in order-sensitive ways; every
//! combination is pinned down here.

use rstest::rstest;
use rusty_routes::helper::*;

#[rstest]
#[case("", "/")]
#[case("/", "/")]
#[case("blog", "/blog")]
#[case("/blog/", "/blog")]
#[case("blog/post/", "/blog/post")]
#[case("///blog//", "/blog")]
fn test_normalize_url(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(normalize_url(input), expected);
}

#[rstest]
#[case("/blog/post/10", &["blog", "post", "10"])]
#[case("blog//post", &["blog", "post"])]
#[case("//", &[])]
#[case("", &[])]
fn test_segmentize_url(#[case] input: &str, #[case] expected: &[&str]) {
    assert_eq!(segmentize_url(input), expected);
}

#[test]
fn test_rebuild_url_skips_empty_segments() {
    assert_eq!(rebuild_url(&["portfolio", "", "2024", ""]), "/portfolio/2024");
    assert_eq!(rebuild_url::<String>(&[]), "/");
}

#[rstest]
#[case(":path*", true)]
#[case(":path", false)]
#[case("path*", false)]
#[case(":*", true)]
#[case(":x|^a*", true)]
fn test_segment_is_wildcard(#[case] segment: &str, #[case] expected: bool) {
    assert_eq!(segment_is_wildcard(segment), expected);
}

#[rstest]
#[case(":x", false)]
#[case(":x?", true)]
#[case(":x?val", true)]
#[case(":x?val|regex", true)]
#[case(":x?|regex", true)]
#[case(":x|regex?", false)]
#[case(":x|^[0-9]?$", false)]
#[case(":x|regex", false)]
fn test_segment_is_optional(#[case] segment: &str, #[case] expected: bool) {
    assert_eq!(segment_is_optional(segment), expected);
}

#[rstest]
#[case(":post_id", "post_id")]
#[case(":post_id?", "post_id")]
#[case(":post_id?10", "post_id")]
#[case(":post_id|^[0-9]+$", "post_id")]
#[case(":post_id?|^[0-9]+$", "post_id")]
#[case(":post_id|^[0-9]?$", "post_id")]
#[case(":largecode*", "largecode")]
#[case(":x?*", "x?")]
#[case("static", "static")]
fn test_parameter_name(#[case] segment: &str, #[case] expected: &str) {
    assert_eq!(parameter_name(segment), expected);
}

#[rstest]
#[case(":post_id|^[0-9]+$", Some("/^[0-9]+$/"))]
#[case(":post_id?|^[a-z\\-]+$", Some("/^[a-z\\-]+$/"))]
#[case(":post_id|a|b", Some("/a|b/"))]
#[case(":post_id|", None)]
#[case(":post_id?", None)]
fn test_segment_regexp(#[case] segment: &str, #[case] expected: Option<&str>) {
    assert_eq!(segment_regexp(segment).as_deref(), expected);
}

#[rstest]
#[case(":x", None)]
#[case(":x?", None)]
#[case(":x?val", Some("val"))]
#[case(":x?val|regex", Some("val"))]
#[case(":x?|regex", None)]
#[case(":year?noYear", Some("noYear"))]
#[case(":x|a?b", None)]
#[case(":x|regex?", None)]
fn test_segment_default_value(#[case] segment: &str, #[case] expected: Option<&str>) {
    assert_eq!(segment_default_value(segment), expected);
}

#[test]
fn test_replace_parameters_from_struct() {
    #[derive(serde::Serialize)]
    struct Author {
        author_id: u64,
        details: Option<String>,
        name: String,
    }

    let author = Author {
        author_id: 9,
        details: None,
        name: "Ada Lovelace".to_string(),
    };

    assert_eq!(
        replace_parameters(&author, "/authors/:author_id/:details/:name"),
        "/authors/9/:details/Ada%20Lovelace"
    );
}
