//! # Rusty Routes
//!
//! A named-route URL matcher and reverse URL builder with support for:
//! - Static segments (`/about`), matched case-insensitively
//! - Dynamic parameters (`/users/:id`)
//! - Optional parameters with defaults (`/list/:page?1`)
//! - Regex-constrained parameters (`/blog/post/:post_id|^[0-9]+$`)
//! - Wildcard parameters spanning several segments (`/files/:path*/edit`)
//! - Condition and after-match callbacks per rule
//! - Reverse URL generation from a route name and parameters
//!
//! The router performs no I/O; it is a pure string transformation engine that
//! a dispatcher consults with the request path.
//!
//! ## Example
//!
//! ```
//! use rusty_routes::Router;
//!
//! let mut router = Router::new();
//! router.route("blogPost", "/blog/post/:post_id?|^[0-9]+$").unwrap();
//! router.route("files", "/color/:color/largecode/:largecode*/edit").unwrap();
//!
//! let m = router.match_route("/blog/post/10").unwrap();
//! assert_eq!(m.route_name(), "blogPost");
//! assert_eq!(m.param("post_id"), Some("10"));
//!
//! let m = router
//!     .match_route("color/brown/largecode/code/with/slashes/edit")
//!     .unwrap();
//! assert_eq!(m.param("largecode"), Some("code/with/slashes"));
//!
//! let url = router.url_for_params("blogPost", &[("post_id", "42")]);
//! assert_eq!(url.as_deref(), Some("/blog/post/42"));
//! ```

use std::collections::HashMap;

// ============================================================================
// Module Declarations
// ============================================================================

pub mod config;
mod error;
pub mod helper;
pub mod router;
pub mod rule;

pub use config::{RouteEntry, RouterConfig};
pub use error::RouterError;
pub use router::{RouteMatch, Router, DEFAULT_VALUE};
pub use rule::{AfterMatchFn, ConditionFn, Rule, Segment};

/// Parameters extracted by a match or supplied for URL generation
///
/// A `None` value is an optional parameter that is unset, or an explicitly
/// empty value when generating a URL.
pub type Params = HashMap<String, Option<String>>;
