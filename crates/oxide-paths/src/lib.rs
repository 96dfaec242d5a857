//! # oxide-paths
//!
//! URI template matching on a prefix tree.
//!
//! This crate provides:
//! - Template parsing (`/page/{title}`, `{/optional}`, `{+rest}`)
//! - A build-once, query-many index mapping templates to payloads
//! - Lookups costing one hashed step per path segment
//! - Literal > variable > rest precedence, without backtracking
//!
//! ## Quick Start
//!
//! ```
//! use oxide_paths::Paths;
//!
//! let paths = Paths::new([
//!     ("/", "root"),
//!     ("/page/{title}", "page"),
//!     ("/page/{title}/html/{revision}", "revision"),
//! ])
//! .unwrap();
//!
//! let found = paths.lookup("/page/Foo/html/42").unwrap();
//! assert_eq!(*found.value, "revision");
//! assert_eq!(found.pattern, "/page/{title}/html/{revision}");
//! assert_eq!(found.params.get("revision"), Some("42"));
//!
//! assert_eq!(paths.lookup("").map(|m| *m.value), Some("root"));
//! ```
//!
//! ## Template Syntax
//!
//! | Template             | Matches                              | Binds            |
//! |----------------------|--------------------------------------|------------------|
//! | `/page`              | `/page`                              |                  |
//! | `/page/{title}`      | `/page/Foo`, `/page/`                | `title`          |
//! | `/page{/title}`      | `/page`, `/page/`, `/page/Foo`       | `/title`         |
//! | `/files/{+path}`     | `/files/a`, `/files/a/b`, `/files/`  | `+path`          |
//! | `/{site:example.org}`| `/example.org` only                  | `site`           |
//!
//! Optional and rest variables bind their name with the modifier prefix.
//! Rest captures join the remaining segments with `/`, percent-encoding each
//! segment, so an escaped `%2F` inside a segment stays distinguishable from
//! a separator.
//!
//! ## Configuration
//!
//! An index can be deserialized from any serde format holding a map of
//! templates to payloads:
//!
//! ```
//! use oxide_paths::Paths;
//!
//! let paths: Paths<String> =
//!     serde_json::from_str(r#"{ "/users/{id}": "user_detail" }"#).unwrap();
//! assert_eq!(paths.lookup("/users/7").unwrap().value, "user_detail");
//! ```
//!
//! Templates that collide are rejected by default; see [`ConflictPolicy`].

mod builder;
mod error;
mod node;
mod params;
mod paths;
mod pattern;
mod split;

pub use builder::{ConflictPolicy, PathsBuilder};
pub use error::{PathsError, Result};
pub use params::{PathMatch, PathParams};
pub use paths::Paths;
pub use pattern::{parse, Modifier, Segment, Variable};
pub use split::split;
