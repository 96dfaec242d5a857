//! URI template parsing.

use std::fmt;

use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use regex::Regex;

use crate::error::{PathsError, Result};

/// Template tokens: either a `/`-led segment (`/literal`, `/{name}`,
/// `/{+name}`), or a brace-led modifier (`{/name}`, `{+name}`). Any
/// variable may carry a `:constraint`.
static TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(/)(?:\{([+])?([^:}/]+)(?::([^}]+))?\}|([^/{]*))|(?:\{([/+]))([^:}/]+)(?::([^}]+))?\}",
    )
    .expect("template token regex should be valid")
});

/// How a variable segment consumes the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// `{name}`: exactly one segment.
    Required,
    /// `{/name}`: one segment, or none at all.
    Optional,
    /// `{+name}`: this and every following segment.
    Rest,
}

impl Modifier {
    /// Returns the prefix character written inside the braces.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Required => "",
            Self::Optional => "/",
            Self::Rest => "+",
        }
    }

    fn from_prefix(prefix: Option<&str>) -> Self {
        match prefix {
            Some("/") => Self::Optional,
            Some("+") => Self::Rest,
            _ => Self::Required,
        }
    }
}

/// A variable segment of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    /// The bare variable name.
    pub name: String,
    /// How the variable consumes the path.
    pub modifier: Modifier,
    /// A literal the variable is pinned to, as in `{domain:example.org}`.
    pub constraint: Option<String>,
}

impl Variable {
    /// Returns the key the variable binds in
    /// [`PathParams`](crate::PathParams): the name prefixed by its
    /// modifier, so `{/p}` binds `"/p"` and `{+rest}` binds `"+rest"`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}{}", self.modifier.prefix(), self.name)
    }
}

/// A parsed template segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A literal segment, percent-decoded.
    Literal(String),
    /// A variable segment.
    Variable(Variable),
}

impl Segment {
    /// Returns `true` for a `{+name}` segment.
    #[must_use]
    pub const fn is_rest(&self) -> bool {
        matches!(
            self,
            Self::Variable(Variable {
                modifier: Modifier::Rest,
                ..
            })
        )
    }

    /// Returns `true` for a `{/name}` segment.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        matches!(
            self,
            Self::Variable(Variable {
                modifier: Modifier::Optional,
                ..
            })
        )
    }

    /// Returns the parameter key this segment binds, if any.
    #[must_use]
    pub fn param_key(&self) -> Option<String> {
        match self {
            Self::Literal(_) => None,
            Self::Variable(var) => Some(var.key()),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => write!(f, "{text}"),
            Self::Variable(var) => {
                write!(f, "{{{}{}", var.modifier.prefix(), var.name)?;
                if let Some(constraint) = &var.constraint {
                    write!(f, ":{constraint}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// Parses a URI template into its segments.
///
/// Template syntax:
/// - `/page` - literal segment (percent-decoded)
/// - `/page/{title}` - required variable
/// - `/page{/revision}` - optional variable
/// - `/files/{+path}` - rest variable, consuming the remaining path
/// - `/{domain:en.wikipedia.org}` - variable pinned to a literal
///
/// A lone `/` is one empty literal segment. Text outside any token is
/// skipped.
///
/// # Errors
///
/// Returns [`PathsError::InvalidEncoding`] when a literal's escapes do not
/// decode to UTF-8.
///
/// # Panics
///
/// Panics if the tokenizer yields a match it cannot classify, which the
/// token grammar rules out.
///
/// # Example
///
/// ```
/// use oxide_paths::{parse, Modifier, Segment};
///
/// let segments = parse("/page/{title}{/revision}").unwrap();
/// assert_eq!(segments.len(), 3);
/// assert_eq!(segments[0], Segment::Literal("page".to_string()));
/// assert!(matches!(
///     &segments[2],
///     Segment::Variable(var) if var.modifier == Modifier::Optional
/// ));
/// ```
pub fn parse(template: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();

    for caps in TOKEN.captures_iter(template) {
        let segment = if caps.get(1).is_some() {
            if let Some(literal) = caps.get(5) {
                let text = percent_decode_str(literal.as_str())
                    .decode_utf8()
                    .map_err(|_| PathsError::InvalidEncoding {
                        pattern: template.to_string(),
                    })?;
                Segment::Literal(text.into_owned())
            } else if let Some(name) = caps.get(3) {
                Segment::Variable(Variable {
                    name: name.as_str().to_string(),
                    modifier: Modifier::from_prefix(caps.get(2).map(|m| m.as_str())),
                    constraint: caps.get(4).map(|m| m.as_str().to_string()),
                })
            } else {
                unreachable!("unclassified template token in '{template}'")
            }
        } else if let Some(name) = caps.get(7) {
            Segment::Variable(Variable {
                name: name.as_str().to_string(),
                modifier: Modifier::from_prefix(caps.get(6).map(|m| m.as_str())),
                constraint: caps.get(8).map(|m| m.as_str().to_string()),
            })
        } else {
            unreachable!("unclassified template token in '{template}'")
        };
        segments.push(segment);
    }

    Ok(segments)
}
