#![allow(dead_code)]

use oxide_paths::{PathParams, Paths};

/// Builds expected params from `(key, value)` pairs.
pub fn params(pairs: &[(&str, &str)]) -> PathParams {
    pairs.iter().copied().collect()
}

/// Installs a test subscriber so `RUST_LOG=oxide_paths=trace` shows the
/// build and lookup events.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Asserts that `path` resolves to `value` with exactly `expected` bound.
pub fn assert_match<T>(paths: &Paths<T>, path: &str, value: &T, expected: &[(&str, &str)])
where
    T: PartialEq + std::fmt::Debug,
{
    let found = paths
        .lookup(path)
        .unwrap_or_else(|| panic!("Expected a match for: {path}"));
    assert_eq!(found.value, value, "Wrong payload for: {path}");
    assert_eq!(found.params, params(expected), "Wrong params for: {path}");
}

/// Asserts that `path` does not resolve.
pub fn assert_no_match<T: std::fmt::Debug>(paths: &Paths<T>, path: &str) {
    if let Some(found) = paths.lookup(path) {
        panic!("Expected no match for: {path}, got {found:?}");
    }
}

/// Templates served under every wiki domain.
pub const WIKI_TEMPLATES: &[&str] = &[
    "/page",
    "/page/",
    "/page/{title}",
    "/page/{title}/",
    "/page/{title}/html",
    "/page/{title}/html/",
    "/page/{title}/html/{revision}",
    "/page/{title}/data-parsoid",
    "/page/{title}/data-parsoid/",
    "/page/{title}/data-parsoid/{revision}",
    "/transform/html/to/{format}",
    "/transform/wikitext/to/{format}",
    "/transform/",
    "/double/",
    "/double//",
    "/double//slash",
    "/some/really/long/path",
    "/simple/{templated}{/path}",
    "/several{/optional}{/path}{+segments}",
    "/optional/{+path}",
    "/overlapping/{wildcard}",
    "/overlapping/concrete",
];

pub const WIKI_DOMAINS: &[&str] = &[
    "en.wikipedia.org",
    "de.wikipedia.org",
    "fr.wikipedia.org",
    "es.wikipedia.org",
];

/// Every wiki template prefixed with `/{domain:<domain>}/v1`, mapped to the
/// unprefixed template.
pub fn wiki_paths() -> Paths<String> {
    let templates = WIKI_DOMAINS.iter().flat_map(|domain| {
        WIKI_TEMPLATES.iter().map(move |template| {
            (
                format!("/{{domain:{domain}}}/v1{template}"),
                (*template).to_string(),
            )
        })
    });
    Paths::new(templates).expect("wiki templates should build")
}
