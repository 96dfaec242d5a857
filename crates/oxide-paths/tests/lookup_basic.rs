//! Lookups against small template sets.

mod common;
use common::*;

use oxide_paths::Paths;

#[test]
fn root_matches_slash() {
    let paths = Paths::new([("/", "root resource")]).unwrap();
    assert_match(&paths, "/", &"root resource", &[]);
}

#[test]
fn root_matches_empty_string() {
    let paths = Paths::new([("/", "root resource")]).unwrap();
    assert_match(&paths, "", &"root resource", &[]);
}

#[test]
fn root_does_not_match_double_slash() {
    let paths = Paths::new([("/", "root resource")]).unwrap();
    assert_no_match(&paths, "//");
}

fn extended() -> Paths<&'static str> {
    Paths::new([
        ("/x", "fixed"),
        ("/y/{p}", "required"),
        ("/z{/p}", "optional"),
    ])
    .unwrap()
}

#[test]
fn fixed_template() {
    let paths = extended();
    assert_match(&paths, "/x", &"fixed", &[]);
    assert_no_match(&paths, "/x/");
    assert_no_match(&paths, "/x/w");
}

#[test]
fn required_variable() {
    let paths = extended();
    assert_no_match(&paths, "/y");
    assert_match(&paths, "/y/", &"required", &[]);
    assert_match(&paths, "/y/w", &"required", &[("p", "w")]);
}

#[test]
fn optional_variable_binds_prefixed_name() {
    let paths = extended();
    assert_match(&paths, "/z", &"optional", &[]);
    assert_match(&paths, "/z/", &"optional", &[]);
    assert_match(&paths, "/z/w", &"optional", &[("/p", "w")]);
    assert_no_match(&paths, "/z/w/v");
}

#[test]
fn pattern_is_reported() {
    let paths = extended();
    assert_eq!(paths.lookup("/z/w").unwrap().pattern, "/z{/p}");
    assert_eq!(paths.lookup("/y/").unwrap().pattern, "/y/{p}");
}

#[test]
fn variables_are_percent_decoded() {
    let paths = extended();
    assert_match(&paths, "/y/caf%C3%A9", &"required", &[("p", "café")]);
    assert_match(&paths, "/y/a%2Fb", &"required", &[("p", "a/b")]);
}

#[test]
fn literals_are_matched_decoded() {
    let paths = Paths::new([("/hello%20world", 1)]).unwrap();
    assert_match(&paths, "/hello world", &1, &[]);
    assert_match(&paths, "/hello%20world", &1, &[]);
}

#[test]
fn rest_variable_at_root() {
    let paths = Paths::new([("/{+path}", "all")]).unwrap();
    assert_match(&paths, "/", &"all", &[]);
    assert_match(&paths, "/a", &"all", &[("+path", "a")]);
    assert_match(&paths, "/a//b", &"all", &[("+path", "a/b")]);
}

#[test]
fn wildcard_wins_over_rest_at_same_depth() {
    let paths = Paths::new([("/a/{one}", "one"), ("/a/{+many}", "many")]).unwrap();
    assert_match(&paths, "/a/b", &"one", &[("one", "b")]);
    // No backtracking into the rest capture once the wildcard is taken.
    assert_no_match(&paths, "/a/b/c");
}

#[test]
fn repeated_lookups_are_equal() {
    let paths = extended();
    for path in ["/x", "/y/w", "/z/", "/nope"] {
        assert_eq!(paths.lookup(path), paths.lookup(path));
    }
}

#[test]
fn index_is_shareable_across_threads() {
    let paths = std::sync::Arc::new(extended());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let paths = std::sync::Arc::clone(&paths);
            std::thread::spawn(move || {
                let path = format!("/y/{i}");
                paths.lookup(&path).map(|m| m.params.get("p").map(str::to_string))
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), Some(Some(i.to_string())));
    }
}
