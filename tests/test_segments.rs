use urlbuf::Url;
use std::str::FromStr;

fn url(s: &str) -> Url {
    Url::from_str(s).unwrap()
}

// ------------------------------------------------------------------------------------------------
// API Tests
// ------------------------------------------------------------------------------------------------

#[test]
fn test_read_view() {
    let u = url("http://h/a//b");
    assert_eq!(u.nseg(), 3);
    let all: Vec<&str> = u.segments().iter().collect();
    assert_eq!(all, vec!["a", "", "b"]);
    assert_eq!(u.segments().get(1), Some(""));
    assert_eq!(u.segments().get(3), None);

    assert_eq!(url("http://h").nseg(), 0);
    assert_eq!(url("http://h/").nseg(), 1);
    assert_eq!(url("x/y").nseg(), 2);
}

#[test]
fn test_insert_and_erase() {
    let mut u = url("http://h/a/b");
    u.segments_mut().insert(1, "x").unwrap();
    assert_eq!(u.as_str(), "http://h/a/x/b");

    u.segments_mut().erase(0).unwrap();
    assert_eq!(u.as_str(), "http://h/x/b");

    u.segments_mut().erase_range(0..2).unwrap();
    assert_eq!(u.as_str(), "http://h");

    assert!(u.segments_mut().erase(0).is_err());
    assert!(u.segments_mut().insert(1, "x").is_err());
}

#[test]
fn test_insert_encodes() {
    let mut u = url("http://h/a");
    u.segments_mut().push_back("b c").unwrap();
    assert_eq!(u.as_str(), "http://h/a/b%20c");

    // A plain segment may not smuggle a separator; it is encoded instead.
    u.segments_mut().push_back("d/e").unwrap();
    assert_eq!(u.as_str(), "http://h/a/b%20c/d%2Fe");
    assert_eq!(u.nseg(), 3);

    u.segments_mut().insert_encoded(0, "ok%41").unwrap();
    assert_eq!(u.as_str(), "http://h/ok%41/a/b%20c/d%2Fe");
    assert!(u.segments_mut().insert_encoded(0, "bad%4").is_err());
    assert!(u.segments_mut().insert_encoded(0, "no/slash").is_err());
}

#[test]
fn test_replace() {
    let mut u = url("http://h/a/b/c");
    u.segments_mut().replace(1, "B").unwrap();
    assert_eq!(u.as_str(), "http://h/a/B/c");

    u.segments_mut().replace_range(0..2, ["x", "y", "z"].iter().copied()).unwrap();
    assert_eq!(u.as_str(), "http://h/x/y/z/c");

    u.segments_mut().replace_range(1..3, std::iter::empty::<&str>()).unwrap();
    assert_eq!(u.as_str(), "http://h/x/c");
}

#[test]
fn test_push_pop_clear() {
    let mut u = url("http://h/a");
    u.segments_mut().push_back("b").unwrap();
    assert_eq!(u.as_str(), "http://h/a/b");

    assert_eq!(u.segments_mut().pop_back(), Some("b".to_string()));
    assert_eq!(u.as_str(), "http://h/a");
    assert_eq!(u.segments_mut().pop_back(), Some("a".to_string()));
    assert_eq!(u.as_str(), "http://h");
    assert_eq!(u.segments_mut().pop_back(), None);

    let mut u = url("http://h/a/b/c");
    u.segments_mut().clear();
    assert_eq!(u.as_str(), "http://h");
    assert_eq!(u.nseg(), 0);
}

#[test]
fn test_absoluteness_preserved() {
    let mut u = url("a/b");
    u.segments_mut().push_back("c").unwrap();
    assert_eq!(u.as_str(), "a/b/c");
    assert!(!u.is_path_absolute());

    let mut u = url("/a/b");
    u.segments_mut().push_back("c").unwrap();
    assert_eq!(u.as_str(), "/a/b/c");
    assert!(u.is_path_absolute());
}

#[test]
fn test_colon_guard_on_edit() {
    // Erasing the first segment exposes a colon-bearing one; the guard appears.
    let mut u = url("a/x:y");
    u.segments_mut().erase(0).unwrap();
    assert_eq!(u.as_str(), "./x:y");
    assert_eq!(u.nseg(), 2);

    // Inserting a colon-bearing first segment into a scheme-less URL guards too.
    let mut u = url("b");
    u.segments_mut().insert(0, "x:y").unwrap();
    assert_eq!(u.as_str(), "./x:y/b");
}

#[test]
fn test_authority_keeps_path_rooted() {
    let mut u = url("http://h");
    u.segments_mut().push_back("a").unwrap();
    assert_eq!(u.as_str(), "http://h/a");
}

#[test]
fn test_insert_all() {
    let mut u = url("http://h/a/d");
    u.segments_mut().insert_all(1, ["b", "c"].iter().copied()).unwrap();
    assert_eq!(u.as_str(), "http://h/a/b/c/d");
}
