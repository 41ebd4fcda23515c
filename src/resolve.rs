/*!
Reference resolution per RFC 3986 §5, with errata 4547 applied: a `..`
segment with no predecessor is dropped rather than retained, so a path can
never climb above the root.

*/

use crate::error::{ErrorKind, Result as UrlResult};
use crate::url::Url;
use crate::view::UrlView;

// ------------------------------------------------------------------------------------------------
// Public Functions
// ------------------------------------------------------------------------------------------------

///
/// Resolve `reference` against `base` per RFC 3986 §5.2.2. The base must have a scheme.
///
/// # Example
///
/// ```rust
/// use urlbuf::{parse_uri, parse_uri_reference, resolve};
///
/// let base = parse_uri("http://a/b/c/d;p?q").unwrap();
/// let reference = parse_uri_reference("../../../g").unwrap();
/// assert_eq!(resolve(&base, &reference).unwrap().as_str(), "http://a/g");
/// ```
///
pub fn resolve(base: &UrlView<'_>, reference: &UrlView<'_>) -> UrlResult<Url> {
    if !base.has_scheme() {
        return Err(ErrorKind::NotABase.into());
    }

    let ref_query = reference.encoded_query().map(|q| q.as_str());
    let ref_fragment = reference.encoded_fragment().map(|f| f.as_str());

    let (scheme, authority, path, query) = if reference.has_scheme() {
        (
            reference.scheme(),
            reference.encoded_authority(),
            remove_dot_segments(reference.encoded_path()),
            ref_query,
        )
    } else if reference.has_authority() {
        (
            base.scheme(),
            reference.encoded_authority(),
            remove_dot_segments(reference.encoded_path()),
            ref_query,
        )
    } else if reference.encoded_path().is_empty() {
        let query = if reference.has_query() {
            ref_query
        } else {
            base.encoded_query().map(|q| q.as_str())
        };
        (
            base.scheme(),
            base.encoded_authority(),
            base.encoded_path().to_string(),
            query,
        )
    } else if reference.encoded_path().starts_with('/') {
        (
            base.scheme(),
            base.encoded_authority(),
            remove_dot_segments(reference.encoded_path()),
            ref_query,
        )
    } else {
        let merged = merge_paths(base, reference.encoded_path());
        (
            base.scheme(),
            base.encoded_authority(),
            remove_dot_segments(&merged),
            ref_query,
        )
    };

    let assembled = assemble(scheme, authority, &path, query, ref_fragment);
    Url::parse_uri_reference(&assembled)
}

///
/// Remove `.` and `..` segments per RFC 3986 §5.2.4; errata 4547 means a `..` at the root
/// is silently dropped.
///
pub fn remove_dot_segments(path: &str) -> String {
    let mut input = path;
    let mut output = String::with_capacity(path.len());
    while !input.is_empty() {
        if let Some(rest) = input.strip_prefix("../") {
            input = rest;
        } else if let Some(rest) = input.strip_prefix("./") {
            input = rest;
        } else if input.starts_with("/./") {
            input = &input[2..];
        } else if input == "/." {
            input = "/";
        } else if input.starts_with("/../") {
            input = &input[3..];
            pop_last_segment(&mut output);
        } else if input == "/.." {
            input = "/";
            pop_last_segment(&mut output);
        } else if input == "." || input == ".." {
            input = "";
        } else {
            let start = if input.starts_with('/') { 1 } else { 0 };
            let end = input[start..]
                .find('/')
                .map(|at| at + start)
                .unwrap_or_else(|| input.len());
            output.push_str(&input[..end]);
            input = &input[end..];
        }
    }
    output
}

// ------------------------------------------------------------------------------------------------
// Crate Functions
// ------------------------------------------------------------------------------------------------

///
/// Recompose a URL string from its parts, inserting the structural guards a plain
/// concatenation would lose: without an authority a path may not begin with `//`, and
/// without a scheme or authority a rootless path may not carry a `:` in its first segment.
///
pub(crate) fn assemble(
    scheme: Option<&str>,
    authority: Option<&str>,
    path: &str,
    query: Option<&str>,
    fragment: Option<&str>,
) -> String {
    let mut out = String::new();
    if let Some(scheme) = scheme {
        out.push_str(scheme);
        out.push(':');
    }
    if let Some(authority) = authority {
        out.push_str("//");
        out.push_str(authority);
    } else if path.starts_with("//") {
        out.push_str("/.");
    } else if scheme.is_none() && !path.starts_with('/') {
        let first = path.split('/').next().unwrap_or("");
        if first.contains(':') {
            out.push_str("./");
        }
    }
    out.push_str(path);
    if let Some(query) = query {
        out.push('?');
        out.push_str(query);
    }
    if let Some(fragment) = fragment {
        out.push('#');
        out.push_str(fragment);
    }
    out
}

// ------------------------------------------------------------------------------------------------
// Private Functions
// ------------------------------------------------------------------------------------------------

///
/// Merge a relative-reference path with the base path per RFC 3986 §5.2.3.
///
fn merge_paths(base: &UrlView<'_>, ref_path: &str) -> String {
    if base.has_authority() && base.encoded_path().is_empty() {
        format!("/{}", ref_path)
    } else {
        let base_path = base.encoded_path();
        match base_path.rfind('/') {
            Some(at) => format!("{}{}", &base_path[..=at], ref_path),
            None => ref_path.to_string(),
        }
    }
}

fn pop_last_segment(output: &mut String) {
    match output.rfind('/') {
        Some(at) => output.truncate(at),
        None => output.clear(),
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_dot_segments() {
        assert_eq!(remove_dot_segments("/a/b/c/./../../g"), "/a/g");
        assert_eq!(remove_dot_segments("mid/content=5/../6"), "mid/6");
        assert_eq!(remove_dot_segments("/a//b"), "/a//b");
        assert_eq!(remove_dot_segments("/."), "/");
        assert_eq!(remove_dot_segments("/.."), "/");
        assert_eq!(remove_dot_segments("."), "");
        assert_eq!(remove_dot_segments(".."), "");
        assert_eq!(remove_dot_segments(""), "");
        assert_eq!(remove_dot_segments("/a/../"), "/");
        assert_eq!(remove_dot_segments("/a/.."), "/");
        assert_eq!(remove_dot_segments("/../../g"), "/g");
    }

    #[test]
    fn test_assemble_guards() {
        assert_eq!(assemble(Some("s"), None, "//x", None, None), "s:/.//x");
        assert_eq!(assemble(None, None, "x:y/z", None, None), "./x:y/z");
        assert_eq!(assemble(None, None, "x/y:z", None, None), "x/y:z");
        assert_eq!(
            assemble(Some("s"), Some("h"), "/p", Some("q"), Some("f")),
            "s://h/p?q#f"
        );
        assert_eq!(assemble(None, Some(""), "", None, None), "//");
    }
}
