/*!
Provides the query parameter containers: a lazy read-only view and an editor
bound to an owning URL.

The query decomposes into parameters at `&`; each parameter is `key` or
`key "=" value`. A parameter with no `=` has no value at all, while `key=`
has the empty value; the two are distinct. Key matching is byte-exact over
the decoded key unless ASCII case folding is requested.

*/

#![allow(clippy::module_name_repetitions)]

use crate::chars;
use crate::error::{ErrorKind, Result as UrlResult};
use crate::pct_encoding::{self, PctStr};
use crate::storage;
use crate::url::Url;
use std::fmt::{Display, Formatter};

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

///
/// An owned query parameter: a key and an optional value, in plain (decoded) text.
///
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Param {
    key: String,
    value: Option<String>,
}

///
/// One parameter of a query, borrowed in encoded form.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParamRef<'a> {
    key: &'a str,
    value: Option<&'a str>,
}

///
/// A lazy, indexed, read-only view of a query's parameters.
///
/// # Example
///
/// ```rust
/// use urlbuf::parse_uri;
///
/// let url = parse_uri("http://x.y.z/?a=b&c=d&").unwrap();
/// let params = url.params();
/// assert_eq!(params.len(), 3);
/// assert_eq!(params.get(0).unwrap().key(), "a");
/// assert_eq!(params.get(0).unwrap().value(), Some("b"));
/// assert_eq!(params.get(2).unwrap().key(), "");
/// assert!(!params.get(2).unwrap().has_value());
/// ```
///
#[derive(Clone, Copy, Debug)]
pub struct Params<'a> {
    query: Option<&'a str>,
}

///
/// An iterator over the parameters of a query.
///
#[derive(Clone, Debug)]
pub struct ParamsIter<'a> {
    inner: Option<std::str::Split<'a, char>>,
}

///
/// Edits the query of an owning [`Url`] parameter by parameter. The editor borrows the URL
/// exclusively; every edit is reflected in the URL's serialized form immediately.
///
/// # Example
///
/// ```rust
/// use urlbuf::{Param, Url};
/// use std::str::FromStr;
///
/// let mut url = Url::from_str("http://h/?a=1&b=2").unwrap();
/// let mut params = url.params_mut();
/// params.set("a", Some("9"), false);
/// params.append(&Param::with_value("c", "3"));
/// assert_eq!(url.as_str(), "http://h/?a=9&b=2&c=3");
/// ```
///
#[derive(Debug)]
pub struct ParamsMut<'a> {
    url: &'a mut Url,
}

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

impl Display for Param {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            None => write!(f, "{}", self.key),
            Some(value) => write!(f, "{}={}", self.key, value),
        }
    }
}

impl Param {
    /// A parameter with no value (no `=` at all).
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            value: None,
        }
    }

    /// A parameter with a value; the value may be empty.
    pub fn with_value(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: Some(value.to_string()),
        }
    }

    /// The key, in plain text.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The value, in plain text, if present.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Return `true` if this parameter carries a value (even an empty one), else `false`.
    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }
}

// ------------------------------------------------------------------------------------------------

impl<'a> ParamRef<'a> {
    /// The key, in encoded form.
    pub fn key(&self) -> &'a str {
        self.key
    }

    /// The value, in encoded form, if present.
    pub fn value(&self) -> Option<&'a str> {
        self.value
    }

    /// Return `true` if this parameter carries a value (even an empty one), else `false`.
    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// The key, decoded.
    pub fn decoded_key(&self) -> String {
        self.key_view().decode()
    }

    /// The value, decoded, if present.
    pub fn decoded_value(&self) -> Option<String> {
        self.value.map(|value| {
            PctStr::new_unchecked(value, storage::decoded_len(value.as_bytes())).decode()
        })
    }

    fn key_view(&self) -> PctStr<'a> {
        PctStr::new_unchecked(self.key, storage::decoded_len(self.key.as_bytes()))
    }

    fn key_matches(&self, key: &str, ignore_case: bool) -> bool {
        if ignore_case {
            let decoded = self.key_view().decode();
            decoded.eq_ignore_ascii_case(key)
        } else {
            self.key_view().decoded_eq(key)
        }
    }
}

// ------------------------------------------------------------------------------------------------

impl<'a> Params<'a> {
    pub(crate) fn over(query: Option<&'a str>) -> Self {
        Self { query }
    }

    /// The number of parameters; zero when no query is present.
    pub fn len(&self) -> usize {
        match self.query {
            None => 0,
            Some(q) => count_in_query(q),
        }
    }

    /// Return `true` if there are no parameters, else `false`.
    pub fn is_empty(&self) -> bool {
        self.query.is_none()
    }

    /// The parameter at `index`.
    pub fn get(&self, index: usize) -> Option<ParamRef<'a>> {
        self.iter().nth(index)
    }

    /// Iterate the parameters in order.
    pub fn iter(&self) -> ParamsIter<'a> {
        ParamsIter {
            inner: self.query.map(|q| q.split('&')),
        }
    }
}

impl<'a> IntoIterator for Params<'a> {
    type Item = ParamRef<'a>;
    type IntoIter = ParamsIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> Iterator for ParamsIter<'a> {
    type Item = ParamRef<'a>;

    fn next(&mut self) -> Option<ParamRef<'a>> {
        let part = self.inner.as_mut()?.next()?;
        Some(split_param(part))
    }
}

// ------------------------------------------------------------------------------------------------

impl<'a> ParamsMut<'a> {
    pub(crate) fn over(url: &'a mut Url) -> Self {
        Self { url }
    }

    /// The number of parameters; zero when no query is present.
    pub fn len(&self) -> usize {
        self.view().len()
    }

    /// Return `true` if there are no parameters, else `false`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The parameter at `index`.
    pub fn get(&self, index: usize) -> Option<ParamRef<'_>> {
        self.view().get(index)
    }

    /// Append `param` (plain text; key and value will be percent-encoded).
    pub fn append(&mut self, param: &Param) {
        let mut list = self.list();
        list.push(encode_param(param));
        self.commit(list);
    }

    /// Append an already-encoded key and optional value.
    pub fn append_encoded(&mut self, key: &str, value: Option<&str>) -> UrlResult<()> {
        let encoded = validate_param(key, value)?;
        let mut list = self.list();
        list.push(encoded);
        self.commit(list);
        Ok(())
    }

    /// Insert `param` (plain text) so that it becomes the parameter at `index`.
    pub fn insert(&mut self, index: usize, param: &Param) -> UrlResult<()> {
        let mut list = self.list();
        if index > list.len() {
            return Err(ErrorKind::OutOfRange(index, list.len()).into());
        }
        list.insert(index, encode_param(param));
        self.commit(list);
        Ok(())
    }

    /// Insert an already-encoded key and optional value at `index`.
    pub fn insert_encoded(&mut self, index: usize, key: &str, value: Option<&str>) -> UrlResult<()> {
        let encoded = validate_param(key, value)?;
        let mut list = self.list();
        if index > list.len() {
            return Err(ErrorKind::OutOfRange(index, list.len()).into());
        }
        list.insert(index, encoded);
        self.commit(list);
        Ok(())
    }

    /// Replace the parameter at `index` with `param` (plain text).
    pub fn replace(&mut self, index: usize, param: &Param) -> UrlResult<()> {
        let mut list = self.list();
        if index >= list.len() {
            return Err(ErrorKind::OutOfRange(index, list.len()).into());
        }
        list[index] = encode_param(param);
        self.commit(list);
        Ok(())
    }

    /// Replace the parameter at `index` with an already-encoded key and optional value.
    pub fn replace_encoded(&mut self, index: usize, key: &str, value: Option<&str>) -> UrlResult<()> {
        let encoded = validate_param(key, value)?;
        let mut list = self.list();
        if index >= list.len() {
            return Err(ErrorKind::OutOfRange(index, list.len()).into());
        }
        list[index] = encoded;
        self.commit(list);
        Ok(())
    }

    /// Remove the parameter at `index`.
    pub fn erase(&mut self, index: usize) -> UrlResult<()> {
        let mut list = self.list();
        if index >= list.len() {
            return Err(ErrorKind::OutOfRange(index, list.len()).into());
        }
        let _ = list.remove(index);
        self.commit(list);
        Ok(())
    }

    /// Remove the parameters at `range`.
    pub fn erase_range(&mut self, range: std::ops::Range<usize>) -> UrlResult<()> {
        let mut list = self.list();
        if range.start > range.end || range.end > list.len() {
            return Err(ErrorKind::OutOfRange(range.end, list.len()).into());
        }
        let _ = list.drain(range);
        self.commit(list);
        Ok(())
    }

    ///
    /// Remove every parameter whose key matches `key`, returning how many were removed.
    ///
    pub fn erase_key(&mut self, key: &str, ignore_case: bool) -> usize {
        let before = self.len();
        let list: Vec<String> = self
            .view()
            .iter()
            .filter(|param| !param.key_matches(key, ignore_case))
            .map(|param| rejoin(param))
            .collect();
        let removed = before - list.len();
        if removed > 0 {
            self.commit(list);
        }
        removed
    }

    ///
    /// Set the value of the first parameter whose key matches `key` and remove every further
    /// match; append a new parameter if none matches.
    ///
    pub fn set(&mut self, key: &str, value: Option<&str>, ignore_case: bool) {
        let mut list = Vec::new();
        let mut found = false;
        for param in self.view().iter() {
            if param.key_matches(key, ignore_case) {
                if !found {
                    found = true;
                    list.push(encode_param(&Param {
                        key: key.to_string(),
                        value: value.map(str::to_string),
                    }));
                }
            } else {
                list.push(rejoin(param));
            }
        }
        if !found {
            list.push(encode_param(&Param {
                key: key.to_string(),
                value: value.map(str::to_string),
            }));
        }
        self.commit(list);
    }

    ///
    /// Drop the `=value` portion of the parameter at `index`, leaving a bare key.
    ///
    pub fn unset(&mut self, index: usize) -> UrlResult<()> {
        let mut list = self.list();
        if index >= list.len() {
            return Err(ErrorKind::OutOfRange(index, list.len()).into());
        }
        if let Some(eq) = list[index].find('=') {
            list[index].truncate(eq);
        }
        self.commit(list);
        Ok(())
    }

    // --------------------------------------------------------------------------------------------

    fn view(&self) -> Params<'_> {
        self.url.params()
    }

    fn list(&self) -> Vec<String> {
        self.view().iter().map(rejoin).collect()
    }

    fn commit(&mut self, list: Vec<String>) {
        if list.is_empty() {
            self.url.remove_query();
        } else {
            self.url.commit_query(list.join("&"));
            self.url.debug_validate();
        }
    }
}

// ------------------------------------------------------------------------------------------------
// Crate Functions
// ------------------------------------------------------------------------------------------------

/// The number of parameters the query bytes (leading `?` stripped) imply.
pub(crate) fn count_in_query(query: &str) -> usize {
    query.split('&').count()
}

// ------------------------------------------------------------------------------------------------
// Private Functions
// ------------------------------------------------------------------------------------------------

fn split_param(part: &str) -> ParamRef<'_> {
    match part.find('=') {
        None => ParamRef {
            key: part,
            value: None,
        },
        Some(eq) => ParamRef {
            key: &part[..eq],
            value: Some(&part[eq + 1..]),
        },
    }
}

fn encode_param(param: &Param) -> String {
    let mut out = pct_encoding::encode(param.key.as_bytes(), &chars::QUERY_KEY);
    if let Some(value) = &param.value {
        out.push('=');
        out.push_str(&pct_encoding::encode(value.as_bytes(), &chars::QUERY_VALUE));
    }
    out
}

fn validate_param(key: &str, value: Option<&str>) -> UrlResult<String> {
    let _ = pct_encoding::validate(key.as_bytes(), &chars::QUERY_KEY)?;
    let mut out = key.to_string();
    if let Some(value) = value {
        let _ = pct_encoding::validate(value.as_bytes(), &chars::QUERY_VALUE)?;
        out.push('=');
        out.push_str(value);
    }
    Ok(out)
}

fn rejoin(param: ParamRef<'_>) -> String {
    match param.value {
        None => param.key.to_string(),
        Some(value) => format!("{}={}", param.key, value),
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------
