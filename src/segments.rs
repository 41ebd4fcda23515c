/*!
Provides the path segment containers: a lazy read-only view and an editor
bound to an owning URL.

A leading `/` is part of the path, not a separator; segments are the pieces
between `/` separators after it, and an empty segment is legal (`/a//b` has
segments `a`, `` and `b`). Neither container materializes segments eagerly;
positions are recovered by scanning the path bytes.

*/

#![allow(clippy::module_name_repetitions)]

use crate::chars;
use crate::error::{ErrorKind, Result as UrlResult};
use crate::pct_encoding;
use crate::url::Url;
use std::fmt::{Display, Formatter};

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

///
/// A lazy, indexed, read-only view of a path's segments, in encoded form.
///
/// # Example
///
/// ```rust
/// use urlbuf::parse_uri;
///
/// let url = parse_uri("http://h/a//b").unwrap();
/// let segments: Vec<&str> = url.segments().iter().collect();
/// assert_eq!(segments, vec!["a", "", "b"]);
/// ```
///
#[derive(Clone, Copy, Debug)]
pub struct Segments<'a> {
    path: &'a str,
}

///
/// An iterator over the segments of a path; bidirectional.
///
#[derive(Clone, Debug)]
pub struct SegmentsIter<'a> {
    inner: Option<std::str::Split<'a, char>>,
}

///
/// Edits the path of an owning [`Url`] segment by segment. The editor borrows the URL
/// exclusively; every edit is reflected in the URL's serialized form immediately.
///
/// # Example
///
/// ```rust
/// use urlbuf::Url;
/// use std::str::FromStr;
///
/// let mut url = Url::from_str("http://h/a/b").unwrap();
/// let mut segments = url.segments_mut();
/// segments.push_back("c").unwrap();
/// segments.erase(0).unwrap();
/// assert_eq!(url.as_str(), "http://h/b/c");
/// ```
///
#[derive(Debug)]
pub struct SegmentsMut<'a> {
    url: &'a mut Url,
}

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

impl<'a> Display for Segments<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path)
    }
}

impl<'a> Segments<'a> {
    pub(crate) fn over(path: &'a str) -> Self {
        Self { path }
    }

    /// The number of segments.
    pub fn len(&self) -> usize {
        count_in_path(self.path)
    }

    /// Return `true` if the path has no segments (the path is empty), else `false`.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// The segment at `index`, in encoded form.
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.iter().nth(index)
    }

    /// Iterate the segments front to back (or back to front).
    pub fn iter(&self) -> SegmentsIter<'a> {
        SegmentsIter {
            inner: if self.path.is_empty() {
                None
            } else {
                Some(trimmed(self.path).split('/'))
            },
        }
    }
}

impl<'a> IntoIterator for Segments<'a> {
    type Item = &'a str;
    type IntoIter = SegmentsIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> Iterator for SegmentsIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.inner.as_mut()?.next()
    }
}

impl<'a> DoubleEndedIterator for SegmentsIter<'a> {
    fn next_back(&mut self) -> Option<&'a str> {
        self.inner.as_mut()?.next_back()
    }
}

// ------------------------------------------------------------------------------------------------

impl<'a> SegmentsMut<'a> {
    pub(crate) fn over(url: &'a mut Url) -> Self {
        Self { url }
    }

    /// The number of segments.
    pub fn len(&self) -> usize {
        count_in_path(self.url.encoded_path())
    }

    /// Return `true` if the path has no segments, else `false`.
    pub fn is_empty(&self) -> bool {
        self.url.encoded_path().is_empty()
    }

    /// The segment at `index`, in encoded form.
    pub fn get(&self, index: usize) -> Option<&str> {
        Segments::over(self.url.encoded_path()).get(index)
    }

    ///
    /// Insert `segment` (plain text; it will be percent-encoded) so that it becomes the
    /// segment at `index`.
    ///
    pub fn insert(&mut self, index: usize, segment: &str) -> UrlResult<()> {
        self.insert_encoded(index, &pct_encoding::encode(segment.as_bytes(), &chars::PCHAR))
    }

    ///
    /// Insert an already-encoded `segment` so that it becomes the segment at `index`.
    ///
    pub fn insert_encoded(&mut self, index: usize, segment: &str) -> UrlResult<()> {
        let _ = pct_encoding::validate(segment.as_bytes(), &chars::PCHAR)?;
        let mut list = self.list();
        if index > list.len() {
            return Err(ErrorKind::OutOfRange(index, list.len()).into());
        }
        list.insert(index, segment.to_string());
        self.commit(list);
        Ok(())
    }

    ///
    /// Insert every segment of `segments` (plain text) starting at `index`.
    ///
    pub fn insert_all<I, S>(&mut self, index: usize, segments: I) -> UrlResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = self.list();
        if index > list.len() {
            return Err(ErrorKind::OutOfRange(index, list.len()).into());
        }
        for (n, segment) in segments.into_iter().enumerate() {
            list.insert(
                index + n,
                pct_encoding::encode(segment.as_ref().as_bytes(), &chars::PCHAR),
            );
        }
        self.commit(list);
        Ok(())
    }

    /// Remove the segment at `index`.
    pub fn erase(&mut self, index: usize) -> UrlResult<()> {
        let mut list = self.list();
        if index >= list.len() {
            return Err(ErrorKind::OutOfRange(index, list.len()).into());
        }
        let _ = list.remove(index);
        self.commit(list);
        Ok(())
    }

    /// Remove the segments at `range`.
    pub fn erase_range(&mut self, range: std::ops::Range<usize>) -> UrlResult<()> {
        let mut list = self.list();
        if range.start > range.end || range.end > list.len() {
            return Err(ErrorKind::OutOfRange(range.end, list.len()).into());
        }
        let _ = list.drain(range);
        self.commit(list);
        Ok(())
    }

    /// Replace the segment at `index` with `segment` (plain text).
    pub fn replace(&mut self, index: usize, segment: &str) -> UrlResult<()> {
        self.replace_encoded(index, &pct_encoding::encode(segment.as_bytes(), &chars::PCHAR))
    }

    /// Replace the segment at `index` with an already-encoded `segment`.
    pub fn replace_encoded(&mut self, index: usize, segment: &str) -> UrlResult<()> {
        let _ = pct_encoding::validate(segment.as_bytes(), &chars::PCHAR)?;
        let mut list = self.list();
        if index >= list.len() {
            return Err(ErrorKind::OutOfRange(index, list.len()).into());
        }
        list[index] = segment.to_string();
        self.commit(list);
        Ok(())
    }

    /// Replace the segments at `range` with `segments` (plain text).
    pub fn replace_range<I, S>(
        &mut self,
        range: std::ops::Range<usize>,
        segments: I,
    ) -> UrlResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = self.list();
        if range.start > range.end || range.end > list.len() {
            return Err(ErrorKind::OutOfRange(range.end, list.len()).into());
        }
        let encoded: Vec<String> = segments
            .into_iter()
            .map(|segment| pct_encoding::encode(segment.as_ref().as_bytes(), &chars::PCHAR))
            .collect();
        let _ = list.splice(range, encoded);
        self.commit(list);
        Ok(())
    }

    /// Append `segment` (plain text) as the last segment.
    pub fn push_back(&mut self, segment: &str) -> UrlResult<()> {
        let len = self.len();
        self.insert(len, segment)
    }

    /// Remove and return the last segment, if any.
    pub fn pop_back(&mut self) -> Option<String> {
        let mut list = self.list();
        let last = list.pop()?;
        self.commit(list);
        Some(last)
    }

    /// Remove every segment, leaving an empty path.
    pub fn clear(&mut self) {
        self.commit(Vec::new());
    }

    // --------------------------------------------------------------------------------------------

    fn list(&self) -> Vec<String> {
        Segments::over(self.url.encoded_path())
            .iter()
            .map(str::to_string)
            .collect()
    }

    fn commit(&mut self, list: Vec<String>) {
        let absolute = self.url.is_path_absolute();
        let path = if list.is_empty() {
            String::new()
        } else if absolute {
            format!("/{}", list.join("/"))
        } else {
            list.join("/")
        };
        self.url.commit_path(path);
        self.url.debug_validate();
    }
}

// ------------------------------------------------------------------------------------------------
// Crate Functions
// ------------------------------------------------------------------------------------------------

///
/// The number of segments a path's bytes imply: an empty path has none; otherwise one more
/// than the number of separators after the root `/`.
///
pub(crate) fn count_in_path(path: &str) -> usize {
    if path.is_empty() {
        0
    } else {
        trimmed(path).split('/').count()
    }
}

fn trimmed(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------
