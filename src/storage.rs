/*!
The offset table and parsed-metadata caches shared by the borrowed view and
the owning URL.

The serialized URL is a single byte buffer; the table records eight weakly
increasing end positions delimiting, in order, the scheme, user, password,
host, port, path, query, and fragment spans. Punctuation belongs to the spans
as follows: a non-empty scheme span ends with `:`; when an authority exists
the user span begins with `//`; the password span is `":…@"`, `"@"`, or
empty; the port span begins with `:`; the query span with `?`; the fragment
span with `#`.

*/

use crate::host::HostType;
use crate::scheme::SchemeId;
use std::net::{Ipv4Addr, Ipv6Addr};

// ------------------------------------------------------------------------------------------------
// Crate Types
// ------------------------------------------------------------------------------------------------

pub(crate) mod index {
    pub(crate) const SCHEME: usize = 0;
    pub(crate) const USER: usize = 1;
    pub(crate) const PASS: usize = 2;
    pub(crate) const HOST: usize = 3;
    pub(crate) const PORT: usize = 4;
    pub(crate) const PATH: usize = 5;
    pub(crate) const QUERY: usize = 6;
    pub(crate) const FRAGMENT: usize = 7;
    pub(crate) const COUNT: usize = 8;
}

///
/// The component end positions; the start of component `i` is the end of component `i - 1`
/// (zero for the scheme).
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Offsets {
    ends: [usize; index::COUNT],
}

///
/// The decoded byte length of each percent-encodable component, punctuation excluded.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct DecodedLens {
    pub(crate) user: usize,
    pub(crate) password: usize,
    pub(crate) host: usize,
    pub(crate) path: usize,
    pub(crate) query: usize,
    pub(crate) fragment: usize,
}

///
/// Metadata recomputed whenever the buffer changes; every field is derivable from the buffer
/// and kept only as a cache.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Meta {
    pub(crate) scheme_id: SchemeId,
    pub(crate) host_type: HostType,
    pub(crate) ipv4: Option<Ipv4Addr>,
    pub(crate) ipv6: Option<Ipv6Addr>,
    pub(crate) port_number: Option<u16>,
    pub(crate) decoded: DecodedLens,
    pub(crate) nseg: usize,
    pub(crate) nparam: usize,
}

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

impl Offsets {
    #[inline]
    pub(crate) fn start_of(&self, i: usize) -> usize {
        if i == 0 {
            0
        } else {
            self.ends[i - 1]
        }
    }

    #[inline]
    pub(crate) fn end_of(&self, i: usize) -> usize {
        self.ends[i]
    }

    #[inline]
    pub(crate) fn len_of(&self, i: usize) -> usize {
        self.end_of(i) - self.start_of(i)
    }

    #[inline]
    pub(crate) fn set_end(&mut self, i: usize, v: usize) {
        self.ends[i] = v;
    }

    /// One past the last byte of the serialized URL.
    #[inline]
    pub(crate) fn end(&self) -> usize {
        self.ends[index::FRAGMENT]
    }

    /// Shift the ends of components `first..` by `delta`.
    pub(crate) fn shift_tail(&mut self, first: usize, delta: isize) {
        for end in &mut self.ends[first..] {
            *end = (*end as isize + delta) as usize;
        }
    }

    pub(crate) fn is_weakly_increasing(&self) -> bool {
        self.ends.windows(2).all(|pair| pair[0] <= pair[1])
    }

    /// The bytes of component `i` within `s`, punctuation included.
    #[inline]
    pub(crate) fn span<'a>(&self, s: &'a str, i: usize) -> &'a str {
        &s[self.start_of(i)..self.end_of(i)]
    }
}

// ------------------------------------------------------------------------------------------------
// Crate Functions
// ------------------------------------------------------------------------------------------------

///
/// The decoded length of validated percent-encoded bytes: every `%` in a validated span
/// begins a triplet, so each one shortens the decoded form by two.
///
pub(crate) fn decoded_len(bytes: &[u8]) -> usize {
    bytes.len() - 2 * bytes.iter().filter(|c| **c == b'%').count()
}

///
/// Structural punctuation checks over a buffer and its offsets; used by the owning URL's
/// debug-build invariant verification.
///
pub(crate) fn punctuation_holds(s: &str, offsets: &Offsets) -> bool {
    let scheme = offsets.span(s, index::SCHEME);
    let user = offsets.span(s, index::USER);
    let pass = offsets.span(s, index::PASS);
    let host = offsets.span(s, index::HOST);
    let port = offsets.span(s, index::PORT);
    let query = offsets.span(s, index::QUERY);
    let fragment = offsets.span(s, index::FRAGMENT);
    let has_authority = user.starts_with("//");

    (scheme.is_empty() || scheme.ends_with(':'))
        && (user.is_empty() || has_authority)
        && (pass.is_empty() || (has_authority && pass.ends_with('@')))
        && (pass.len() < 2 || pass.starts_with(':'))
        && (host.is_empty() || has_authority)
        && (port.is_empty() || (has_authority && port.starts_with(':')))
        && (query.is_empty() || query.starts_with('?'))
        && (fragment.is_empty() || fragment.starts_with('#'))
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------
