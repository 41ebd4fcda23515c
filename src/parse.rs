/*!
The RFC 3986 grammar productions, and the public parse entry points.

Each entry point is a pure function over its input: it either yields a
borrowed [`UrlView`](crate::UrlView) (or [`AuthorityView`]) whose offsets
index into the input, or fails with an error carrying the byte offset of the
failure site. Bytes outside ASCII, control bytes, whitespace, and backslashes
are not members of any component character set and are rejected wherever they
appear.

*/

use crate::chars::{self, CharSet};
use crate::error::{Component, Error as UrlError, ErrorKind, Result as UrlResult};
use crate::grammar::Cursor;
use crate::host::{self, HostKind, HostType};
use crate::pct_encoding::{self, PctStr};
use crate::scheme::SchemeId;
use crate::storage::{self, index, Meta, Offsets};
use crate::view::UrlView;
use std::fmt::{Display, Formatter};
use std::net::{Ipv4Addr, Ipv6Addr};

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

///
/// A parsed `authority` production: `[ userinfo "@" ] host [ ":" port ]`, borrowed from the
/// input it was parsed from.
///
/// # Example
///
/// ```rust
/// use urlbuf::parse_authority;
///
/// let authority = parse_authority("user:pass@example.com:8080").unwrap();
/// assert_eq!(authority.encoded_user().as_str(), "user");
/// assert_eq!(authority.encoded_password().as_str(), "pass");
/// assert_eq!(authority.encoded_host(), "example.com");
/// assert_eq!(authority.port_number(), Some(8080));
/// ```
///
#[derive(Clone, Copy, Debug)]
pub struct AuthorityView<'a> {
    s: &'a str,
    spans: AuthSpans,
}

// ------------------------------------------------------------------------------------------------
// Public Functions
// ------------------------------------------------------------------------------------------------

///
/// Parse `s` as an RFC 3986 `URI`: a scheme is required, a fragment is permitted.
///
pub fn parse_uri(s: &str) -> UrlResult<UrlView<'_>> {
    parse_kind(s, ParseKind::Uri).map(|p| UrlView::new(s, p.offsets, p.meta))
}

///
/// Parse `s` as an RFC 3986 `URI-reference`: a `URI` or a `relative-ref`.
///
pub fn parse_uri_reference(s: &str) -> UrlResult<UrlView<'_>> {
    parse_kind(s, ParseKind::UriReference).map(|p| UrlView::new(s, p.offsets, p.meta))
}

///
/// Parse `s` as an RFC 3986 `relative-ref`: no scheme; the first path segment may not
/// contain a `:`.
///
pub fn parse_relative_ref(s: &str) -> UrlResult<UrlView<'_>> {
    parse_kind(s, ParseKind::RelativeRef).map(|p| UrlView::new(s, p.offsets, p.meta))
}

///
/// Parse `s` as an RFC 3986 `absolute-URI`: a scheme is required and a fragment is not
/// permitted.
///
pub fn parse_absolute_uri(s: &str) -> UrlResult<UrlView<'_>> {
    parse_kind(s, ParseKind::AbsoluteUri).map(|p| UrlView::new(s, p.offsets, p.meta))
}

///
/// Parse `s` as a bare RFC 3986 `authority` production.
///
pub fn parse_authority(s: &str) -> UrlResult<AuthorityView<'_>> {
    let spans = parse_authority_region(s.as_bytes(), 0, s.len())?;
    Ok(AuthorityView { s, spans })
}

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

impl<'a> Display for AuthorityView<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.s)
    }
}

impl<'a> AuthorityView<'a> {
    /// The authority exactly as parsed.
    pub fn as_str(&self) -> &'a str {
        self.s
    }

    /// Return `true` if a userinfo sub-component (and its `@`) is present, else `false`.
    pub fn has_userinfo(&self) -> bool {
        self.spans.pass_end > self.spans.user_end
    }

    /// The userinfo bytes, without the terminating `@`.
    pub fn encoded_userinfo(&self) -> PctStr<'a> {
        let text = if self.has_userinfo() {
            &self.s[..self.spans.pass_end - 1]
        } else {
            ""
        };
        PctStr::new_unchecked(text, storage::decoded_len(text.as_bytes()))
    }

    /// The user sub-component, in encoded form.
    pub fn encoded_user(&self) -> PctStr<'a> {
        let text = &self.s[..self.spans.user_end];
        PctStr::new_unchecked(text, self.spans.decoded_user)
    }

    /// The user sub-component, decoded.
    pub fn user(&self) -> String {
        self.encoded_user().decode()
    }

    /// Return `true` if a password sub-component is present, else `false`.
    pub fn has_password(&self) -> bool {
        self.spans.pass_end > self.spans.user_end + 1
    }

    /// The password sub-component, in encoded form; empty when absent.
    pub fn encoded_password(&self) -> PctStr<'a> {
        let text = if self.has_password() {
            &self.s[self.spans.user_end + 1..self.spans.pass_end - 1]
        } else {
            ""
        };
        PctStr::new_unchecked(text, self.spans.decoded_password)
    }

    /// The password sub-component, decoded; empty when absent.
    pub fn password(&self) -> String {
        self.encoded_password().decode()
    }

    /// The host bytes exactly as parsed, brackets included for IP literals.
    pub fn encoded_host(&self) -> &'a str {
        &self.s[self.spans.pass_end..self.spans.host_end]
    }

    /// The variant tag of the host.
    pub fn host_type(&self) -> HostType {
        self.spans.host_type
    }

    /// The parsed host value.
    pub fn host_kind(&self) -> HostKind {
        host_kind_of(self.encoded_host(), &Meta::from(self.spans))
    }

    /// The IPv4 address, when the host is one.
    pub fn ipv4_address(&self) -> Option<Ipv4Addr> {
        self.spans.ipv4
    }

    /// The IPv6 address, when the host is one.
    pub fn ipv6_address(&self) -> Option<Ipv6Addr> {
        self.spans.ipv6
    }

    /// Return `true` if a port sub-component (possibly empty) is present, else `false`.
    pub fn has_port(&self) -> bool {
        self.spans.port_end > self.spans.host_end
    }

    /// The port digits, without the leading `:`; empty when the port is empty or absent.
    pub fn port(&self) -> &'a str {
        if self.has_port() {
            &self.s[self.spans.host_end + 1..self.spans.port_end]
        } else {
            ""
        }
    }

    /// The numeric port value, when present and at most 65535.
    pub fn port_number(&self) -> Option<u16> {
        self.spans.port_number
    }
}

// ------------------------------------------------------------------------------------------------
// Crate Types
// ------------------------------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ParseKind {
    Uri,
    UriReference,
    RelativeRef,
    AbsoluteUri,
}

pub(crate) struct Parsed {
    pub(crate) offsets: Offsets,
    pub(crate) meta: Meta,
}

///
/// Absolute end positions of the authority sub-spans, with the parsed host/port values.
/// The user span here carries no `//` prefix; the full-URL parser accounts for it.
///
#[derive(Clone, Copy, Debug)]
pub(crate) struct AuthSpans {
    pub(crate) user_end: usize,
    pub(crate) pass_end: usize,
    pub(crate) host_end: usize,
    pub(crate) port_end: usize,
    pub(crate) host_type: HostType,
    pub(crate) ipv4: Option<Ipv4Addr>,
    pub(crate) ipv6: Option<Ipv6Addr>,
    pub(crate) port_number: Option<u16>,
    pub(crate) decoded_user: usize,
    pub(crate) decoded_password: usize,
    pub(crate) decoded_host: usize,
}

impl From<AuthSpans> for Meta {
    fn from(spans: AuthSpans) -> Self {
        let mut meta = Meta::default();
        meta.host_type = spans.host_type;
        meta.ipv4 = spans.ipv4;
        meta.ipv6 = spans.ipv6;
        meta.port_number = spans.port_number;
        meta.decoded.user = spans.decoded_user;
        meta.decoded.password = spans.decoded_password;
        meta.decoded.host = spans.decoded_host;
        meta
    }
}

// ------------------------------------------------------------------------------------------------
// Crate Functions
// ------------------------------------------------------------------------------------------------

pub(crate) fn parse_kind(s: &str, kind: ParseKind) -> UrlResult<Parsed> {
    let bytes = s.as_bytes();
    let mut cur = Cursor::new(bytes);
    let mut offsets = Offsets::default();
    let mut meta = Meta::default();

    let want_scheme = match kind {
        ParseKind::Uri | ParseKind::AbsoluteUri => {
            if bytes.is_empty() {
                return Err(ErrorKind::IsEmpty.into());
            }
            let name = parse_scheme_colon(&mut cur)?;
            meta.scheme_id = SchemeId::from_name(name);
            true
        }
        ParseKind::RelativeRef => false,
        // `URI-reference = URI / relative-ref`: the ordered alternative commits to the URI
        // branch exactly when a scheme and its ':' are present.
        ParseKind::UriReference => match cur.attempt(parse_scheme_colon) {
            Ok(name) => {
                meta.scheme_id = SchemeId::from_name(name);
                true
            }
            Err(_) => false,
        },
    };
    offsets.set_end(index::SCHEME, cur.pos());

    let has_authority = cur.eat_slice(b"//");
    if has_authority {
        let start = cur.pos();
        let len = cur
            .rest()
            .iter()
            .position(|c| matches!(*c, b'/' | b'?' | b'#'))
            .unwrap_or_else(|| cur.rest().len());
        let spans = parse_authority_region(bytes, start, start + len)?;
        offsets.set_end(index::USER, spans.user_end);
        offsets.set_end(index::PASS, spans.pass_end);
        offsets.set_end(index::HOST, spans.host_end);
        offsets.set_end(index::PORT, spans.port_end);
        meta.host_type = spans.host_type;
        meta.ipv4 = spans.ipv4;
        meta.ipv6 = spans.ipv6;
        meta.port_number = spans.port_number;
        meta.decoded.user = spans.decoded_user;
        meta.decoded.password = spans.decoded_password;
        meta.decoded.host = spans.decoded_host;
        cur.seek(start + len);
    } else {
        for i in &[index::USER, index::PASS, index::HOST, index::PORT] {
            offsets.set_end(*i, cur.pos());
        }
    }

    let path_start = cur.pos();
    scan_pct_run(&mut cur, &chars::PATH);
    let path = cur.slice_from(path_start);
    if !want_scheme && !has_authority {
        // path-noscheme: the first segment of a scheme-less, authority-less URL may not
        // contain a ':', or it would later re-parse as a scheme.
        let first = path.split(|c| *c == b'/').next().unwrap_or(&[]);
        if let Some(at) = first.iter().position(|c| *c == b':') {
            return Err(ErrorKind::Syntax(Component::Path, path_start + at).into());
        }
    }
    meta.decoded.path = storage::decoded_len(path);
    offsets.set_end(index::PATH, cur.pos());

    // `[ "?" query ]`
    let _ = cur.optional(|c| {
        if c.eat(b'?') {
            let start = c.pos();
            scan_pct_run(c, &chars::QUERY);
            meta.decoded.query = storage::decoded_len(c.slice_from(start));
            Ok(())
        } else {
            Err(ErrorKind::Syntax(Component::Query, c.pos()).into())
        }
    });
    offsets.set_end(index::QUERY, cur.pos());

    if kind == ParseKind::AbsoluteUri {
        let fragment_follows = cur
            .lookahead(|c| {
                if c.eat(b'#') {
                    Ok(())
                } else {
                    Err(ErrorKind::Syntax(Component::Fragment, c.pos()).into())
                }
            })
            .is_ok();
        if fragment_follows {
            return Err(ErrorKind::Syntax(Component::Fragment, cur.pos()).into());
        }
    }

    // `[ "#" fragment ]`
    let _ = cur.optional(|c| {
        if c.eat(b'#') {
            let start = c.pos();
            scan_pct_run(c, &chars::FRAGMENT);
            meta.decoded.fragment = storage::decoded_len(c.slice_from(start));
            Ok(())
        } else {
            Err(ErrorKind::Syntax(Component::Fragment, c.pos()).into())
        }
    });
    offsets.set_end(index::FRAGMENT, cur.pos());

    if !cur.is_at_end() {
        // A run always stops at a `%` that does not begin a triplet; report it as such.
        if cur.peek() == Some(b'%') {
            return Err(ErrorKind::InvalidPercentEncoding(cur.pos()).into());
        }
        let component = if offsets.len_of(index::FRAGMENT) > 0 {
            Component::Fragment
        } else if offsets.len_of(index::QUERY) > 0 {
            Component::Query
        } else {
            Component::Path
        };
        return Err(ErrorKind::Syntax(component, cur.pos()).into());
    }

    meta.nseg = crate::segments::count_in_path(offsets.span(s, index::PATH));
    meta.nparam = if offsets.len_of(index::QUERY) > 0 {
        crate::params::count_in_query(&offsets.span(s, index::QUERY)[1..])
    } else {
        0
    };

    Ok(Parsed { offsets, meta })
}

///
/// Parse the `authority` production over `bytes[start..end]`, returning absolute span ends.
///
pub(crate) fn parse_authority_region(
    bytes: &[u8],
    start: usize,
    end: usize,
) -> UrlResult<AuthSpans> {
    let auth = &bytes[start..end];

    // The userinfo, when present, runs to the last '@' within the authority.
    let (user_end, pass_end, hp_start) = match auth.iter().rposition(|c| *c == b'@') {
        Some(at) => {
            let userinfo = &auth[..at];
            let user_len = userinfo
                .iter()
                .position(|c| *c == b':')
                .unwrap_or_else(|| userinfo.len());
            (start + user_len, start + at + 1, at + 1)
        }
        None => (start, start, 0),
    };
    let decoded_user = validate_at(&auth[..user_end - start], &chars::USER, start)?;
    let decoded_password = if pass_end > user_end + 1 {
        validate_at(
            &auth[user_end - start + 1..pass_end - start - 1],
            &chars::PASSWORD,
            user_end + 1,
        )?
    } else {
        0
    };

    let hp = &auth[hp_start..];
    let (host_len, host_type, ipv4, ipv6) = if hp.first() == Some(&b'[') {
        let close = hp
            .iter()
            .position(|c| *c == b']')
            .ok_or_else(|| UrlError::from(ErrorKind::InvalidIpLiteral))?;
        let kind = host::parse_ip_literal(&hp[1..close])?;
        match kind {
            HostKind::Ipv6 { address, .. } => (close + 1, HostType::Ipv6, None, Some(address)),
            HostKind::IpvFuture { .. } => (close + 1, HostType::IpvFuture, None, None),
            _ => return Err(ErrorKind::InvalidIpLiteral.into()),
        }
    } else {
        let host_len = hp
            .iter()
            .position(|c| *c == b':')
            .unwrap_or_else(|| hp.len());
        let host_bytes = &hp[..host_len];
        if host_bytes.is_empty() {
            (0, HostType::Empty, None, None)
        } else if let Some(address) = host::parse_ipv4_all(host_bytes) {
            (host_len, HostType::Ipv4, Some(address), None)
        } else {
            let _ = pct_encoding::validate(host_bytes, &chars::REG_NAME).map_err(|e| {
                reposition(e, start + hp_start)
            })?;
            (host_len, HostType::Name, None, None)
        }
    };
    let host_end = start + hp_start + host_len;
    let decoded_host = storage::decoded_len(&hp[..host_len]);

    // Whatever follows the host must be a ':' port running to the end of the authority.
    let port_number = match bytes[host_end..end].first() {
        None => None,
        Some(b':') => {
            let digits = &bytes[host_end + 1..end];
            if let Some(at) = chars::DIGIT.find_first_not_in(digits) {
                return Err(ErrorKind::Syntax(Component::Port, host_end + 1 + at).into());
            }
            chars::decimal_u16(digits)
        }
        Some(_) => {
            return Err(ErrorKind::Syntax(Component::Host, host_end).into());
        }
    };

    Ok(AuthSpans {
        user_end,
        pass_end,
        host_end,
        port_end: end,
        host_type,
        ipv4,
        ipv6,
        port_number,
        decoded_user,
        decoded_password,
        decoded_host,
    })
}

///
/// Recover the parsed host value from a host span and its cached metadata.
///
pub(crate) fn host_kind_of(span: &str, meta: &Meta) -> HostKind {
    match meta.host_type {
        HostType::Empty => HostKind::Empty,
        HostType::Name => HostKind::Name(span.to_string()),
        HostType::Ipv4 => match meta.ipv4 {
            Some(address) => HostKind::Ipv4(address),
            None => HostKind::Empty,
        },
        HostType::Ipv6 => match (meta.ipv6, zone_id_of(span)) {
            (Some(address), zone_id) => HostKind::Ipv6 {
                address,
                zone_id: zone_id.map(str::to_string),
            },
            (None, _) => HostKind::Empty,
        },
        HostType::IpvFuture => {
            let interior = span
                .strip_prefix('[')
                .and_then(|rest| rest.strip_suffix(']'))
                .unwrap_or("");
            let body = interior.get(1..).unwrap_or("");
            match body.find('.') {
                Some(dot) => HostKind::IpvFuture {
                    version: body[..dot].to_string(),
                    address: body[dot + 1..].to_string(),
                },
                None => HostKind::Empty,
            }
        }
    }
}

///
/// The zone identifier within a bracketed IPv6 host span, when present.
pub(crate) fn zone_id_of(span: &str) -> Option<&str> {
    let interior = span.strip_prefix('[')?.strip_suffix(']')?;
    interior.find("%25").map(|at| &interior[at + 3..])
}

// ------------------------------------------------------------------------------------------------
// Private Functions
// ------------------------------------------------------------------------------------------------

///
/// `scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`, with its terminating `:`.
/// Returns the scheme name, colon excluded.
///
fn parse_scheme_colon<'a>(cur: &mut Cursor<'a>) -> UrlResult<&'a str> {
    let start = cur.pos();
    match cur.peek() {
        Some(c) if c.is_ascii_alphabetic() => {
            let _ = cur.bump();
        }
        _ => return Err(ErrorKind::Syntax(Component::Scheme, cur.pos()).into()),
    }
    let _ = cur.take_while_in(&chars::SCHEME_TAIL);
    let name = cur.slice_from(start);
    if !cur.eat(b':') {
        return Err(ErrorKind::Syntax(Component::Scheme, cur.pos()).into());
    }
    // Scheme bytes are ASCII by construction.
    Ok(std::str::from_utf8(name).unwrap_or(""))
}

///
/// Consume the longest run of bytes that are members of `set` or well-formed percent
/// triplets. The run stops at a `%` that does not begin a triplet; the caller reports it.
///
fn scan_pct_run(cur: &mut Cursor<'_>, set: &CharSet) {
    loop {
        match cur.peek() {
            Some(b'%') => {
                if chars::percent_triplet(cur.rest(), 0).is_err() {
                    return;
                }
                cur.advance(3);
            }
            Some(c) if set.contains(c) => {
                let _ = cur.bump();
            }
            _ => return,
        }
    }
}

fn validate_at(bytes: &[u8], set: &CharSet, base: usize) -> UrlResult<usize> {
    pct_encoding::validate(bytes, set).map_err(|e| reposition(e, base))
}

fn reposition(e: UrlError, base: usize) -> UrlError {
    if let ErrorKind::InvalidPercentEncoding(at) = e.kind() {
        ErrorKind::InvalidPercentEncoding(base + at).into()
    } else {
        e
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_reference_scheme_alternative() {
        assert!(parse_uri_reference("http://x").unwrap().has_scheme());
        assert!(parse_uri_reference("a:").unwrap().has_scheme());
        assert!(!parse_uri_reference("./x:y").unwrap().has_scheme());
        assert!(!parse_uri_reference("x/y:z").unwrap().has_scheme());
        assert!(!parse_uri_reference("").unwrap().has_scheme());
        assert!(parse_uri_reference("1a:b").is_err());
    }

    #[test]
    fn test_authority_userinfo_split() {
        // The user is the text before the first ':'; later ':' belong to the password.
        let a = parse_authority("xy:zz:@h").unwrap();
        assert_eq!(a.encoded_user().as_str(), "xy");
        assert_eq!(a.encoded_password().as_str(), "zz:");

        let a = parse_authority("::@h").unwrap();
        assert_eq!(a.encoded_user().as_str(), "");
        assert_eq!(a.encoded_password().as_str(), ":");

        let a = parse_authority("h").unwrap();
        assert!(!a.has_userinfo());
        assert_eq!(a.encoded_host(), "h");
    }

    #[test]
    fn test_authority_decoded_views() {
        let a = parse_authority("%41%42:%43%44@h").unwrap();
        assert_eq!(a.user(), "AB");
        assert_eq!(a.password(), "CD");
        assert!(a.encoded_user().decoded_eq("AB"));
    }

    #[test]
    fn test_authority_port_forms() {
        let a = parse_authority("h:8080").unwrap();
        assert!(a.has_port());
        assert_eq!(a.port(), "8080");
        assert_eq!(a.port_number(), Some(8080));

        let a = parse_authority("h:").unwrap();
        assert!(a.has_port());
        assert_eq!(a.port(), "");
        assert_eq!(a.port_number(), None);

        let a = parse_authority("h:65536").unwrap();
        assert_eq!(a.port(), "65536");
        assert_eq!(a.port_number(), None);

        assert!(parse_authority("h:8x").is_err());
    }

    #[test]
    fn test_authority_hosts() {
        assert_eq!(parse_authority("0.0.0.0").unwrap().host_type(), HostType::Ipv4);
        assert_eq!(parse_authority("[::1]").unwrap().host_type(), HostType::Ipv6);
        assert_eq!(parse_authority("[v1.0]").unwrap().host_type(), HostType::IpvFuture);
        assert_eq!(parse_authority("example.com").unwrap().host_type(), HostType::Name);
        assert_eq!(parse_authority("999.0.0.1").unwrap().host_type(), HostType::Name);
        assert_eq!(parse_authority("").unwrap().host_type(), HostType::Empty);
        assert!(parse_authority("[::1]x").is_err());
        assert!(parse_authority("ex ample").is_err());
    }
}
