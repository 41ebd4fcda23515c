/*!
Provides the host value types: registered names, IPv4 and IPv6 addresses (the
latter with optional RFC 6874 zone identifiers), and IPvFuture literals.

IPv4 literals use the strict `dec-octet` form: four decimal octets, each at
most 255, with no leading zeros. A dotted sequence that does not match (for
example `999.0.0.1` or `01.2.3.4`) is not an error at the host production; its
bytes are a legal `reg-name` and it parses as a name.

*/

#![allow(clippy::module_name_repetitions)]

use crate::chars;
use crate::error::{Component, Error as UrlError, ErrorKind, Result as UrlResult};
use crate::pct_encoding;
use crate::{Normalize, ValidateStr};
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

///
/// The variant tag of a host, without the host's value.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostType {
    /// No authority, or an authority with a zero-length host.
    Empty,
    /// A registered name; e.g. `localhost`, `example.com`.
    Name,
    /// A dotted-quad IPv4 address; e.g. `127.0.0.1`.
    Ipv4,
    /// A bracketed IPv6 address; e.g. `[2001:db8::ff00:42:8329]`.
    Ipv6,
    /// A bracketed IPvFuture literal; e.g. `[v1.0]`.
    IpvFuture,
}

///
/// This type holds the host in its parsed form. It is an enumeration of the set of valid
/// host representations allowed by RFC 3986, with RFC 6874 zone identifiers.
///
/// # Example
///
/// ```rust
/// use urlbuf::HostKind;
/// use std::str::FromStr;
///
/// let host = HostKind::from_str("127.0.0.1").unwrap();
/// assert!(host.is_ipv4());
///
/// let host = HostKind::from_str("[fe80::1%25eth0]").unwrap();
/// assert!(host.is_ipv6());
///
/// let host = HostKind::from_str("example.com").unwrap();
/// assert!(host.is_name());
/// ```
///
#[derive(Clone, Debug, Eq)]
pub enum HostKind {
    /// An authority with no host bytes.
    Empty,
    /// Holds a validated registered name, in its encoded form.
    Name(String),
    /// Holds a parsed IPv4 address.
    Ipv4(Ipv4Addr),
    /// Holds a parsed IPv6 address and its optional zone identifier, as given.
    Ipv6 {
        address: Ipv6Addr,
        zone_id: Option<String>,
    },
    /// Holds an IPvFuture literal: the hex version string and the address body.
    IpvFuture { version: String, address: String },
}

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

impl Default for HostType {
    fn default() -> Self {
        Self::Empty
    }
}

impl PartialEq for HostKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Empty, Self::Empty) => true,
            (Self::Name(lhs), Self::Name(rhs)) => lhs.eq_ignore_ascii_case(rhs),
            (Self::Ipv4(lhs), Self::Ipv4(rhs)) => lhs == rhs,
            (
                Self::Ipv6 {
                    address: la,
                    zone_id: lz,
                },
                Self::Ipv6 {
                    address: ra,
                    zone_id: rz,
                },
            ) => la == ra && lz == rz,
            (
                Self::IpvFuture {
                    version: lv,
                    address: la,
                },
                Self::IpvFuture {
                    version: rv,
                    address: ra,
                },
            ) => lv.eq_ignore_ascii_case(rv) && la.eq_ignore_ascii_case(ra),
            _ => false,
        }
    }
}

impl Hash for HostKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Empty => ().hash(state),
            Self::Name(v) => v.to_ascii_lowercase().hash(state),
            Self::Ipv4(v) => v.hash(state),
            Self::Ipv6 { address, zone_id } => {
                address.hash(state);
                zone_id.hash(state);
            }
            Self::IpvFuture { version, address } => {
                version.to_ascii_uppercase().hash(state);
                address.to_ascii_uppercase().hash(state);
            }
        }
    }
}

impl Display for HostKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            HostKind::Empty => Ok(()),
            HostKind::Name(name) => write!(f, "{}", name),
            HostKind::Ipv4(address) => write!(f, "{}", address),
            HostKind::Ipv6 { address, zone_id } => match zone_id {
                None => write!(f, "[{}]", address),
                Some(zone) => write!(f, "[{}%25{}]", address, zone),
            },
            HostKind::IpvFuture { version, address } => write!(f, "[v{}.{}]", version, address),
        }
    }
}

impl FromStr for HostKind {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_host_text(s.as_bytes())
    }
}

impl ValidateStr for HostKind {}

impl Normalize for HostKind {
    fn normalize(self) -> UrlResult<Self> {
        Ok(match self {
            HostKind::Name(name) => {
                HostKind::Name(pct_encoding::normalize_triplets(&name, |c| {
                    c.to_ascii_lowercase()
                }))
            }
            _ => self,
        })
    }
}

impl HostKind {
    /// Returns `true` if this host is absent or zero-length, else `false`.
    pub fn is_empty(&self) -> bool {
        matches!(self, HostKind::Empty)
    }

    /// Returns `true` if this is a registered name, else `false`.
    pub fn is_name(&self) -> bool {
        matches!(self, HostKind::Name(_))
    }

    /// Returns `true` if this is an IPv4 address, else `false`.
    pub fn is_ipv4(&self) -> bool {
        matches!(self, HostKind::Ipv4(_))
    }

    /// Returns `true` if this is an IPv6 address, else `false`.
    pub fn is_ipv6(&self) -> bool {
        matches!(self, HostKind::Ipv6 { .. })
    }

    /// Returns `true` if this is an IPvFuture literal, else `false`.
    pub fn is_ipv_future(&self) -> bool {
        matches!(self, HostKind::IpvFuture { .. })
    }

    /// The variant tag for this host value.
    pub fn host_type(&self) -> HostType {
        match self {
            HostKind::Empty => HostType::Empty,
            HostKind::Name(_) => HostType::Name,
            HostKind::Ipv4(_) => HostType::Ipv4,
            HostKind::Ipv6 { .. } => HostType::Ipv6,
            HostKind::IpvFuture { .. } => HostType::IpvFuture,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// Public Functions
// ------------------------------------------------------------------------------------------------

///
/// Parse `s` as a strict dotted-quad IPv4 literal: four decimal octets, no leading zeros.
/// Unlike the host production, which falls back to a registered name, this reports why the
/// text is not an address: `Overflow` for an octet above 255, `InvalidIpv4` otherwise.
///
pub fn parse_ipv4_literal(s: &str) -> UrlResult<Ipv4Addr> {
    if let Some(address) = parse_ipv4_all(s.as_bytes()) {
        return Ok(address);
    }
    let overflowing = s.split('.').any(|octet| {
        !octet.is_empty()
            && octet.bytes().all(|c| c.is_ascii_digit())
            && octet.parse::<u32>().map(|v| v > 255).unwrap_or(true)
    });
    if overflowing {
        Err(ErrorKind::Overflow.into())
    } else {
        Err(ErrorKind::InvalidIpv4.into())
    }
}

// ------------------------------------------------------------------------------------------------
// Crate Functions
// ------------------------------------------------------------------------------------------------

///
/// Parse a complete host text: a bracketed IP literal, a strict dotted quad, or a reg-name.
///
pub(crate) fn parse_host_text(bytes: &[u8]) -> UrlResult<HostKind> {
    if bytes.is_empty() {
        Ok(HostKind::Empty)
    } else if bytes[0] == b'[' {
        if bytes.len() < 2 || bytes[bytes.len() - 1] != b']' {
            return Err(ErrorKind::InvalidIpLiteral.into());
        }
        parse_ip_literal(&bytes[1..bytes.len() - 1])
    } else if let Some(address) = parse_ipv4_all(bytes) {
        Ok(HostKind::Ipv4(address))
    } else {
        let _ = pct_encoding::validate(bytes, &chars::REG_NAME)
            .map_err(|_| UrlError::from(ErrorKind::Syntax(Component::Host, 0)))?;
        // Validated above as reg-name bytes, therefore ASCII.
        Ok(HostKind::Name(
            String::from_utf8_lossy(bytes).into_owned(),
        ))
    }
}

///
/// Parse the interior of a bracketed IP literal (brackets already stripped): an IPv6 address
/// with optional `%25` zone identifier, or an IPvFuture literal.
///
pub(crate) fn parse_ip_literal(interior: &[u8]) -> UrlResult<HostKind> {
    if interior.first() == Some(&b'v') || interior.first() == Some(&b'V') {
        let (version, address) = split_ipvfuture(&interior[1..])?;
        Ok(HostKind::IpvFuture {
            version: String::from_utf8_lossy(version).into_owned(),
            address: String::from_utf8_lossy(address).into_owned(),
        })
    } else {
        let (address_bytes, zone_bytes) = match find_subslice(interior, b"%25") {
            Some(at) => (&interior[..at], Some(&interior[at + 3..])),
            None => (interior, None),
        };
        let address = parse_ipv6_octets(address_bytes)?;
        let zone_id = match zone_bytes {
            None => None,
            Some(zone) => {
                if zone.is_empty()
                    || pct_encoding::validate(zone, &chars::ZONE_ID).is_err()
                {
                    return Err(ErrorKind::InvalidIpLiteral.into());
                }
                Some(String::from_utf8_lossy(zone).into_owned())
            }
        };
        Ok(HostKind::Ipv6 { address, zone_id })
    }
}

///
/// Parse the whole of `bytes` as a strict dotted quad, or `None` if it is not one.
///
pub(crate) fn parse_ipv4_all(bytes: &[u8]) -> Option<Ipv4Addr> {
    let mut octets = [0u8; 4];
    let mut at = 0;
    for (i, octet) in octets.iter_mut().enumerate() {
        if i > 0 {
            if bytes.get(at) != Some(&b'.') {
                return None;
            }
            at += 1;
        }
        let (value, len) = chars::dec_octet(&bytes[at.min(bytes.len())..])?;
        *octet = value;
        at += len;
    }
    if at == bytes.len() {
        Some(Ipv4Addr::new(octets[0], octets[1], octets[2], octets[3]))
    } else {
        None
    }
}

///
/// Parse the whole of `bytes` as an RFC 3986 `IPv6address`: eight 16-bit groups, at most one
/// `::` elision, and an optional dotted-quad tail covering the final 32 bits.
///
pub(crate) fn parse_ipv6_octets(bytes: &[u8]) -> UrlResult<Ipv6Addr> {
    let elision = find_subslice(bytes, b"::");
    let (left, right) = match elision {
        Some(at) => {
            let right = &bytes[at + 2..];
            if find_subslice(right, b"::").is_some() {
                return Err(ErrorKind::InvalidIpLiteral.into());
            }
            (&bytes[..at], Some(right))
        }
        None => (bytes, None),
    };

    let left_octets = parse_ipv6_side(left, right.is_none())?;
    let right_octets = match right {
        Some(right) => parse_ipv6_side(right, true)?,
        None => Vec::new(),
    };

    let total = left_octets.len() + right_octets.len();
    let mut octets = [0u8; 16];
    match elision {
        None => {
            if total != 16 {
                return Err(ErrorKind::InvalidIpLiteral.into());
            }
            octets.copy_from_slice(&left_octets);
        }
        Some(_) => {
            // The elision stands for at least one zero group.
            if total > 14 {
                return Err(ErrorKind::InvalidIpLiteral.into());
            }
            octets[..left_octets.len()].copy_from_slice(&left_octets);
            octets[16 - right_octets.len()..].copy_from_slice(&right_octets);
        }
    }
    Ok(Ipv6Addr::from(octets))
}

// ------------------------------------------------------------------------------------------------
// Private Functions
// ------------------------------------------------------------------------------------------------

///
/// Parse one side of an IPv6 address (the groups before or after the elision) into octets.
/// A dotted-quad group is only legal as the final group of the whole address, which is the
/// final group of this side when `tail_position` is set.
///
fn parse_ipv6_side(side: &[u8], tail_position: bool) -> UrlResult<Vec<u8>> {
    let mut octets = Vec::with_capacity(16);
    if side.is_empty() {
        return Ok(octets);
    }
    let groups: Vec<&[u8]> = side.split(|c| *c == b':').collect();
    let last = groups.len() - 1;
    for (i, group) in groups.iter().enumerate() {
        if group.is_empty() {
            return Err(ErrorKind::InvalidIpLiteral.into());
        }
        if group.contains(&b'.') {
            if i != last || !tail_position {
                return Err(ErrorKind::InvalidIpLiteral.into());
            }
            let address = parse_ipv4_all(group).ok_or_else(|| {
                UrlError::from(ErrorKind::InvalidIpLiteral)
            })?;
            octets.extend_from_slice(&address.octets());
        } else {
            if group.len() > 4 || chars::HEXDIG.find_first_not_in(group).is_some() {
                return Err(ErrorKind::InvalidIpLiteral.into());
            }
            let mut value: u16 = 0;
            for c in group.iter() {
                value = value << 4 | u16::from(chars::hex_digit(*c).unwrap_or(0));
            }
            octets.extend_from_slice(&value.to_be_bytes());
        }
    }
    Ok(octets)
}

///
/// Split an IPvFuture body (the `v` already consumed) into version and address parts:
/// `1*HEXDIG "." 1*( unreserved / sub-delims / ":" )`.
///
fn split_ipvfuture(body: &[u8]) -> UrlResult<(&[u8], &[u8])> {
    let dot = body
        .iter()
        .position(|c| *c == b'.')
        .ok_or_else(|| UrlError::from(ErrorKind::InvalidIpLiteral))?;
    let (version, address) = (&body[..dot], &body[dot + 1..]);
    if version.is_empty()
        || chars::HEXDIG.find_first_not_in(version).is_some()
        || address.is_empty()
        || address
            .iter()
            .any(|c| !(chars::is_unreserved(*c) || chars::is_sub_delims(*c) || *c == b':'))
    {
        Err(ErrorKind::InvalidIpLiteral.into())
    } else {
        Ok((version, address))
    }
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn v6(s: &str) -> Ipv6Addr {
        match parse_host_text(format!("[{}]", s).as_bytes()).unwrap() {
            HostKind::Ipv6 { address, .. } => address,
            other => panic!("expected an IPv6 host, got {:?}", other),
        }
    }

    #[test]
    fn test_ipv4_strict() {
        assert_eq!(parse_ipv4_all(b"0.0.0.0"), Some(Ipv4Addr::new(0, 0, 0, 0)));
        assert_eq!(parse_ipv4_all(b"1.2.3.4"), Some(Ipv4Addr::new(1, 2, 3, 4)));
        assert_eq!(
            parse_ipv4_all(b"255.255.255.255"),
            Some(Ipv4Addr::new(255, 255, 255, 255))
        );
        assert_eq!(parse_ipv4_all(b"0"), None);
        assert_eq!(parse_ipv4_all(b"0.0.0"), None);
        assert_eq!(parse_ipv4_all(b"0.0.0.0."), None);
        assert_eq!(parse_ipv4_all(b"0.0.0.256"), None);
        assert_eq!(parse_ipv4_all(b"1.2.3.4x"), None);
        assert_eq!(parse_ipv4_all(b"01.2.3.4"), None);
        assert_eq!(parse_ipv4_all(b"999.0.0.1"), None);
    }

    #[test]
    fn test_ipv4_literal_errors() {
        use crate::error::ErrorKind;

        assert_eq!(
            parse_ipv4_literal("1.2.3.4").unwrap(),
            Ipv4Addr::new(1, 2, 3, 4)
        );
        assert!(matches!(
            parse_ipv4_literal("999.0.0.1").unwrap_err().kind(),
            ErrorKind::Overflow
        ));
        assert!(matches!(
            parse_ipv4_literal("1.2.3").unwrap_err().kind(),
            ErrorKind::InvalidIpv4
        ));
        assert!(matches!(
            parse_ipv4_literal("01.2.3.4").unwrap_err().kind(),
            ErrorKind::InvalidIpv4
        ));
    }

    #[test]
    fn test_non_canonical_dotted_is_a_name() {
        assert!(matches!(
            parse_host_text(b"999.0.0.1").unwrap(),
            HostKind::Name(_)
        ));
        assert!(matches!(
            parse_host_text(b"01.2.3.4").unwrap(),
            HostKind::Name(_)
        ));
        assert!(matches!(
            parse_host_text(b"1.2.3.4.5").unwrap(),
            HostKind::Name(_)
        ));
    }

    #[test]
    fn test_ipv6_forms() {
        assert_eq!(v6("::"), Ipv6Addr::from([0u8; 16]));
        assert_eq!(v6("::1"), Ipv6Addr::LOCALHOST);
        assert_eq!(v6("1::"), Ipv6Addr::from([0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]));
        assert_eq!(
            v6("2001:db8::ff00:42:8329"),
            v6("2001:0db8:0000:0000:0000:ff00:0042:8329")
        );
        assert_eq!(
            v6("::ffff:192.0.2.128"),
            Ipv6Addr::from([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff, 192, 0, 2, 128])
        );
        assert_eq!(
            v6("1:2:3:4:5:6:1.2.3.4"),
            Ipv6Addr::from([0, 1, 0, 2, 0, 3, 0, 4, 0, 5, 0, 6, 1, 2, 3, 4])
        );
    }

    #[test]
    fn test_ipv6_rejects() {
        for bad in &[
            "",
            ":",
            ":::",
            "1::2::3",
            "1:2:3:4:5:6:7",
            "1:2:3:4:5:6:7:8:9",
            "1:2:3:4:5:6:7::8",
            "12345::",
            "g::",
            "1.2.3.4::",
            "::1.2.3.4.5",
        ] {
            assert!(
                parse_host_text(format!("[{}]", bad).as_bytes()).is_err(),
                "expected [{}] to be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_zone_id() {
        match parse_host_text(b"[fe80::1%25eth0]").unwrap() {
            HostKind::Ipv6 { zone_id, .. } => assert_eq!(zone_id.as_deref(), Some("eth0")),
            other => panic!("expected an IPv6 host, got {:?}", other),
        }
        assert!(parse_host_text(b"[fe80::1%25]").is_err());
        assert!(parse_host_text(b"[fe80::1%eth0]").is_err());
    }

    #[test]
    fn test_ipvfuture() {
        match parse_host_text(b"[v1.0]").unwrap() {
            HostKind::IpvFuture { version, address } => {
                assert_eq!(version, "1");
                assert_eq!(address, "0");
            }
            other => panic!("expected an IPvFuture host, got {:?}", other),
        }
        assert!(parse_host_text(b"[v.0]").is_err());
        assert!(parse_host_text(b"[v1.]").is_err());
        assert!(parse_host_text(b"[vg.0]").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for text in &["example.com", "127.0.0.1", "[::1]", "[v7.1:2]"] {
            let host = HostKind::from_str(text).unwrap();
            assert_eq!(host.to_string(), *text);
        }
    }

    #[test]
    fn test_name_equality_ignores_case() {
        assert_eq!(
            HostKind::Name("Example.COM".to_string()),
            HostKind::Name("example.com".to_string())
        );
    }
}
