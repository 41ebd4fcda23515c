/*!
Provides the well-known scheme registry and the advisory default-port table.

Scheme text is stored exactly as given; recognition and comparison are
case-insensitive. Unrecognized schemes parse and round-trip but map to
[`SchemeId::Unknown`]. Default ports are advisory only and never applied by
the library.

*/

use std::collections::HashMap;
use std::fmt::{Display, Formatter};

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

///
/// Identifies a well-known scheme, independent of the case it was spelled with.
///
/// # Example
///
/// ```rust
/// use urlbuf::SchemeId;
///
/// assert_eq!(SchemeId::from_name("HTTP"), SchemeId::Http);
/// assert_eq!(SchemeId::from_name("outlandish"), SchemeId::Unknown);
/// assert_eq!(SchemeId::Https.default_port(), Some(443));
/// ```
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SchemeId {
    /// The URL has no scheme component.
    None,
    /// The scheme parses but is not in the registry.
    Unknown,
    Http,
    Https,
    Ws,
    Wss,
    Ftp,
    File,
    Mailto,
    Data,
    Ssh,
    Telnet,
    Ldap,
    News,
    Urn,
}

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

lazy_static! {
    static ref REGISTRY: HashMap<&'static str, SchemeId> = {
        let mut map = HashMap::new();
        let _ = map.insert("http", SchemeId::Http);
        let _ = map.insert("https", SchemeId::Https);
        let _ = map.insert("ws", SchemeId::Ws);
        let _ = map.insert("wss", SchemeId::Wss);
        let _ = map.insert("ftp", SchemeId::Ftp);
        let _ = map.insert("file", SchemeId::File);
        let _ = map.insert("mailto", SchemeId::Mailto);
        let _ = map.insert("data", SchemeId::Data);
        let _ = map.insert("ssh", SchemeId::Ssh);
        let _ = map.insert("telnet", SchemeId::Telnet);
        let _ = map.insert("ldap", SchemeId::Ldap);
        let _ = map.insert("news", SchemeId::News);
        let _ = map.insert("urn", SchemeId::Urn);
        map
    };
}

impl Default for SchemeId {
    fn default() -> Self {
        Self::None
    }
}

impl Display for SchemeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name().unwrap_or("<unknown>"))
    }
}

impl SchemeId {
    ///
    /// Map a scheme spelling to its registry entry; the lookup is case-insensitive.
    ///
    pub fn from_name(s: &str) -> SchemeId {
        let lower = s.to_ascii_lowercase();
        REGISTRY.get(lower.as_str()).copied().unwrap_or(SchemeId::Unknown)
    }

    ///
    /// The registered lowercase spelling of this scheme, or `None` for the `None` and
    /// `Unknown` sentinels.
    ///
    pub fn name(&self) -> Option<&'static str> {
        match self {
            SchemeId::Http => Some("http"),
            SchemeId::Https => Some("https"),
            SchemeId::Ws => Some("ws"),
            SchemeId::Wss => Some("wss"),
            SchemeId::Ftp => Some("ftp"),
            SchemeId::File => Some("file"),
            SchemeId::Mailto => Some("mailto"),
            SchemeId::Data => Some("data"),
            SchemeId::Ssh => Some("ssh"),
            SchemeId::Telnet => Some("telnet"),
            SchemeId::Ldap => Some("ldap"),
            SchemeId::News => Some("news"),
            SchemeId::Urn => Some("urn"),
            SchemeId::None | SchemeId::Unknown => None,
        }
    }

    ///
    /// The conventional port for this scheme, if one exists. Never applied by the library;
    /// callers may consult it when a URL carries no explicit port.
    ///
    pub fn default_port(&self) -> Option<u16> {
        match self {
            SchemeId::Http | SchemeId::Ws => Some(80),
            SchemeId::Https | SchemeId::Wss => Some(443),
            SchemeId::Ftp => Some(21),
            SchemeId::Ssh => Some(22),
            SchemeId::Telnet => Some(23),
            SchemeId::Ldap => Some(389),
            _ => None,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// Public Functions
// ------------------------------------------------------------------------------------------------

///
/// Return `true` if `s` matches `scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
///
pub fn is_scheme(s: &str) -> bool {
    let bytes = s.as_bytes();
    match bytes.first() {
        Some(c) if c.is_ascii_alphabetic() => crate::chars::SCHEME_TAIL
            .find_first_not_in(&bytes[1..])
            .is_none(),
        _ => false,
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------
