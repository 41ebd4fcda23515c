/*!
Provides a builder experience for creating `Url` instances. The
[`UrlBuilder`](struct.UrlBuilder.html) type provides a simple API to create
new `Url` instances in a fluent style.

# Example

```rust
use urlbuf::builder::UrlBuilder;
use urlbuf::{error::Result as UrlResult, Url};
use std::convert::TryFrom;

fn make_example_url() -> UrlResult<Url> {
    let mut builder = UrlBuilder::default();
    builder
        .scheme("https")
        .user("john.doe")
        .host("www.example.com")
        .port(123)
        .path("/forum/questions/")
        .query("tag=networking&order=newest")
        .fragment("top");
    Url::try_from(&mut builder)
}

assert_eq!(
    make_example_url().unwrap().to_string(),
    "https://john.doe@www.example.com:123/forum/questions/?tag=networking&order=newest#top",
);
```

*/

#![allow(clippy::module_name_repetitions)]

use crate::error::Error as UrlError;
use crate::host::HostKind;
use crate::url::Url;
use std::convert::TryFrom;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

///
/// The builder type, this provides simple API access to create new `Url` instances in a
/// fluent style.
///
#[derive(Debug, Default)]
pub struct UrlBuilder {
    scheme: Option<String>,
    user: Option<String>,
    password: Option<String>,
    host: Option<String>,
    host_kind: Option<HostKind>,
    port: Option<u16>,
    path: Option<String>,
    query: Option<String>,
    fragment: Option<String>,
}

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

impl TryFrom<&mut UrlBuilder> for Url {
    type Error = UrlError;

    fn try_from(builder: &mut UrlBuilder) -> Result<Self, Self::Error> {
        let mut url = Url::new();

        if let Some(path) = &builder.path {
            url.set_path(path);
        }

        if let Some(host) = &builder.host {
            url.set_host(host)?;
        } else if let Some(host) = &builder.host_kind {
            url.set_host_kind(host)?;
        }

        if let Some(user) = &builder.user {
            url.set_user(user)?;
            if let Some(password) = &builder.password {
                url.set_password(password)?;
            }
        }

        if let Some(port) = builder.port {
            url.set_port(port)?;
        }

        if let Some(query) = &builder.query {
            url.set_query(query);
        }

        if let Some(fragment) = &builder.fragment {
            url.set_fragment(fragment);
        }

        // Last, so that any `./` guard on the path is stripped rather than created.
        if let Some(scheme) = &builder.scheme {
            url.set_scheme(scheme)?;
        }

        Ok(url)
    }
}

impl UrlBuilder {
    /// Set the scheme for the new URL.
    pub fn scheme(&mut self, scheme: &str) -> &mut Self {
        self.scheme = Some(scheme.to_string());
        self
    }

    /// Set the user name (plain text) for the new URL.
    pub fn user(&mut self, user: &str) -> &mut Self {
        self.user = Some(user.to_string());
        self
    }

    /// Set the password (plain text) for the new URL.
    pub fn password(&mut self, password: &str) -> &mut Self {
        self.password = Some(password.to_string());
        self
    }

    /// Set the host (plain text) for the new URL.
    pub fn host(&mut self, host: &str) -> &mut Self {
        self.host = Some(host.to_string());
        self
    }

    /// Set the host from a parsed host value.
    pub fn host_kind(&mut self, host: HostKind) -> &mut Self {
        self.host_kind = Some(host);
        self
    }

    /// Set the port for the new URL.
    pub fn port(&mut self, port: u16) -> &mut Self {
        self.port = Some(port);
        self
    }

    /// Set the path (plain text) for the new URL.
    pub fn path(&mut self, path: &str) -> &mut Self {
        self.path = Some(path.to_string());
        self
    }

    /// Set the query (plain text) for the new URL.
    pub fn query(&mut self, query: &str) -> &mut Self {
        self.query = Some(query.to_string());
        self
    }

    /// Set the fragment (plain text) for the new URL.
    pub fn fragment(&mut self, fragment: &str) -> &mut Self {
        self.fragment = Some(fragment.to_string());
        self
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------
