use crate::error::StoreError;
use std::fmt;
use std::str::FromStr;

/// Transport scheme of a store connection.
///
/// `+s` variants verify the server certificate, `+ssc` variants accept
/// self-signed certificates. Only plain `bolt` and `http` run unencrypted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scheme {
    #[default]
    Bolt,
    BoltSecure,
    BoltSelfSigned,
    Http,
    Https,
    HttpSecure,
    HttpSelfSigned,
}

impl Scheme {
    pub const ALL: &'static [Scheme] = &[
        Scheme::Bolt,
        Scheme::BoltSecure,
        Scheme::BoltSelfSigned,
        Scheme::Http,
        Scheme::Https,
        Scheme::HttpSecure,
        Scheme::HttpSelfSigned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Bolt => "bolt",
            Scheme::BoltSecure => "bolt+s",
            Scheme::BoltSelfSigned => "bolt+ssc",
            Scheme::Http => "http",
            Scheme::Https => "https",
            Scheme::HttpSecure => "http+s",
            Scheme::HttpSelfSigned => "http+ssc",
        }
    }

    pub fn requires_encryption(&self) -> bool {
        !matches!(self, Scheme::Bolt | Scheme::Http)
    }

    pub fn accepts_self_signed(&self) -> bool {
        matches!(self, Scheme::BoltSelfSigned | Scheme::HttpSelfSigned)
    }

    pub fn uri(&self, address: &str) -> String {
        format!("{}://{}", self.as_str(), address)
    }
}

impl FromStr for Scheme {
    type Err = StoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Scheme::ALL
            .iter()
            .copied()
            .find(|scheme| scheme.as_str() == value)
            .ok_or_else(|| StoreError::UnsupportedScheme(value.to_string()))
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
