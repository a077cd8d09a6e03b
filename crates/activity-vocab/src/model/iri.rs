//! Absolute IRIs used as entity identifiers and references.
//!
//! An [`Iri`] is validated with the WHATWG URL parser but keeps the exact text
//! it was read from, so `https://example.com` is not rewritten to
//! `https://example.com/` on the way back out.

use std::fmt;
use std::str::FromStr;

use url::Url;
use uuid::Uuid;

/// The reference that addresses an object to everyone.
pub const PUBLIC_AUDIENCE_IRI: &str = "https://www.w3.org/ns/activitystreams#Public";

/// The ActivityStreams JSON-LD context document.
pub const ACTIVITYSTREAMS_CONTEXT: &str = "https://www.w3.org/ns/activitystreams";

/// An absolute IRI, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Iri(String);

impl Iri {
    /// Parses an absolute IRI. Relative references are rejected.
    pub fn parse(s: &str) -> Result<Self, url::ParseError> {
        Url::parse(s)?;
        Ok(Iri(s.to_string()))
    }

    /// Mints a fresh `urn:uuid:` identifier (UUID v7, time-ordered).
    pub fn mint_urn_uuid() -> Self {
        Iri(format!("urn:uuid:{}", Uuid::now_v7()))
    }

    /// The public-audience sentinel.
    pub fn public_audience() -> Self {
        Iri(PUBLIC_AUDIENCE_IRI.to_string())
    }

    /// Returns true if this is exactly the public-audience sentinel.
    pub fn is_public_audience(&self) -> bool {
        self.0 == PUBLIC_AUDIENCE_IRI
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the parsed (normalized) URL.
    pub fn to_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.0)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl FromStr for Iri {
    type Err = url::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Iri::parse(s)
    }
}

impl From<Url> for Iri {
    fn from(url: Url) -> Self {
        Iri(url.into())
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Iri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
