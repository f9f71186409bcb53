//! Common types for the tusklist Mastodon client

#![warn(missing_docs)]
pub use smol_str;
pub use url;

pub mod error;
/// HTTP client abstraction used by tusklist crates.
pub mod http_client;
/// Mastodon API entities consumed by tusklist.
pub mod types;

pub use types::{Account, AccountId, IdError, Relationship};

use smol_str::SmolStr;

/// Authorization token attached to API requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationToken {
    /// OAuth bearer token, as issued by `/oauth/token`
    Bearer(SmolStr),
}

impl TryFrom<&AuthorizationToken> for http::HeaderValue {
    type Error = http::header::InvalidHeaderValue;

    fn try_from(token: &AuthorizationToken) -> Result<Self, Self::Error> {
        let mut value = match token {
            AuthorizationToken::Bearer(t) => http::HeaderValue::from_str(&format!("Bearer {t}"))?,
        };
        value.set_sensitive(true);
        Ok(value)
    }
}
