//! Mastodon REST client for the relationship endpoints
//!
//! [`MastodonClient`] wraps any [`HttpClient`] and adds the instance base URL
//! and bearer token handling. It only covers the calls the relationship lists
//! need: listing follows, followers, blocks and mutes, and blocking or
//! unblocking an account.

mod range;

pub use range::PageRange;
pub use tusklist_common::error::{
    AuthError, ClientError, ClientResult, DecodeError, HttpError, TransportError,
};

use bytes::Bytes;
use http::{HeaderValue, Method, Request, StatusCode, header};
use serde::de::DeserializeOwned;
use smol_str::SmolStr;
use tusklist_common::http_client::HttpClient;
use tusklist_common::{Account, AccountId, AuthorizationToken, Relationship};
use url::Url;

/// Authenticated REST client for a single Mastodon-compatible instance
#[derive(Debug, Clone)]
pub struct MastodonClient<C> {
    http: C,
    base_uri: Url,
    token: Option<AuthorizationToken>,
}

impl<C> MastodonClient<C> {
    /// Create an unauthenticated client for an instance
    ///
    /// # Example
    /// ```ignore
    /// let client = MastodonClient::new(
    ///     reqwest::Client::new(),
    ///     Url::parse("https://mastodon.social")?,
    /// );
    /// ```
    pub fn new(http: C, base_uri: Url) -> Self {
        Self {
            http,
            base_uri,
            token: None,
        }
    }

    /// Builder-style variant of [`set_token`](Self::set_token)
    pub fn with_token(mut self, token: impl Into<SmolStr>) -> Self {
        self.set_token(token);
        self
    }

    /// Use the given OAuth access token for subsequent requests
    pub fn set_token(&mut self, token: impl Into<SmolStr>) {
        self.token = Some(AuthorizationToken::Bearer(token.into()));
    }

    /// Build an endpoint URL from path segments below the base path.
    ///
    /// Segments are percent-encoded, so account ids never change the path
    /// structure.
    fn endpoint(&self, segments: &[&str], query: Option<&PageRange>) -> ClientResult<String> {
        let mut uri = self.base_uri.clone();
        uri.path_segments_mut()
            .map_err(|()| {
                TransportError::InvalidRequest(format!("{} cannot be a base URL", self.base_uri))
            })?
            .pop_if_empty()
            .extend(segments);
        if let Some(range) = query {
            let qs = range.to_query_string()?;
            if !qs.is_empty() {
                uri.set_query(Some(&qs));
            }
        }
        Ok(uri.into())
    }
}

impl<C: HttpClient + Sync> MastodonClient<C> {
    /// Accounts followed by `account`
    pub async fn account_following(
        &self,
        account: &AccountId,
        range: &PageRange,
    ) -> ClientResult<Vec<Account>> {
        let uri = self.endpoint(
            &["api", "v1", "accounts", account.as_str(), "following"],
            Some(range),
        )?;
        self.send_json(Method::GET, uri).await
    }

    /// Accounts following `account`
    pub async fn account_followers(
        &self,
        account: &AccountId,
        range: &PageRange,
    ) -> ClientResult<Vec<Account>> {
        let uri = self.endpoint(
            &["api", "v1", "accounts", account.as_str(), "followers"],
            Some(range),
        )?;
        self.send_json(Method::GET, uri).await
    }

    /// Accounts blocked by the authenticated user
    pub async fn blocks(&self, range: &PageRange) -> ClientResult<Vec<Account>> {
        let uri = self.endpoint(&["api", "v1", "blocks"], Some(range))?;
        self.send_json(Method::GET, uri).await
    }

    /// Accounts muted by the authenticated user
    pub async fn mutes(&self, range: &PageRange) -> ClientResult<Vec<Account>> {
        let uri = self.endpoint(&["api", "v1", "mutes"], Some(range))?;
        self.send_json(Method::GET, uri).await
    }

    /// Block `account`
    pub async fn block_account(&self, account: &AccountId) -> ClientResult<Relationship> {
        let uri = self.endpoint(&["api", "v1", "accounts", account.as_str(), "block"], None)?;
        self.send_json(Method::POST, uri).await
    }

    /// Unblock `account`
    pub async fn unblock_account(&self, account: &AccountId) -> ClientResult<Relationship> {
        let uri = self.endpoint(&["api", "v1", "accounts", account.as_str(), "unblock"], None)?;
        self.send_json(Method::POST, uri).await
    }

    async fn send_json<T: DeserializeOwned>(&self, method: Method, uri: String) -> ClientResult<T> {
        let mut builder = Request::builder()
            .method(method)
            .uri(&uri)
            .header(header::ACCEPT, "application/json");

        if let Some(token) = &self.token {
            let value: HeaderValue = token.try_into().map_err(|e| {
                TransportError::InvalidRequest(format!("Invalid authorization token: {}", e))
            })?;
            builder = builder.header(header::AUTHORIZATION, value);
        }

        let request = builder
            .body(Vec::new())
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;

        let response = self
            .http
            .send_http(request)
            .await
            .map_err(|e| TransportError::Other(Box::new(e)))?;

        let status = response.status();
        let buffer = Bytes::from(response.into_body());

        if status.is_success() {
            return serde_json::from_slice(&buffer)
                .map_err(|e| ClientError::Decode(DecodeError::Json(e)));
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Auth(match self.token {
                Some(_) => AuthError::InvalidToken,
                None => AuthError::NotAuthenticated,
            }));
        }
        Err(ClientError::Http(HttpError {
            status,
            body: (!buffer.is_empty()).then_some(buffer),
        }))
    }
}
