use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::AccountId;

/// A user account, as returned by the account list endpoints.
///
/// Only `id` is required. Every other field falls back to its default when
/// absent, since servers other than Mastodon omit some of them. Fields this
/// type does not model are preserved in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Server-assigned id
    pub id: AccountId,
    /// Local username, without the domain
    #[serde(default)]
    pub username: SmolStr,
    /// `username` for local accounts, `username@domain` for remote ones
    #[serde(default)]
    pub acct: SmolStr,
    /// Profile display name, may be empty
    #[serde(default)]
    pub display_name: String,
    /// Profile page URL
    #[serde(default)]
    pub url: Option<String>,
    /// Avatar image URL
    #[serde(default)]
    pub avatar: Option<String>,
    /// Profile bio, as HTML
    #[serde(default)]
    pub note: String,
    /// Whether the account manually approves follow requests
    #[serde(default)]
    pub locked: bool,
    /// Whether the account is marked as automated
    #[serde(default)]
    pub bot: bool,
    /// When the account was created
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Number of followers
    #[serde(default)]
    pub followers_count: u64,
    /// Number of accounts followed
    #[serde(default)]
    pub following_count: u64,
    /// Number of statuses posted
    #[serde(default)]
    pub statuses_count: u64,
    /// Fields not modelled above
    #[serde(flatten)]
    pub extra: BTreeMap<SmolStr, serde_json::Value>,
}

impl Account {
    /// Display name, or the username when no display name is set
    pub fn display_name_or_username(&self) -> &str {
        if self.display_name.trim().is_empty() {
            &self.username
        } else {
            &self.display_name
        }
    }
}
