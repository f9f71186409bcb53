use serde::{Deserialize, Serialize};

use super::AccountId;

/// How the authenticated user relates to another account.
///
/// Returned by the block and unblock endpoints to confirm the new state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// The other account
    pub id: AccountId,
    /// The user follows this account
    #[serde(default)]
    pub following: bool,
    /// This account follows the user
    #[serde(default)]
    pub followed_by: bool,
    /// The user blocks this account
    #[serde(default)]
    pub blocking: bool,
    /// The user mutes this account
    #[serde(default)]
    pub muting: bool,
    /// A follow request to this account is pending
    #[serde(default)]
    pub requested: bool,
    /// The user blocks this account's domain
    #[serde(default)]
    pub domain_blocking: bool,
}
