use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;

use tusklist_common::http_client::HttpClient;
use tusklist_common::{Account, AccountId, Relationship};

use super::ListError;
use crate::client::{ClientResult, MastodonClient, PageRange};

/// Which account list is being displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipKind {
    /// Accounts a given account follows
    Follows,
    /// Accounts following a given account
    Followers,
    /// Accounts the user has blocked
    Blocks,
    /// Accounts the user has muted
    Mutes,
}

impl RelationshipKind {
    /// Whether lists of this kind are scoped to a specific account
    pub fn needs_account(self) -> bool {
        matches!(self, Self::Follows | Self::Followers)
    }

    /// Whether tab reselection should scroll this list back to the top
    pub fn allows_jump_to_top(self) -> bool {
        self != Self::Blocks
    }

    /// Lower-case name, as accepted by [`FromStr`]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Follows => "follows",
            Self::Followers => "followers",
            Self::Blocks => "blocks",
            Self::Mutes => "mutes",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised [`RelationshipKind`] name
#[derive(Debug, Clone, thiserror::Error, miette::Diagnostic)]
#[error("unknown relationship kind {0:?}")]
#[diagnostic(help("expected one of: follows, followers, blocks, mutes"))]
pub struct UnknownKind(pub String);

impl FromStr for RelationshipKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "follows" | "following" => Ok(Self::Follows),
            "followers" => Ok(Self::Followers),
            "blocks" => Ok(Self::Blocks),
            "mutes" => Ok(Self::Mutes),
            _ => Err(UnknownKind(s.to_string())),
        }
    }
}

/// Something that can produce one page of accounts for a list.
///
/// `cursor` is the id of the last account already displayed, or `None` for
/// the first page.
#[cfg_attr(not(target_arch = "wasm32"), trait_variant::make(Send))]
pub trait PageSource {
    /// Fetch the page that follows `cursor`
    fn fetch_page(
        &self,
        cursor: Option<&AccountId>,
    ) -> impl Future<Output = ClientResult<Vec<Account>>>;
}

/// Mutating block/unblock calls used by the list's block toggle.
#[cfg_attr(not(target_arch = "wasm32"), trait_variant::make(Send))]
pub trait BlockActions {
    /// Block (`blocked = true`) or unblock `account`
    fn set_blocked(
        &self,
        account: &AccountId,
        blocked: bool,
    ) -> impl Future<Output = ClientResult<Relationship>>;
}

impl<C: HttpClient + Sync> BlockActions for MastodonClient<C> {
    async fn set_blocked(&self, account: &AccountId, blocked: bool) -> ClientResult<Relationship> {
        if blocked {
            self.block_account(account).await
        } else {
            self.unblock_account(account).await
        }
    }
}

impl<T: BlockActions + Sync> BlockActions for Arc<T> {
    fn set_blocked(
        &self,
        account: &AccountId,
        blocked: bool,
    ) -> impl Future<Output = ClientResult<Relationship>> + Send {
        self.as_ref().set_blocked(account, blocked)
    }
}

/// [`PageSource`] backed by the Mastodon REST API.
///
/// Each variant carries only what its endpoint needs: follows and followers
/// are scoped to an account, blocks and mutes always belong to the
/// authenticated user.
#[derive(Debug)]
pub enum RelationshipSource<C> {
    /// `GET /api/v1/accounts/:id/following`
    Following {
        /// REST client
        client: Arc<MastodonClient<C>>,
        /// Whose follows to list
        account: AccountId,
    },
    /// `GET /api/v1/accounts/:id/followers`
    Followers {
        /// REST client
        client: Arc<MastodonClient<C>>,
        /// Whose followers to list
        account: AccountId,
    },
    /// `GET /api/v1/blocks`
    Blocks {
        /// REST client
        client: Arc<MastodonClient<C>>,
    },
    /// `GET /api/v1/mutes`
    Mutes {
        /// REST client
        client: Arc<MastodonClient<C>>,
    },
}

impl<C> RelationshipSource<C> {
    /// Select the endpoint for `kind`.
    ///
    /// `account` is required for [`RelationshipKind::Follows`] and
    /// [`RelationshipKind::Followers`] and ignored otherwise.
    pub fn new(
        client: Arc<MastodonClient<C>>,
        kind: RelationshipKind,
        account: Option<AccountId>,
    ) -> Result<Self, ListError> {
        match (kind, account) {
            (RelationshipKind::Follows, Some(account)) => Ok(Self::Following { client, account }),
            (RelationshipKind::Followers, Some(account)) => Ok(Self::Followers { client, account }),
            (RelationshipKind::Follows | RelationshipKind::Followers, None) => {
                Err(ListError::MissingAccount { kind })
            }
            (RelationshipKind::Blocks, _) => Ok(Self::Blocks { client }),
            (RelationshipKind::Mutes, _) => Ok(Self::Mutes { client }),
        }
    }

    /// The list kind this source serves
    pub fn kind(&self) -> RelationshipKind {
        match self {
            Self::Following { .. } => RelationshipKind::Follows,
            Self::Followers { .. } => RelationshipKind::Followers,
            Self::Blocks { .. } => RelationshipKind::Blocks,
            Self::Mutes { .. } => RelationshipKind::Mutes,
        }
    }
}

impl<C: HttpClient + Send + Sync> PageSource for RelationshipSource<C> {
    async fn fetch_page(&self, cursor: Option<&AccountId>) -> ClientResult<Vec<Account>> {
        let range = PageRange::before(cursor);
        match self {
            Self::Following { client, account } => client.account_following(account, &range).await,
            Self::Followers { client, account } => client.account_followers(account, &range).await,
            Self::Blocks { client } => client.blocks(&range).await,
            Self::Mutes { client } => client.mutes(&range).await,
        }
    }
}
