use std::fmt;

use tusklist_common::Account;

use super::LoadMoreTrigger;

/// Pagination status shown in the list footer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPhase {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A page is loading, or more pages are known to be available
    Loading,
    /// The server has no more accounts for this list
    EndOfData,
    /// The last fetch failed; the user may retry
    Retry,
}

/// One displayed row of a relationship list
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    /// The account shown in this row
    pub account: Account,
    /// Whether the user currently blocks this account
    pub blocked: bool,
}

/// Result of a fetch request that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A first page replaced the list, with this many accounts
    Replaced(usize),
    /// A continuation page appended this many accounts
    Appended(usize),
    /// The server had no new accounts
    EndOfData,
    /// Nothing was requested
    Skipped(SkipReason),
}

/// Why a fetch request was not sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Another fetch is still outstanding
    InFlight,
    /// The list is exhausted; only a top refresh may fetch again
    EndOfData,
    /// The scroll position is not close enough to the end of the list
    BelowThreshold,
}

/// The block toggle's intended action, for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockVerb {
    /// Blocking an account
    Block,
    /// Unblocking an account
    Unblock,
}

impl BlockVerb {
    /// The verb for a desired blocked state
    pub fn for_state(blocked: bool) -> Self {
        if blocked { Self::Block } else { Self::Unblock }
    }
}

impl fmt::Display for BlockVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Block => "block",
            Self::Unblock => "unblock",
        })
    }
}

/// Tunables for a [`RelationshipList`](super::RelationshipList)
#[derive(Debug, Clone, bon::Builder)]
pub struct ListOptions {
    /// Entries left below the viewport at which the next page is requested
    #[builder(default = LoadMoreTrigger::DEFAULT_VISIBLE_THRESHOLD)]
    pub visible_threshold: usize,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}
