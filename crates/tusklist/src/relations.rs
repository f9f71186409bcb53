//! Paginated relationship lists
//!
//! A relationship list shows the accounts a user follows, is followed by,
//! blocks or mutes, one page at a time, and lets the user block or unblock
//! the accounts in it.
//!
//! # Core Concepts
//!
//! - **Page sources**: where pages come from, see [`PageSource`] and the
//!   REST-backed [`RelationshipSource`]
//! - **Cursor**: the id of the last displayed account; the next page is
//!   requested relative to it
//! - **Phase**: the pagination status shown in the footer, see [`FetchPhase`]
//! - **Call group**: the cancellation scope that ties every network call to
//!   the list's lifetime, see [`CallGroup`]
//!
//! # Example
//!
//! ```ignore
//! # use std::sync::Arc;
//! # use tusklist::relations::*;
//! # async fn example(client: Arc<tusklist::client::MastodonClient<reqwest::Client>>) -> Result<(), ListError> {
//! let list = RelationshipList::from_client(client, RelationshipKind::Blocks, None)?;
//! list.refresh().await?;
//! while list.phase() == FetchPhase::Loading {
//!     list.load_more().await?;
//! }
//! # Ok(())
//! # }
//! ```

mod calls;
mod error;
mod list;
mod merge;
mod source;
mod trigger;
mod types;


pub use calls::CallGroup;
pub use error::ListError;
pub use list::RelationshipList;
pub use merge::{PageMerge, contains_account, merge_page};
pub use source::{BlockActions, PageSource, RelationshipKind, RelationshipSource, UnknownKind};
pub use trigger::{LoadMoreTrigger, Viewport};
pub use types::{BlockVerb, FetchOutcome, FetchPhase, ListEntry, ListOptions, SkipReason};
