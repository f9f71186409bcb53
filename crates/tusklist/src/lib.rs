//! # tusklist
//!
//! Paginated follow, follower, block and mute lists for Mastodon-compatible
//! clients.
//!
//! The crate has two halves:
//!
//! - [`client`]: a small typed REST client for the relationship endpoints,
//!   generic over any [`HttpClient`](tusklist_common::http_client::HttpClient)
//! - [`relations`]: the list controller, which pages through one of those
//!   lists, keeps the displayed entries free of duplicates, and applies block
//!   and unblock confirmations
//!
//! ## Example
//!
//! Print everyone the user has muted.
//!
//! ```no_run
//! use std::sync::Arc;
//! use tusklist::client::MastodonClient;
//! use tusklist::relations::{FetchPhase, RelationshipKind, RelationshipList};
//!
//! # async fn run() -> miette::Result<()> {
//! let base = url::Url::parse("https://mastodon.social").map_err(|e| miette::miette!("{e}"))?;
//! let client = MastodonClient::new(reqwest::Client::new(), base)
//!     .with_token("token");
//! let list = RelationshipList::from_client(Arc::new(client), RelationshipKind::Mutes, None)?;
//!
//! list.refresh().await?;
//! while list.phase() == FetchPhase::Loading {
//!     list.load_more().await?;
//! }
//! for entry in list.entries().iter() {
//!     println!("{}", entry.account.acct);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod client;
pub mod relations;

pub use tusklist_common::*;
