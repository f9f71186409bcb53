use tusklist_common::AccountId;

use super::{BlockVerb, RelationshipKind};
use crate::client::ClientError;

/// Errors surfaced by a relationship list
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ListError {
    /// Fetching a page failed; the list moved to the retry phase
    #[error("Fetch failure: {0}")]
    #[diagnostic(code(tusklist::list::fetch))]
    Fetch(
        #[source]
        #[diagnostic_source]
        ClientError,
    ),

    /// A block or unblock call failed; the entry was left unchanged
    #[error("Failed to {verb} account id {account}")]
    #[diagnostic(code(tusklist::list::action))]
    Action {
        /// The account the action targeted
        account: AccountId,
        /// What was attempted
        verb: BlockVerb,
        /// Underlying client error
        #[source]
        #[diagnostic_source]
        source: ClientError,
    },

    /// Follows and followers lists need an account to scope them to
    #[error("a {kind} list needs an account id")]
    #[diagnostic(
        code(tusklist::list::missing_account),
        help("pass --account with the id of the account to list")
    )]
    MissingAccount {
        /// The list kind that was requested
        kind: RelationshipKind,
    },

    /// The list was closed; in-flight results are discarded
    #[error("relationship list is closed")]
    #[diagnostic(code(tusklist::list::closed))]
    Closed,
}
