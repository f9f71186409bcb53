/// Account entity
pub mod account;
/// Server-assigned identifiers
pub mod id;
/// Relationship entity
pub mod relationship;

pub use account::Account;
pub use id::{AccountId, IdError};
pub use relationship::Relationship;
