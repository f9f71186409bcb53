use serde::Serialize;
use tusklist_common::AccountId;
use tusklist_common::error::TransportError;

/// Id-based page window for the account list endpoints.
///
/// Unset fields are left out of the query string, so the server applies its
/// own defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, bon::Builder)]
pub struct PageRange {
    /// Return results older than this id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_id: Option<AccountId>,
    /// Return results newer than this id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_id: Option<AccountId>,
    /// Maximum number of results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl PageRange {
    /// A window ending just before `cursor`, or the first page when `None`
    pub fn before(cursor: Option<&AccountId>) -> Self {
        Self {
            max_id: cursor.cloned(),
            ..Self::default()
        }
    }

    pub(crate) fn to_query_string(&self) -> Result<String, TransportError> {
        serde_html_form::to_string(self)
            .map_err(|e| TransportError::InvalidRequest(format!("failed to encode query: {e}")))
    }
}
