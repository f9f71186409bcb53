use std::fmt;
use std::sync::LazyLock;
use std::{ops::Deref, str::FromStr};

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, de::Error};
use smol_str::SmolStr;

/// Opaque account identifier assigned by the server.
///
/// Mastodon uses numeric snowflakes serialized as strings, other
/// implementations use flake ids, short keys or whatever else they like.
///
/// Ids read from server responses only have to be non-empty. Ids built from
/// user input with [`AccountId::new`] or [`FromStr`] must also stay within a
/// conservative character set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Hash)]
#[serde(transparent)]
pub struct AccountId(SmolStr);

/// Maximum accepted id length in bytes
pub const MAX_ID_LEN: usize = 64;

static ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid id regex"));

/// Errors from validating an [`AccountId`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum IdError {
    /// The id was empty
    #[error("account id is empty")]
    Empty,
    /// The id exceeded [`MAX_ID_LEN`]
    #[error("account id is longer than {MAX_ID_LEN} bytes")]
    TooLong,
    /// The id contained characters outside `[A-Za-z0-9_-]`
    #[error("account id {0:?} contains invalid characters")]
    #[diagnostic(help("account ids may only contain ASCII letters, digits, '_' and '-'"))]
    InvalidChars(String),
}

impl AccountId {
    /// Fallible constructor, validates and copies the input
    pub fn new(id: &str) -> Result<Self, IdError> {
        validate(id)?;
        Ok(Self(SmolStr::new(id)))
    }

    /// Fallible constructor for static strings, avoids allocating
    pub fn new_static(id: &'static str) -> Result<Self, IdError> {
        validate(id)?;
        Ok(Self(SmolStr::new_static(id)))
    }

    /// The id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn validate(id: &str) -> Result<(), IdError> {
    if id.is_empty() {
        Err(IdError::Empty)
    } else if id.len() > MAX_ID_LEN {
        Err(IdError::TooLong)
    } else if !ID_REGEX.is_match(id) {
        Err(IdError::InvalidChars(id.to_string()))
    } else {
        Ok(())
    }
}

impl FromStr for AccountId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: SmolStr = Deserialize::deserialize(deserializer)?;
        if value.is_empty() {
            return Err(D::Error::custom(IdError::Empty));
        }
        Ok(Self(value))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Deref for AccountId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<AccountId> for SmolStr {
    fn from(value: AccountId) -> Self {
        value.0
    }
}
