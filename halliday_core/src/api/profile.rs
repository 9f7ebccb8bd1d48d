use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// How the profile endpoint is called.
pub const METHOD: Method = Method::GET;

/// Where the profile endpoint lives.
pub const PATH: &str = "/account/profile";

/// What the server knows about the logged-in user. Read-only; nothing in the
/// client changes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Display name
    pub username: String,

    /// Contact and login address
    pub email: String,

    /// Has the user entered the code we mailed them?
    pub email_verified: bool,

    /// What the account is allowed to do. See `AuthLevel`.
    pub auth_level: String,

    /// Who vouches for this account, e.g. the server itself or Google.
    pub identity_provider: String,

    /// When the account was created, in unix seconds.
    pub registration_ts: i64,
}

/// The access levels the server hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthLevel {
    /// Registered but hasn't confirmed their email yet
    Unverified,

    /// A normal, confirmed account
    Verified,

    /// Can do anything
    Admin,
}

impl Profile {
    /// The account's access level, if it's one we know about. The server
    /// isn't consistent about case, so neither are we.
    pub fn auth_level(&self) -> Option<AuthLevel> {
        match self.auth_level.to_lowercase().as_str() {
            "unverified" => Some(AuthLevel::Unverified),
            "verified" => Some(AuthLevel::Verified),
            "admin" => Some(AuthLevel::Admin),
            _ => None,
        }
    }

    /// When the account was created, if the timestamp is in range.
    pub fn registered_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.registration_ts, 0)
    }
}
