use reqwest::Method;
use serde::{Deserialize, Serialize};

/// The request to change the password of the logged-in account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Req {
    /// The current password.
    pub old_password: String,

    /// The new password.
    pub password: String,

    /// Must match `password`.
    pub confirm_password: String,
}

/// How the change password endpoint is called.
pub const METHOD: Method = Method::PATCH;

/// Where the change password endpoint lives.
pub const PATH: &str = "/account/changePassword";
