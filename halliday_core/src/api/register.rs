use reqwest::Method;
use serde::{Deserialize, Serialize};

/// The request to register a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Req {
    /// Email to use for contact and login.
    pub email: String,

    /// Display name. Must be unique on the server.
    pub username: String,

    /// Plaintext password to use for login.
    pub password: String,

    /// Must match `password`. The server checks this, not us.
    pub confirm_password: String,
}

/// How the register endpoint is called.
pub const METHOD: Method = Method::POST;

/// Where the register endpoint lives.
pub const PATH: &str = "/account/register";
