use reqwest::Method;
use serde::{Deserialize, Serialize};

/// The request to log into the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Req {
    /// Email the account was registered with.
    pub email: String,

    /// Plaintext password to use for login.
    pub password: String,
}

/// How the login endpoint is called.
pub const METHOD: Method = Method::POST;

/// Where the login endpoint lives.
pub const PATH: &str = "/account/login";
