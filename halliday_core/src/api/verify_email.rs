use reqwest::Method;
use serde::{Deserialize, Serialize};

/// The request to confirm an email address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Req {
    /// The address being verified.
    pub email: String,

    /// The code that was mailed to it.
    pub code: String,
}

/// How the email verification endpoint is called.
pub const METHOD: Method = Method::POST;

/// Where the email verification endpoint lives.
pub const PATH: &str = "/account/verifyEmail";
