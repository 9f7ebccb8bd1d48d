use reqwest::Method;
use serde::{Deserialize, Serialize};

/// The request to start a password reset. The server mails a code to this
/// address if it knows about it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Req {
    /// The address on the account.
    pub email: String,
}

/// The request to finish a password reset with the mailed code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteReq {
    /// The code from the reset email.
    pub code: String,

    /// The new password.
    pub password: String,

    /// Must match `password`.
    pub confirm_password: String,
}

/// How a reset is started.
pub const METHOD: Method = Method::POST;

/// How a reset is finished.
pub const COMPLETE_METHOD: Method = Method::PATCH;

/// Where both halves of the reset live.
pub const PATH: &str = "/account/resetPassword";
