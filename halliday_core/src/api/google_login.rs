use reqwest::Method;
use serde::{Deserialize, Serialize};

/// The request to log in with Google.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Req {
    /// The identity token Google's sign-in flow handed us.
    pub jwt: String,
}

/// How the Google login endpoint is called.
pub const METHOD: Method = Method::POST;

/// Where the Google login endpoint lives.
pub const PATH: &str = "/account/login/google";
