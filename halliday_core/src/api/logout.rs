use reqwest::Method;

/// How the logout endpoint is called. It takes no body; the session cookie is
/// all the server needs.
pub const METHOD: Method = Method::GET;

/// Where the logout endpoint lives.
pub const PATH: &str = "/account/logout";
