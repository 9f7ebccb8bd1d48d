use reqwest::Method;

/// How the nonce endpoint is called.
pub const METHOD: Method = Method::GET;

/// Where the nonce endpoint lives. The reply carries the nonce in its payload
/// rather than in a tagged envelope.
pub const PATH: &str = "/nonce";
