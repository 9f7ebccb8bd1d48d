use super::error::Result;
use url::{ParseError, Url};

/// Where the API lives while developing locally.
pub const DEVELOPMENT_URL: &str = "http://localhost:3000";

/// Where the API lives in production.
pub const PRODUCTION_URL: &str = "https://api.halliday.dev";

/// Which deployment of the API we're talking to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// A server running on this machine
    Development,

    /// The hosted API
    #[default]
    Production,
}

impl Environment {
    /// Pick an environment from a "development mode" flag.
    pub fn from_dev_flag(dev: bool) -> Self {
        if dev {
            Self::Development
        } else {
            Self::Production
        }
    }

    /// The base URL for this environment.
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Development => DEVELOPMENT_URL,
            Self::Production => PRODUCTION_URL,
        }
    }
}

/// Client configuration. Built once by the caller and handed to
/// `Client::new`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The server to connect to, e.g. `https://api.halliday.dev`. Endpoint
    /// paths are appended to this, so an API mounted under a prefix (e.g.
    /// `https://example.com/halliday`) works too.
    pub base_url: Url,
}

impl Config {
    /// Configure a client for an arbitrary server.
    ///
    /// ## Errors
    ///
    /// `Error::UrlParse` if `base_url` is not an absolute URL with a path we
    /// can append to (so no `mailto:` or `data:` URLs.)
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;

        if base_url.cannot_be_a_base() {
            return Err(ParseError::RelativeUrlWithCannotBeABaseBase.into());
        }

        Ok(Self { base_url })
    }

    /// Configure a client for one of the known deployments.
    ///
    /// # Panics
    ///
    /// Only if one of the built-in base URL constants stops being a valid
    /// absolute URL.
    pub fn for_environment(environment: Environment) -> Self {
        Self::new(environment.base_url()).expect("built-in base URLs are valid")
    }

    /// Build the full URL for an endpoint path by appending it to the base
    /// URL's path.
    pub fn url(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let prefix = url.path().trim_end_matches('/').to_string();

        url.set_path(&format!("{prefix}{path}"));

        url
    }
}

impl From<Environment> for Config {
    fn from(environment: Environment) -> Self {
        Self::for_environment(environment)
    }
}
