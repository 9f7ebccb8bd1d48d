use super::config::Config;
use super::envelope::Envelope;
use super::error::Result;
use super::{
    change_password, google_login, login, logout, nonce, profile, register, reset_password,
    verify_email,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::{ClientBuilder, Method, RequestBuilder};
use serde::Serialize;
use url::Url;

#[cfg(not(target_arch = "wasm32"))]
use reqwest::cookie::Jar;
#[cfg(not(target_arch = "wasm32"))]
use std::sync::Arc;

/// Stand-in for endpoints that don't send a body.
const NO_BODY: Option<&()> = None;

/// Which cookies a request carries in the browser. Native clients always use
/// their own cookie store, so this only changes anything on wasm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credentials {
    /// Send cookies wherever the request goes. API calls need this because
    /// the API usually lives on another origin than the page.
    Include,

    /// Only send cookies to the page's own origin, like a plain `fetch`.
    SameOrigin,
}

/// Client for the account API.
///
/// Every endpoint method resolves to an `Envelope`. Failures (the server
/// saying no, the server saying something we can't read, or no server at all)
/// come back as `Error` envelopes instead of `Err`.
#[derive(Debug, Clone)]
pub struct Client {
    /// Where to send requests
    config: Config,

    /// The underlying HTTP client. Holds the session cookie between calls.
    http: reqwest::Client,
}

impl Client {
    /// Construct a new client. On native targets the client keeps its own
    /// cookie store; in the browser, cookies are left to the browser.
    ///
    /// ## Errors
    ///
    /// `Error::Http` if the HTTP client can't be initialized (for example, if
    /// the TLS backend fails to load.)
    pub fn new(config: Config) -> Result<Self> {
        let builder = ClientBuilder::new();

        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.cookie_store(true);

        Ok(Self {
            config,
            http: builder.build()?,
        })
    }

    /// Construct a client that reads and writes cookies through the given
    /// jar, so callers can persist the session between runs.
    ///
    /// ## Errors
    ///
    /// Same as `new`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn with_cookie_jar(config: Config, jar: Arc<Jar>) -> Result<Self> {
        Ok(Self {
            config,
            http: ClientBuilder::new().cookie_provider(jar).build()?,
        })
    }

    /// Where this client sends requests.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Ask the server for a nonce.
    pub async fn get_nonce(&self) -> Envelope {
        self.call(nonce::METHOD, nonce::PATH, NO_BODY).await
    }

    /// Log in with an email and password.
    pub async fn login(&self, req: &login::Req) -> Envelope {
        self.call(login::METHOD, login::PATH, Some(req)).await
    }

    /// Log in with a token from Google's sign-in flow.
    pub async fn google_login(&self, req: &google_login::Req) -> Envelope {
        self.call(google_login::METHOD, google_login::PATH, Some(req))
            .await
    }

    /// End the current session.
    pub async fn logout(&self) -> Envelope {
        self.call(logout::METHOD, logout::PATH, NO_BODY).await
    }

    /// Register a new account.
    pub async fn register(&self, req: &register::Req) -> Envelope {
        self.call(register::METHOD, register::PATH, Some(req)).await
    }

    /// Confirm an email address.
    pub async fn verify_email(&self, req: &verify_email::Req) -> Envelope {
        self.call(verify_email::METHOD, verify_email::PATH, Some(req))
            .await
    }

    /// Change the logged-in account's password.
    pub async fn change_password(&self, req: &change_password::Req) -> Envelope {
        self.call(change_password::METHOD, change_password::PATH, Some(req))
            .await
    }

    /// Start a password reset for the account with this email.
    pub async fn reset_password(&self, email: &str) -> Envelope {
        let req = reset_password::Req {
            email: email.to_string(),
        };

        self.call(reset_password::METHOD, reset_password::PATH, Some(&req))
            .await
    }

    /// Finish a password reset with the mailed code.
    pub async fn complete_reset_password(&self, req: &reset_password::CompleteReq) -> Envelope {
        self.call(
            reset_password::COMPLETE_METHOD,
            reset_password::PATH,
            Some(req),
        )
        .await
    }

    /// Get the logged-in user's profile. The profile fields are in the
    /// envelope's payload; use `Envelope::payload_as::<Profile>` to read them.
    pub async fn get_profile(&self) -> Envelope {
        self.call(profile::METHOD, profile::PATH, NO_BODY).await
    }

    /// Start a request with the headers every call needs. Every request says
    /// it's sending JSON, body or not. Form submissions go through here too,
    /// with `Credentials::SameOrigin`.
    pub fn request(&self, method: Method, url: Url, credentials: Credentials) -> RequestBuilder {
        let builder = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");

        #[cfg(target_arch = "wasm32")]
        let builder = match credentials {
            Credentials::Include => builder.fetch_credentials_include(),
            Credentials::SameOrigin => builder.fetch_credentials_same_origin(),
        };

        #[cfg(not(target_arch = "wasm32"))]
        let _ = credentials;

        builder
    }

    /// Call an endpoint and normalize whatever happens into an envelope.
    async fn call<B>(&self, method: Method, path: &str, body: Option<&B>) -> Envelope
    where
        B: Serialize + ?Sized,
    {
        match self.call_inner(method, path, body).await {
            Ok(envelope) => envelope,
            Err(problem) => {
                tracing::error!(?problem, path, "request did not complete");
                Envelope::network_failed()
            }
        }
    }

    /// The actual implementation of `call`, but with a `Result` wrapper to
    /// make it more ergonomic to write.
    async fn call_inner<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Envelope>
    where
        B: Serialize + ?Sized,
    {
        let url = self.config.url(path);
        tracing::debug!(%method, %url, "calling API");

        let mut builder = self.request(method, url, Credentials::Include);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        handle_response(builder).await
    }
}

/// Convert an HTTP response into an envelope, interpreting errors in a
/// standard way.
///
/// ## Errors
///
/// - `Ok(..)` with the parsed body if the server returned a success (2xx). An
///   empty success body is an empty envelope.
/// - `Ok(..)` with the parsed body if the server returned an error status
///   with a readable envelope, or a generic `"Request failed"` envelope if it
///   didn't.
/// - `Err(Error::Http)` if the request never got a response.
/// - `Err(Error::Json)` if a success body wasn't a JSON envelope.
async fn handle_response(req: RequestBuilder) -> Result<Envelope> {
    let resp = req.send().await?;

    let status = resp.status();

    if status.is_success() {
        let body = resp.bytes().await?;

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Envelope::default());
        }

        Ok(serde_json::from_slice(&body)?)
    } else {
        let parsed = match resp.bytes().await {
            Ok(body) => serde_json::from_slice(&body).map_err(|err| err.to_string()),
            Err(err) => Err(err.to_string()),
        };

        Ok(parsed.unwrap_or_else(|problem| {
            tracing::warn!(%status, %problem, "unreadable error reply");
            Envelope::request_failed()
        }))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::api::{Profile, ResponseType};
    use crate::test::{closed_port, Canned, Server};
    use serde_json::json;

    fn client(base_url: &str) -> Client {
        Client::new(Config::new(base_url).unwrap()).unwrap()
    }

    /// Call every endpoint once, in table order.
    async fn every_endpoint(client: &Client) -> Vec<(&'static str, Envelope)> {
        vec![
            ("get_nonce", client.get_nonce().await),
            (
                "login",
                client
                    .login(&login::Req {
                        email: "a@b.com".into(),
                        password: "pw".into(),
                    })
                    .await,
            ),
            (
                "google_login",
                client
                    .google_login(&google_login::Req {
                        jwt: "header.claims.sig".into(),
                    })
                    .await,
            ),
            ("logout", client.logout().await),
            (
                "register",
                client
                    .register(&register::Req {
                        email: "a@b.com".into(),
                        username: "ab".into(),
                        password: "hunter22".into(),
                        confirm_password: "hunter22".into(),
                    })
                    .await,
            ),
            (
                "verify_email",
                client
                    .verify_email(&verify_email::Req {
                        email: "a@b.com".into(),
                        code: "123456".into(),
                    })
                    .await,
            ),
            (
                "change_password",
                client
                    .change_password(&change_password::Req {
                        old_password: "hunter22".into(),
                        password: "hunter23".into(),
                        confirm_password: "hunter23".into(),
                    })
                    .await,
            ),
            ("reset_password", client.reset_password("a@b.com").await),
            (
                "complete_reset_password",
                client
                    .complete_reset_password(&reset_password::CompleteReq {
                        code: "654321".into(),
                        password: "hunter24".into(),
                        confirm_password: "hunter24".into(),
                    })
                    .await,
            ),
            ("get_profile", client.get_profile().await),
        ]
    }

    #[tokio::test]
    async fn success_bodies_come_back_unmodified() {
        let body = json!({"response_type": "X", "message": "hi", "extra": [1, 2]});
        let server = Server::start(Canned::json(200, &body)).await;

        for (endpoint, envelope) in every_endpoint(&client(&server.base_url)).await {
            assert_eq!(serde_json::to_value(&envelope).unwrap(), body, "{endpoint}");
        }
    }

    #[tokio::test]
    async fn error_bodies_come_back_unmodified() {
        let body = json!({"response_type": "Error", "message": "bad credentials"});
        let server = Server::start(Canned::json(400, &body)).await;

        for (endpoint, envelope) in every_endpoint(&client(&server.base_url)).await {
            assert_eq!(serde_json::to_value(&envelope).unwrap(), body, "{endpoint}");
        }
    }

    #[tokio::test]
    async fn structured_error_messages_come_back_unmodified() {
        let body = json!({"response_type": "Error", "message": {"field": "email"}});
        let server = Server::start(Canned::json(422, &body)).await;

        for (endpoint, envelope) in every_endpoint(&client(&server.base_url)).await {
            assert_eq!(serde_json::to_value(&envelope).unwrap(), body, "{endpoint}");
        }
    }

    #[tokio::test]
    async fn numeric_success_messages_come_back_unmodified() {
        let body = json!({"response_type": "X", "message": 7});
        let server = Server::start(Canned::json(200, &body)).await;

        for (endpoint, envelope) in every_endpoint(&client(&server.base_url)).await {
            assert_eq!(serde_json::to_value(&envelope).unwrap(), body, "{endpoint}");
        }
    }

    #[tokio::test]
    async fn unreadable_error_bodies_are_request_failed() {
        let server = Server::start(Canned::text(500, "<h1>Internal Server Error</h1>")).await;

        for (endpoint, envelope) in every_endpoint(&client(&server.base_url)).await {
            assert_eq!(envelope, Envelope::request_failed(), "{endpoint}");
        }
    }

    #[tokio::test]
    async fn unreachable_servers_are_network_failures() {
        let client = client(&closed_port());

        for (endpoint, envelope) in every_endpoint(&client).await {
            assert_eq!(envelope, Envelope::network_failed(), "{endpoint}");
        }
    }

    #[tokio::test]
    async fn unreadable_success_bodies_are_network_failures() {
        let server = Server::start(Canned::text(200, "not json")).await;

        assert_eq!(
            client(&server.base_url).get_nonce().await,
            Envelope::network_failed()
        );
    }

    #[tokio::test]
    async fn empty_success_bodies_are_empty_envelopes() {
        let server = Server::start(Canned::text(200, "")).await;

        assert_eq!(client(&server.base_url).logout().await, Envelope::default());
    }

    #[tokio::test]
    async fn requests_use_the_endpoint_table() {
        let server = Server::start(Canned::json(200, &json!({}))).await;

        every_endpoint(&client(&server.base_url)).await;

        let seen: Vec<(String, String)> = server
            .seen()
            .into_iter()
            .map(|req| (req.method, req.path))
            .collect();

        assert_eq!(
            seen,
            [
                ("GET", "/nonce"),
                ("POST", "/account/login"),
                ("POST", "/account/login/google"),
                ("GET", "/account/logout"),
                ("POST", "/account/register"),
                ("POST", "/account/verifyEmail"),
                ("PATCH", "/account/changePassword"),
                ("POST", "/account/resetPassword"),
                ("PATCH", "/account/resetPassword"),
                ("GET", "/account/profile"),
            ]
            .map(|(method, path)| (method.to_string(), path.to_string()))
        );
    }

    #[tokio::test]
    async fn prefixed_base_urls_keep_their_prefix() {
        let server = Server::start(Canned::json(200, &json!({}))).await;
        let client = client(&format!("{}/halliday", server.base_url));

        client.get_nonce().await;
        client.get_profile().await;

        let paths: Vec<String> = server.seen().into_iter().map(|req| req.path).collect();

        assert_eq!(paths, ["/halliday/nonce", "/halliday/account/profile"]);
    }

    #[tokio::test]
    async fn every_request_declares_json() {
        let server = Server::start(Canned::json(200, &json!({}))).await;

        every_endpoint(&client(&server.base_url)).await;

        for req in server.seen() {
            assert_eq!(
                req.content_type.as_deref(),
                Some("application/json"),
                "{} {}",
                req.method,
                req.path
            );
        }
    }

    #[tokio::test]
    async fn bodies_are_flat_json_objects() {
        let server = Server::start(Canned::json(200, &json!({}))).await;
        let client = client(&server.base_url);

        client
            .login(&login::Req {
                email: "a@b.com".into(),
                password: "pw".into(),
            })
            .await;
        client.reset_password("a@b.com").await;
        client.get_profile().await;

        let bodies: Vec<String> = server.seen().into_iter().map(|req| req.body).collect();

        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&bodies[0]).unwrap(),
            json!({"email": "a@b.com", "password": "pw"})
        );
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&bodies[1]).unwrap(),
            json!({"email": "a@b.com"})
        );
        assert_eq!(bodies[2], "");
    }

    #[tokio::test]
    async fn session_cookie_is_sent_back() {
        let server = Server::start(
            Canned::json(200, &json!({"response_type": "LoginSuccess", "message": "ok"}))
                .with_cookie("session-key=abc123; Path=/; HttpOnly"),
        )
        .await;
        let client = client(&server.base_url);

        let envelope = client
            .login(&login::Req {
                email: "a@b.com".into(),
                password: "pw".into(),
            })
            .await;
        assert_eq!(envelope.response_type, Some(ResponseType::LoginSuccess));

        client.get_profile().await;

        let seen = server.seen();
        assert_eq!(seen[0].cookie, None);
        assert_eq!(seen[1].cookie.as_deref(), Some("session-key=abc123"));
    }

    #[tokio::test]
    async fn profile_payload_decodes() {
        let server = Server::start(Canned::json(
            200,
            &json!({
                "username": "parzival",
                "email": "wade@example.com",
                "email_verified": false,
                "auth_level": "Unverified",
                "identity_provider": "Google",
                "registration_ts": 1_700_000_000,
            }),
        ))
        .await;

        let profile: Profile = client(&server.base_url)
            .get_profile()
            .await
            .payload_as()
            .unwrap();

        assert_eq!(profile.identity_provider, "Google");
        assert!(!profile.email_verified);
    }
}
