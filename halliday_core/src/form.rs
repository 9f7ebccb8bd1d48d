use crate::api::error::{Error, Result};
use crate::api::{Client, Credentials};
use crate::page::{Outcome, Page};
use crate::Envelope;
use reqwest::Method;
use serde_json::{Map, Value};
use url::Url;

/// Forms only send cookies to the page's own origin, the way the browser
/// would for a plain `fetch`. API calls include them everywhere instead.
pub const CREDENTIALS: Credentials = Credentials::SameOrigin;

/// A single `<input>` in a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// The input's `id` attribute. This becomes the JSON key.
    pub id: String,

    /// Whatever is in the input right now.
    pub value: String,
}

impl Field {
    /// Make a field.
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}

/// A form as the page declares it, with its inputs in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    /// Where the form submits to. Absolute or relative to the page.
    pub action: String,

    /// The declared method, in whatever case the page wrote it.
    pub method: String,

    /// The form's inputs
    pub fields: Vec<Field>,
}

/// What came back from submitting a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// HTTP status code
    pub status: u16,

    /// The raw body. We don't trust it to be JSON until `Outcome` says so.
    pub body: Vec<u8>,
}

impl Form {
    /// The JSON object we send: each input's id mapped to its value. No
    /// coercion and no skipping empty values. If two inputs share an id, the
    /// later one wins.
    pub fn payload(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .map(|field| (field.id.clone(), Value::String(field.value.clone())))
            .collect()
    }

    /// The HTTP method to use, upper-cased.
    ///
    /// ## Errors
    ///
    /// `Error::Method` if the declared method isn't a valid HTTP token.
    pub fn method(&self) -> Result<Method> {
        let upper = self.method.trim().to_ascii_uppercase();

        Method::from_bytes(upper.as_bytes()).map_err(|_| Error::Method(self.method.clone()))
    }

    /// Resolve the action against the URL of the page the form is on.
    ///
    /// ## Errors
    ///
    /// `Error::UrlParse` if the action can't be made into a URL.
    pub fn url(&self, page: &Url) -> Result<Url> {
        Ok(page.join(&self.action)?)
    }
}

/// Send a form's inputs as JSON to its action. Cookies follow `CREDENTIALS`.
///
/// ## Errors
///
/// - `Error::Method` or `Error::UrlParse` if the form itself is malformed
/// - `Error::Http` if the request didn't get a response
pub async fn dispatch(client: &Client, form: &Form, page: &Url) -> Result<Reply> {
    let method = form.method()?;
    let url = form.url(page)?;
    tracing::debug!(%method, %url, fields = form.fields.len(), "submitting form");

    let resp = client
        .request(method, url, CREDENTIALS)
        .json(&form.payload())
        .send()
        .await?;

    let status = resp.status().as_u16();
    let body = resp.bytes().await?.to_vec();

    Ok(Reply { status, body })
}

/// Submit a form and show the result on the page. Nothing escapes: if the
/// request fails outright, the page shows the same message the API client
/// would give.
pub async fn submit<P>(client: &Client, form: &Form, page_url: &Url, page: &mut P)
where
    P: Page + ?Sized,
{
    let outcome = match dispatch(client, form, page_url).await {
        Ok(reply) => Outcome::from_reply(reply.status, &reply.body),
        Err(problem) => {
            tracing::error!(?problem, action = %form.action, "form submission failed");
            Outcome::from_envelope(Envelope::network_failed())
        }
    };

    outcome.apply(page);
}
