use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{self, Display};

/// Message used when the server answered with an error status but we couldn't
/// read its body.
pub const REQUEST_FAILED: &str = "Request failed";

/// Message used when we never got a usable answer from the server.
pub const NETWORK_REQUEST_FAILED: &str = "Network request failed";

/// The discriminator the server tags its replies with. Anything we don't know
/// about is kept as `Unknown` so callers can still see it (and ignore it.)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResponseType {
    /// Something went wrong; `message` says what.
    Error,

    /// A new account was created. Next step is logging in.
    RegistrationSuccess,

    /// We have a session now.
    LoginSuccess,

    /// The verification code matched.
    EmailVerificationSuccess,

    /// The password was changed.
    PasswordChangeSuccess,

    /// A reset code was sent out.
    PasswordResetInitiationSuccess,

    /// The reset code was accepted and the password replaced.
    PasswordResetSuccess,

    /// A tag this client doesn't recognize.
    Unknown(String),
}

impl ResponseType {
    /// The tag as it appears on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Error => "Error",
            Self::RegistrationSuccess => "RegistrationSuccess",
            Self::LoginSuccess => "LoginSuccess",
            Self::EmailVerificationSuccess => "EmailVerificationSuccess",
            Self::PasswordChangeSuccess => "PasswordChangeSuccess",
            Self::PasswordResetInitiationSuccess => "PasswordResetInitiationSuccess",
            Self::PasswordResetSuccess => "PasswordResetSuccess",
            Self::Unknown(other) => other,
        }
    }
}

impl From<String> for ResponseType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Error" => Self::Error,
            "RegistrationSuccess" => Self::RegistrationSuccess,
            "LoginSuccess" => Self::LoginSuccess,
            "EmailVerificationSuccess" => Self::EmailVerificationSuccess,
            "PasswordChangeSuccess" => Self::PasswordChangeSuccess,
            "PasswordResetInitiationSuccess" => Self::PasswordResetInitiationSuccess,
            "PasswordResetSuccess" => Self::PasswordResetSuccess,
            _ => Self::Unknown(value),
        }
    }
}

impl From<ResponseType> for String {
    fn from(value: ResponseType) -> Self {
        match value {
            ResponseType::Unknown(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The uniform shape every API reply is normalized into.
///
/// Replies that only carry a payload (the profile, a nonce) have no
/// `response_type`. Whatever fields we don't model directly end up in
/// `payload`, so serializing an envelope gives back the body we parsed. Any
/// JSON object is an envelope: a `response_type` that isn't a string stays in
/// `payload`, and `message` keeps whatever value the server sent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Envelope {
    /// What kind of reply this is.
    pub response_type: Option<ResponseType>,

    /// Human-readable detail, always present on errors. Usually a string.
    pub message: Option<Value>,

    /// Everything else in the body.
    pub payload: Map<String, Value>,
}

impl From<Map<String, Value>> for Envelope {
    fn from(mut payload: Map<String, Value>) -> Self {
        let response_type = match payload.remove("response_type") {
            Some(Value::String(tag)) => Some(ResponseType::from(tag)),
            Some(other) => {
                payload.insert("response_type".to_string(), other);
                None
            }
            None => None,
        };

        Self {
            response_type,
            message: payload.remove("message"),
            payload,
        }
    }
}

impl From<Envelope> for Map<String, Value> {
    fn from(envelope: Envelope) -> Self {
        let mut out = envelope.payload;

        if let Some(response_type) = envelope.response_type {
            out.insert(
                "response_type".to_string(),
                Value::String(response_type.into()),
            );
        }
        if let Some(message) = envelope.message {
            out.insert("message".to_string(), message);
        }

        out
    }
}

impl Envelope {
    /// An `Error` envelope with the given message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            response_type: Some(ResponseType::Error),
            message: Some(Value::String(message.into())),
            payload: Map::new(),
        }
    }

    /// The server said no, and we couldn't read why.
    pub fn request_failed() -> Self {
        Self::error(REQUEST_FAILED)
    }

    /// We never got a usable reply.
    pub fn network_failed() -> Self {
        Self::error(NETWORK_REQUEST_FAILED)
    }

    /// Is this an `Error` reply?
    pub fn is_error(&self) -> bool {
        self.response_type == Some(ResponseType::Error)
    }

    /// The message as text: strings as-is, other values as JSON, and an empty
    /// string if there isn't one.
    pub fn message(&self) -> String {
        match &self.message {
            Some(Value::String(text)) => text.clone(),
            None | Some(Value::Null) => String::new(),
            Some(other) => other.to_string(),
        }
    }

    /// Read the payload fields as a more specific shape, e.g. `Profile`.
    ///
    /// ## Errors
    ///
    /// If the payload doesn't have the fields `T` needs.
    pub fn payload_as<T>(&self) -> serde_json::Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_value(Value::Object(self.payload.clone()))
    }
}
