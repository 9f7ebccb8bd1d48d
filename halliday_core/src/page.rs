use crate::api::{Envelope, ResponseType};

/// Where to send people who need to log in.
pub const LOGIN_PAGE: &str = "/assets/login.html";

/// Where to send people once they've logged in.
pub const HOME_PAGE: &str = "/assets/index.html";

/// The element error messages are written into.
pub const ERROR_SELECTOR: &str = "#error";

/// HTTP 401. The one status we react to before looking at the body.
const UNAUTHORIZED: u16 = 401;

/// The things a page can be asked to do in response to the API. Implemented
/// over the DOM in the browser; anything else (tests, the terminal) can record
/// or print instead.
pub trait Page {
    /// Load a different page.
    fn navigate(&mut self, to: &str);

    /// Put a message in the error element.
    fn show_error(&mut self, message: &str);
}

/// What a page should do after a form submission. This is the "functional
/// core"; `apply` is the only part with side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Go somewhere else
    Navigate(&'static str),

    /// Write this into the error element
    ShowError(String),

    /// Leave the page alone
    Nothing,
}

impl Outcome {
    /// Decide what to do with a reply from the server.
    ///
    /// A 401 always goes to the login page without looking at the body. Other
    /// replies are read as an envelope; if that fails, we show the same
    /// generic error the API client would.
    pub fn from_reply(status: u16, body: &[u8]) -> Self {
        if status == UNAUTHORIZED {
            tracing::info!("unauthorized, sending to login");
            return Self::Navigate(LOGIN_PAGE);
        }

        match serde_json::from_slice::<Envelope>(body) {
            Ok(envelope) => Self::from_envelope(envelope),
            Err(err) => {
                tracing::warn!(?err, status, "reply was not an envelope");
                Self::from_envelope(Envelope::request_failed())
            }
        }
    }

    /// Decide what to do with an envelope. Tags that don't mean anything to a
    /// page (including ones we've never heard of) do nothing.
    pub fn from_envelope(envelope: Envelope) -> Self {
        match envelope.response_type {
            Some(ResponseType::Error) => Self::ShowError(envelope.message()),
            Some(ResponseType::RegistrationSuccess) => Self::Navigate(LOGIN_PAGE),
            Some(ResponseType::LoginSuccess) => Self::Navigate(HOME_PAGE),
            Some(
                ResponseType::EmailVerificationSuccess
                | ResponseType::PasswordChangeSuccess
                | ResponseType::PasswordResetInitiationSuccess
                | ResponseType::PasswordResetSuccess
                | ResponseType::Unknown(_),
            )
            | None => Self::Nothing,
        }
    }

    /// Carry out the outcome on a page.
    pub fn apply<P>(self, page: &mut P)
    where
        P: Page + ?Sized,
    {
        match self {
            Self::Navigate(to) => page.navigate(to),
            Self::ShowError(message) => page.show_error(&message),
            Self::Nothing => {}
        }
    }
}

#[cfg(test)]
pub mod test {
    use super::*;

    /// A page that writes down what it was asked to do.
    #[derive(Debug, Default)]
    pub struct Recorder {
        pub navigations: Vec<String>,
        pub error: Option<String>,
    }

    impl Page for Recorder {
        fn navigate(&mut self, to: &str) {
            self.navigations.push(to.to_string());
        }

        fn show_error(&mut self, message: &str) {
            self.error = Some(message.to_string());
        }
    }

    fn handle(status: u16, body: &str) -> Recorder {
        let mut page = Recorder::default();
        Outcome::from_reply(status, body.as_bytes()).apply(&mut page);
        page
    }

    #[test]
    fn unauthorized_goes_to_login_whatever_the_body() {
        for body in [
            r#"{"response_type":"Error","message":"Unauthorised"}"#,
            r#"{"response_type":"LoginSuccess"}"#,
            "not even json",
            "",
        ] {
            let page = handle(401, body);

            assert_eq!(page.navigations, [LOGIN_PAGE], "{body}");
            assert_eq!(page.error, None, "{body}");
        }
    }

    #[test]
    fn registration_success_goes_to_login() {
        let page = handle(200, r#"{"response_type":"RegistrationSuccess"}"#);

        assert_eq!(page.navigations, [LOGIN_PAGE]);
    }

    #[test]
    fn login_success_goes_home() {
        let page = handle(200, r#"{"response_type":"LoginSuccess"}"#);

        assert_eq!(page.navigations, [HOME_PAGE]);
    }

    #[test]
    fn errors_are_shown_without_navigating() {
        let page = handle(
            400,
            r#"{"response_type":"Error","message":"bad credentials"}"#,
        );

        assert_eq!(page.error.as_deref(), Some("bad credentials"));
        assert!(page.navigations.is_empty());
    }

    #[test]
    fn structured_error_messages_are_still_shown() {
        let page = handle(
            422,
            r#"{"response_type":"Error","message":{"field":"email"}}"#,
        );

        assert_eq!(page.error.as_deref(), Some(r#"{"field":"email"}"#));
    }

    #[test]
    fn other_tags_do_nothing() {
        for tag in ["PasswordChangeSuccess", "SomethingNew"] {
            let page = handle(200, &format!(r#"{{"response_type":"{tag}"}}"#));

            assert!(page.navigations.is_empty(), "{tag}");
            assert_eq!(page.error, None, "{tag}");
        }
    }

    #[test]
    fn untagged_bodies_do_nothing() {
        assert_eq!(
            Outcome::from_reply(200, br#"{"nonce":"abc"}"#),
            Outcome::Nothing
        );
    }

    #[test]
    fn unreadable_bodies_show_a_generic_error() {
        let page = handle(500, "<h1>oops</h1>");

        assert_eq!(page.error.as_deref(), Some("Request failed"));
    }
}
