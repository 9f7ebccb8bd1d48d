use clap::{Args, Subcommand};
use halliday_core::api::{
    change_password, google_login, login, register, reset_password, verify_email,
};
use halliday_core::form::{self, Field, Form};
use halliday_core::{Client, Envelope, Page};

/// Things you can ask the API to do.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Get a nonce
    Nonce,

    /// Log in with an email and password
    Login {
        /// The account's email address
        #[clap(long)]
        email: String,

        /// The account's password
        #[clap(long, env = "HALLIDAY_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Log in with a Google identity token
    GoogleLogin {
        /// The token from Google's sign-in flow
        #[clap(long)]
        jwt: String,
    },

    /// End the current session
    Logout,

    /// Create a new account
    Register(RegisterArgs),

    /// Confirm your email address with the code we sent to it
    VerifyEmail {
        /// The address being verified
        #[clap(long)]
        email: String,

        /// The code from the email
        #[clap(long)]
        code: String,
    },

    /// Change your password (needs a session)
    ChangePassword(ChangePasswordArgs),

    /// Ask for a password reset code
    ResetPassword {
        /// The address on the account
        #[clap(long)]
        email: String,
    },

    /// Set a new password with a reset code
    CompleteResetPassword(CompleteResetArgs),

    /// Show who you're logged in as
    Profile,

    /// Submit a form the way a page would, printing where the page would go
    Submit {
        /// Where the form submits to, absolute or relative to the server
        #[clap(long)]
        action: String,

        /// The form's method
        #[clap(long, default_value = "post")]
        method: String,

        /// Inputs, as `id=value`
        #[clap(value_parser = parse_field)]
        fields: Vec<Field>,
    },
}

/// Arguments for `register`
#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Address for contact and login
    #[clap(long)]
    email: String,

    /// Display name
    #[clap(long)]
    username: String,

    /// Password for the new account
    #[clap(long, env = "HALLIDAY_PASSWORD", hide_env_values = true)]
    password: String,

    /// The password again
    #[clap(long, env = "HALLIDAY_CONFIRM_PASSWORD", hide_env_values = true)]
    confirm_password: String,
}

/// Arguments for `change-password`
#[derive(Debug, Args)]
pub struct ChangePasswordArgs {
    /// Your current password
    #[clap(long, env = "HALLIDAY_OLD_PASSWORD", hide_env_values = true)]
    old_password: String,

    /// The new password
    #[clap(long, env = "HALLIDAY_PASSWORD", hide_env_values = true)]
    password: String,

    /// The new password again
    #[clap(long, env = "HALLIDAY_CONFIRM_PASSWORD", hide_env_values = true)]
    confirm_password: String,
}

/// Arguments for `complete-reset-password`
#[derive(Debug, Args)]
pub struct CompleteResetArgs {
    /// The code from the reset email
    #[clap(long)]
    code: String,

    /// The new password
    #[clap(long, env = "HALLIDAY_PASSWORD", hide_env_values = true)]
    password: String,

    /// The new password again
    #[clap(long, env = "HALLIDAY_CONFIRM_PASSWORD", hide_env_values = true)]
    confirm_password: String,
}

/// Parse an `id=value` pair. Everything after the first `=` is the value.
fn parse_field(raw: &str) -> Result<Field, String> {
    raw.split_once('=')
        .map(|(id, value)| Field::new(id, value))
        .ok_or_else(|| format!("expected `id=value`, got `{raw}`"))
}

/// What running a command produced.
#[derive(Debug, PartialEq)]
pub enum Report {
    /// An endpoint's reply
    Envelope(Envelope),

    /// What a page would have done with a form submission
    Page(TerminalPage),
}

impl Report {
    /// Did the server (or the network) say no?
    pub fn failed(&self) -> bool {
        match self {
            Self::Envelope(envelope) => envelope.is_error(),
            Self::Page(page) => page.error.is_some(),
        }
    }
}

impl Command {
    /// Call the API.
    pub async fn run(self, client: &Client) -> Report {
        match self {
            Self::Nonce => Report::Envelope(client.get_nonce().await),

            Self::Login { email, password } => {
                tracing::info!(%email, "logging in");
                Report::Envelope(client.login(&login::Req { email, password }).await)
            }

            Self::GoogleLogin { jwt } => {
                tracing::info!("logging in with google");
                Report::Envelope(client.google_login(&google_login::Req { jwt }).await)
            }

            Self::Logout => {
                tracing::info!("logging out");
                Report::Envelope(client.logout().await)
            }

            Self::Register(args) => {
                tracing::info!(email = %args.email, username = %args.username, "registering");
                Report::Envelope(
                    client
                        .register(&register::Req {
                            email: args.email,
                            username: args.username,
                            password: args.password,
                            confirm_password: args.confirm_password,
                        })
                        .await,
                )
            }

            Self::VerifyEmail { email, code } => {
                tracing::info!(%email, "verifying email");
                Report::Envelope(
                    client
                        .verify_email(&verify_email::Req { email, code })
                        .await,
                )
            }

            Self::ChangePassword(args) => {
                tracing::info!("changing password");
                Report::Envelope(
                    client
                        .change_password(&change_password::Req {
                            old_password: args.old_password,
                            password: args.password,
                            confirm_password: args.confirm_password,
                        })
                        .await,
                )
            }

            Self::ResetPassword { email } => {
                tracing::info!(%email, "requesting password reset");
                Report::Envelope(client.reset_password(&email).await)
            }

            Self::CompleteResetPassword(args) => {
                tracing::info!("completing password reset");
                Report::Envelope(
                    client
                        .complete_reset_password(&reset_password::CompleteReq {
                            code: args.code,
                            password: args.password,
                            confirm_password: args.confirm_password,
                        })
                        .await,
                )
            }

            Self::Profile => Report::Envelope(client.get_profile().await),

            Self::Submit {
                action,
                method,
                fields,
            } => {
                let form = Form {
                    action,
                    method,
                    fields,
                };
                let mut page = TerminalPage::default();

                form::submit(client, &form, &client.config().base_url, &mut page).await;

                Report::Page(page)
            }
        }
    }
}

/// Stands in for a browser page when submitting forms from the terminal.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TerminalPage {
    /// Where the page would have gone
    pub navigated_to: Option<String>,

    /// What the page would have shown in its error element
    pub error: Option<String>,
}

impl Page for TerminalPage {
    fn navigate(&mut self, to: &str) {
        self.navigated_to = Some(to.to_string());
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }
}
