/// Things that can go wrong in the API
pub mod error;
pub use error::Error;

/// Which server to talk to
pub mod config;
pub use config::{Config, Environment};

/// The shape every reply comes back in
pub mod envelope;
pub use envelope::{Envelope, ResponseType};

/// The client itself
pub mod client;
pub use client::{Client, Credentials};

/// Get a nonce from the server
pub mod nonce;

/// Log in with an email and password
pub mod login;

/// Log in with a Google identity token
pub mod google_login;

/// End the current session
pub mod logout;

/// Register a new account
pub mod register;

/// Confirm an email address with the code we sent to it
pub mod verify_email;

/// Change the password of a logged-in account
pub mod change_password;

/// Start and finish resetting a forgotten password
pub mod reset_password;

/// The logged-in user's profile
pub mod profile;
pub use profile::Profile;
