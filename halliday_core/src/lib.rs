//! Common code across all halliday clients (the terminal, WASM in the browser)

/// Talk to the account API.
pub mod api;
pub use api::{Client, Envelope, ResponseType};

/// Forms on a page, and sending them to the API as JSON.
pub mod form;
pub use form::Form;

/// Reacting to API replies on a page.
pub mod page;
pub use page::{Outcome, Page};
