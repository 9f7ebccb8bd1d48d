#![warn(
    missing_docs,
    clippy::pedantic,
    clippy::allow_attributes,
    clippy::absolute_paths,
    clippy::alloc_instead_of_core,
    clippy::decimal_literal_representation,
    clippy::missing_docs_in_private_items
)]
#![allow(clippy::must_use_candidate)]

//! Browser interface for halliday, compiled to WASM.
//!
//! Loading the module takes over every form on the page: submissions are sent
//! as JSON instead of navigating, and the reply decides whether we show an
//! error or move to another page. The typed client is exported as `Api` for
//! pages that want to call endpoints directly.

/// Typed client bindings for JavaScript
mod api;
pub use api::Api;

/// Forms and pages in the real DOM
mod dom;

/// `tracing` output in the browser console
mod logging;

#[expect(clippy::missing_docs_in_private_items)]
mod utils;

use halliday_core::api::Config;
use halliday_core::Client;
use wasm_bindgen::prelude::*;

/// Wire up the page once the document has loaded (or right away, if it
/// already has). Forms submit to their own `action`, so the client is pointed
/// at this page's origin.
///
/// # Errors
///
/// If there's no window or document (e.g. when loaded in a worker), or if the
/// page's URL can't be read.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    utils::set_panic_hook();
    logging::init();

    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let config =
        Config::new(&window.location().origin()?).map_err(|err| JsError::new(&err.to_string()))?;
    let client = Client::new(config).map_err(|err| JsError::new(&err.to_string()))?;

    let attach = {
        let document = document.clone();

        move || {
            if let Err(err) = dom::attach_forms(&window, &document, &client) {
                web_sys::console::error_2(&"could not attach form handlers".into(), &err);
            }
        }
    };

    if dom::still_loading(document.ready_state()) {
        let on_load = Closure::<dyn FnMut()>::new(attach);

        document
            .add_event_listener_with_callback("DOMContentLoaded", on_load.as_ref().unchecked_ref())?;
        on_load.forget();
    } else {
        attach();
    }

    Ok(())
}
