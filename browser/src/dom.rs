use halliday_core::form::{self, Field, Form};
use halliday_core::page::{Page, ERROR_SELECTOR};
use halliday_core::Client;
use url::Url;
use wasm_bindgen::prelude::*;
use web_sys::{
    console, Document, DocumentReadyState, Event, HtmlElement, HtmlFormElement, HtmlInputElement,
    Window,
};

/// The page we're running on, for `Outcome` to act on.
pub struct DomPage {
    /// The browser window
    window: Window,
}

impl DomPage {
    /// Wrap the current window.
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Page for DomPage {
    fn navigate(&mut self, to: &str) {
        if let Err(err) = self.window.location().assign(to) {
            console::error_2(&"could not navigate".into(), &err);
        }
    }

    fn show_error(&mut self, message: &str) {
        let target = self
            .window
            .document()
            .and_then(|document| document.query_selector(ERROR_SELECTOR).ok().flatten())
            .and_then(|element| element.dyn_into::<HtmlElement>().ok());

        match target {
            Some(element) => element.set_inner_text(message),
            None => tracing::warn!(message, "no error element to show message in"),
        }
    }
}

/// Read a form's action, method, and inputs (in document order.)
pub fn read_form(element: &HtmlFormElement) -> Result<Form, JsValue> {
    let inputs = element.query_selector_all("input")?;

    let fields = (0..inputs.length())
        .filter_map(|index| inputs.item(index))
        .filter_map(|node| node.dyn_into::<HtmlInputElement>().ok())
        .map(|input| Field::new(input.id(), input.value()))
        .collect();

    Ok(Form {
        action: element.action(),
        method: element.method(),
        fields,
    })
}

/// Should we wait for `DOMContentLoaded` before attaching to forms? The
/// module usually finishes loading after the event has fired, and then
/// waiting would mean never attaching at all.
pub fn still_loading(state: DocumentReadyState) -> bool {
    matches!(state, DocumentReadyState::Loading)
}

/// Take over submission of every form currently in the document. Each submit
/// sends the form as JSON in the background and reacts to the reply; nothing
/// de-duplicates or cancels overlapping submissions.
pub fn attach_forms(window: &Window, document: &Document, client: &Client) -> Result<(), JsValue> {
    let page_url = Url::parse(&window.location().href()?)
        .map_err(|err| JsValue::from_str(&err.to_string()))?;

    let forms = document.query_selector_all("form")?;

    for index in 0..forms.length() {
        let Some(element) = forms
            .item(index)
            .and_then(|node| node.dyn_into::<HtmlFormElement>().ok())
        else {
            continue;
        };

        let on_submit = {
            let window = window.clone();
            let client = client.clone();
            let page_url = page_url.clone();
            let element = element.clone();

            Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                event.prevent_default();

                let form = match read_form(&element) {
                    Ok(form) => form,
                    Err(err) => {
                        console::error_2(&"could not read form".into(), &err);
                        return;
                    }
                };

                let client = client.clone();
                let page_url = page_url.clone();
                let mut page = DomPage::new(window.clone());

                wasm_bindgen_futures::spawn_local(async move {
                    form::submit(&client, &form, &page_url, &mut page).await;
                });
            })
        };

        element.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;

        // The listener lives as long as the page does.
        on_submit.forget();
    }

    tracing::debug!(forms = forms.length(), "attached form handlers");

    Ok(())
}
