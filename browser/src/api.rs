use halliday_core::api::{
    change_password, google_login, login, register, reset_password, verify_email, Config,
    Environment,
};
use halliday_core::{Client, Envelope};
use js_sys::{Promise, JSON};
use std::future::Future;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

/// The account API, for JavaScript. Every method returns a promise that
/// resolves to the reply envelope as a plain object; none of them reject
/// because of the network or the server.
#[wasm_bindgen]
pub struct Api {
    /// The shared client. Cloned into each call so the promise owns it.
    client: Client,
}

#[wasm_bindgen]
impl Api {
    /// Make a client for the development server (`dev = true`) or production.
    ///
    /// # Errors
    ///
    /// If the HTTP client can't be set up.
    #[wasm_bindgen(constructor)]
    pub fn new(dev: bool) -> Result<Api, JsError> {
        let config = Config::from(Environment::from_dev_flag(dev));

        Ok(Self {
            client: Client::new(config).map_err(|err| JsError::new(&err.to_string()))?,
        })
    }

    /// `GET /nonce`
    #[wasm_bindgen(js_name = getNonce)]
    pub fn get_nonce(&self) -> Promise {
        let client = self.client.clone();
        envelope_promise(async move { client.get_nonce().await })
    }

    /// `POST /account/login`
    pub fn login(&self, email: String, password: String) -> Promise {
        let client = self.client.clone();
        envelope_promise(async move { client.login(&login::Req { email, password }).await })
    }

    /// `POST /account/login/google`
    #[wasm_bindgen(js_name = googleLogin)]
    pub fn google_login(&self, jwt: String) -> Promise {
        let client = self.client.clone();
        envelope_promise(async move { client.google_login(&google_login::Req { jwt }).await })
    }

    /// `GET /account/logout`
    pub fn logout(&self) -> Promise {
        let client = self.client.clone();
        envelope_promise(async move { client.logout().await })
    }

    /// `POST /account/register`
    pub fn register(
        &self,
        email: String,
        username: String,
        password: String,
        confirm_password: String,
    ) -> Promise {
        let client = self.client.clone();
        envelope_promise(async move {
            client
                .register(&register::Req {
                    email,
                    username,
                    password,
                    confirm_password,
                })
                .await
        })
    }

    /// `POST /account/verifyEmail`
    #[wasm_bindgen(js_name = verifyEmail)]
    pub fn verify_email(&self, email: String, code: String) -> Promise {
        let client = self.client.clone();
        envelope_promise(async move {
            client
                .verify_email(&verify_email::Req { email, code })
                .await
        })
    }

    /// `PATCH /account/changePassword`
    #[wasm_bindgen(js_name = changePassword)]
    pub fn change_password(
        &self,
        old_password: String,
        password: String,
        confirm_password: String,
    ) -> Promise {
        let client = self.client.clone();
        envelope_promise(async move {
            client
                .change_password(&change_password::Req {
                    old_password,
                    password,
                    confirm_password,
                })
                .await
        })
    }

    /// `POST /account/resetPassword`
    #[wasm_bindgen(js_name = resetPassword)]
    pub fn reset_password(&self, email: String) -> Promise {
        let client = self.client.clone();
        envelope_promise(async move { client.reset_password(&email).await })
    }

    /// `PATCH /account/resetPassword`
    #[wasm_bindgen(js_name = completeResetPassword)]
    pub fn complete_reset_password(
        &self,
        code: String,
        password: String,
        confirm_password: String,
    ) -> Promise {
        let client = self.client.clone();
        envelope_promise(async move {
            client
                .complete_reset_password(&reset_password::CompleteReq {
                    code,
                    password,
                    confirm_password,
                })
                .await
        })
    }

    /// `GET /account/profile`
    #[wasm_bindgen(js_name = getProfile)]
    pub fn get_profile(&self) -> Promise {
        let client = self.client.clone();
        envelope_promise(async move { client.get_profile().await })
    }
}

/// Turn an envelope future into a promise of a plain JS object.
fn envelope_promise<F>(call: F) -> Promise
where
    F: Future<Output = Envelope> + 'static,
{
    future_to_promise(async move {
        let envelope = call.await;
        let text = serde_json::to_string(&envelope)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;

        JSON::parse(&text)
    })
}
