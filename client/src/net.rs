use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response, Window};

use crate::dom::js_message;
use crate::recognize::RecognizeError;

/// POSTs a JSON body and returns the response text of a 2xx answer.
pub async fn post_json(window: &Window, url: &str, body: &str) -> Result<String, RecognizeError> {
    let transport = |value: JsValue| RecognizeError::Transport(js_message(&value));

    let headers = Headers::new().map_err(transport)?;
    headers
        .set("Content-Type", "application/json")
        .map_err(transport)?;
    let init = RequestInit::new();
    init.set_method("POST");
    init.set_headers(&headers);
    init.set_body(&body.into());
    let request = Request::new_with_str_and_init(url, &init).map_err(transport)?;

    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(transport)?
        .dyn_into()
        .map_err(transport)?;
    if !response.ok() {
        return Err(RecognizeError::Status(response.status()));
    }
    let text = JsFuture::from(response.text().map_err(transport)?)
        .await
        .map_err(transport)?;
    text.as_string()
        .ok_or_else(|| RecognizeError::Transport("response body is not text".to_string()))
}
