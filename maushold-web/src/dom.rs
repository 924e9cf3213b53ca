use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Request, RequestInit, RequestMode, Response, Storage, Window};

/// Retrieve the global `window` object, if running in a browser.
#[must_use]
pub fn window() -> Option<Window> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

/// Retrieve the document object for DOM interactions.
#[must_use]
pub fn document() -> Option<Document> {
    window().and_then(|win| win.document())
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Log an error message to the browser console.
pub fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from(message));
}

/// Show a blocking `window.alert` dialog. Without a window the message is logged instead.
pub fn alert(message: &str) {
    match window() {
        Some(win) => {
            if let Err(err) = win.alert_with_message(message) {
                console_error(&js_error_message(&err));
            }
        }
        None => log::error!("{message}"),
    }
}

/// Ask a yes/no question with `window.confirm`. Without a window the answer is no.
#[must_use]
pub fn confirm(message: &str) -> bool {
    window()
        .and_then(|win| win.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Perform a fetch and return the status code with the response text.
///
/// A JSON body, when present, is sent with `Content-Type: application/json`.
///
/// # Errors
/// Returns an error when no window is available, the request cannot be built,
/// the network call fails or the body cannot be read.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn fetch_text(
    method: &str,
    url: &str,
    json_body: Option<&str>,
) -> Result<(u16, String), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("window unavailable"))?;

    let init = RequestInit::new();
    init.set_method(method);
    init.set_mode(RequestMode::Cors);
    if let Some(body) = json_body {
        init.set_body(&JsValue::from_str(body));
    }
    let request = Request::new_with_str_and_init(url, &init)?;
    if json_body.is_some() {
        request.headers().set("Content-Type", "application/json")?;
    }

    let response: Response = JsFuture::from(win.fetch_with_request(&request))
        .await?
        .dyn_into()?;
    let text = JsFuture::from(response.text()?).await?;
    Ok((response.status(), text.as_string().unwrap_or_default()))
}

/// Run an async task on the browser event loop. Outside the browser there is
/// no event loop to run it on, so it is dropped.
pub fn spawn<F>(task: F)
where
    F: std::future::Future<Output = ()> + 'static,
{
    #[cfg(target_arch = "wasm32")]
    wasm_bindgen_futures::spawn_local(task);
    #[cfg(not(target_arch = "wasm32"))]
    {
        drop(task);
        log::debug!("background task skipped outside the browser");
    }
}

/// Access the browser `localStorage` handle, when the browser grants one.
#[must_use]
pub fn local_storage() -> Option<Storage> {
    window().and_then(|win| win.local_storage().ok().flatten())
}
