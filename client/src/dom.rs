use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, File, HtmlButtonElement, HtmlCanvasElement, HtmlElement, MouseEvent,
    TouchEvent,
};

use crate::geometry::{ClientRect, PointerInput};
use crate::import::ImportError;
use crate::recognize::{Recognition, RecognitionPhase};

pub fn get_element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element: {id}")))?;
    element
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Invalid element type: {id}")))
}

pub fn set_tool_button(button: &HtmlButtonElement, active: bool) {
    let pressed = if active { "true" } else { "false" };
    let _ = button.set_attribute("aria-pressed", pressed);
}

pub fn set_recognize_busy(button: &HtmlButtonElement, phase: RecognitionPhase) {
    let busy = phase == RecognitionPhase::Recognizing;
    button.set_disabled(busy);
    let _ = button.set_attribute("aria-busy", if busy { "true" } else { "false" });
    let label = if busy { "Converting..." } else { "Convert to Text" };
    button.set_text_content(Some(label));
}

/// Shows the result panel with the message, or hides it when there is none.
pub fn render_result(panel: &HtmlElement, text_el: &Element, result: Option<&Recognition>) {
    match result {
        Some(recognition) => {
            text_el.set_text_content(Some(recognition.message()));
            let _ = panel.set_attribute("data-state", recognition.kind());
            panel.set_hidden(false);
        }
        None => {
            text_el.set_text_content(None);
            let _ = panel.remove_attribute("data-state");
            panel.set_hidden(true);
        }
    }
}

/// What a mouse or touch event says about the pointer; `None` for other events.
pub fn event_pointer(event: &Event) -> Option<PointerInput> {
    if event.type_().starts_with("touch") {
        let first = event
            .unchecked_ref::<TouchEvent>()
            .touches()
            .get(0)
            .map(|touch| (touch.client_x() as f64, touch.client_y() as f64));
        return Some(PointerInput::Touch { first });
    }
    let mouse = event.dyn_ref::<MouseEvent>()?;
    Some(PointerInput::Mouse {
        client_x: mouse.client_x() as f64,
        client_y: mouse.client_y() as f64,
    })
}

pub fn is_secondary_button(event: &Event) -> bool {
    if event.type_().starts_with("touch") {
        return false;
    }
    event
        .dyn_ref::<MouseEvent>()
        .map(|mouse| mouse.button() != 0)
        .unwrap_or(false)
}

pub fn canvas_rect(canvas: &HtmlCanvasElement) -> ClientRect {
    let rect = canvas.get_bounding_client_rect();
    ClientRect {
        left: rect.left(),
        top: rect.top(),
        width: rect.width(),
        height: rect.height(),
    }
}

pub async fn read_file_bytes(file: &File) -> Result<Vec<u8>, ImportError> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|value| ImportError::Read(js_message(&value)))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

pub fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
