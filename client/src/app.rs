use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Element, Event, HtmlButtonElement, HtmlCanvasElement, HtmlElement,
    HtmlInputElement,
};

use handscript_shared::ANNOTATE_PATH;

use crate::actions::{clear_board, end_stroke, init_board, pointer_down, pointer_move, toggle_grid};
use crate::config::log_level;
use crate::dom::{
    canvas_rect, event_pointer, get_element, is_secondary_button, read_file_bytes, render_result,
    set_recognize_busy, set_tool_button,
};
use crate::import::import_image;
use crate::net::post_json;
use crate::recognize::{request_body, RecognitionPhase};
use crate::state::{State, CANVAS_HEIGHT, CANVAS_WIDTH};

type SharedState = Rc<RefCell<State<CanvasRenderingContext2d>>>;

fn document_ready_state(document: &web_sys::Document) -> Option<String> {
    Reflect::get(document.as_ref(), &JsValue::from_str("readyState"))
        .ok()?
        .as_string()
}

#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let search = window.location().search().ok().unwrap_or_default();
    let level = log_level(&search);
    if console_log::init_with_level(level).is_err() {
        web_sys::console::warn_1(&"Logger was already initialised".into());
    }

    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;
    let started = Rc::new(Cell::new(false));

    if document_ready_state(&document).as_deref() == Some("complete") {
        started.set(true);
        return start_app();
    }

    let onload_started = started.clone();
    let onload = Closure::<dyn FnMut(Event)>::new(move |_| {
        if onload_started.replace(true) {
            return;
        }
        if let Err(err) = start_app() {
            log::error!("Handscript failed to start: {}", crate::dom::js_message(&err));
        }
    });
    window.add_event_listener_with_callback("load", onload.as_ref().unchecked_ref())?;
    onload.forget();

    Ok(())
}

struct Controls {
    grid_button: HtmlButtonElement,
    recognize_button: HtmlButtonElement,
    clear_button: HtmlButtonElement,
    upload_button: HtmlButtonElement,
    upload_file: HtmlInputElement,
    result_panel: HtmlElement,
    result_text: Element,
}

fn start_app() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;

    let canvas: HtmlCanvasElement = get_element(&document, "board")?;
    canvas.set_width(CANVAS_WIDTH);
    canvas.set_height(CANVAS_HEIGHT);
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("Missing canvas context"))?
        .dyn_into::<CanvasRenderingContext2d>()?;

    let controls = Rc::new(Controls {
        grid_button: get_element(&document, "grid")?,
        recognize_button: get_element(&document, "recognize")?,
        clear_button: get_element(&document, "clear")?,
        upload_button: get_element(&document, "upload")?,
        upload_file: get_element(&document, "uploadFile")?,
        result_panel: get_element(&document, "result")?,
        result_text: get_element(&document, "resultText")?,
    });

    let state: SharedState = Rc::new(RefCell::new(State::new(ctx)));
    {
        let mut state = state.borrow_mut();
        init_board(&mut state);
        set_tool_button(&controls.grid_button, state.show_grid);
        set_recognize_busy(&controls.recognize_button, state.recognition.phase());
        render_result(&controls.result_panel, &controls.result_text, None);
    }

    {
        let down_state = state.clone();
        let down_canvas = canvas.clone();
        let ondown = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if is_secondary_button(&event) {
                return;
            }
            event.prevent_default();
            let Some(input) = event_pointer(&event) else {
                return;
            };
            pointer_down(&mut down_state.borrow_mut(), input, canvas_rect(&down_canvas));
        });
        for name in ["mousedown", "touchstart"] {
            canvas.add_event_listener_with_callback(name, ondown.as_ref().unchecked_ref())?;
        }
        ondown.forget();
    }

    {
        let move_state = state.clone();
        let move_canvas = canvas.clone();
        let onmove = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            let mut state = move_state.borrow_mut();
            if !state.is_drawing() {
                return;
            }
            let Some(input) = event_pointer(&event) else {
                return;
            };
            pointer_move(&mut state, input, canvas_rect(&move_canvas));
        });
        for name in ["mousemove", "touchmove"] {
            canvas.add_event_listener_with_callback(name, onmove.as_ref().unchecked_ref())?;
        }
        onmove.forget();
    }

    {
        let stop_state = state.clone();
        let onstop = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            end_stroke(&mut stop_state.borrow_mut());
        });
        for name in ["mouseup", "mouseleave", "touchend", "touchcancel"] {
            canvas.add_event_listener_with_callback(name, onstop.as_ref().unchecked_ref())?;
        }
        onstop.forget();
    }

    {
        let grid_state = state.clone();
        let grid_controls = controls.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let show_grid = toggle_grid(&mut grid_state.borrow_mut());
            set_tool_button(&grid_controls.grid_button, show_grid);
        });
        controls
            .grid_button
            .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let clear_state = state.clone();
        let clear_controls = controls.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            clear_board(&mut clear_state.borrow_mut());
            render_result(
                &clear_controls.result_panel,
                &clear_controls.result_text,
                None,
            );
        });
        controls
            .clear_button
            .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let upload_file = controls.upload_file.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            upload_file.click();
        });
        controls
            .upload_button
            .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let upload_state = state.clone();
        let upload_controls = controls.clone();
        let onchange = Closure::<dyn FnMut(Event)>::new(move |_| {
            let input = &upload_controls.upload_file;
            let Some(file) = input.files().and_then(|list| list.get(0)) else {
                return;
            };
            // Allow picking the same file again later.
            input.set_value("");
            let state = upload_state.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let name = file.name();
                let result = match read_file_bytes(&file).await {
                    Ok(bytes) => import_image(&mut state.borrow_mut(), &bytes),
                    Err(error) => Err(error),
                };
                if let Err(error) = result {
                    log::warn!("Could not import {name}: {error}");
                }
            });
        });
        controls
            .upload_file
            .add_event_listener_with_callback("change", onchange.as_ref().unchecked_ref())?;
        onchange.forget();
    }

    {
        let recognize_state = state.clone();
        let recognize_controls = controls.clone();
        let recognize_window = window.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let payload = {
                let mut state = recognize_state.borrow_mut();
                if state.recognition.phase() == RecognitionPhase::Recognizing {
                    return;
                }
                state.recognition.begin();
                request_body(&state.surface)
            };
            set_recognize_busy(
                &recognize_controls.recognize_button,
                RecognitionPhase::Recognizing,
            );

            let state = recognize_state.clone();
            let controls = recognize_controls.clone();
            let window = recognize_window.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = match payload {
                    Ok(body) => post_json(&window, ANNOTATE_PATH, &body).await,
                    Err(error) => Err(error),
                };
                let mut state = state.borrow_mut();
                let result = state.recognition.finish(outcome).clone();
                render_result(&controls.result_panel, &controls.result_text, Some(&result));
                set_recognize_busy(&controls.recognize_button, state.recognition.phase());
            });
        });
        controls
            .recognize_button
            .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    log::info!("Handscript ready ({CANVAS_WIDTH}x{CANVAS_HEIGHT} canvas)");
    Ok(())
}
