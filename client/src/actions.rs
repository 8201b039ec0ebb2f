use crate::geometry::{pointer_to_canvas, ClientRect, Point, PointerInput};
use crate::render::{apply_ink_style, draw_dot, draw_polyline, paint_background};
use crate::smoothing::{smooth_window, SMOOTHING_WINDOW};
use crate::state::{DrawMode, State};
use crate::surface::Surface;

pub fn init_board<S: Surface>(state: &mut State<S>) {
    apply_ink_style(&state.surface);
    paint_background(&state.surface, state.show_grid);
}

pub fn start_stroke<S: Surface>(state: &mut State<S>, point: Point) {
    state.buffer.begin(point);
    state.mode = DrawMode::Drawing { last: point };
    draw_dot(&state.surface, point);
}

pub fn move_stroke<S: Surface>(state: &mut State<S>, point: Point) {
    let DrawMode::Drawing { last } = &mut state.mode else {
        return;
    };
    *last = point;
    state.buffer.push(point);
    if state.buffer.len() >= SMOOTHING_WINDOW {
        let smoothed = smooth_window(state.buffer.tail(SMOOTHING_WINDOW));
        draw_polyline(&state.surface, &smoothed);
    }
}

/// Starts a stroke where the pointer went down. Returns whether one started.
pub fn pointer_down<S: Surface>(
    state: &mut State<S>,
    input: PointerInput,
    rect: ClientRect,
) -> bool {
    let Some(point) = locate(state, input, rect) else {
        return false;
    };
    start_stroke(state, point);
    true
}

pub fn pointer_move<S: Surface>(state: &mut State<S>, input: PointerInput, rect: ClientRect) {
    if !state.is_drawing() {
        return;
    }
    if let Some(point) = locate(state, input, rect) {
        move_stroke(state, point);
    }
}

fn locate<S: Surface>(
    state: &State<S>,
    input: PointerInput,
    rect: ClientRect,
) -> Option<Point> {
    pointer_to_canvas(input, rect, state.surface.width(), state.surface.height())
}

pub fn end_stroke<S: Surface>(state: &mut State<S>) {
    let DrawMode::Drawing { last } = state.mode else {
        return;
    };
    if state.buffer.len() == 1 {
        draw_dot(&state.surface, last);
    }
    cancel_stroke(state);
}

/// Drops the stroke in progress without painting anything.
pub fn cancel_stroke<S: Surface>(state: &mut State<S>) {
    state.mode = DrawMode::Idle;
    state.buffer.reset();
}

pub fn clear_board<S: Surface>(state: &mut State<S>) {
    paint_background(&state.surface, state.show_grid);
    cancel_stroke(state);
    state.recognition.clear_result();
}

/// Flips grid visibility and repaints the background, which also wipes ink.
pub fn toggle_grid<S: Surface>(state: &mut State<S>) -> bool {
    state.show_grid = !state.show_grid;
    paint_background(&state.surface, state.show_grid);
    cancel_stroke(state);
    state.show_grid
}
