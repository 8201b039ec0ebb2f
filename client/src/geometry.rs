/// A position in canvas pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// The canvas element's box on screen, as reported by `getBoundingClientRect`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// The position an input event reports, in client coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerInput {
    Mouse { client_x: f64, client_y: f64 },
    /// First entry of the event's touch list, if the list has any.
    Touch { first: Option<(f64, f64)> },
}

impl PointerInput {
    pub fn client_position(self) -> Option<(f64, f64)> {
        match self {
            PointerInput::Mouse { client_x, client_y } => Some((client_x, client_y)),
            PointerInput::Touch { first } => first,
        }
    }
}

/// Where a scaled image lands on the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

pub fn normalize_point(point: Point) -> Option<Point> {
    if !point.x.is_finite() || !point.y.is_finite() {
        return None;
    }
    Some(point)
}

/// Maps a client (device) position onto the canvas' intrinsic pixel grid.
///
/// The canvas may be displayed at a different size than its backing store,
/// so each axis is scaled by `intrinsic / displayed`.
pub fn client_to_canvas(
    client_x: f64,
    client_y: f64,
    rect: ClientRect,
    canvas_width: f64,
    canvas_height: f64,
) -> Option<Point> {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return None;
    }
    let scale_x = canvas_width / rect.width;
    let scale_y = canvas_height / rect.height;
    normalize_point(Point {
        x: (client_x - rect.left) * scale_x,
        y: (client_y - rect.top) * scale_y,
    })
}

pub fn pointer_to_canvas(
    input: PointerInput,
    rect: ClientRect,
    canvas_width: f64,
    canvas_height: f64,
) -> Option<Point> {
    let (client_x, client_y) = input.client_position()?;
    client_to_canvas(client_x, client_y, rect, canvas_width, canvas_height)
}

/// Uniformly scales an image so it fits inside the canvas, centered.
pub fn fit_contain(
    image_width: f64,
    image_height: f64,
    canvas_width: f64,
    canvas_height: f64,
) -> Option<Placement> {
    if !(image_width > 0.0 && image_height > 0.0) {
        return None;
    }
    let scale = (canvas_width / image_width).min(canvas_height / image_height);
    let width = (image_width * scale).min(canvas_width);
    let height = (image_height * scale).min(canvas_height);
    Some(Placement {
        x: (canvas_width - width) / 2.0,
        y: (canvas_height - height) / 2.0,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(left: f64, top: f64, width: f64, height: f64) -> ClientRect {
        ClientRect {
            left,
            top,
            width,
            height,
        }
    }

    #[test]
    fn identity_when_displayed_at_intrinsic_size() {
        let point = client_to_canvas(110.0, 70.0, rect(10.0, 20.0, 800.0, 400.0), 800.0, 400.0);
        assert_eq!(point, Some(Point { x: 100.0, y: 50.0 }));
    }

    #[test]
    fn scales_by_display_ratio() {
        // Displayed at half size: every CSS pixel covers two canvas pixels.
        let point = client_to_canvas(200.0, 100.0, rect(0.0, 0.0, 400.0, 200.0), 800.0, 400.0);
        assert_eq!(point, Some(Point { x: 400.0, y: 200.0 }));
    }

    #[test]
    fn doubling_display_width_halves_x() {
        for (client_x, left) in [(150.0, 0.0), (333.0, 17.5), (40.0, 40.0), (900.0, 12.0)] {
            let narrow =
                client_to_canvas(client_x, 5.0, rect(left, 0.0, 300.0, 200.0), 800.0, 400.0)
                    .unwrap();
            let wide =
                client_to_canvas(client_x, 5.0, rect(left, 0.0, 600.0, 200.0), 800.0, 400.0)
                    .unwrap();
            assert!((wide.x - narrow.x / 2.0).abs() < 1e-9);
            assert_eq!(wide.y, narrow.y);
        }
    }

    #[test]
    fn degenerate_rect_is_rejected() {
        assert_eq!(
            client_to_canvas(1.0, 1.0, rect(0.0, 0.0, 0.0, 400.0), 800.0, 400.0),
            None
        );
        assert_eq!(
            client_to_canvas(1.0, 1.0, rect(0.0, 0.0, 800.0, -1.0), 800.0, 400.0),
            None
        );
    }

    #[test]
    fn non_finite_input_is_rejected() {
        assert_eq!(
            client_to_canvas(f64::NAN, 1.0, rect(0.0, 0.0, 800.0, 400.0), 800.0, 400.0),
            None
        );
    }

    #[test]
    fn fit_contain_wide_image() {
        let placement = fit_contain(1600.0, 400.0, 800.0, 400.0).unwrap();
        assert_eq!(
            placement,
            Placement {
                x: 0.0,
                y: 100.0,
                width: 800.0,
                height: 200.0
            }
        );
    }

    #[test]
    fn fit_contain_tall_image_upscales_and_centers() {
        let placement = fit_contain(10.0, 100.0, 800.0, 400.0).unwrap();
        assert_eq!(placement.width, 40.0);
        assert_eq!(placement.height, 400.0);
        assert_eq!(placement.x, 380.0);
        assert_eq!(placement.y, 0.0);
    }

    #[test]
    fn fit_contain_stays_in_bounds_and_keeps_aspect() {
        let sizes = [
            (1.0, 1.0),
            (3.0, 7.0),
            (801.0, 399.0),
            (1920.0, 1080.0),
            (333.0, 4096.0),
            (12345.0, 17.0),
            (800.0, 400.0),
        ];
        for (width, height) in sizes {
            let placement = fit_contain(width, height, 800.0, 400.0).unwrap();
            assert!(placement.width <= 800.0 && placement.height <= 400.0);
            assert!(placement.x >= 0.0 && placement.y >= 0.0);
            let expected = width / height;
            let actual = placement.width / placement.height;
            assert!((actual - expected).abs() / expected < 1e-9, "{width}x{height}");
        }
    }

    #[test]
    fn fit_contain_rejects_empty_images() {
        assert_eq!(fit_contain(0.0, 10.0, 800.0, 400.0), None);
        assert_eq!(fit_contain(10.0, 0.0, 800.0, 400.0), None);
    }

    #[test]
    fn touch_uses_first_touch_and_mouse_uses_client_position() {
        let screen = rect(10.0, 20.0, 400.0, 200.0);
        let touch = PointerInput::Touch {
            first: Some((210.0, 120.0)),
        };
        let mouse = PointerInput::Mouse {
            client_x: 210.0,
            client_y: 120.0,
        };
        assert_eq!(
            pointer_to_canvas(touch, screen, 800.0, 400.0),
            Some(Point { x: 400.0, y: 200.0 })
        );
        assert_eq!(
            pointer_to_canvas(mouse, screen, 800.0, 400.0),
            pointer_to_canvas(touch, screen, 800.0, 400.0)
        );
    }

    #[test]
    fn touch_without_touches_maps_to_nothing() {
        let touch = PointerInput::Touch { first: None };
        assert_eq!(touch.client_position(), None);
        assert_eq!(
            pointer_to_canvas(touch, rect(0.0, 0.0, 800.0, 400.0), 800.0, 400.0),
            None
        );
    }
}
