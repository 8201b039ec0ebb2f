use std::f64::consts::PI;

use crate::geometry::Point;
use crate::surface::Surface;

pub const BACKGROUND_COLOR: &str = "#ffffff";
pub const INK_COLOR: &str = "#000000";
pub const INK_WIDTH: f64 = 4.0;
pub const GRID_COLOR: &str = "#e5e7eb";
pub const GRID_LINE_WIDTH: f64 = 1.0;
pub const GRID_SIZE: f64 = 50.0;

/// Sets the persistent stroke style every ink segment relies on.
pub fn apply_ink_style<S: Surface + ?Sized>(surface: &S) {
    surface.set_stroke_color(INK_COLOR);
    surface.set_line_width(INK_WIDTH);
    surface.set_line_cap("round");
    surface.set_line_join("round");
}

pub fn paint_background<S: Surface + ?Sized>(surface: &S, show_grid: bool) {
    surface.set_fill_color(BACKGROUND_COLOR);
    surface.fill_rect(0.0, 0.0, surface.width(), surface.height());
    if show_grid {
        draw_grid(surface);
    }
}

pub fn draw_grid<S: Surface + ?Sized>(surface: &S) {
    let width = surface.width();
    let height = surface.height();
    surface.save();
    surface.set_stroke_color(GRID_COLOR);
    surface.set_line_width(GRID_LINE_WIDTH);

    let mut x = GRID_SIZE;
    while x < width {
        surface.begin_path();
        surface.move_to(x, 0.0);
        surface.line_to(x, height);
        surface.stroke();
        x += GRID_SIZE;
    }

    let mut y = GRID_SIZE;
    while y < height {
        surface.begin_path();
        surface.move_to(0.0, y);
        surface.line_to(width, y);
        surface.stroke();
        y += GRID_SIZE;
    }

    surface.restore();
}

pub fn draw_dot<S: Surface + ?Sized>(surface: &S, point: Point) {
    surface.save();
    surface.set_fill_color(INK_COLOR);
    surface.begin_path();
    match surface.arc(point.x, point.y, INK_WIDTH / 2.0, 0.0, PI * 2.0) {
        Ok(()) => surface.fill(),
        Err(error) => log::warn!("Could not draw dot at ({}, {}): {error}", point.x, point.y),
    }
    surface.restore();
}

pub fn draw_polyline<S: Surface + ?Sized>(surface: &S, points: &[Point]) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    surface.begin_path();
    surface.move_to(first.x, first.y);
    for point in rest {
        surface.line_to(point.x, point.y);
    }
    surface.stroke();
}
