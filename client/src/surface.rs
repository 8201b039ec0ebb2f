//! The raster the board paints on.
//!
//! Painting code is written against [`Surface`] rather than the browser
//! context directly, so the stroke pipeline runs the same on a recording
//! surface in tests.

use image::RgbaImage;
use thiserror::Error;
use wasm_bindgen::{Clamped, JsValue};
use web_sys::{CanvasRenderingContext2d, ImageData};

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("canvas rejected {operation}: {message}")]
    Rejected {
        operation: &'static str,
        message: String,
    },
    #[error("drawing context has no canvas")]
    Detached,
}

impl SurfaceError {
    fn rejected(operation: &'static str, value: JsValue) -> Self {
        let message = value.as_string().unwrap_or_else(|| format!("{value:?}"));
        SurfaceError::Rejected { operation, message }
    }
}

pub trait Surface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    fn save(&self);
    fn restore(&self);
    fn set_fill_color(&self, color: &str);
    fn set_stroke_color(&self, color: &str);
    fn set_line_width(&self, width: f64);
    fn set_line_cap(&self, cap: &str);
    fn set_line_join(&self, join: &str);

    fn fill_rect(&self, x: f64, y: f64, width: f64, height: f64);
    fn begin_path(&self);
    fn move_to(&self, x: f64, y: f64);
    fn line_to(&self, x: f64, y: f64);
    fn arc(
        &self,
        x: f64,
        y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> Result<(), SurfaceError>;
    fn stroke(&self);
    fn fill(&self);

    /// Replaces the pixels under `image`, with its top-left corner at `(x, y)`.
    fn put_rgba(&self, x: f64, y: f64, image: &RgbaImage) -> Result<(), SurfaceError>;
    /// The current pixels as a PNG, base64 encoded.
    fn export_png_base64(&self) -> Result<String, SurfaceError>;
}

impl Surface for CanvasRenderingContext2d {
    fn width(&self) -> f64 {
        self.canvas().map(|canvas| canvas.width() as f64).unwrap_or(0.0)
    }

    fn height(&self) -> f64 {
        self.canvas().map(|canvas| canvas.height() as f64).unwrap_or(0.0)
    }

    fn save(&self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&self) {
        CanvasRenderingContext2d::restore(self);
    }

    fn set_fill_color(&self, color: &str) {
        self.set_fill_style_str(color);
    }

    fn set_stroke_color(&self, color: &str) {
        self.set_stroke_style_str(color);
    }

    fn set_line_width(&self, width: f64) {
        CanvasRenderingContext2d::set_line_width(self, width);
    }

    fn set_line_cap(&self, cap: &str) {
        CanvasRenderingContext2d::set_line_cap(self, cap);
    }

    fn set_line_join(&self, join: &str) {
        CanvasRenderingContext2d::set_line_join(self, join);
    }

    fn fill_rect(&self, x: f64, y: f64, width: f64, height: f64) {
        CanvasRenderingContext2d::fill_rect(self, x, y, width, height);
    }

    fn begin_path(&self) {
        CanvasRenderingContext2d::begin_path(self);
    }

    fn move_to(&self, x: f64, y: f64) {
        CanvasRenderingContext2d::move_to(self, x, y);
    }

    fn line_to(&self, x: f64, y: f64) {
        CanvasRenderingContext2d::line_to(self, x, y);
    }

    fn arc(
        &self,
        x: f64,
        y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> Result<(), SurfaceError> {
        CanvasRenderingContext2d::arc(self, x, y, radius, start_angle, end_angle)
            .map_err(|value| SurfaceError::rejected("arc", value))
    }

    fn stroke(&self) {
        CanvasRenderingContext2d::stroke(self);
    }

    fn fill(&self) {
        CanvasRenderingContext2d::fill(self);
    }

    fn put_rgba(&self, x: f64, y: f64, image: &RgbaImage) -> Result<(), SurfaceError> {
        let data = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(image.as_raw().as_slice()),
            image.width(),
            image.height(),
        )
        .map_err(|value| SurfaceError::rejected("ImageData", value))?;
        self.put_image_data(&data, x, y)
            .map_err(|value| SurfaceError::rejected("putImageData", value))
    }

    fn export_png_base64(&self) -> Result<String, SurfaceError> {
        let canvas = self.canvas().ok_or(SurfaceError::Detached)?;
        let url = canvas
            .to_data_url_with_type("image/png")
            .map_err(|value| SurfaceError::rejected("toDataURL", value))?;
        match url.split_once(',') {
            Some((_, payload)) => Ok(payload.to_string()),
            None => Err(SurfaceError::Rejected {
                operation: "toDataURL",
                message: "malformed data URL".to_string(),
            }),
        }
    }
}

#[cfg(test)]
pub mod recording {
    //! A surface that records what ends up painted, with styles resolved.
    //!
    //! Painting that covers the whole surface discards everything painted
    //! before it, so two recordings compare equal exactly when they would
    //! show the same pixels.

    use std::cell::{Cell, RefCell};

    use image::RgbaImage;

    use super::{Surface, SurfaceError};

    #[derive(Clone, Debug, PartialEq)]
    pub enum Paint {
        Rect {
            x: f64,
            y: f64,
            width: f64,
            height: f64,
            color: String,
        },
        Polyline {
            points: Vec<(f64, f64)>,
            color: String,
            width: f64,
            cap: String,
            join: String,
        },
        Dot {
            x: f64,
            y: f64,
            radius: f64,
            color: String,
        },
        Pixels {
            x: f64,
            y: f64,
            width: u32,
            height: u32,
        },
    }

    #[derive(Clone, Debug)]
    struct Style {
        fill: String,
        stroke: String,
        line_width: f64,
        line_cap: String,
        line_join: String,
    }

    impl Default for Style {
        fn default() -> Self {
            Self {
                fill: "#000000".to_string(),
                stroke: "#000000".to_string(),
                line_width: 1.0,
                line_cap: "butt".to_string(),
                line_join: "miter".to_string(),
            }
        }
    }

    enum PathCommand {
        Move(f64, f64),
        Line(f64, f64),
        Arc(f64, f64, f64),
    }

    pub struct RecordingSurface {
        width: f64,
        height: f64,
        style: RefCell<Style>,
        saved: RefCell<Vec<Style>>,
        path: RefCell<Vec<PathCommand>>,
        paints: RefCell<Vec<Paint>>,
        pub reject_pixels: Cell<bool>,
        pub reject_export: Cell<bool>,
        pub reject_arc: Cell<bool>,
    }

    impl RecordingSurface {
        pub fn new(width: f64, height: f64) -> Self {
            Self {
                width,
                height,
                style: RefCell::new(Style::default()),
                saved: RefCell::new(Vec::new()),
                path: RefCell::new(Vec::new()),
                paints: RefCell::new(Vec::new()),
                reject_pixels: Cell::new(false),
                reject_export: Cell::new(false),
                reject_arc: Cell::new(false),
            }
        }

        pub fn paints(&self) -> Vec<Paint> {
            self.paints.borrow().clone()
        }

        pub fn save_depth(&self) -> usize {
            self.saved.borrow().len()
        }

        pub fn polylines(&self) -> Vec<Vec<(f64, f64)>> {
            self.paints
                .borrow()
                .iter()
                .filter_map(|paint| match paint {
                    Paint::Polyline { points, .. } => Some(points.clone()),
                    _ => None,
                })
                .collect()
        }

        pub fn dots(&self) -> Vec<(f64, f64, f64, String)> {
            self.paints
                .borrow()
                .iter()
                .filter_map(|paint| match paint {
                    Paint::Dot {
                        x,
                        y,
                        radius,
                        color,
                    } => Some((*x, *y, *radius, color.clone())),
                    _ => None,
                })
                .collect()
        }

        fn covers_surface(&self, x: f64, y: f64, width: f64, height: f64) -> bool {
            x <= 0.0 && y <= 0.0 && x + width >= self.width && y + height >= self.height
        }
    }

    impl Surface for RecordingSurface {
        fn width(&self) -> f64 {
            self.width
        }

        fn height(&self) -> f64 {
            self.height
        }

        fn save(&self) {
            let current = self.style.borrow().clone();
            self.saved.borrow_mut().push(current);
        }

        fn restore(&self) {
            if let Some(style) = self.saved.borrow_mut().pop() {
                *self.style.borrow_mut() = style;
            }
        }

        fn set_fill_color(&self, color: &str) {
            self.style.borrow_mut().fill = color.to_string();
        }

        fn set_stroke_color(&self, color: &str) {
            self.style.borrow_mut().stroke = color.to_string();
        }

        fn set_line_width(&self, width: f64) {
            self.style.borrow_mut().line_width = width;
        }

        fn set_line_cap(&self, cap: &str) {
            self.style.borrow_mut().line_cap = cap.to_string();
        }

        fn set_line_join(&self, join: &str) {
            self.style.borrow_mut().line_join = join.to_string();
        }

        fn fill_rect(&self, x: f64, y: f64, width: f64, height: f64) {
            if self.covers_surface(x, y, width, height) {
                self.paints.borrow_mut().clear();
            }
            let color = self.style.borrow().fill.clone();
            self.paints.borrow_mut().push(Paint::Rect {
                x,
                y,
                width,
                height,
                color,
            });
        }

        fn begin_path(&self) {
            self.path.borrow_mut().clear();
        }

        fn move_to(&self, x: f64, y: f64) {
            self.path.borrow_mut().push(PathCommand::Move(x, y));
        }

        fn line_to(&self, x: f64, y: f64) {
            self.path.borrow_mut().push(PathCommand::Line(x, y));
        }

        fn arc(
            &self,
            x: f64,
            y: f64,
            radius: f64,
            _start_angle: f64,
            _end_angle: f64,
        ) -> Result<(), SurfaceError> {
            if self.reject_arc.get() {
                return Err(SurfaceError::Rejected {
                    operation: "arc",
                    message: "rejected by test".to_string(),
                });
            }
            self.path.borrow_mut().push(PathCommand::Arc(x, y, radius));
            Ok(())
        }

        fn stroke(&self) {
            let style = self.style.borrow().clone();
            let mut lines: Vec<Vec<(f64, f64)>> = Vec::new();
            for command in self.path.borrow().iter() {
                match command {
                    PathCommand::Move(x, y) => lines.push(vec![(*x, *y)]),
                    PathCommand::Line(x, y) => match lines.last_mut() {
                        Some(line) => line.push((*x, *y)),
                        None => lines.push(vec![(*x, *y)]),
                    },
                    PathCommand::Arc(..) => {}
                }
            }
            let mut paints = self.paints.borrow_mut();
            for points in lines.into_iter().filter(|line| line.len() > 1) {
                paints.push(Paint::Polyline {
                    points,
                    color: style.stroke.clone(),
                    width: style.line_width,
                    cap: style.line_cap.clone(),
                    join: style.line_join.clone(),
                });
            }
        }

        fn fill(&self) {
            let color = self.style.borrow().fill.clone();
            let mut paints = self.paints.borrow_mut();
            for command in self.path.borrow().iter() {
                if let PathCommand::Arc(x, y, radius) = command {
                    paints.push(Paint::Dot {
                        x: *x,
                        y: *y,
                        radius: *radius,
                        color: color.clone(),
                    });
                }
            }
        }

        fn put_rgba(&self, x: f64, y: f64, image: &RgbaImage) -> Result<(), SurfaceError> {
            if self.reject_pixels.get() {
                return Err(SurfaceError::Rejected {
                    operation: "putImageData",
                    message: "rejected by test".to_string(),
                });
            }
            let (width, height) = image.dimensions();
            if self.covers_surface(x, y, width as f64, height as f64) {
                self.paints.borrow_mut().clear();
            }
            self.paints.borrow_mut().push(Paint::Pixels {
                x,
                y,
                width,
                height,
            });
            Ok(())
        }

        fn export_png_base64(&self) -> Result<String, SurfaceError> {
            if self.reject_export.get() {
                return Err(SurfaceError::Detached);
            }
            Ok("iVBORw0KGgo=".to_string())
        }
    }
}
