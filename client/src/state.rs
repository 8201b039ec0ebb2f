use crate::geometry::Point;
use crate::recognize::Recognizer;
use crate::surface::Surface;

pub const CANVAS_WIDTH: u32 = 800;
pub const CANVAS_HEIGHT: u32 = 400;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawMode {
    Idle,
    Drawing { last: Point },
}

/// Points of the stroke in progress; reused from one stroke to the next.
#[derive(Debug, Default)]
pub struct StrokeBuffer {
    points: Vec<Point>,
}

impl StrokeBuffer {
    pub fn begin(&mut self, point: Point) {
        self.points.clear();
        self.points.push(point);
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The last `count` points, or all of them if there are fewer.
    pub fn tail(&self, count: usize) -> &[Point] {
        let start = self.points.len().saturating_sub(count);
        &self.points[start..]
    }

    pub fn reset(&mut self) {
        self.points.clear();
    }
}

pub struct State<S> {
    pub surface: S,
    pub mode: DrawMode,
    pub buffer: StrokeBuffer,
    pub show_grid: bool,
    pub recognition: Recognizer,
}

impl<S: Surface> State<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            mode: DrawMode::Idle,
            buffer: StrokeBuffer::default(),
            show_grid: true,
            recognition: Recognizer::default(),
        }
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.mode, DrawMode::Drawing { .. })
    }
}
