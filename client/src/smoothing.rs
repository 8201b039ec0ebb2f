use crate::geometry::Point;

pub const SMOOTHING_FACTOR: f64 = 0.2;
/// Number of trailing stroke points smoothed per incoming point.
pub const SMOOTHING_WINDOW: usize = 4;

/// Nudges every interior point toward its neighbours' trend.
///
/// The first and last points are returned untouched so consecutive windows
/// of the same stroke join without seams.
pub fn smooth_window(points: &[Point]) -> Vec<Point> {
    let mut line = Vec::with_capacity(points.len());
    if points.len() < 3 {
        line.extend_from_slice(points);
        return line;
    }
    line.push(points[0]);
    for window in points.windows(3) {
        let (prev, curr, next) = (window[0], window[1], window[2]);
        line.push(Point {
            x: curr.x + (next.x - prev.x) * SMOOTHING_FACTOR,
            y: curr.y + (next.y - prev.y) * SMOOTHING_FACTOR,
        });
    }
    line.push(points[points.len() - 1]);
    line
}
