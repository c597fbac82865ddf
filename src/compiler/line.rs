// Line chart: point x-scale in input order, monotone smoothed path

use super::{axis, Margin, STEELBLUE};
use crate::ir::{ChartDatum, DrawCommand, Scene, StrokeStyle};
use crate::scale::{BandScale, LinearScale};

pub const MARGIN: Margin = Margin {
    top: 20.0,
    right: 30.0,
    bottom: 50.0,
    left: 60.0,
};
const STROKE_WIDTH: f64 = 2.0;
const SAMPLES_PER_SEGMENT: usize = 16;

#[derive(Debug, Clone)]
pub struct LineLayout {
    pub x: BandScale,
    pub y: LinearScale,
    pub inner: (f64, f64),
    /// Runs of consecutive plottable points, in input order. A NaN value
    /// ends one run and starts the next.
    pub segments: Vec<Vec<(f64, f64)>>,
}

pub fn layout(data: &[ChartDatum], size: (u32, u32)) -> LineLayout {
    let (inner_width, inner_height) = MARGIN.inner(size);
    let x = BandScale::point(data.iter().map(|d| d.label.as_str()), (0.0, inner_width));
    let y = LinearScale::zero_to_max(data.iter().map(|d| d.value), (inner_height, 0.0));

    let mut segments = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    for d in data {
        let px = x.position(&d.label);
        let py = y.apply(d.value);
        match px {
            Some(px) if py.is_finite() => current.push((px, py)),
            _ => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }

    LineLayout {
        x,
        y,
        inner: (inner_width, inner_height),
        segments,
    }
}

pub fn compile(data: &[ChartDatum], size: (u32, u32)) -> Scene {
    let layout = layout(data, size);
    let mut scene = Scene::new(size.0, size.1);
    let (ox, oy) = (MARGIN.left, MARGIN.top);

    for segment in &layout.segments {
        if segment.len() < 2 {
            continue;
        }
        let points = monotone_x(segment, SAMPLES_PER_SEGMENT)
            .into_iter()
            .map(|(x, y)| (ox + x, oy + y))
            .collect();
        scene.push(DrawCommand::Path {
            points,
            style: StrokeStyle {
                color: STEELBLUE.to_string(),
                width: STROKE_WIDTH,
            },
        });
    }

    axis::left(&mut scene, &layout.y, (ox, oy), axis::left_tick_style());
    axis::bottom(
        &mut scene,
        &layout.x,
        (ox, oy + layout.inner.1),
        (0.0, layout.inner.0),
        axis::bottom_tick_style(),
    );
    scene
}

fn sign(x: f64) -> f64 {
    if x < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Tangent at `p1` from its two neighbours (Steffen's monotone method)
fn slope3(p0: (f64, f64), p1: (f64, f64), p2: (f64, f64)) -> f64 {
    let h0 = p1.0 - p0.0;
    let h1 = p2.0 - p1.0;
    let d0 = if h0 != 0.0 { h0 } else if h1 < 0.0 { -0.0 } else { 0.0 };
    let d1 = if h1 != 0.0 { h1 } else if h0 < 0.0 { -0.0 } else { 0.0 };
    let s0 = (p1.1 - p0.1) / d0;
    let s1 = (p2.1 - p1.1) / d1;
    let p = (s0 * h1 + s1 * h0) / (h0 + h1);
    let candidates = [s0.abs(), s1.abs(), 0.5 * p.abs()];
    if candidates.iter().any(|c| c.is_nan()) {
        return 0.0;
    }
    let min = candidates.iter().cloned().fold(f64::INFINITY, f64::min);
    let slope = (sign(s0) + sign(s1)) * min;
    if slope.is_nan() {
        0.0
    } else {
        slope
    }
}

/// Tangent at an end point given the tangent `t` at its neighbour
fn slope2(p0: (f64, f64), p1: (f64, f64), t: f64) -> f64 {
    let h = p1.0 - p0.0;
    if h != 0.0 {
        (3.0 * (p1.1 - p0.1) / h - t) / 2.0
    } else {
        t
    }
}

fn cubic(p0: (f64, f64), c1: (f64, f64), c2: (f64, f64), p1: (f64, f64), t: f64) -> (f64, f64) {
    let u = 1.0 - t;
    let a = u * u * u;
    let b = 3.0 * u * u * t;
    let c = 3.0 * u * t * t;
    let d = t * t * t;
    (
        a * p0.0 + b * c1.0 + c * c2.0 + d * p1.0,
        a * p0.1 + b * c1.1 + c * c2.1 + d * p1.1,
    )
}

/// Sample a monotone-in-x cubic curve through `points`, keeping their
/// order. Fewer than three points are returned unchanged (a straight line).
pub fn monotone_x(points: &[(f64, f64)], samples_per_segment: usize) -> Vec<(f64, f64)> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let mut tangents = vec![0.0; n];
    for i in 1..n - 1 {
        tangents[i] = slope3(points[i - 1], points[i], points[i + 1]);
    }
    tangents[0] = slope2(points[0], points[1], tangents[1]);
    tangents[n - 1] = slope2(points[n - 2], points[n - 1], tangents[n - 2]);

    let samples = samples_per_segment.max(1);
    let mut out = Vec::with_capacity(1 + (n - 1) * samples);
    out.push(points[0]);
    for i in 0..n - 1 {
        let (p0, p1) = (points[i], points[i + 1]);
        let dx = (p1.0 - p0.0) / 3.0;
        let c1 = (p0.0 + dx, p0.1 + dx * tangents[i]);
        let c2 = (p1.0 - dx, p1.1 - dx * tangents[i + 1]);
        for s in 1..=samples {
            out.push(cubic(p0, c1, c2, p1, s as f64 / samples as f64));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_points_follow_input_order() {
        let data = vec![
            ChartDatum::new("c", 3.0),
            ChartDatum::new("a", 1.0),
            ChartDatum::new("b", 2.0),
        ];
        let layout = layout(&data, (1000, 500));
        assert_eq!(layout.x.categories(), &["c", "a", "b"]);
        let xs: Vec<f64> = layout.segments[0].iter().map(|p| p.0).collect();
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_nan_splits_the_line() {
        let data = vec![
            ChartDatum::new("a", 1.0),
            ChartDatum::new("b", 2.0),
            ChartDatum::new("c", f64::NAN),
            ChartDatum::new("d", 2.0),
            ChartDatum::new("e", 4.0),
        ];
        let layout = layout(&data, (1000, 500));
        assert_eq!(layout.segments.len(), 2);
        assert_eq!(layout.segments[0].len(), 2);
        assert_eq!(layout.segments[1].len(), 2);
    }

    #[test]
    fn test_monotone_passes_through_points() {
        let points = vec![(0.0, 0.0), (1.0, 2.0), (2.0, 1.0), (3.0, 5.0)];
        let curve = monotone_x(&points, 8);
        assert_eq!(curve.len(), 1 + 3 * 8);
        for (i, p) in points.iter().enumerate() {
            let sample = curve[i * 8];
            assert!(approx(sample.0, p.0) && approx(sample.1, p.1));
        }
    }

    #[test]
    fn test_monotone_does_not_overshoot() {
        // monotone data must give a monotone curve
        let points = vec![(0.0, 0.0), (1.0, 1.0), (2.0, 10.0), (3.0, 10.5)];
        let curve = monotone_x(&points, 16);
        assert!(curve.windows(2).all(|w| w[1].1 >= w[0].1 - 1e-9));
        assert!(curve.windows(2).all(|w| w[1].0 >= w[0].0));
    }

    #[test]
    fn test_two_points_is_straight() {
        let points = vec![(0.0, 0.0), (10.0, 10.0)];
        assert_eq!(monotone_x(&points, 16), points);
    }

    #[test]
    fn test_compile_draws_one_path_plus_axes() {
        let data = vec![
            ChartDatum::new("a", 1.0),
            ChartDatum::new("b", 3.0),
            ChartDatum::new("c", 2.0),
        ];
        let scene = compile(&data, (1000, 500));
        let steelblue_paths = scene
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Path { style, .. } if style.color == STEELBLUE))
            .count();
        assert_eq!(steelblue_paths, 1);
        assert!(scene.hover_targets.is_empty());
    }
}
