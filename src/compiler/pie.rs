// Pie chart: one wedge per datum, proportional to its value

use crate::data::format_number;
use crate::ir::{ChartDatum, DrawCommand, FillStyle, Scene, TextAnchor, TextBaseline, TextStyle};
use crate::palette::ColorPalette;
use std::f64::consts::{PI, TAU};

/// Angular resolution used when turning an arc into polygon vertices
const ARC_STEP: f64 = PI / 90.0;

/// A wedge. Angles are radians measured clockwise from 12 o'clock.
#[derive(Debug, Clone, PartialEq)]
pub struct PieArc {
    pub datum: usize,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl PieArc {
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

/// Lay wedges out around the full circle.
///
/// Wedges are placed largest first starting at 12 o'clock, but the result
/// keeps input order so wedge `i` belongs to datum `i`. Non-positive and NaN
/// values get zero-width wedges; if nothing is positive every wedge is empty.
pub fn layout(data: &[ChartDatum]) -> Vec<PieArc> {
    let sum: f64 = data.iter().map(|d| d.value).filter(|v| *v > 0.0).sum();
    let k = if sum > 0.0 { TAU / sum } else { 0.0 };

    let mut order: Vec<usize> = (0..data.len()).collect();
    let sort_key = |i: usize| {
        let v = data[i].value;
        if v.is_nan() {
            f64::NEG_INFINITY
        } else {
            v
        }
    };
    order.sort_by(|&a, &b| sort_key(b).total_cmp(&sort_key(a)));

    let mut arcs: Vec<PieArc> = (0..data.len())
        .map(|datum| PieArc {
            datum,
            start_angle: 0.0,
            end_angle: 0.0,
        })
        .collect();
    let mut angle = 0.0;
    for idx in order {
        let value = data[idx].value;
        let span = if value > 0.0 { value * k } else { 0.0 };
        arcs[idx].start_angle = angle;
        arcs[idx].end_angle = angle + span;
        angle += span;
    }
    arcs
}

fn polar(center: (f64, f64), radius: f64, angle: f64) -> (f64, f64) {
    (
        center.0 + radius * angle.sin(),
        center.1 - radius * angle.cos(),
    )
}

/// Outline of a wedge as a polygon: the center followed by points along the
/// arc
pub fn wedge_points(center: (f64, f64), radius: f64, arc: &PieArc) -> Vec<(f64, f64)> {
    let steps = (arc.span() / ARC_STEP).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for i in 0..=steps {
        let angle = arc.start_angle + arc.span() * i as f64 / steps as f64;
        points.push(polar(center, radius, angle));
    }
    points
}

/// Label position: halfway along the radius at the middle angle
pub fn centroid(center: (f64, f64), radius: f64, arc: &PieArc) -> (f64, f64) {
    polar(center, radius / 2.0, (arc.start_angle + arc.end_angle) / 2.0)
}

pub fn compile(data: &[ChartDatum], size: (u32, u32)) -> Scene {
    let mut scene = Scene::new(size.0, size.1);
    let (width, height) = (size.0 as f64, size.1 as f64);
    let radius = width.min(height) / 2.0;
    let center = (width / 2.0, height / 2.0);
    let palette = ColorPalette::category10();
    let arcs = layout(data);

    for arc in &arcs {
        if arc.span() <= 0.0 {
            continue;
        }
        scene.push(DrawCommand::Polygon {
            points: wedge_points(center, radius, arc),
            style: FillStyle::solid(palette.get_color(arc.datum)),
        });
    }
    for arc in &arcs {
        let datum = &data[arc.datum];
        scene.push(DrawCommand::Text {
            pos: centroid(center, radius, arc),
            content: format!("{}: {}", datum.label, format_number(datum.value)),
            style: TextStyle::new(16.0, "black")
                .anchor(TextAnchor::Middle)
                .baseline(TextBaseline::Middle),
        });
    }
    scene
}
