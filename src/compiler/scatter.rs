// Scatter plot: one fixed-radius point per datum

use super::{axis, Margin, STEELBLUE};
use crate::ir::{ChartDatum, DrawCommand, FillStyle, Scene};
use crate::scale::{BandScale, LinearScale};

pub const MARGIN: Margin = Margin {
    top: 20.0,
    right: 30.0,
    bottom: 50.0,
    left: 60.0,
};
pub const POINT_RADIUS: f64 = 5.0;

#[derive(Debug, Clone)]
pub struct ScatterLayout {
    pub x: BandScale,
    pub y: LinearScale,
    pub inner: (f64, f64),
    /// (datum index, position in plotting-area coordinates)
    pub points: Vec<(usize, (f64, f64))>,
}

pub fn layout(data: &[ChartDatum], size: (u32, u32)) -> ScatterLayout {
    let (inner_width, inner_height) = MARGIN.inner(size);
    let x = BandScale::point(data.iter().map(|d| d.label.as_str()), (0.0, inner_width));
    let y = LinearScale::zero_to_max(data.iter().map(|d| d.value), (inner_height, 0.0));

    let points = data
        .iter()
        .enumerate()
        .filter_map(|(idx, d)| {
            let px = x.position(&d.label)?;
            let py = y.apply(d.value);
            py.is_finite().then_some((idx, (px, py)))
        })
        .collect();

    ScatterLayout {
        x,
        y,
        inner: (inner_width, inner_height),
        points,
    }
}

pub fn compile(data: &[ChartDatum], size: (u32, u32)) -> Scene {
    let layout = layout(data, size);
    let mut scene = Scene::new(size.0, size.1);
    let (ox, oy) = (MARGIN.left, MARGIN.top);

    for (_, (x, y)) in &layout.points {
        scene.push(DrawCommand::Circle {
            center: (ox + x, oy + y),
            radius: POINT_RADIUS,
            style: FillStyle::solid(STEELBLUE),
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
