// Bar chart: band x-scale, linear y-scale from zero, hoverable bars

use super::{axis, Margin, STEELBLUE};
use crate::data::format_number;
use crate::ir::{
    ChartDatum, DrawCommand, FillStyle, HoverTarget, Scene, TextAnchor, TextBaseline, TextStyle,
};
use crate::scale::{BandScale, LinearScale};

pub const MARGIN: Margin = Margin {
    top: 20.0,
    right: 30.0,
    bottom: 150.0,
    left: 60.0,
};
const BAND_PADDING: f64 = 0.2;
pub const HOVER_COLOR: &str = "orange";
const TEXT_COLOR: &str = "#333";

/// One bar in plotting-area coordinates (origin at the top-left of the
/// area inside the margins)
#[derive(Debug, Clone, PartialEq)]
pub struct BarGeometry {
    pub datum: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone)]
pub struct BarLayout {
    pub x: BandScale,
    pub y: LinearScale,
    pub inner: (f64, f64),
    pub bars: Vec<BarGeometry>,
}

/// Compute scales and bar geometry. Bars whose height is not a finite,
/// non-negative number (NaN or negative values) are left out.
pub fn layout(data: &[ChartDatum], size: (u32, u32)) -> BarLayout {
    let (inner_width, inner_height) = MARGIN.inner(size);
    let x = BandScale::band(
        data.iter().map(|d| d.label.as_str()),
        (0.0, inner_width),
        BAND_PADDING,
    );
    let y = LinearScale::zero_to_max(data.iter().map(|d| d.value), (inner_height, 0.0));

    let bars = data
        .iter()
        .enumerate()
        .filter_map(|(datum, d)| {
            let left = x.position(&d.label)?;
            let top = y.apply(d.value);
            let height = inner_height - top;
            if !height.is_finite() || height < 0.0 {
                return None;
            }
            Some(BarGeometry {
                datum,
                x: left,
                y: top,
                width: x.bandwidth(),
                height,
            })
        })
        .collect();

    BarLayout {
        x,
        y,
        inner: (inner_width, inner_height),
        bars,
    }
}

pub fn compile(
    data: &[ChartDatum],
    label_column: &str,
    value_column: &str,
    size: (u32, u32),
) -> Scene {
    let layout = layout(data, size);
    let mut scene = Scene::new(size.0, size.1);
    let (ox, oy) = (MARGIN.left, MARGIN.top);

    for bar in &layout.bars {
        let datum = &data[bar.datum];
        let tl = (ox + bar.x, oy + bar.y);
        let br = (tl.0 + bar.width, tl.1 + bar.height);
        let command = scene.push(DrawCommand::Rect {
            tl,
            br,
            style: FillStyle::solid(STEELBLUE),
        });
        scene.hover_targets.push(HoverTarget {
            tl,
            br,
            command,
            highlight: HOVER_COLOR.to_string(),
            tooltip: vec![
                format!("{}: {}", label_column, datum.label),
                format!("{}: {}", value_column, format_number(datum.value)),
            ],
        });
    }

    // Rotated category labels so long names stay readable
    axis::bottom(
        &mut scene,
        &layout.x,
        (ox, oy + layout.inner.1),
        (0.0, layout.inner.0),
        TextStyle::new(14.0, TEXT_COLOR)
            .anchor(TextAnchor::End)
            .baseline(TextBaseline::Middle)
            .vertical(),
    );
    axis::left(
        &mut scene,
        &layout.y,
        (ox, oy),
        TextStyle::new(14.0, TEXT_COLOR)
            .anchor(TextAnchor::End)
            .baseline(TextBaseline::Middle),
    );

    let (width, height) = (size.0 as f64, size.1 as f64);
    scene.push(DrawCommand::Text {
        pos: (MARGIN.left / 40.0, height / 2.0),
        content: value_column.to_string(),
        style: TextStyle::new(16.0, "black")
            .bold()
            .anchor(TextAnchor::Middle)
            .baseline(TextBaseline::Top)
            .vertical(),
    });
    scene.push(DrawCommand::Text {
        pos: (width / 2.0, height - MARGIN.bottom / 2.0),
        content: label_column.to_string(),
        style: TextStyle::new(16.0, "black")
            .bold()
            .anchor(TextAnchor::Middle)
            .baseline(TextBaseline::Bottom),
    });

    scene
}
