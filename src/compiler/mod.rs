//! Compile mapped chart data into a scene graph of drawing commands.
//!
//! Every chart family follows the same two steps: a pure `layout` that
//! computes scales and shape geometry from the data, and a `compile` that
//! turns the layout into `DrawCommand`s. Nothing here touches a backend.

pub mod axis;
pub mod bar;
pub mod line;
pub mod pie;
pub mod scatter;

use crate::chart_type::ChartType;
use crate::ir::{ChartDatum, Scene};

pub const STEELBLUE: &str = "steelblue";

/// Space reserved around the plotting area, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    /// Width and height left for the plotting area
    pub fn inner(&self, (width, height): (u32, u32)) -> (f64, f64) {
        (
            width as f64 - self.left - self.right,
            height as f64 - self.top - self.bottom,
        )
    }
}

/// Compile one chart. Empty data yields an empty scene.
pub fn compile_chart(
    chart_type: ChartType,
    data: &[ChartDatum],
    label_column: &str,
    value_column: &str,
    size: (u32, u32),
) -> Scene {
    if data.is_empty() {
        return Scene::new(size.0, size.1);
    }
    match chart_type {
        ChartType::Bar => bar::compile(data, label_column, value_column, size),
        ChartType::Line => line::compile(data, size),
        ChartType::Pie => pie::compile(data, size),
        ChartType::Scatter => scatter::compile(data, size),
    }
}
