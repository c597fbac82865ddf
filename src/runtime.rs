// Runtime executor: mapped chart data -> scene -> encoded image

use crate::chart_type::ChartType;
use crate::compiler;
use crate::graph;
use crate::ir::{ChartDatum, Scene};
use crate::RenderOptions;
use anyhow::{Context, Result};
use tracing::debug;

/// Build the scene for one chart, applying the pointer hover state if given
pub fn build_scene(
    chart_type: ChartType,
    data: &[ChartDatum],
    label_column: &str,
    value_column: &str,
    options: &RenderOptions,
    pointer: Option<(f64, f64)>,
) -> Scene {
    let size = options.canvas_for(chart_type);
    let mut scene = compiler::compile_chart(chart_type, data, label_column, value_column, size);

    if let Some(pointer) = pointer {
        match scene.hover(pointer) {
            Some(target) => debug!(target, ?pointer, "Hover applied"),
            None => debug!(?pointer, "Pointer is not over a hover target"),
        }
    }
    scene
}

/// Render a chart to encoded bytes.
///
/// Returns `Ok(None)` for empty data: nothing is drawn.
pub fn render_chart(
    chart_type: ChartType,
    data: &[ChartDatum],
    label_column: &str,
    value_column: &str,
    options: &RenderOptions,
    pointer: Option<(f64, f64)>,
) -> Result<Option<Vec<u8>>> {
    if data.is_empty() {
        debug!(%chart_type, "No data to render");
        return Ok(None);
    }

    let scene = build_scene(chart_type, data, label_column, value_column, options, pointer);
    debug!(
        %chart_type,
        width = scene.width,
        height = scene.height,
        commands = scene.commands.len(),
        "Compiled scene"
    );

    let bytes = graph::render_scene(&scene, &options.format)
        .with_context(|| format!("Failed to render {} chart", chart_type))?;
    Ok(Some(bytes))
}
