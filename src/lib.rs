// Library exports for chartwise

pub mod advisor;
pub mod chart_type;
pub mod config;
pub mod csv_reader;
pub mod data;
pub mod graph;
pub mod palette;
pub mod parser;
pub mod runtime;
pub mod server;
pub mod session;
pub mod transform;

// Rendering pipeline
pub mod compiler;
pub mod ir;
pub mod scale;

use chart_type::ChartType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Svg,
    Png,
}

/// Canvas and encoding choices for one render; unset sizes fall back to the
/// chart family's default canvas
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub format: OutputFormat,
}

impl RenderOptions {
    /// Canvas size for a chart family, with user overrides applied per axis
    pub fn canvas_for(&self, chart_type: ChartType) -> (u32, u32) {
        let (width, height) = chart_type.canvas_size();
        (self.width.unwrap_or(width), self.height.unwrap_or(height))
    }
}
