use serde::Serialize;

// =============================================================================
// Mapped data
// =============================================================================

/// A normalized `{label, value}` pair shared by every renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDatum {
    pub label: String,
    pub value: f64,
}

impl ChartDatum {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

// =============================================================================
// Styles
// =============================================================================

/// Fill style for rectangles, wedges and points
#[derive(Debug, Clone, PartialEq)]
pub struct FillStyle {
    pub color: String,
    pub alpha: f64,
}

impl FillStyle {
    pub fn solid(color: &str) -> Self {
        Self {
            color: color.to_string(),
            alpha: 1.0,
        }
    }
}

/// Stroke style for paths
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub color: String,
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub color: String,
    pub bold: bool,
    pub anchor: TextAnchor,
    pub baseline: TextBaseline,
    /// Rotate a quarter turn counter-clockwise around the anchor
    pub vertical: bool,
}

impl TextStyle {
    pub fn new(size: f64, color: &str) -> Self {
        Self {
            size,
            color: color.to_string(),
            bold: false,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Bottom,
            vertical: false,
        }
    }

    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn vertical(mut self) -> Self {
        self.vertical = true;
        self
    }
}

// =============================================================================
// Scene graph
// =============================================================================

/// A primitive drawing command in canvas pixel coordinates.
/// The backend executes these blindly, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        // Top-Left, Bottom-Right
        tl: (f64, f64),
        br: (f64, f64),
        style: FillStyle,
    },
    Path {
        points: Vec<(f64, f64)>,
        style: StrokeStyle,
    },
    Polygon {
        points: Vec<(f64, f64)>,
        style: FillStyle,
    },
    Circle {
        center: (f64, f64),
        radius: f64,
        style: FillStyle,
    },
    Text {
        pos: (f64, f64),
        content: String,
        style: TextStyle,
    },
}

/// A region that reacts to the pointer: the command it recolors and the
/// tooltip lines it shows
#[derive(Debug, Clone, PartialEq)]
pub struct HoverTarget {
    pub tl: (f64, f64),
    pub br: (f64, f64),
    pub command: usize,
    pub highlight: String,
    pub tooltip: Vec<String>,
}

impl HoverTarget {
    pub fn contains(&self, (x, y): (f64, f64)) -> bool {
        x >= self.tl.0 && x <= self.br.0 && y >= self.tl.1 && y <= self.br.1
    }
}

/// Everything one render pass draws
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<DrawCommand>,
    pub hover_targets: Vec<HoverTarget>,
}

impl Scene {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
            hover_targets: Vec::new(),
        }
    }

    pub fn push(&mut self, command: DrawCommand) -> usize {
        self.commands.push(command);
        self.commands.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Apply the hover state for a pointer position: the topmost target under
    /// the pointer is recolored and a tooltip is drawn next to the pointer.
    /// Returns the index of the hovered target.
    pub fn hover(&mut self, pointer: (f64, f64)) -> Option<usize> {
        let target_idx = self.hover_targets.iter().rposition(|t| t.contains(pointer))?;
        let target = self.hover_targets[target_idx].clone();

        if let Some(DrawCommand::Rect { style, .. }) = self.commands.get_mut(target.command) {
            style.color = target.highlight.clone();
        }
        self.push_tooltip(pointer, &target.tooltip);
        Some(target_idx)
    }

    fn push_tooltip(&mut self, (x, y): (f64, f64), lines: &[String]) {
        const PADDING: f64 = 5.0;
        const FONT_SIZE: f64 = 14.0;
        const LINE_HEIGHT: f64 = 18.0;
        // Rough advance width for sans-serif at FONT_SIZE
        const CHAR_WIDTH: f64 = 7.5;

        let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let tl = (x + 5.0, y - 28.0);
        let br = (
            tl.0 + widest as f64 * CHAR_WIDTH + PADDING * 2.0,
            tl.1 + lines.len() as f64 * LINE_HEIGHT + PADDING * 2.0,
        );
        self.push(DrawCommand::Rect {
            tl,
            br,
            style: FillStyle {
                color: "black".to_string(),
                alpha: 0.7,
            },
        });
        for (i, line) in lines.iter().enumerate() {
            self.push(DrawCommand::Text {
                pos: (tl.0 + PADDING, tl.1 + PADDING + i as f64 * LINE_HEIGHT),
                content: line.clone(),
                style: TextStyle::new(FONT_SIZE, "white").baseline(TextBaseline::Top),
            });
        }
    }
}
