use anyhow::{anyhow, Context, Result};
use image::ImageEncoder;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::ir::{
    DrawCommand, FillStyle, Scene, StrokeStyle, TextAnchor, TextBaseline,
    TextStyle as SceneTextStyle,
};
use crate::OutputFormat;

/// Execute a scene graph and encode the result
pub fn render_scene(scene: &Scene, format: &OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Svg => render_svg(scene).map(String::into_bytes),
        OutputFormat::Png => render_png(scene),
    }
}

/// Draw the scene onto a fresh SVG document
pub fn render_svg(scene: &Scene) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (scene.width, scene.height))
            .into_drawing_area();
        draw_scene(&root, scene)?;
        root.present().context("Failed to present drawing")?;
    }
    Ok(svg)
}

/// Draw the scene into an RGB buffer and encode it as PNG
pub fn render_png(scene: &Scene) -> Result<Vec<u8>> {
    let mut buffer = vec![0u8; rgb_buffer_len(scene.width, scene.height)?];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (scene.width, scene.height))
            .into_drawing_area();
        draw_scene(&root, scene)?;
        root.present().context("Failed to present drawing")?;
    }

    let mut png_bytes = Vec::new();
    {
        let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
        encoder
            .write_image(&buffer, scene.width, scene.height, image::ColorType::Rgb8)
            .context("Failed to encode PNG")?;
    }
    Ok(png_bytes)
}

/// Bytes needed for an RGB buffer of the given size
fn rgb_buffer_len(width: u32, height: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(3))
        .ok_or_else(|| anyhow!("Canvas {}x{} is too large to rasterize", width, height))
}

/// Full redraw: clear the canvas, then run every command in order
fn draw_scene<DB>(root: &DrawingArea<DB, Shift>, scene: &Scene) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).context("Failed to fill background")?;

    for command in &scene.commands {
        match command {
            DrawCommand::Rect { tl, br, style } => {
                root.draw(&Rectangle::new([px(*tl), px(*br)], fill(style)?.filled()))
                    .context("Failed to draw rectangle")?;
            }
            DrawCommand::Path { points, style } => {
                root.draw(&PathElement::new(
                    points.iter().copied().map(px).collect::<Vec<_>>(),
                    stroke(style)?,
                ))
                .context("Failed to draw path")?;
            }
            DrawCommand::Polygon { points, style } => {
                root.draw(&Polygon::new(
                    points.iter().copied().map(px).collect::<Vec<_>>(),
                    fill(style)?.filled(),
                ))
                .context("Failed to draw polygon")?;
            }
            DrawCommand::Circle {
                center,
                radius,
                style,
            } => {
                root.draw(&Circle::new(
                    px(*center),
                    radius.round() as i32,
                    fill(style)?.filled(),
                ))
                .context("Failed to draw circle")?;
            }
            DrawCommand::Text {
                pos,
                content,
                style,
            } => {
                root.draw(&Text::new(content.clone(), px(*pos), text_style(style)?))
                    .context("Failed to draw text")?;
            }
        }
    }

    Ok(())
}

fn px((x, y): (f64, f64)) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}

fn fill(style: &FillStyle) -> Result<RGBAColor> {
    Ok(resolve_color(&style.color)?.mix(style.alpha))
}

fn stroke(style: &StrokeStyle) -> Result<ShapeStyle> {
    let width = style.width.round().max(1.0) as u32;
    Ok(resolve_color(&style.color)?.stroke_width(width))
}

fn text_style(style: &SceneTextStyle) -> Result<TextStyle<'static>> {
    let color = resolve_color(&style.color)?;
    let weight = if style.bold {
        FontStyle::Bold
    } else {
        FontStyle::Normal
    };
    let mut font = FontDesc::new(FontFamily::SansSerif, style.size, weight);
    if style.vertical {
        font = font.transform(FontTransform::Rotate270);
    }

    let h_pos = match style.anchor {
        TextAnchor::Start => HPos::Left,
        TextAnchor::Middle => HPos::Center,
        TextAnchor::End => HPos::Right,
    };
    let v_pos = match style.baseline {
        TextBaseline::Top => VPos::Top,
        TextBaseline::Middle => VPos::Center,
        TextBaseline::Bottom => VPos::Bottom,
    };
    Ok(font.color(&color).pos(Pos::new(h_pos, v_pos)))
}

fn resolve_color(color: &str) -> Result<RGBColor> {
    parse_color(color).ok_or_else(|| anyhow!("Unknown color '{}'", color))
}

/// Parse a color string into RGBColor, supporting hex (#RRGGBB, #RGB) and
/// the named colors the charts use
pub fn parse_color(color_str: &str) -> Option<RGBColor> {
    let color_str = color_str.trim();

    if color_str.starts_with('#') {
        return parse_hex_color(color_str);
    }

    match color_str.to_lowercase().as_str() {
        "white" => Some(RGBColor(255, 255, 255)),
        "black" => Some(RGBColor(0, 0, 0)),
        "steelblue" => Some(RGBColor(70, 130, 180)),
        "orange" => Some(RGBColor(255, 165, 0)),
        "gray" | "grey" => Some(RGBColor(128, 128, 128)),
        _ => None,
    }
}

/// Parse hex color (#RRGGBB or #RGB)
fn parse_hex_color(hex: &str) -> Option<RGBColor> {
    let hex = hex.trim_start_matches('#');
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(RGBColor(r, g, b))
        }
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(RGBColor(r, g, b))
        }
        _ => None,
    }
}
