// Axis layout shared by the cartesian charts

use crate::ir::{DrawCommand, Scene, StrokeStyle, TextAnchor, TextBaseline, TextStyle};
use crate::scale::{format_tick, BandScale, LinearScale};

const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;
const TICK_COUNT: usize = 10;

fn axis_stroke() -> StrokeStyle {
    StrokeStyle {
        color: "black".to_string(),
        width: 1.0,
    }
}

/// Default tick label style for a bottom axis
pub fn bottom_tick_style() -> TextStyle {
    TextStyle::new(10.0, "black")
        .anchor(TextAnchor::Middle)
        .baseline(TextBaseline::Top)
}

/// Default tick label style for a left axis
pub fn left_tick_style() -> TextStyle {
    TextStyle::new(10.0, "black")
        .anchor(TextAnchor::End)
        .baseline(TextBaseline::Middle)
}

/// Bottom axis with one tick per category, centered in its band.
/// `origin` is where the range starts on the canvas; `extent` is the range.
pub fn bottom(
    scene: &mut Scene,
    scale: &BandScale,
    origin: (f64, f64),
    extent: (f64, f64),
    label_style: TextStyle,
) {
    let (ox, oy) = origin;
    scene.push(DrawCommand::Path {
        points: vec![
            (ox + extent.0, oy + TICK_SIZE),
            (ox + extent.0, oy),
            (ox + extent.1, oy),
            (ox + extent.1, oy + TICK_SIZE),
        ],
        style: axis_stroke(),
    });

    for category in scale.categories() {
        let Some(center) = scale.center(category) else {
            continue;
        };
        let x = ox + center;
        scene.push(DrawCommand::Path {
            points: vec![(x, oy), (x, oy + TICK_SIZE)],
            style: axis_stroke(),
        });
        scene.push(DrawCommand::Text {
            pos: (x, oy + TICK_SIZE + TICK_PADDING),
            content: category.clone(),
            style: label_style.clone(),
        });
    }
}

/// Left axis with nice ticks over the scale's domain
pub fn left(scene: &mut Scene, scale: &LinearScale, origin: (f64, f64), label_style: TextStyle) {
    let (ox, oy) = origin;
    let (r0, r1) = scale.range;
    scene.push(DrawCommand::Path {
        points: vec![
            (ox - TICK_SIZE, oy + r0),
            (ox, oy + r0),
            (ox, oy + r1),
            (ox - TICK_SIZE, oy + r1),
        ],
        style: axis_stroke(),
    });

    let precision = scale.tick_precision(TICK_COUNT);
    for tick in scale.ticks(TICK_COUNT) {
        let y = oy + scale.apply(tick);
        scene.push(DrawCommand::Path {
            points: vec![(ox - TICK_SIZE, y), (ox, y)],
            style: axis_stroke(),
        });
        scene.push(DrawCommand::Text {
            pos: (ox - TICK_SIZE - TICK_PADDING, y),
            content: format_tick(tick, precision),
            style: label_style.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(scene: &Scene) -> Vec<String> {
        scene
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { content, .. } => Some(content.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_bottom_axis_one_tick_per_category() {
        let mut scene = Scene::new(200, 100);
        let scale = BandScale::band(["x", "y", "z"], (0.0, 150.0), 0.2);
        bottom(&mut scene, &scale, (10.0, 80.0), (0.0, 150.0), bottom_tick_style());
        assert_eq!(texts(&scene), vec!["x", "y", "z"]);
        // domain line + (tick line + label) per category
        assert_eq!(scene.commands.len(), 1 + 3 * 2);
    }

    #[test]
    fn test_left_axis_tick_labels() {
        let mut scene = Scene::new(200, 100);
        let scale = LinearScale::new((0.0, 10.0), (80.0, 0.0));
        left(&mut scene, &scale, (30.0, 10.0), left_tick_style());
        let labels = texts(&scene);
        assert_eq!(labels.first().map(String::as_str), Some("0"));
        assert_eq!(labels.last().map(String::as_str), Some("10"));
        assert_eq!(labels.len(), 11);
    }

    #[test]
    fn test_left_axis_tick_positions() {
        let mut scene = Scene::new(200, 100);
        let scale = LinearScale::new((0.0, 10.0), (80.0, 0.0));
        left(&mut scene, &scale, (30.0, 10.0), left_tick_style());
        let top_label = scene.commands.iter().rev().find_map(|c| match c {
            DrawCommand::Text { pos, .. } => Some(*pos),
            _ => None,
        });
        assert_eq!(top_label, Some((21.0, 10.0)));
    }
}
