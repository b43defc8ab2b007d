use egui::{Align2, FontId, Painter, Shape, Stroke, Vec2};

use crate::gauge::{arc_points, Primitive};

/// Replays a gauge scene onto an egui painter, offset to `origin`.
pub fn paint_scene(painter: &Painter, origin: Vec2, scene: &[Primitive]) {
    for primitive in scene {
        match primitive {
            Primitive::Fill { rect, color } => {
                painter.rect_filled(rect.translate(origin), 0.0, color.to_color32());
            }
            Primitive::Circle {
                center,
                radius,
                width,
                color,
            } => {
                painter.circle_stroke(
                    *center + origin,
                    *radius,
                    Stroke::new(*width, color.to_color32()),
                );
            }
            Primitive::Arc {
                center,
                radius,
                sweep_degrees,
                width,
                color,
            } => {
                let points = arc_points(*center + origin, *radius, *sweep_degrees);
                if points.len() >= 2 {
                    painter.add(Shape::line(points, Stroke::new(*width, color.to_color32())));
                }
            }
            Primitive::Text {
                rect,
                text,
                size,
                color,
            } => {
                painter.text(
                    rect.translate(origin).center(),
                    Align2::CENTER_CENTER,
                    text,
                    FontId::proportional(*size),
                    color.to_color32(),
                );
            }
        }
    }
}
