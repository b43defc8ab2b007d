//! Gauge geometry, coloring and scene construction.
//!
//! Everything here is pure: [`GaugeRenderer::scene`] turns a usage snapshot,
//! a window size and a theme into a list of [`Primitive`]s. The
//! [`paint`](crate::paint) module is the only place that talks to egui's painter.

use egui::{pos2, vec2, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::stats::UsageSnapshot;
use crate::theme::Theme;

/// Alpha applied to every value-derived stroke.
pub const GAUGE_ALPHA: u8 = 150;
pub const VALUE_FONT_SIZE: f32 = 16.0;
pub const LABEL_FONT_SIZE: f32 = 13.0;

/// Straight (non-premultiplied) RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GaugeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl GaugeColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Scales alpha by `opacity` in `0.0..=1.0`.
    pub fn faded(self, opacity: f32) -> Self {
        let opacity = opacity.clamp(0.0, 1.0);
        Self {
            a: (self.a as f32 * opacity).round() as u8,
            ..self
        }
    }

    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }
}

/// Green at 0%, red at 100%, linear in between.
///
/// `red = round(2.55 * percent)`, computed in integers so halves round up.
pub fn percent_color(percent: u8) -> GaugeColor {
    let percent = u32::from(percent.min(100));
    let red = ((255 * percent + 50) / 100) as u8;
    GaugeColor::new(red, 255 - red, 0, GAUGE_ALPHA)
}

/// Arc length in degrees for a percentage.
pub fn sweep_degrees(percent: u8) -> f32 {
    360.0 * percent.min(100) as f32 / 100.0
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GaugeStyle {
    /// Whole circle stroked in the value color.
    #[default]
    Ring,
    /// Neutral track with a clockwise value arc from 12 o'clock.
    Arc,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeGeometry {
    pub diameter: f32,
    pub stroke_width: f32,
    pub label_height: f32,
    pub label_padding: f32,
}

impl Default for GaugeGeometry {
    fn default() -> Self {
        Self {
            diameter: 80.0,
            stroke_width: 4.0,
            label_height: 20.0,
            label_padding: 10.0,
        }
    }
}

/// Where the two gauges and their labels sit inside the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeLayout {
    pub gap: f32,
    pub top: f32,
    pub circles: [Rect; 2],
    pub labels: [Rect; 2],
}

impl GaugeLayout {
    /// Two circles with equal left, middle and right margins, vertically
    /// centred together with the label below each one.
    pub fn compute(window: Vec2, geometry: &GaugeGeometry) -> Self {
        let d = geometry.diameter;
        let top = (window.y - (d + geometry.label_padding + geometry.label_height)) / 2.0;
        let gap = (window.x - 2.0 * d) / 3.0;
        let xs = [gap, 2.0 * gap + d];

        let circles = xs.map(|x| Rect::from_min_size(pos2(x, top), vec2(d, d)));
        let labels = xs.map(|x| {
            Rect::from_min_size(
                pos2(x, top + d + geometry.label_padding),
                vec2(d, geometry.label_height),
            )
        });

        Self {
            gap,
            top,
            circles,
            labels,
        }
    }
}

/// One drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Fill {
        rect: Rect,
        color: GaugeColor,
    },
    Circle {
        center: Pos2,
        radius: f32,
        width: f32,
        color: GaugeColor,
    },
    /// Clockwise from 12 o'clock.
    Arc {
        center: Pos2,
        radius: f32,
        sweep_degrees: f32,
        width: f32,
        color: GaugeColor,
    },
    Text {
        rect: Rect,
        text: String,
        size: f32,
        color: GaugeColor,
    },
}

impl Primitive {
    pub fn color(&self) -> GaugeColor {
        match self {
            Primitive::Fill { color, .. }
            | Primitive::Circle { color, .. }
            | Primitive::Arc { color, .. }
            | Primitive::Text { color, .. } => *color,
        }
    }

    fn color_mut(&mut self) -> &mut GaugeColor {
        match self {
            Primitive::Fill { color, .. }
            | Primitive::Circle { color, .. }
            | Primitive::Arc { color, .. }
            | Primitive::Text { color, .. } => color,
        }
    }
}

/// Draws the CPU and RAM gauges for the latest snapshot.
#[derive(Debug, Clone)]
pub struct GaugeRenderer {
    usage: UsageSnapshot,
    style: GaugeStyle,
    geometry: GaugeGeometry,
}

impl GaugeRenderer {
    pub fn new(style: GaugeStyle, geometry: GaugeGeometry) -> Self {
        Self {
            usage: UsageSnapshot::default(),
            style,
            geometry,
        }
    }

    pub fn set_values(&mut self, usage: UsageSnapshot) {
        self.usage = usage;
    }

    pub fn usage(&self) -> UsageSnapshot {
        self.usage
    }

    /// Builds the full frame. `opacity` fades everything in while the popup appears.
    pub fn scene(&self, window: Vec2, theme: Theme, opacity: f32) -> Vec<Primitive> {
        let palette = theme.palette();
        let layout = GaugeLayout::compute(window, &self.geometry);

        let mut scene = vec![Primitive::Fill {
            rect: Rect::from_min_size(Pos2::ZERO, window),
            color: palette.background,
        }];

        let gauges = [
            (self.usage.cpu_percent, "CPU"),
            (self.usage.ram_percent, "RAM"),
        ];
        for (i, (percent, label)) in gauges.into_iter().enumerate() {
            let circle = layout.circles[i];
            let center = circle.center();
            let radius = self.geometry.diameter / 2.0;
            let width = self.geometry.stroke_width;
            let color = percent_color(percent);

            match self.style {
                GaugeStyle::Ring => scene.push(Primitive::Circle {
                    center,
                    radius,
                    width,
                    color,
                }),
                GaugeStyle::Arc => {
                    scene.push(Primitive::Circle {
                        center,
                        radius,
                        width,
                        color: palette.track,
                    });
                    scene.push(Primitive::Arc {
                        center,
                        radius,
                        sweep_degrees: sweep_degrees(percent),
                        width,
                        color,
                    });
                }
            }

            scene.push(Primitive::Text {
                rect: circle,
                text: format!("{percent}%"),
                size: VALUE_FONT_SIZE,
                color: palette.text,
            });
            scene.push(Primitive::Text {
                rect: layout.labels[i],
                text: label.to_string(),
                size: LABEL_FONT_SIZE,
                color: palette.text,
            });
        }

        if opacity < 1.0 {
            for primitive in &mut scene {
                let color = primitive.color_mut();
                *color = color.faded(opacity);
            }
        }
        scene
    }
}

/// Points along a clockwise arc starting at 12 o'clock, in screen coordinates.
pub fn arc_points(center: Pos2, radius: f32, sweep_degrees: f32) -> Vec<Pos2> {
    let sweep = sweep_degrees.clamp(0.0, 360.0);
    if sweep <= 0.0 {
        return Vec::new();
    }
    // Roughly one segment per 4 degrees keeps an 80px ring smooth.
    let segments = (sweep / 4.0).ceil().max(1.0) as usize;
    (0..=segments)
        .map(|i| {
            let angle = (sweep * i as f32 / segments as f32).to_radians();
            pos2(
                center.x + radius * angle.sin(),
                center.y - radius * angle.cos(),
            )
        })
        .collect()
}
