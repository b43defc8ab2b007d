use proptest::prelude::*;
use traygauge::gauge::{percent_color, sweep_degrees, GaugeGeometry, GaugeLayout};

proptest! {
    #[test]
    fn color_matches_formula(percent in 0u8..=100) {
        let color = percent_color(percent);
        let expected_red = (2.55 * percent as f64).round() as i32;
        prop_assert!((color.r as i32 - expected_red).abs() <= 1);
        prop_assert_eq!(color.g as i32, 255 - color.r as i32);
        prop_assert_eq!(color.b, 0);
        prop_assert_eq!(color.a, 150);
    }

    #[test]
    fn red_rises_green_falls(percent in 0u8..100) {
        let lo = percent_color(percent);
        let hi = percent_color(percent + 1);
        prop_assert!(hi.r >= lo.r);
        prop_assert!(hi.g <= lo.g);
    }

    #[test]
    fn sweep_is_proportional(percent in 0u8..=100) {
        let sweep = sweep_degrees(percent);
        prop_assert!((sweep - 3.6 * percent as f32).abs() < 1e-3);
    }

    #[test]
    fn circles_fit_inside_window(width in 200.0f32..1000.0, height in 120.0f32..600.0) {
        let layout = GaugeLayout::compute(egui::vec2(width, height), &GaugeGeometry::default());
        prop_assert!(layout.circles[0].min.x >= 0.0);
        prop_assert!(layout.circles[1].max.x <= width + 1e-3);
        prop_assert!(layout.circles[0].max.x <= layout.circles[1].min.x);
        prop_assert!(layout.labels[0].max.y <= height + 1e-3);
    }
}
