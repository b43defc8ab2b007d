//! The tick/click/paint loop, independent of any windowing system.

use std::time::{Duration, Instant};

use egui::Vec2;

use crate::config::AppConfig;
use crate::gauge::Primitive;
use crate::scheduler::TickScheduler;
use crate::stats::{UsageSnapshot, UsageSource};
use crate::theme::{probe_theme, ThemeSource};
use crate::tray::{PopupWindow, Transition, TrayController, TrayInput, TrayState};

/// Repaint interval while the fade-in is running.
const FADE_FRAME: Duration = Duration::from_millis(16);
/// Clicking the tray icon takes focus from the popup before the click itself
/// arrives; a click this soon after a focus-loss hide is that same click.
pub const CLOSING_CLICK_WINDOW: Duration = Duration::from_millis(300);

pub fn fade_opacity(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0)
}

pub struct Monitor {
    source: Box<dyn UsageSource>,
    theme: Box<dyn ThemeSource>,
    ticks: TickScheduler,
    tray: TrayController,
    fade_in: Duration,
    shown_at: Option<Instant>,
    focus_hidden_at: Option<Instant>,
}

impl Monitor {
    pub fn new(
        config: &AppConfig,
        source: Box<dyn UsageSource>,
        theme: Box<dyn ThemeSource>,
        start: Instant,
    ) -> Self {
        Self {
            source,
            theme,
            ticks: TickScheduler::new(config.tick_interval(), start),
            tray: TrayController::new(
                config.window_size(),
                config.gauge.style,
                config.gauge.geometry(),
            ),
            fade_in: config.fade_in(),
            shown_at: None,
            focus_hidden_at: None,
        }
    }

    pub fn state(&self) -> TrayState {
        self.tray.state()
    }

    pub fn tray(&self) -> &TrayController {
        &self.tray
    }

    /// Samples usage if a tick is due, returning the new snapshot.
    ///
    /// The caller pushes `snapshot.tooltip()` to the tray whether or not the
    /// popup has ever been shown.
    pub fn tick(&mut self, now: Instant) -> Option<UsageSnapshot> {
        if !self.ticks.poll(now) {
            return None;
        }
        let usage = self.source.sample();
        tracing::debug!(cpu = usage.cpu_percent, ram = usage.ram_percent, "tick");
        self.tray.update_usage(usage);
        Some(usage)
    }

    pub fn handle(
        &mut self,
        input: TrayInput,
        screen: Option<Vec2>,
        window: &mut dyn PopupWindow,
        now: Instant,
    ) -> Transition {
        if input == TrayInput::PrimaryClick {
            if let Some(hidden_at) = self.focus_hidden_at.take() {
                if now.saturating_duration_since(hidden_at) < CLOSING_CLICK_WINDOW {
                    tracing::debug!("click closed the popup through focus loss");
                    return Transition::Stay;
                }
            }
        }

        let transition = self.tray.handle(input, screen, window);
        if input == TrayInput::FocusLost && transition == Transition::Hide {
            self.focus_hidden_at = Some(now);
        }
        match transition {
            Transition::Show => self.shown_at = Some(now),
            Transition::Hide => self.shown_at = None,
            Transition::Focus | Transition::Stay => {}
        }
        transition
    }

    pub fn opacity(&self, now: Instant) -> f32 {
        match self.shown_at {
            Some(shown_at) => fade_opacity(now.saturating_duration_since(shown_at), self.fade_in),
            None => 1.0,
        }
    }

    /// The scene to paint this frame, or `None` while hidden.
    ///
    /// Probes the theme every call.
    pub fn frame(&self, size: Vec2, now: Instant) -> Option<Vec<Primitive>> {
        if !self.tray.state().is_visible() {
            return None;
        }
        let renderer = self.tray.renderer()?;
        let theme = probe_theme(self.theme.as_ref());
        Some(renderer.scene(size, theme, self.opacity(now)))
    }

    /// How long the event loop may sleep before the next useful frame.
    pub fn next_wake(&self, now: Instant) -> Duration {
        let until_tick = self.ticks.remaining(now);
        if self.tray.state().is_visible() && self.opacity(now) < 1.0 {
            until_tick.min(FADE_FRAME)
        } else {
            until_tick
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{Theme, ThemeQueryError};
    use egui::Pos2;

    struct Fixed(UsageSnapshot);

    impl UsageSource for Fixed {
        fn sample(&mut self) -> UsageSnapshot {
            self.0
        }
    }

    struct DarkTheme;

    impl ThemeSource for DarkTheme {
        fn query(&self) -> Result<Theme, ThemeQueryError> {
            Ok(Theme::Dark)
        }
    }

    struct NoWindow;

    impl PopupWindow for NoWindow {
        fn show_at(&mut self, _position: Pos2) {}
        fn focus(&mut self) {}
        fn hide(&mut self) {}
    }

    fn monitor(start: Instant) -> Monitor {
        Monitor::new(
            &AppConfig::default(),
            Box::new(Fixed(UsageSnapshot::new(40, 60))),
            Box::new(DarkTheme),
            start,
        )
    }

    #[test]
    fn fade_curve() {
        let d = Duration::from_millis(500);
        assert_eq!(fade_opacity(Duration::ZERO, d), 0.0);
        assert_eq!(fade_opacity(Duration::from_millis(250), d), 0.5);
        assert_eq!(fade_opacity(Duration::from_secs(3), d), 1.0);
        assert_eq!(fade_opacity(Duration::ZERO, Duration::ZERO), 1.0);
    }

    #[test]
    fn ticks_every_period() {
        let start = Instant::now();
        let mut monitor = monitor(start);
        assert_eq!(monitor.tick(start + Duration::from_millis(500)), None);
        assert_eq!(
            monitor.tick(start + Duration::from_millis(2000)),
            Some(UsageSnapshot::new(40, 60))
        );
        assert_eq!(monitor.tick(start + Duration::from_millis(2500)), None);
    }

    #[test]
    fn hidden_popup_has_no_frame() {
        let start = Instant::now();
        let mut monitor = monitor(start);
        monitor.tick(start + Duration::from_secs(2));
        assert!(monitor.frame(egui::vec2(240.0, 130.0), start).is_none());
    }

    #[test]
    fn shown_popup_fades_in() {
        let start = Instant::now();
        let mut monitor = monitor(start);
        monitor.handle(TrayInput::PrimaryClick, None, &mut NoWindow, start);

        let early = monitor.frame(egui::vec2(240.0, 130.0), start).unwrap();
        assert_eq!(early[0].color().a, 0);
        assert_eq!(monitor.next_wake(start), FADE_FRAME);

        let later = start + Duration::from_secs(1);
        let settled = monitor.frame(egui::vec2(240.0, 130.0), later).unwrap();
        assert_eq!(settled[0].color().a, 255);
        assert_eq!(monitor.next_wake(later), Duration::from_secs(1));
    }

    #[test]
    fn tray_click_that_stole_focus_keeps_popup_closed() {
        let start = Instant::now();
        let mut monitor = monitor(start);
        monitor.handle(TrayInput::PrimaryClick, None, &mut NoWindow, start);

        let blur = start + Duration::from_secs(1);
        monitor.handle(TrayInput::FocusLost, None, &mut NoWindow, blur);
        let click = blur + Duration::from_millis(50);
        let transition = monitor.handle(TrayInput::PrimaryClick, None, &mut NoWindow, click);
        assert_eq!(transition, Transition::Stay);
        assert_eq!(monitor.state(), TrayState::Hidden);

        // Only the one click is absorbed.
        let again = click + Duration::from_millis(50);
        monitor.handle(TrayInput::PrimaryClick, None, &mut NoWindow, again);
        assert_eq!(monitor.state(), TrayState::VisibleFocused);
    }

    #[test]
    fn late_click_after_focus_loss_reopens() {
        let start = Instant::now();
        let mut monitor = monitor(start);
        monitor.handle(TrayInput::PrimaryClick, None, &mut NoWindow, start);
        monitor.handle(TrayInput::FocusLost, None, &mut NoWindow, start);

        let later = start + CLOSING_CLICK_WINDOW + Duration::from_millis(1);
        monitor.handle(TrayInput::PrimaryClick, None, &mut NoWindow, later);
        assert_eq!(monitor.state(), TrayState::VisibleFocused);
    }

    #[test]
    fn hiding_resets_fade() {
        let start = Instant::now();
        let mut monitor = monitor(start);
        monitor.handle(TrayInput::PrimaryClick, None, &mut NoWindow, start);
        monitor.handle(TrayInput::FocusLost, None, &mut NoWindow, start);
        assert_eq!(monitor.state(), TrayState::Hidden);
        assert_eq!(monitor.opacity(start), 1.0);
    }
}
