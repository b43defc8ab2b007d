//! Popup visibility as a small state machine driven by tray clicks and
//! focus changes.

use egui::{pos2, Pos2, Vec2};

use crate::gauge::{GaugeGeometry, GaugeRenderer, GaugeStyle};
use crate::stats::UsageSnapshot;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrayState {
    #[default]
    Hidden,
    VisibleUnfocused,
    VisibleFocused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayInput {
    PrimaryClick,
    FocusLost,
    FocusGained,
    /// The window was asked to close; the popup only hides.
    Dismiss,
}

/// What the window has to do to follow a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Show,
    Focus,
    Hide,
    Stay,
}

impl TrayState {
    pub fn next(self, input: TrayInput) -> (TrayState, Transition) {
        use TrayInput::*;
        use TrayState::*;

        match (self, input) {
            (Hidden, PrimaryClick) => (VisibleFocused, Transition::Show),
            (VisibleFocused, PrimaryClick) => (Hidden, Transition::Hide),
            (VisibleUnfocused, PrimaryClick) => (VisibleFocused, Transition::Focus),
            (VisibleFocused | VisibleUnfocused, FocusLost | Dismiss) => (Hidden, Transition::Hide),
            (VisibleUnfocused, FocusGained) => (VisibleFocused, Transition::Stay),
            (state, _) => (state, Transition::Stay),
        }
    }

    pub fn is_visible(self) -> bool {
        self != TrayState::Hidden
    }
}

/// Window operations the controller issues.
pub trait PopupWindow {
    fn show_at(&mut self, position: Pos2);
    fn focus(&mut self);
    fn hide(&mut self);
}

/// Top-left position that puts the popup flush with the screen's bottom-right corner.
pub fn bottom_right(screen: Option<Vec2>, window: Vec2) -> Pos2 {
    match screen {
        Some(screen) => pos2((screen.x - window.x).max(0.0), (screen.y - window.y).max(0.0)),
        None => Pos2::ZERO,
    }
}

/// Owns the popup's state and, once it has been shown, its renderer.
pub struct TrayController {
    state: TrayState,
    renderer: Option<GaugeRenderer>,
    window_size: Vec2,
    style: GaugeStyle,
    geometry: GaugeGeometry,
    last_usage: UsageSnapshot,
}

impl TrayController {
    pub fn new(window_size: Vec2, style: GaugeStyle, geometry: GaugeGeometry) -> Self {
        Self {
            state: TrayState::Hidden,
            renderer: None,
            window_size,
            style,
            geometry,
            last_usage: UsageSnapshot::default(),
        }
    }

    pub fn state(&self) -> TrayState {
        self.state
    }

    pub fn renderer(&self) -> Option<&GaugeRenderer> {
        self.renderer.as_ref()
    }

    /// Forwards a new reading to the renderer, if one exists yet.
    pub fn update_usage(&mut self, usage: UsageSnapshot) {
        self.last_usage = usage;
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.set_values(usage);
        }
    }

    /// Applies one input, issuing the matching window operation.
    pub fn handle(
        &mut self,
        input: TrayInput,
        screen: Option<Vec2>,
        window: &mut dyn PopupWindow,
    ) -> Transition {
        let (next, transition) = self.state.next(input);
        tracing::debug!(from = ?self.state, to = ?next, ?input, "tray transition");
        self.state = next;

        match transition {
            Transition::Show => {
                let last_usage = self.last_usage;
                let (style, geometry) = (self.style, self.geometry);
                self.renderer.get_or_insert_with(|| {
                    let mut renderer = GaugeRenderer::new(style, geometry);
                    renderer.set_values(last_usage);
                    renderer
                });
                window.show_at(bottom_right(screen, self.window_size));
            }
            Transition::Focus => window.focus(),
            Transition::Hide => window.hide(),
            Transition::Stay => {}
        }
        transition
    }
}
