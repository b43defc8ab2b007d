use std::sync::mpsc::{self, Receiver};
use std::time::Instant;

use egui::{Pos2, Vec2, ViewportCommand};

use crate::config::AppConfig;
use crate::events::{self, AppEvent};
use crate::monitor::Monitor;
use crate::paint::paint_scene;
use crate::stats::{Stats, UsageSnapshot};
use crate::theme::SystemTheme;
use crate::tray::{PopupWindow, TrayInput};
use crate::tray_host::TrayHost;

/// Where the popup waits while closed.
///
/// The window is never made invisible: winit stops redrawing invisible
/// windows on some platforms, and `update` is what drains tray events and
/// ticks the tooltip.
pub const PARKED_POSITION: Pos2 = Pos2::new(-32000.0, -32000.0);

fn show_commands(position: Pos2) -> [ViewportCommand; 2] {
    [ViewportCommand::OuterPosition(position), ViewportCommand::Focus]
}

fn hide_commands() -> [ViewportCommand; 1] {
    [ViewportCommand::OuterPosition(PARKED_POSITION)]
}

/// What to do about a close request from the window manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CloseAction {
    /// Cancel the close and hide the popup; the tray can bring it back.
    Dismiss,
    /// Let the close go through.
    Exit,
}

fn close_action(close_requested: bool, has_tray: bool, exiting: bool) -> Option<CloseAction> {
    if !close_requested || exiting {
        return None;
    }
    Some(if has_tray {
        CloseAction::Dismiss
    } else {
        CloseAction::Exit
    })
}

/// Turns a change in the viewport's focus into a tray input.
///
/// Without a tray nothing could reopen a hidden popup, so focus is ignored.
fn focus_input(has_tray: bool, previous: Option<bool>, current: Option<bool>) -> Option<TrayInput> {
    if !has_tray {
        return None;
    }
    match (previous, current) {
        (Some(true), Some(false)) => Some(TrayInput::FocusLost),
        (Some(false) | None, Some(true)) => Some(TrayInput::FocusGained),
        _ => None,
    }
}

/// Drives the root viewport as the popup.
struct Viewport<'a> {
    ctx: &'a egui::Context,
}

impl Viewport<'_> {
    fn send(&self, commands: impl IntoIterator<Item = ViewportCommand>) {
        for command in commands {
            self.ctx.send_viewport_cmd(command);
        }
    }
}

impl PopupWindow for Viewport<'_> {
    fn show_at(&mut self, position: Pos2) {
        self.send(show_commands(position));
    }

    fn focus(&mut self) {
        self.ctx.send_viewport_cmd(ViewportCommand::Focus);
    }

    fn hide(&mut self) {
        self.send(hide_commands());
    }
}

pub struct TrayGaugeApp {
    monitor: Monitor,
    host: Option<TrayHost>,
    events: Receiver<AppEvent>,
    focused: Option<bool>,
    screen: Option<Vec2>,
    exiting: bool,
}

impl TrayGaugeApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &AppConfig) -> Self {
        let now = Instant::now();
        let (tx, rx) = mpsc::channel();
        let monitor = Monitor::new(config, Box::new(Stats::new()), Box::new(SystemTheme), now);

        let initial_tooltip = UsageSnapshot::default().tooltip();
        let host = TrayHost::new(&cc.egui_ctx, tx, &initial_tooltip).unwrap_or_else(|e| {
            tracing::error!(error = ?e, "tray icon unavailable");
            None
        });

        let mut app = Self {
            monitor,
            host,
            events: rx,
            focused: None,
            screen: None,
            exiting: false,
        };

        // Without a tray there is nothing to click, so open right away.
        if app.host.is_none() {
            app.apply(&cc.egui_ctx, TrayInput::PrimaryClick, now);
        }
        app
    }

    fn apply(&mut self, ctx: &egui::Context, input: TrayInput, now: Instant) {
        let mut viewport = Viewport { ctx };
        self.monitor.handle(input, self.screen, &mut viewport, now);
    }

    fn exit(&mut self, ctx: &egui::Context) {
        tracing::info!("exit requested");
        self.exiting = true;
        ctx.send_viewport_cmd(ViewportCommand::Close);
    }

    fn handle_viewport_input(&mut self, ctx: &egui::Context, now: Instant) {
        let (focused, close_requested, monitor_size) = ctx.input(|i| {
            let viewport = i.viewport();
            (viewport.focused, viewport.close_requested(), viewport.monitor_size)
        });

        if monitor_size.is_some() {
            self.screen = monitor_size;
        }

        let has_tray = self.host.is_some();
        match close_action(close_requested, has_tray, self.exiting) {
            Some(CloseAction::Dismiss) => {
                ctx.send_viewport_cmd(ViewportCommand::CancelClose);
                self.apply(ctx, TrayInput::Dismiss, now);
            }
            Some(CloseAction::Exit) => self.exiting = true,
            None => {}
        }

        let previous = std::mem::replace(&mut self.focused, focused);
        if let Some(input) = focus_input(has_tray, previous, focused) {
            self.apply(ctx, input, now);
        }
    }
}

impl eframe::App for TrayGaugeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        for event in events::drain(&self.events) {
            match event {
                AppEvent::TrayClick => self.apply(ctx, TrayInput::PrimaryClick, now),
                AppEvent::Exit => self.exit(ctx),
            }
        }

        self.handle_viewport_input(ctx, now);

        if let Some(usage) = self.monitor.tick(now) {
            if let Some(host) = &self.host {
                host.set_tooltip(&usage.tooltip());
            }
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                if let Some(scene) = self.monitor.frame(rect.size(), now) {
                    paint_scene(ui.painter(), rect.min.to_vec2(), &scene);
                }
            });

        ctx.request_repaint_after(self.monitor.next_wake(now));
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        [0.0, 0.0, 0.0, 0.0]
    }
}
