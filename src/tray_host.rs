//! The OS tray icon: tooltip, "Exit" menu and click forwarding.
//!
//! Linux desktops need a running GTK loop for `tray-icon`, which eframe does
//! not provide, so there the host is absent and the popup stays open instead.

pub const ICON_SIZE: u32 = 32;
const ICON_RING: [u8; 4] = [0, 200, 83, 255];

/// RGBA pixels of a ring-shaped tray icon.
pub fn ring_icon_rgba(size: u32) -> Vec<u8> {
    let mut rgba = vec![0u8; (size * size * 4) as usize];
    let center = size as f32 / 2.0;
    let outer = center - 1.0;
    let inner = outer - (size as f32 / 6.0).max(1.0);

    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 + 0.5 - center;
            let dy = y as f32 + 0.5 - center;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist <= outer && dist >= inner {
                let idx = ((y * size + x) * 4) as usize;
                rgba[idx..idx + 4].copy_from_slice(&ICON_RING);
            }
        }
    }
    rgba
}

#[cfg(not(target_os = "linux"))]
mod platform {
    use std::sync::mpsc::Sender;

    use anyhow::Context as _;
    use tray_icon::menu::{Menu, MenuEvent, MenuItem};
    use tray_icon::{Icon, MouseButton, MouseButtonState, TrayIcon, TrayIconBuilder, TrayIconEvent};

    use super::{ring_icon_rgba, ICON_SIZE};
    use crate::events::AppEvent;

    pub struct TrayHost {
        icon: TrayIcon,
    }

    pub(super) fn is_primary_click(button: MouseButton, state: MouseButtonState) -> bool {
        button == MouseButton::Left && state == MouseButtonState::Up
    }

    impl TrayHost {
        pub fn new(
            ctx: &egui::Context,
            events: Sender<AppEvent>,
            tooltip: &str,
        ) -> anyhow::Result<Option<Self>> {
            let menu = Menu::new();
            let exit = MenuItem::new("Exit", true, None);
            menu.append(&exit).context("failed to build tray menu")?;

            let icon = Icon::from_rgba(ring_icon_rgba(ICON_SIZE), ICON_SIZE, ICON_SIZE)
                .context("failed to build tray icon image")?;

            let icon = TrayIconBuilder::new()
                .with_menu(Box::new(menu))
                .with_menu_on_left_click(false)
                .with_tooltip(tooltip)
                .with_icon(icon)
                .build()
                .context("failed to create tray icon")?;

            let exit_id = exit.id().clone();
            let menu_tx = events.clone();
            let menu_ctx = ctx.clone();
            MenuEvent::set_event_handler(Some(move |event: MenuEvent| {
                if event.id == exit_id {
                    let _ = menu_tx.send(AppEvent::Exit);
                    menu_ctx.request_repaint();
                }
            }));

            let click_ctx = ctx.clone();
            TrayIconEvent::set_event_handler(Some(move |event: TrayIconEvent| {
                if let TrayIconEvent::Click {
                    button,
                    button_state,
                    ..
                } = event
                {
                    if is_primary_click(button, button_state) {
                        let _ = events.send(AppEvent::TrayClick);
                        click_ctx.request_repaint();
                    }
                }
            }));

            tracing::info!("tray icon created");
            Ok(Some(Self { icon }))
        }

        pub fn set_tooltip(&self, text: &str) {
            if let Err(e) = self.icon.set_tooltip(Some(text)) {
                tracing::warn!(error = %e, "failed to update tray tooltip");
            }
        }
    }
}

#[cfg(target_os = "linux")]
mod platform {
    use std::sync::mpsc::Sender;

    use crate::events::AppEvent;

    pub struct TrayHost;

    impl TrayHost {
        pub fn new(
            _ctx: &egui::Context,
            _events: Sender<AppEvent>,
            _tooltip: &str,
        ) -> anyhow::Result<Option<Self>> {
            tracing::info!("no system tray on this platform, keeping the popup open");
            Ok(None)
        }

        pub fn set_tooltip(&self, _text: &str) {}
    }
}

pub use platform::TrayHost;
