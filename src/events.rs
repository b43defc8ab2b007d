use std::sync::mpsc::Receiver;

/// Events forwarded from the tray host to the UI thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Primary-button click on the tray icon.
    TrayClick,
    /// "Exit" chosen from the tray menu.
    Exit,
}

/// Drains everything currently queued without blocking.
pub fn drain(rx: &Receiver<AppEvent>) -> Vec<AppEvent> {
    rx.try_iter().collect()
}
