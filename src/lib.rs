//! A tray utility that shows CPU and RAM usage as two ring gauges in a
//! small popup.

pub mod app;
pub mod config;
pub mod events;
pub mod gauge;
pub mod logging;
pub mod monitor;
pub mod paint;
pub mod scheduler;
pub mod stats;
pub mod theme;
pub mod tray;
pub mod tray_host;
