use anyhow::anyhow;
use traygauge::app::{TrayGaugeApp, PARKED_POSITION};
use traygauge::config::AppConfig;
use traygauge::logging;

fn main() -> anyhow::Result<()> {
    let loaded = AppConfig::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();
    logging::init(&config.log_level);
    if let Err(e) = &loaded {
        tracing::warn!(error = ?e, "ignoring config file, using defaults");
    }
    tracing::info!(
        interval_ms = config.tick_interval_ms,
        style = ?config.gauge.style,
        "starting traygauge"
    );

    let size = config.window_size();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("traygauge")
            .with_inner_size(size)
            .with_resizable(false)
            .with_decorations(false)
            .with_always_on_top()
            .with_taskbar(false)
            .with_transparent(true)
            .with_position(PARKED_POSITION)
            .with_visible(true),
        ..Default::default()
    };

    eframe::run_native(
        "traygauge",
        options,
        Box::new(move |cc| Box::new(TrayGaugeApp::new(cc, &config))),
    )
    .map_err(|e| anyhow!("event loop failed: {e}"))?;

    tracing::info!("traygauge stopped");
    Ok(())
}
