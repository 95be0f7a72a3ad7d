mod bridge;
mod clock;
mod error;
mod models;
mod network;
mod random;
mod scanner;
mod speedtest;
mod ui;

use anyhow::Result;
use eframe::egui;

fn main() -> Result<()> {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()?;

    // The simulators run on tokio timers; keep a runtime entered for the
    // lifetime of the UI so spawns from the frame loop land on its workers.
    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1080.0, 650.0])
            .with_title("NetScout"),
        ..Default::default()
    };

    eframe::run_native(
        "NetScout",
        options,
        Box::new(|cc| {
            // Force light mode
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Box::new(ui::NetScoutApp::new(cc))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}
