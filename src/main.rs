use eframe::egui;
use touchline::app::BoardApp;
use touchline::logging;
use touchline::settings::Settings;

fn main() -> anyhow::Result<()> {
    let settings = Settings::load("touchline.json")?;
    logging::init(settings.debug_logging);

    let (width, height) = settings.window_size.unwrap_or((960.0, 640.0));
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width, height])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Touchline",
        native_options,
        Box::new(move |_cc| Box::new(BoardApp::new(settings))),
    )
    .map_err(|e| anyhow::anyhow!("eframe failed: {e}"))?;

    Ok(())
}
