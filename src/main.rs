mod app;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("X100V Film Simulation"),
        ..Default::default()
    };

    eframe::run_native(
        "X100V Film Simulation",
        options,
        Box::new(|cc| Ok(Box::new(app::FilmSimApp::new(cc)))),
    )
}
