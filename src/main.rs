use shona_daily::ChallengeApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([760.0, 680.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Shona Daily Challenge",
        options,
        Box::new(|_cc| Ok(Box::new(ChallengeApp::new()))),
    )
}
