use eframe::egui;
use verbdrill::{
    gui::{
        settings::SettingsData,
        VerbDrillApp,
    },
    persistence::load_json_or_default,
};

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("verbdrill=info"))
        .init();

    let settings = load_json_or_default::<SettingsData>("settings.json");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Verb Drill")
            .with_inner_size([760.0, 640.0])
            .with_min_inner_size([480.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Verb Drill",
        options,
        Box::new(|cc| Ok(Box::new(VerbDrillApp::new(cc, settings)?))),
    )
}
