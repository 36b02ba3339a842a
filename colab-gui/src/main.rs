//! Co-Lab GUI Application
//!
//! Desktop shell for the Co-Lab collaborative AI workspace.

mod app;
mod ui;

use eframe::egui;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("colab=debug".parse().expect("valid directive"))
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting Co-Lab v{}", colab_core::VERSION);

    // Simulators and the file dialog spawn onto this runtime.
    let runtime = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([colab_core::config::MIN_CONTAINER_WIDTH, 520.0])
            .with_title("Co-Lab"),
        ..Default::default()
    };

    eframe::run_native(
        "Co-Lab",
        options,
        Box::new(|cc| Ok(Box::new(app::CoLabApp::new(cc, runtime)))),
    )
}
