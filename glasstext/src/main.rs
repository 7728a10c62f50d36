//! GlassText - an always-on-top glass note overlay with line numbers

mod app;
mod editor;

use app::GlassTextApp;
use eframe::NativeOptions;
use glasscore::{GlassConfig, GlassTheme, APP_DISPLAY_NAME, APP_NAME};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_env("GLASSTEXT_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> eframe::Result<()> {
    init_logging();
    let config = GlassConfig::load();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting {}", APP_NAME);

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([config.window.width, config.window.height])
        .with_min_inner_size([320.0, 240.0])
        .with_title(APP_DISPLAY_NAME)
        .with_app_id(APP_NAME)
        .with_decorations(false)
        .with_transparent(true);
    if config.window.always_on_top {
        viewport = viewport.with_always_on_top();
    }
    if config.privacy.hide_from_switcher {
        viewport = viewport.with_taskbar(false);
    }

    let options = NativeOptions {
        viewport,
        centered: true,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            GlassTheme::default()
                .with_editor_font_size(config.editor.font_size)
                .apply(&cc.egui_ctx);
            Box::new(GlassTextApp::new(cc, config))
        }),
    )
}
