//! glasscore — shared library for the GlassText overlay
//!
//! Everything here is plain state and egui drawing helpers; the window
//! itself lives in the `glasstext` binary.

pub mod config;
pub mod drag;
pub mod gutter;
pub mod keys;
pub mod platform;
pub mod theme;
pub mod viewport;
pub mod visibility;
pub mod widgets;

pub use config::GlassConfig;
pub use gutter::LineNumberGutter;
pub use theme::GlassTheme;
pub use viewport::TextViewport;

/// Application name, used for the window id and the config directory.
pub const APP_NAME: &str = "GlassText";

/// Title shown by the window system.
pub const APP_DISPLAY_NAME: &str = "GlassText - Professional Note Taking";
