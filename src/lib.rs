// Library surface for the binary and for headless/integration tests.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod language;
pub mod render;
pub mod runtime;
pub mod session;
pub mod stats;
pub mod ui;
pub mod util;
