//! Application entry point for the Rose Day card.
//!
//! This binary sets up logging, the async runtime used for message
//! generation and eframe/egui, then delegates all interactive logic and
//! rendering to [`Viewer`] from the `viewer` module.

mod viewer;

use std::sync::Arc;

use anyhow::Context;
use rose_core::{
    config::GeneratorConfig,
    generator::{GeminiClient, TextGenerator},
};
use tracing_subscriber::EnvFilter;
use viewer::Viewer;

/// Starts the native eframe application.
///
/// Logging defaults to `info` and honours `RUST_LOG`. The text-generation
/// client is configured from the environment (see
/// [`GeneratorConfig::from_env`]); a missing `API_KEY` only disables
/// regeneration in practice, the card itself still opens.
///
/// ### Returns
/// - `Ok(())` if the window runs to completion without errors.
/// - `Err` if configuration is invalid, the runtime cannot start, or
///   eframe fails to create the native window or event loop.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;

    let cfg = GeneratorConfig::from_env()?;
    if cfg.api_key.is_empty() {
        tracing::warn!("{} is not set; new messages cannot be generated", GeneratorConfig::API_KEY_VAR);
    }
    let generator: Arc<dyn TextGenerator> = Arc::new(GeminiClient::new(cfg).context("failed to build HTTP client")?);
    let handle = runtime.handle().clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Happy Rose Day")
            .with_inner_size([1100.0, 820.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Happy Rose Day",
        options,
        Box::new(move |_cc| {
            // Construct the root app state for the card.
            Ok(Box::new(Viewer::new(handle, generator)))
        }),
    )
    .map_err(|err| anyhow::anyhow!("window failed: {err}"))
}
