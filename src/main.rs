// Hide console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! Mdpad - Main Entry Point
//!
//! A single-document Markdown and text editor that never loses unsaved work
//! silently. Built with Rust and egui.

mod app;
mod config;
mod document;
mod error;
mod files;
mod lifecycle;
mod ui;

use app::MdpadApp;
use clap::Parser;
use config::load_config;
use log::info;
use std::path::PathBuf;

/// Application name constant.
pub const APP_NAME: &str = "Mdpad";

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "mdpad", version, about)]
struct Cli {
    /// Markdown or text file to open on startup
    file: Option<PathBuf>,
}

impl Cli {
    /// The startup file as an absolute path, so the title and later saves
    /// don't depend on the working directory.
    fn startup_file(&self) -> Option<PathBuf> {
        self.file
            .as_ref()
            .map(|file| std::path::absolute(file).unwrap_or_else(|_| file.clone()))
    }
}

fn main() -> eframe::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting {}", APP_NAME);

    let settings = load_config();
    let window_size = settings.window_size;

    info!(
        "Window configuration: {}x{}, maximized: {}",
        window_size.width, window_size.height, window_size.maximized
    );

    let mut viewport = eframe::egui::ViewportBuilder::default()
        .with_title(APP_NAME)
        .with_inner_size([window_size.width, window_size.height])
        .with_min_inner_size([400.0, 300.0]);

    if let (Some(x), Some(y)) = (window_size.x, window_size.y) {
        viewport = viewport.with_position([x, y]);
    }
    if window_size.maximized {
        viewport = viewport.with_maximized(true);
    }

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let startup_file = cli.startup_file();

    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(move |cc| Ok(Box::new(MdpadApp::new(cc, settings, startup_file)))),
    )
}
