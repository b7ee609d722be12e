mod bing;
mod cli;
mod common;
mod config;
mod pipeline;
mod store;
mod ui;
mod wallpaper;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use serde_json::json;

use crate::bing::{ArchiveQuery, BingClient};
use crate::cli::{Cli, Commands, ConfigCommands, RunArgs, SourceArgs};
use crate::config::{BingConfig, Overrides};
use crate::ui::prelude::*;
use crate::wallpaper::{DesktopSetter, WallpaperSetter};

fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    ui::init(cli.output, !cli.no_color);
    ui::set_debug_mode(cli.debug);

    match dispatch(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            emit(Level::Error, "bingwall.error", &format!("Error: {e:#}"), None);
            std::process::exit(1);
        }
    }
}

fn dispatch(cli: Cli) -> Result<i32> {
    match cli.command.unwrap_or_else(|| Commands::Run(RunArgs::default())) {
        Commands::Run(args) => handle_run(args),
        Commands::Info(args) => handle_info(args),
        Commands::Config { command } => handle_config(command),
    }
}

fn load_config(overrides: Overrides) -> Result<BingConfig> {
    let config = BingConfig::load().context("loading config")?.apply(overrides);
    emit(
        Level::Debug,
        "config.effective",
        &format!("Using base url {} market {}", config.base_url, config.market),
        None,
    );
    Ok(config)
}

fn handle_run(args: RunArgs) -> Result<i32> {
    let config = load_config(args.into())?;
    let client = BingClient::new(&config.base_url)?;

    let setter = config.set_wallpaper.then(DesktopSetter::detect);
    let outcome = pipeline::run(
        &config,
        &client,
        setter.as_ref().map(|s| s as &dyn WallpaperSetter),
    );
    if let Some(path) = &outcome.path {
        emit(
            Level::Debug,
            "bingwall.done",
            &format!("Wallpaper image: {}", path.display()),
            Some(json!({ "path": path.display().to_string() })),
        );
    }
    Ok(outcome.exit_code)
}

fn handle_info(args: SourceArgs) -> Result<i32> {
    let config = load_config(args.into())?;
    let client = BingClient::new(&config.base_url)?;

    let info = client.fetch_image_info(&ArchiveQuery::now(config.index, &config.market));
    if !info.has_uri() {
        emit(Level::Error, "bing.info.missing_uri", "No image URI found!", None);
        return Ok(1);
    }

    let url = info.image_url(client.base())?;
    let message = match get_output_format() {
        OutputFormat::Text => format!("{}\n{}", info.title.bold(), url.as_str().cyan()),
        OutputFormat::Json => info.title.clone(),
    };
    emit(
        Level::Info,
        "bing.info",
        &message,
        Some(json!({ "uri": info.uri, "title": info.title, "url": url.as_str() })),
    );
    Ok(0)
}

fn handle_config(command: ConfigCommands) -> Result<i32> {
    let path = BingConfig::config_file_path()?;
    match command {
        ConfigCommands::Path => {
            emit(
                Level::Info,
                "config.path",
                &path.display().to_string(),
                Some(json!({ "path": path.display().to_string() })),
            );
        }
        ConfigCommands::Show => {
            let config = BingConfig::load_from(&path)?;
            emit(Level::Info, "config.show", config.to_toml()?.trim_end(), None);
        }
        ConfigCommands::Init => {
            if path.exists() {
                emit(
                    Level::Warn,
                    "config.init.exists",
                    &format!("Config already exists: {}", path.display()),
                    None,
                );
            } else {
                BingConfig::default().save_to(&path)?;
                emit(
                    Level::Success,
                    "config.init.created",
                    &format!("Wrote default config to {}", path.display()),
                    None,
                );
            }
        }
    }
    Ok(0)
}
