//! guia-lenhador - the woodcutter's guide in the terminal
//!
//! Shows the timber table with a remembered "plantable" filter and
//! sortable numeric columns. Uses the Component Architecture pattern from
//! ratatui.

mod action;
mod app;
mod binder;
mod component;
mod components;
mod config;
mod error;
mod logging;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::binder::GuideBinder;
use crate::component::Component;
use crate::config::Config;
use crate::model::table::Table;
use crate::services::{
    default_table, load_table, JsonFileStore, KeyValueStore, PreferenceStore, UnavailableStore,
};
use crate::tui::Tui;
use anyhow::Result;
use clap::Parser;
use crossterm::event::Event;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "guia-lenhador")]
#[command(about = "Filterable, sortable timber table from the Guia do Lenhador", long_about = None)]
struct Cli {
    /// Table to show (JSON, YAML or CSV); the built-in guide by default
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Directory holding config.json and the remembered filter
    #[arg(long)]
    state_dir: Option<PathBuf>,

    /// Start without the plantable filter control
    #[arg(long)]
    no_filter_control: bool,
}

fn main() -> Result<()> {
    logging::init_tracing();
    let cli = Cli::parse();

    let mut app = build_app(&cli);
    app.init()?;

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(250));
    tui.enter()?;

    let result = run_app(&mut tui, &mut app);

    tui.exit()?;

    if let Err(err) = result {
        error!(error = %err, "guide exited with an error");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

/// Wire config, table and preference storage into a ready App
fn build_app(cli: &Cli) -> App {
    let state_dir = cli.state_dir.clone().or_else(Config::config_dir);

    let mut config = match state_dir.as_deref() {
        Some(dir) => load_config(dir),
        None => Config::default(),
    };
    if cli.no_filter_control {
        config.filter_control = false;
    }

    let data_file = cli
        .file
        .clone()
        .or_else(|| config.data_file.as_ref().map(PathBuf::from));
    let (table, load_error) = match read_table(data_file.as_deref()) {
        Ok(table) => (Some(table), None),
        Err(e) => {
            error!(error = %e, "could not load table");
            (None, Some(format!("{:#}", e)))
        }
    };

    let backend: Box<dyn KeyValueStore> = match state_dir.as_deref() {
        Some(dir) => {
            let store = JsonFileStore::in_dir(dir);
            debug!(path = %store.path().display(), "remembering filter preference");
            Box::new(store)
        }
        None => Box::new(UnavailableStore),
    };

    let mut binder = GuideBinder::new(table, &config, PreferenceStore::new(backend));
    binder.initialize();
    info!(
        rows = binder.table().map_or(0, Table::row_count),
        filter_control = config.filter_control,
        "guide ready"
    );

    App::new(binder, load_error)
}

/// Config from `dir`; a broken file is left untouched and defaults are used
fn load_config(dir: &Path) -> Config {
    match Config::load_from(dir) {
        Ok(Some(config)) => config,
        Ok(None) => {
            // First run: leave an editable config behind
            let config = Config::default();
            if let Err(e) = config.save_to(dir) {
                warn!(error = %e, "could not write default config");
            }
            config
        }
        Err(e) => {
            warn!(error = %format!("{:#}", e), "ignoring config, using defaults");
            Config::default()
        }
    }
}

fn read_table(path: Option<&Path>) -> Result<Table> {
    let table = match path {
        Some(path) => load_table(path)?,
        None => default_table()?,
    };
    Ok(table)
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                error!(error = %e, "draw failed");
            }
        })?;

        if let Some(event) = tui.next_event()? {
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Mouse(mouse) => app.handle_mouse_event(mouse)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // Action might produce a follow-up action
            let mut current_action = action;
            while let Some(a) = current_action {
                current_action = app.update(a)?;
            }
        } else {
            app.update(Action::Tick)?;
        }
    }

    Ok(())
}
