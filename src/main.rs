use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    collections::HashMap,
    fs, io,
    path::PathBuf,
    time::Duration,
};
use tracing::debug;

/// Video-frame retrieval TUI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging to frametui.log in the temp directory
    #[arg(short, long)]
    debug: bool,

    /// Path to config file (default: ~/.config/frametui/config.yaml)
    #[arg(short, long)]
    config: Option<String>,
}

mod api;
mod app;
mod config;
mod handlers;
mod logic;
mod model;
mod services;
mod ui;
mod utils;

use api::RetrievalClient;
use config::Config;
use services::images::ImageState;
use services::poll::PollTask;

pub struct App {
    pub model: model::Model,

    client: RetrievalClient,
    api_tx: tokio::sync::mpsc::UnboundedSender<services::api::ApiRequest>,
    api_rx: tokio::sync::mpsc::UnboundedReceiver<services::api::ApiResponse>,
    image_tx: tokio::sync::mpsc::UnboundedSender<(String, ImageState)>,
    image_rx: tokio::sync::mpsc::UnboundedReceiver<(String, ImageState)>,
    player_tick_tx: tokio::sync::mpsc::UnboundedSender<f64>,
    player_tick_rx: tokio::sync::mpsc::UnboundedReceiver<f64>,

    image_picker: Option<ratatui_image::picker::Picker>,
    /// Thumbnail protocol states keyed by image URL (protocols are not
    /// Clone, so they live outside the Model)
    image_state_map: HashMap<String, ImageState>,

    /// Abort-on-drop guard for the playback poll; Some exactly while the
    /// scrubber is playing
    player_poll: Option<PollTask>,

    keyframe_base: String,
    export_dir: PathBuf,
}

impl App {
    fn new(config: Config) -> Result<Self> {
        let client = RetrievalClient::new(config.base_url.clone());
        let keyframe_base = config.keyframe_base();

        let export_dir = match &config.export_dir {
            Some(dir) => PathBuf::from(dir),
            None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        };

        let (api_tx, api_rx) = services::api::spawn_api_service(client.clone());
        let (image_tx, image_rx) = tokio::sync::mpsc::unbounded_channel();
        let (player_tick_tx, player_tick_rx) = tokio::sync::mpsc::unbounded_channel();

        let image_picker = if config.image_preview_enabled {
            Some(build_picker(&config.image_protocol))
        } else {
            debug!("image preview disabled in config");
            None
        };

        let mut app = App {
            model: model::Model::new(),
            client,
            api_tx,
            api_rx,
            image_tx,
            image_rx,
            player_tick_tx,
            player_tick_rx,
            image_picker,
            image_state_map: HashMap::new(),
            player_poll: None,
            keyframe_base,
            export_dir,
        };

        app.request_startup_data();
        Ok(app)
    }
}

fn build_picker(protocol: &str) -> ratatui_image::picker::Picker {
    use ratatui_image::picker::ProtocolType;

    let mut picker = match ratatui_image::picker::Picker::from_query_stdio() {
        Ok(p) => p,
        Err(e) => {
            debug!(error = %e, "terminal graphics query failed, using fallback font size");
            ratatui_image::picker::Picker::from_fontsize((8, 16))
        }
    };

    match protocol.to_lowercase().as_str() {
        "auto" => {}
        "iterm2" => picker.set_protocol_type(ProtocolType::Iterm2),
        "kitty" => picker.set_protocol_type(ProtocolType::Kitty),
        "sixel" => picker.set_protocol_type(ProtocolType::Sixel),
        "halfblocks" => picker.set_protocol_type(ProtocolType::Halfblocks),
        unknown => {
            debug!(unknown, "unknown image protocol, keeping auto-detected");
        }
    }

    picker
}

/// Determine the config file path with fallback logic
fn get_config_path(cli_path: Option<String>) -> Result<PathBuf> {
    if let Some(path) = cli_path {
        let p = PathBuf::from(&path);
        if p.exists() {
            return Ok(p);
        } else {
            anyhow::bail!("Config file not found at specified path: {}", path);
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("frametui").join("config.yaml");
        if config_path.exists() {
            return Ok(config_path);
        }
    }

    let local_config = PathBuf::from("config.yaml");
    if local_config.exists() {
        return Ok(local_config);
    }

    let expected_path = if let Some(config_dir) = dirs::config_dir() {
        config_dir
            .join("frametui")
            .join("config.yaml")
            .display()
            .to_string()
    } else {
        "~/.config/frametui/config.yaml".to_string()
    };

    anyhow::bail!(
        "Config file not found. Expected locations:\n\
         1. {} (preferred)\n\
         2. ./config.yaml (fallback)\n\
         \n\
         Use --config <path> to specify a custom location.",
        expected_path
    )
}

fn init_logging() -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let appender = tracing_appender::rolling::never(std::env::temp_dir(), "frametui.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("frametui=debug")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // hold the guard so buffered log lines flush on exit
    let _log_guard = if args.debug { Some(init_logging()?) } else { None };

    let config_path = get_config_path(args.config)?;
    debug!(path = %config_path.display(), "loading config");

    let config_str = fs::read_to_string(&config_path)?;
    let config: Config = serde_yaml::from_str(&config_str)?;

    let mut app = App::new(config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        if app.model.ui.should_dismiss_toast() {
            app.model.ui.toast = None;
        }

        if app.model.ui.should_quit {
            break;
        }

        // Process API responses (non-blocking)
        while let Ok(response) = app.api_rx.try_recv() {
            handlers::handle_api_response(app, response);
        }

        // Process finished thumbnail loads (non-blocking)
        while let Ok((url, state)) = app.image_rx.try_recv() {
            app.image_state_map.insert(url, state);
        }

        // Advance simulated playback
        while let Ok(elapsed) = app.player_tick_rx.try_recv() {
            app.handle_player_tick(elapsed);
        }

        // Short poll keeps the playback clock and toasts fresh without
        // burning CPU when idle
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                handlers::handle_key(app, key)?;
            }
        }
    }

    Ok(())
}
