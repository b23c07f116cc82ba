use std::env;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::Player;
use crate::audio::AudioPlayer;
use crate::library::{Library, open_source};
use crate::logging;
use crate::ui::TuiView;

mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (mut settings, settings_warning) = settings::load_settings();

    // A positional argument overrides the configured media root.
    if let Some(root) = env::args().nth(1) {
        settings.source.root = root;
    }

    let _log_guard = match logging::init(&settings.logging) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("encore: file logging disabled: {e}");
            None
        }
    };
    if let Some(msg) = settings_warning {
        warn!("{msg}");
    }
    info!(root = %settings.source.root, "starting");

    let source = open_source(
        &settings.source.root,
        settings.source.http_timeout_secs.map(Duration::from_secs),
    );
    let library = Library::new(source, &settings.source);
    let audio_player = AudioPlayer::new(
        library.source(),
        f32::from(settings.audio.initial_volume) / 100.0,
    );
    let view = TuiView::new(settings.ui.show_side_panel);
    let mut player = Player::new(library, audio_player, view, &settings.audio);

    startup::prepare(&mut player);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = event_loop::EventLoopState::default();
    let run_result = event_loop::run(&mut terminal, &settings, &mut player, &mut state);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &run_result {
        warn!("event loop failed: {e}");
    }
    info!("shutdown");
    run_result
}
