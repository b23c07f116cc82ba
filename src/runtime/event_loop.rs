use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::Player;
use crate::audio::AudioPlayer;
use crate::config;
use crate::ui::{self, Hit, Pane, Regions, TuiView};

type TuiPlayer = Player<AudioPlayer, TuiView>;

/// State tracked by the runtime event loop across iterations.
#[derive(Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

/// Main terminal event loop: refreshes progress, draws, and dispatches input.
/// Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    player: &mut TuiPlayer,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        player.on_progress();

        let mut regions = Regions::default();
        terminal.draw(|f| {
            regions = ui::draw(f, player.view(), &settings.ui, &settings.controls);
        })?;
        player.view_mut().regions = regions;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key_event(key, settings, player, state) {
                        break;
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(mouse, player),
                _ => {}
            }
        }
    }

    Ok(())
}

fn quit(settings: &config::Settings, player: &TuiPlayer) -> bool {
    player
        .output()
        .quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
    true
}

/// Handle a key press. Returns `true` when the app should exit.
fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    player: &mut TuiPlayer,
    state: &mut EventLoopState,
) -> bool {
    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }

    let seek_step = f64::from(settings.controls.seek_step_percent);
    let volume_step = i16::from(settings.controls.volume_step);

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return quit(settings, player);
        }
        KeyCode::Char('q') => return quit(settings, player),
        KeyCode::Tab => player.view_mut().switch_focus(),
        KeyCode::Char('b') => player.view_mut().toggle_side_panel(),
        KeyCode::Esc => player.view_mut().close_side_panel(),
        KeyCode::Char('j') | KeyCode::Down => player.view_mut().cursor_down(),
        KeyCode::Char('k') | KeyCode::Up => player.view_mut().cursor_up(),
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                player.view_mut().cursor_top();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => player.view_mut().cursor_bottom(),
        KeyCode::Enter => activate_cursor(player),
        KeyCode::Char('p') | KeyCode::Char(' ') => player.toggle_play_pause(),
        KeyCode::Char('l') | KeyCode::Char('n') => player.next(),
        KeyCode::Char('h') => player.previous(),
        KeyCode::Char('L') => player.seek_by(seek_step),
        KeyCode::Char('H') => player.seek_by(-seek_step),
        KeyCode::Char('+') | KeyCode::Char('=') => player.volume_by(volume_step),
        KeyCode::Char('-') => player.volume_by(-volume_step),
        KeyCode::Char('m') => player.toggle_mute(),
        _ => {}
    }

    false
}

/// Enter on the album list opens the album and hands focus to its playlist;
/// on the playlist it plays the track under the cursor.
fn activate_cursor(player: &mut TuiPlayer) {
    let view = player.view();
    match view.focus {
        Pane::Albums => {
            let index = view.album_cursor;
            player.activate_card(index);
            player.view_mut().switch_focus();
        }
        Pane::Playlist => {
            let index = view.track_cursor;
            player.activate_entry(index);
        }
    }
}

fn handle_mouse_event(mouse: MouseEvent, player: &mut TuiPlayer) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            match player.view().hit(mouse.column, mouse.row) {
                Some(Hit::Seek(fraction)) => player.seek(fraction),
                Some(Hit::Album(index)) => {
                    player.view_mut().focus = Pane::Albums;
                    player.activate_card(index);
                }
                Some(Hit::Track(index)) => {
                    player.view_mut().focus = Pane::Playlist;
                    player.activate_entry(index);
                }
                None => {}
            }
        }
        MouseEventKind::ScrollDown => player.view_mut().cursor_down(),
        MouseEventKind::ScrollUp => player.view_mut().cursor_up(),
        _ => {}
    }
}
