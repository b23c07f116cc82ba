//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`, and the
//! [`TuiView`] the controller renders into.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, LineGauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{PlayIcon, VolumeIcon};
use crate::config::{ControlsSettings, UiSettings};

mod view;

pub use view::*;

/// Key bindings shown in the footer, in display order. `None` entries are
/// filled from settings.
const CONTROLS: &[(&str, Option<&str>)] = &[
    ("j/k", Some("up/down")),
    ("tab", Some("albums/playlist")),
    ("enter", Some("open/play")),
    ("space/p", Some("play/pause")),
    ("h/l", Some("prev/next")),
    ("H/L", None),
    ("-/+", None),
    ("m", Some("mute")),
    ("b", Some("albums panel")),
    ("gg/G", Some("top/bottom")),
    ("q", Some("quit")),
];

/// Render the controls help text, incorporating configured step sizes.
fn controls_text(controls: &ControlsSettings) -> String {
    CONTROLS
        .iter()
        .map(|&(key, desc)| match desc {
            Some(desc) => format!("[{key}] {desc}"),
            None if key == "H/L" => format!("[{key}] seek -/+{}%", controls.seek_step_percent),
            None => format!("[{key}] volume -/+{}%", controls.volume_step),
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Compute the window of `total` rows to show in `height` rows so that
/// `selected` stays centered when possible.
///
/// Returns `(start, end, selected_pos_in_visible)`.
pub(crate) fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize, usize) {
    let sel_pos = selected.min(total.saturating_sub(1));
    if total <= height || height == 0 {
        return (0, total, sel_pos);
    }
    let half = height / 2;
    let mut start = sel_pos.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height, sel_pos - start)
}

/// A textual volume slider, e.g. `[■■■■□□□□□□]  40%`.
fn volume_bar(percent: u8, icon: VolumeIcon) -> String {
    let filled = usize::from(percent.min(100)) / 10;
    let mut bar = String::from("[");
    bar.push_str(&"■".repeat(filled));
    bar.push_str(&"□".repeat(10 - filled));
    bar.push(']');
    match icon {
        VolumeIcon::Unmuted => format!("vol {bar} {percent:>3}%"),
        VolumeIcon::Muted => format!("vol {bar} muted"),
    }
}

fn bordered(title: &str, focused: bool) -> Block<'_> {
    let block = Block::default().borders(Borders::ALL).title(title);
    if focused {
        block.border_style(Style::default().add_modifier(Modifier::BOLD))
    } else {
        block
    }
}

/// Render the entire UI into the provided `frame` and return the regions
/// used for mouse hit-testing.
pub fn draw(
    frame: &mut Frame,
    view: &TuiView,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) -> Regions {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(5),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" encore ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let mut regions = Regions {
        album_item_height: if ui_settings.show_descriptions { 2 } else { 1 },
        ..Regions::default()
    };

    // Body: optional album panel + playlist
    let playlist_area = if view.side_panel_open {
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(chunks[1]);
        draw_albums(frame, view, body[0], ui_settings, regions.album_item_height);
        regions.albums = Some(body[0]);
        body[1]
    } else {
        chunks[1]
    };
    draw_playlist(frame, view, playlist_area);
    regions.playlist = playlist_area;

    regions.seek_bar = draw_transport(frame, view, chunks[2]);

    let footer = Paragraph::new(controls_text(controls_settings))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);

    regions
}

fn draw_albums(
    frame: &mut Frame,
    view: &TuiView,
    area: Rect,
    ui_settings: &UiSettings,
    item_height: u16,
) {
    let height = usize::from(area.height.saturating_sub(2) / item_height.max(1));
    let (start, end, selected) = visible_window(view.albums.len(), height, view.album_cursor);

    let items: Vec<ListItem> = view.albums[start..end]
        .iter()
        .map(|card| {
            let active = view.active_album.as_deref() == Some(card.folder.as_str());
            let marker = if active { "♪ " } else { "  " };
            let mut lines = vec![Line::from(vec![
                Span::raw(marker),
                Span::raw(card.title.as_str()).bold(),
            ])];
            if ui_settings.show_descriptions {
                lines.push(Line::from(format!("  {}", card.description)).italic());
            }
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .block(bordered(" albums ", view.focus == Pane::Albums))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default();
    if !view.albums.is_empty() {
        state.select(Some(selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_playlist(frame: &mut Frame, view: &TuiView, area: Rect) {
    let height = usize::from(area.height.saturating_sub(2));
    let (start, end, selected) = visible_window(view.playlist.len(), height, view.track_cursor);

    let items: Vec<ListItem> = view.playlist[start..end]
        .iter()
        .enumerate()
        .map(|(offset, entry)| {
            let index = start + offset;
            if view.active_track == Some(index) {
                ListItem::new(format!("♪ {}", entry.label)).bold()
            } else {
                ListItem::new(format!("  {}", entry.label))
            }
        })
        .collect();

    let title = match view.active_album_title() {
        Some(album) => format!(" playlist: {album} "),
        None => " playlist ".to_string(),
    };
    let list = List::new(items)
        .block(bordered(&title, view.focus == Pane::Playlist))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if !view.playlist.is_empty() {
        state.select(Some(selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

/// Draw now-playing, seek bar, time and volume. Returns the cells the seek
/// bar line occupies.
fn draw_transport(frame: &mut Frame, view: &TuiView, area: Rect) -> Rect {
    let block = Block::bordered()
        .padding(Padding {
            left: 1,
            right: 1,
            top: 0,
            bottom: 0,
        })
        .title(" now playing ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let icon = match view.play_icon {
        PlayIcon::Play => "▶",
        PlayIcon::Pause => "⏸",
    };
    let title = if view.now_playing.is_empty() {
        "nothing loaded"
    } else {
        view.now_playing.as_str()
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw(format!("[{icon}] ")),
            Span::raw(title).bold(),
        ])),
        rows[0],
    );

    let gauge = LineGauge::default()
        .ratio((view.seek_percent / 100.0).clamp(0.0, 1.0))
        .label("");
    frame.render_widget(gauge, rows[1]);

    frame.render_widget(
        Paragraph::new(format!(
            "{}    {}",
            view.time_label,
            volume_bar(view.volume_slider, view.volume_icon)
        )),
        rows[2],
    );

    gauge_line_span(rows[1])
}

/// Cells a label-less `LineGauge` actually draws its line on: it keeps one
/// column after the (empty) label.
fn gauge_line_span(area: Rect) -> Rect {
    let offset = 1.min(area.width);
    Rect {
        x: area.x + offset,
        width: area.width - offset,
        ..area
    }
}
