use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::{
    audio::AudioTransport,
    capture::{Listeners, PointerEvent},
    chrome::{Navbar, NAVBAR_WIDTH},
    config::Config,
    controls::{self, ControlHints},
    playlist::{Playlist, PLAYLIST_WIDTH},
    progress::{self, format_duration},
    seek::{SeekController, Track},
    theme::Theme,
    transport::SeekTransport,
};

const BUTTON_WIDTH: u16 = 5;

/// The per-server player page.
pub struct PlayerPage {
    server: String,
    seek: SeekController,
    listeners: Listeners,
    step: f64,
    playlist_show: bool,
    playlist: Playlist,
    status: Option<String>,
    // Hit areas from the last draw; `None` until drawn.
    track_area: Option<Rect>,
    navbar_button: Option<Rect>,
    playlist_button: Option<Rect>,
}

impl PlayerPage {
    /// Hides the navbar while the player is shown.
    pub fn mount(
        server: impl Into<String>,
        transport: Box<dyn SeekTransport>,
        playlist: Playlist,
        config: &Config,
        navbar: &mut Navbar,
    ) -> Self {
        if navbar.show() {
            navbar.set_show(false);
        }

        let server = server.into();
        log::info!("player page for server {server} mounted");
        let listeners = Listeners::default();
        PlayerPage {
            seek: SeekController::new(transport, config.default_max, config.seek, listeners.clone()),
            server,
            listeners,
            step: config.step,
            playlist_show: false,
            playlist,
            status: None,
            track_area: None,
            navbar_button: None,
            playlist_button: None,
        }
    }

    /// Restores the navbar and drops any drag in progress with its listeners.
    pub fn unmount(self, navbar: &mut Navbar) {
        if !navbar.show() {
            navbar.set_show(true);
        }
        if navbar.absolute() {
            navbar.set_absolute(false);
        }
        log::info!("player page for server {} unmounted", self.server);
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    #[cfg(test)]
    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    #[cfg(test)]
    pub fn seek(&self) -> &SeekController {
        &self.seek
    }

    pub fn playlist_shown(&self) -> bool {
        self.playlist_show
    }

    pub fn toggle_navbar(&self, navbar: &mut Navbar) {
        if !navbar.absolute() {
            navbar.set_absolute(true);
        }
        navbar.set_show(!navbar.show());
    }

    pub fn toggle_playlist(&mut self) {
        self.playlist_show = !self.playlist_show;
    }

    fn track(&self) -> Option<Track> {
        self.track_area.and_then(progress::track_of)
    }

    pub fn handle_mouse(&mut self, event: MouseEvent, navbar: &mut Navbar) {
        let at = Position::new(event.column, event.row);
        let x = f64::from(event.column);
        let track = self.track();
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.navbar_button.is_some_and(|r| r.contains(at)) {
                    self.toggle_navbar(navbar);
                } else if self.playlist_button.is_some_and(|r| r.contains(at)) {
                    self.toggle_playlist();
                } else if self.track_area.is_some_and(|r| r.contains(at)) {
                    self.seek.begin_drag(x, track);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.listeners.is_attached(PointerEvent::Move) {
                    self.seek.on_drag_move(x, track);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.listeners.is_attached(PointerEvent::Release) {
                    self.seek.end_drag();
                }
            }
            _ => {}
        }
    }

    /// Returns `false` for keys the page does not use.
    pub fn handle_key(&mut self, code: KeyCode, navbar: &mut Navbar) -> bool {
        match code {
            KeyCode::Char('b') => self.toggle_navbar(navbar),
            KeyCode::Char('p') => self.toggle_playlist(),
            KeyCode::Char(' ') => self.seek.transport_mut().toggle_pause(),
            KeyCode::Right => self.seek.step(self.step),
            KeyCode::Left => self.seek.step(-self.step),
            KeyCode::Up if self.playlist_show => self.playlist.up(),
            KeyCode::Down if self.playlist_show => self.playlist.down(),
            KeyCode::Char('[') if self.playlist_show => self.playlist.fold(),
            KeyCode::Char(']') if self.playlist_show => self.playlist.unfold(),
            KeyCode::Enter if self.playlist_show => self.play_selected(),
            _ => return false,
        }
        true
    }

    fn play_selected(&mut self) {
        let Some(path) = self.playlist.selected_file() else {
            self.playlist.unfold();
            return;
        };
        match AudioTransport::open(&path) {
            Ok(transport) => {
                self.seek.replace_transport(Box::new(transport));
                self.status = None;
            }
            Err(e) => {
                log::warn!("cannot play {}: {e}", path.display());
                self.status = Some(format!("Cannot play {}: {e}", path.display()));
            }
        }
    }

    pub fn tick(&mut self) {
        self.seek.sync();
    }

    pub fn draw(&mut self, frame: &mut Frame, area: Rect, navbar: &Navbar, theme: &Theme) {
        let (main, side) = if self.playlist_show {
            let w = PLAYLIST_WIDTH.min(area.width / 2);
            let [main, side] = Layout::horizontal([Constraint::Min(0), Constraint::Length(w)]).areas(area);
            (main, Some(side))
        } else {
            (area, None)
        };

        let hints = ControlHints {
            can_pause: self.seek.transport().position().is_some(),
            paused: self.seek.transport().is_paused(),
            navbar_shown: navbar.show(),
            playlist_shown: self.playlist_show,
            has_library: !self.playlist.is_empty(),
        };
        let [buttons, info, bar, transport_row, help] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(controls::controls_height(main.width, hints, theme)),
        ])
        .areas(main);

        self.draw_buttons(frame, buttons, navbar, theme);
        self.draw_info(frame, info, theme);

        let progress = self.seek.progress();
        let track_area = progress::draw_progress(frame, bar, progress, self.seek.is_dragging(), theme);
        self.track_area = (track_area.width >= 2 && track_area.height > 0).then_some(track_area);

        self.draw_transport_row(frame, transport_row, theme);
        controls::draw_controls(frame, help, hints, theme);

        if let Some(side) = side {
            self.playlist.draw(frame, side, theme);
        }
    }

    fn draw_buttons(&mut self, frame: &mut Frame, area: Rect, navbar: &Navbar, theme: &Theme) {
        // Follows the overlay so it stays clickable.
        let nav_x = if navbar.overlay() {
            area.x.max(NAVBAR_WIDTH)
        } else {
            area.x
        };
        let nav = Rect::new(nav_x, area.y, BUTTON_WIDTH, area.height).intersection(area);
        let list = Rect::new(
            area.right().saturating_sub(BUTTON_WIDTH),
            area.y,
            BUTTON_WIDTH,
            area.height,
        )
        .intersection(area);

        let nav_icon = if navbar.show() { "✕" } else { "☰" };
        let list_icon = if self.playlist_show { "▶" } else { "◀" };
        for (rect, icon) in [(nav, nav_icon), (list, list_icon)] {
            frame.render_widget(
                Paragraph::new(icon).alignment(Alignment::Center).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(theme.dimmed)),
                ),
                rect,
            );
        }

        self.navbar_button = (!nav.is_empty()).then_some(nav);
        self.playlist_button = (!list.is_empty()).then_some(list);
    }

    fn draw_info(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let mut lines = vec![
            Line::from(Span::styled(
                format!("Player {}", self.server),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                self.seek.transport().label().to_string(),
                Style::default().fg(theme.dimmed),
            )),
        ];
        if let Some(status) = &self.status {
            lines.push(Line::from(Span::styled(status.clone(), Style::default().fg(Color::Red))));
        }
        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(" Now Playing "),
            ),
            area,
        );
    }

    fn draw_transport_row(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let transport = self.seek.transport();
        let state = if transport.position().is_none() {
            "Remote"
        } else if transport.is_paused() {
            "Paused"
        } else {
            "Playing"
        };
        let progress = self.seek.progress();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(Line::from(format!(" {} ", format_duration(progress.max))).alignment(Alignment::Right));
        let mut row = Line::from(vec![
            Span::raw(" ⏮  "),
            Span::styled(format!(" {state} "), Style::default().fg(Color::Black).bg(theme.accent)),
            Span::raw("  ⏭"),
        ]);
        if let Some(target) = self.seek.pending() {
            row.push_span(Span::styled(
                format!("   → {}", format_duration(target)),
                Style::default().fg(theme.secondary),
            ));
        }
        frame.render_widget(Paragraph::new(row).alignment(Alignment::Center).block(block), area);
    }
}
