use std::path::PathBuf;

use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::{
    audio::AudioTransport,
    chrome::{self, Navbar},
    config::Config,
    page::PlayerPage,
    playlist::{scan_directory, Playlist},
    theme::{next_theme, theme},
    transport::{LogTransport, SeekTransport},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Dashboard shell: owns the navbar flags and hosts at most one player page.
pub struct Shell {
    navbar: Navbar,
    config: Config,
    config_dir: PathBuf,
    server: String,
    file: Option<PathBuf>,
    library: Option<PathBuf>,
    page: Option<PlayerPage>,
    // Terminal area of the last draw.
    screen: Option<Rect>,
}

impl Shell {
    pub fn new(
        config: Config,
        config_dir: PathBuf,
        server: String,
        file: Option<PathBuf>,
        library: Option<PathBuf>,
    ) -> Self {
        Shell {
            navbar: Navbar::default(),
            config,
            config_dir,
            server,
            file,
            library,
            page: None,
            screen: None,
        }
    }

    #[cfg(test)]
    pub fn navbar(&self) -> &Navbar {
        &self.navbar
    }

    #[cfg(test)]
    pub fn page(&self) -> Option<&PlayerPage> {
        self.page.as_ref()
    }

    fn transport(&self) -> Box<dyn SeekTransport> {
        if let Some(path) = &self.file {
            match AudioTransport::open(path) {
                Ok(t) => return Box::new(t),
                Err(e) => log::warn!("falling back to remote transport, {}: {e}", path.display()),
            }
        }
        Box::new(LogTransport::new(self.server.clone()))
    }

    pub fn open_player(&mut self) {
        if self.page.is_some() {
            return;
        }
        let items = self.library.as_deref().map(scan_directory).unwrap_or_default();
        let page = PlayerPage::mount(
            self.server.clone(),
            self.transport(),
            Playlist::new(items),
            &self.config,
            &mut self.navbar,
        );
        self.page = Some(page);
    }

    pub fn close_player(&mut self) {
        if let Some(page) = self.page.take() {
            page.unmount(&mut self.navbar);
        }
    }

    fn cycle_theme(&mut self) {
        self.config.theme = next_theme(self.config.theme);
        log::debug!("theme set to {}", theme(self.config.theme).name);
        if let Err(e) = self.config.save(&self.config_dir) {
            log::warn!("cannot save config: {e}");
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Flow {
        if let Some(page) = self.page.as_mut() {
            if page.handle_key(code, &mut self.navbar) {
                return Flow::Continue;
            }
        }
        match code {
            KeyCode::Char('q') => {
                self.close_player();
                return Flow::Quit;
            }
            KeyCode::Esc | KeyCode::Char('h') => self.close_player(),
            KeyCode::Enter => self.open_player(),
            KeyCode::Char('t') => self.cycle_theme(),
            _ => {}
        }
        Flow::Continue
    }

    /// Presses on the overlay navbar belong to the navbar, not the page under it.
    fn covered_by_overlay(&self, event: &MouseEvent) -> bool {
        if !self.navbar.overlay() || !matches!(event.kind, MouseEventKind::Down(MouseButton::Left)) {
            return false;
        }
        self.screen
            .is_some_and(|screen| chrome::navbar_area(screen).contains(Position::new(event.column, event.row)))
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) {
        if self.covered_by_overlay(&event) {
            return;
        }
        if let Some(page) = self.page.as_mut() {
            page.handle_mouse(event, &mut self.navbar);
        }
    }

    pub fn tick(&mut self) {
        if let Some(page) = self.page.as_mut() {
            page.tick();
        }
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let theme = theme(self.config.theme);
        self.screen = Some(frame.area());
        let content = chrome::content_area(&self.navbar, frame.area());
        let servers = [self.server.clone()];
        let active = self.page.as_ref().map(PlayerPage::server);

        if self.navbar.docked() {
            chrome::draw_navbar(frame, &self.navbar, &servers, active, theme);
        }

        match self.page.as_mut() {
            Some(page) => page.draw(frame, content, &self.navbar, theme),
            None => {
                let lines = vec![
                    Line::from(Span::styled(
                        format!("Server {}", self.server),
                        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                    )),
                    Line::raw(""),
                    Line::raw("Enter: open player   t: theme   q: quit"),
                ];
                let home = Paragraph::new(lines).alignment(Alignment::Center).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .title(" Home "),
                );
                frame.render_widget(home, content);
            }
        }

        if self.navbar.overlay() {
            let active = self.page.as_ref().map(PlayerPage::server);
            chrome::draw_navbar(frame, &self.navbar, &servers, active, theme);
        }
    }
}
