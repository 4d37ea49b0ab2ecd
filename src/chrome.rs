use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme::Theme;

pub const NAVBAR_WIDTH: u16 = 22;

/// Navbar visibility flags. Owned by the shell, lent to whichever page is
/// mounted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Navbar {
    show: bool,
    absolute: bool,
}

impl Default for Navbar {
    fn default() -> Self {
        Navbar {
            show: true,
            absolute: false,
        }
    }
}

impl Navbar {
    pub fn show(&self) -> bool {
        self.show
    }

    pub fn set_show(&mut self, show: bool) {
        self.show = show;
    }

    pub fn absolute(&self) -> bool {
        self.absolute
    }

    pub fn set_absolute(&mut self, absolute: bool) {
        self.absolute = absolute;
    }

    /// Visible and taking layout space.
    pub fn docked(&self) -> bool {
        self.show && !self.absolute
    }

    /// Visible and drawn over the page.
    pub fn overlay(&self) -> bool {
        self.show && self.absolute
    }
}

/// Splits off the docked navbar column, if any.
pub fn content_area(navbar: &Navbar, area: Rect) -> Rect {
    if navbar.docked() {
        let w = NAVBAR_WIDTH.min(area.width);
        Rect::new(area.x + w, area.y, area.width - w, area.height)
    } else {
        area
    }
}

pub fn navbar_area(area: Rect) -> Rect {
    Rect::new(area.x, area.y, NAVBAR_WIDTH.min(area.width), area.height)
}

pub fn draw_navbar(frame: &mut Frame, navbar: &Navbar, servers: &[String], active: Option<&str>, theme: &Theme) {
    if !navbar.show() {
        return;
    }
    let area = navbar_area(frame.area());
    if navbar.overlay() {
        frame.render_widget(Clear, area);
    }

    let mut lines = vec![
        Line::from(Span::styled(
            " Dashboard",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
    ];
    for server in servers {
        let style = if active == Some(server.as_str()) {
            Style::default().fg(Color::Black).bg(theme.accent)
        } else {
            Style::default().fg(theme.text)
        };
        lines.push(Line::from(Span::styled(format!(" ♪ {server}"), style)));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if navbar.overlay() { theme.accent } else { theme.dimmed }))
        .title(" Servers ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn docked_navbar_takes_layout_space() {
        let area = Rect::new(0, 0, 80, 24);
        let navbar = Navbar::default();
        assert_eq!(content_area(&navbar, area), Rect::new(NAVBAR_WIDTH, 0, 80 - NAVBAR_WIDTH, 24));

        let overlay = Navbar { show: true, absolute: true };
        assert_eq!(content_area(&overlay, area), area);

        let hidden = Navbar { show: false, absolute: false };
        assert_eq!(content_area(&hidden, area), area);
    }

    #[test]
    fn narrow_terminal_does_not_underflow() {
        let area = Rect::new(0, 0, 10, 5);
        assert_eq!(content_area(&Navbar::default(), area).width, 0);
    }
}
