use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::theme::Theme;

/// Flags that change what the help bar offers.
#[derive(Clone, Copy, Debug, Default)]
pub struct ControlHints {
    pub can_pause: bool,
    pub paused: bool,
    pub navbar_shown: bool,
    pub playlist_shown: bool,
    pub has_library: bool,
}

fn build_control_spans(hints: ControlHints, theme: &Theme) -> Vec<Span<'static>> {
    let key_style = Style::default().fg(Color::Black).bg(theme.secondary);
    let mut spans = vec![
        Span::styled(" Drag ", key_style),
        Span::raw(" Seek  "),
        Span::styled(" ←/→ ", key_style),
        Span::raw(" Step  "),
    ];
    if hints.can_pause {
        spans.extend([
            Span::styled(" Space ", key_style),
            Span::raw(if hints.paused { " Resume  " } else { " Pause  " }),
        ]);
    }
    spans.extend([
        Span::styled(" b ", key_style),
        Span::raw(if hints.navbar_shown { " Hide Navbar  " } else { " Navbar  " }),
        Span::styled(" p ", key_style),
        Span::raw(if hints.playlist_shown { " Hide Playlist  " } else { " Playlist  " }),
    ]);
    if hints.playlist_shown && hints.has_library {
        spans.extend([
            Span::styled(" ↑/↓ ", key_style),
            Span::raw(" Select  "),
            Span::styled(" [/] ", key_style),
            Span::raw(" Fold  "),
            Span::styled(" Enter ", key_style),
            Span::raw(" Play  "),
        ]);
    }
    spans.extend([
        Span::styled(" t ", key_style),
        Span::raw(" Theme  "),
        Span::styled(" Esc ", key_style),
        Span::raw(" Leave  "),
        Span::styled(" q ", key_style),
        Span::raw(" Quit"),
    ]);
    spans
}

/// Wrap spans into lines, breaking at group boundaries (every 2 spans = key + label).
fn wrap_lines(spans: Vec<Span<'static>>, inner_w: usize) -> Vec<Line<'static>> {
    if inner_w == 0 {
        return vec![Line::from(spans)];
    }
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut current_w: usize = 0;
    for chunk in spans.chunks(2) {
        let group_w: usize = Line::from(chunk.to_vec()).width();
        if current_w + group_w > inner_w && current_w > 0 {
            lines.push(Line::from(std::mem::take(&mut current)));
            current_w = 0;
        }
        current.extend(chunk.iter().cloned());
        current_w += group_w;
    }
    if !current.is_empty() {
        lines.push(Line::from(current));
    }
    lines
}

pub fn controls_height(width: u16, hints: ControlHints, theme: &Theme) -> u16 {
    let spans = build_control_spans(hints, theme);
    let inner_w = width.saturating_sub(2) as usize;
    let lines = wrap_lines(spans, inner_w);
    lines.len() as u16 + 2 // +2 for borders
}

pub fn draw_controls(frame: &mut Frame, area: Rect, hints: ControlHints, theme: &Theme) {
    let spans = build_control_spans(hints, theme);
    let inner_w = area.width.saturating_sub(2) as usize;
    let lines = wrap_lines(spans, inner_w);
    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(" Controls "),
    );
    frame.render_widget(help, area);
}
